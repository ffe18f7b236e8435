use ltxref::Catalog;
use ltxref::ltxref::fuzzy;
use std::path::PathBuf;

fn fixture_catalog() -> Catalog {
    let mut p = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("tests");
    p.push("fixtures");
    p.push("reference.xml");
    Catalog::from_path(&p).expect("open fixture")
}

fn command_names(commands: &[&ltxref::Command]) -> Vec<String> {
    commands.iter().map(|c| c.name.clone()).collect()
}

#[test]
fn add_keeps_collections_sorted() {
    let mut catalog = Catalog::default();
    for name in ["zeta", "Alpha", "beta"] {
        let command = catalog.add_command(name).unwrap();
        assert_eq!(command.name, name, "add returns the new entity");
    }
    let order: Vec<&str> = catalog.commands.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(order, vec!["Alpha", "beta", "zeta"]);

    for name in ["tabular", "Center", "array"] {
        catalog.add_environment(name).unwrap();
    }
    let order: Vec<&str> = catalog.environments.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(order, vec!["array", "Center", "tabular"]);

    for name in ["xcolor", "Babel", "amsmath"] {
        catalog.add_package(name).unwrap();
    }
    let order: Vec<&str> = catalog.packages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(order, vec!["amsmath", "Babel", "xcolor"]);

    for name in ["report", "Book", "article"] {
        catalog.add_document_class(name).unwrap();
    }
    let order: Vec<&str> = catalog
        .document_classes
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(order, vec!["article", "Book", "report"]);
}

#[test]
fn add_creates_empty_but_valid_entities() {
    let mut catalog = Catalog::default();
    let command = catalog.add_command("newcommand").unwrap();

    assert_eq!(command.level, "");
    assert!(command.label.is_empty());
    assert!(command.short_description.is_empty());
    assert!(command.description.is_empty());
    assert!(command.variants.is_empty());
}

#[test]
fn duplicate_names_are_accepted_and_newest_sorts_last() {
    let mut catalog = Catalog::default();
    catalog.add_command("item").unwrap().level = "first".to_string();
    catalog.add_command("Item").unwrap().level = "second".to_string();
    catalog.add_command("abc").unwrap();

    let levels: Vec<&str> = catalog.commands.iter().map(|c| c.level.as_str()).collect();
    assert_eq!(levels, vec!["", "first", "second"]);
}

#[test]
fn package_local_commands_stay_sorted() {
    let mut catalog = Catalog::default();
    let package = catalog.add_package("hyperref").unwrap();
    package.add_command("url").unwrap();
    package.add_command("Href").unwrap();
    package.add_command("autoref").unwrap();

    let package = catalog.get_package_with_name("hyperref").unwrap();
    let order: Vec<&str> = package.commands.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(order, vec!["autoref", "Href", "url"]);
    assert!(catalog.commands.is_empty(), "package commands are not kernel commands");
}

#[test]
fn tags_are_unioned_sorted_and_deduplicated() {
    let mut catalog = Catalog::default();
    catalog.add_command("sqrt").unwrap().label = vec!["math".to_string()];
    catalog.add_command("mbox").unwrap().label = vec!["text".to_string(), "math".to_string()];
    let package = catalog.add_package("graphicx").unwrap();
    package.add_command("scalebox").unwrap().label = vec!["box".to_string()];

    assert_eq!(catalog.tags(), vec!["box", "math", "text"]);
}

#[test]
fn tags_cover_every_entity_kind() {
    let catalog = fixture_catalog();
    assert_eq!(
        catalog.tags(),
        vec![
            "box",
            "font",
            "graphics",
            "koma",
            "layout",
            "math",
            "standard",
            "structure",
            "table",
            "text"
        ]
    );
}

#[test]
fn fuzzy_filter_uses_ordered_subsequences() {
    let mut catalog = Catalog::default();
    catalog.add_command("textbf").unwrap();
    catalog.add_command("textit").unwrap();

    assert_eq!(command_names(&catalog.filter_commands("tbf", "")), vec!["textbf"]);
    assert!(catalog.filter_commands("xbt", "").is_empty());
    assert_eq!(
        command_names(&catalog.filter_commands("TBF", "")),
        vec!["textbf"],
        "pattern is lowercased"
    );
    assert_eq!(
        command_names(&catalog.filter_commands("", "")),
        vec!["textbf", "textit"]
    );
}

#[test]
fn filter_matches_names_case_insensitively() {
    let catalog = fixture_catalog();
    assert_eq!(command_names(&catalog.filter_commands("sect", "")), vec!["Section"]);
}

#[test]
fn filter_ands_pattern_and_lowercased_tag() {
    let catalog = fixture_catalog();

    assert_eq!(
        command_names(&catalog.filter_commands("", "font")),
        vec!["textbf", "textit"]
    );
    assert_eq!(
        command_names(&catalog.filter_commands("", "FONT")),
        vec!["textbf", "textit"]
    );
    assert_eq!(command_names(&catalog.filter_commands("it", "font")), vec!["textit"]);
    assert!(catalog.filter_commands("it", "structure").is_empty());

    let environments = catalog.filter_environments("tab", "");
    assert_eq!(environments.len(), 1);
    assert_eq!(environments[0].name, "tabular");

    let packages = catalog.filter_packages("", "graphics");
    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0].name, "graphicx");

    let classes = catalog.filter_document_classes("art", "");
    assert_eq!(classes.len(), 2, "article and scrartcl both contain a, r, t");
    assert_eq!(classes[0].name, "article");
    assert_eq!(classes[1].name, "scrartcl");
}

#[test]
fn scoped_lookup_separates_kernel_and_package_commands() {
    let catalog = fixture_catalog();

    assert!(catalog.get_command_from_package("includegraphics", "").is_none());
    let include = catalog
        .get_command_from_package("includegraphics", "graphicx")
        .expect("package command");
    assert_eq!(include.name, "includegraphics");

    assert!(catalog.get_command_from_package("textbf", "graphicx").is_none());
    assert!(catalog.get_command_from_package("textbf", "nosuchpackage").is_none());
    assert!(catalog.get_command_from_package("textbf", "").is_some());
    assert!(
        catalog.get_command_from_package("TEXTBF", "").is_none(),
        "lookup is exact"
    );
}

#[test]
fn named_lookups_return_none_when_absent() {
    let catalog = fixture_catalog();

    assert_eq!(catalog.get_environment_with_name("tabular").unwrap().name, "tabular");
    assert!(catalog.get_environment_with_name("tabularx").is_none());
    assert_eq!(catalog.get_package_with_name("amsmath").unwrap().name, "amsmath");
    assert!(catalog.get_package_with_name("AMSMATH").is_none());
    assert_eq!(catalog.get_document_class("article").unwrap().name, "article");
    assert!(catalog.get_document_class("memoir").is_none());
}

#[test]
fn with_tag_queries_match_exactly() {
    let catalog = fixture_catalog();

    let fonts = command_names(&catalog.get_commands_with_tag("font"));
    assert_eq!(fonts.len(), 2);
    assert!(fonts.contains(&"textbf".to_string()));
    assert!(fonts.contains(&"textit".to_string()));
    assert!(catalog.get_commands_with_tag("Font").is_empty());

    let boxes = command_names(&catalog.get_commands_with_tag("box"));
    assert_eq!(boxes, vec!["rotatebox"], "package commands are included");

    assert_eq!(catalog.get_environments_with_tag("table")[0].name, "tabular");
    assert_eq!(catalog.get_packages_with_tag("math")[0].name, "amsmath");
    assert_eq!(catalog.get_documentclasses_with_tag("koma")[0].name, "scrartcl");
    assert!(catalog.get_documentclasses_with_tag("math").is_empty());
}

#[test]
fn fuzzy_match_primitive() {
    assert!(fuzzy::matches("", "anything"));
    assert!(fuzzy::matches("tbf", "textbf"));
    assert!(fuzzy::matches("TBF", "TextBF"));
    assert!(fuzzy::matches("textbf", "textbf"));
    assert!(!fuzzy::matches("xbt", "textbf"));
    assert!(!fuzzy::matches("textbff", "textbf"));
    assert!(fuzzy::matches("ü", "Übung"));
}
