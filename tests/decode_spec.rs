use ltxref::{ArgumentType, Catalog, LtxrefError};
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("tests");
    p.push("fixtures");
    p.push(name);
    p
}

fn load(name: &str) -> Catalog {
    let path = fixture_path(name);
    Catalog::from_path(&path).unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e))
}

fn names<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    items.into_iter().collect()
}

#[test]
fn reference_fixture_decodes_all_entity_kinds() {
    let catalog = load("reference.xml");

    assert_eq!(catalog.version, "1.2");
    assert_eq!(catalog.commands.len(), 3);
    assert_eq!(catalog.environments.len(), 2);
    assert_eq!(catalog.document_classes.len(), 2);
    assert_eq!(catalog.packages.len(), 2);
}

#[test]
fn top_level_collections_are_sorted_case_insensitively() {
    let catalog = load("reference.xml");

    assert_eq!(
        names(catalog.commands.iter().map(|c| c.name.as_str())),
        vec!["Section", "textbf", "textit"]
    );
    assert_eq!(
        names(catalog.environments.iter().map(|e| e.name.as_str())),
        vec!["center", "tabular"]
    );
    assert_eq!(
        names(catalog.document_classes.iter().map(|d| d.name.as_str())),
        vec!["article", "scrartcl"]
    );
    assert_eq!(
        names(catalog.packages.iter().map(|p| p.name.as_str())),
        vec!["amsmath", "graphicx"]
    );

    let graphicx = catalog.get_package_with_name("graphicx").expect("graphicx");
    assert_eq!(
        names(graphicx.commands.iter().map(|c| c.name.as_str())),
        vec!["includegraphics", "rotatebox"]
    );
}

#[test]
fn command_fields_and_variants_are_populated() {
    let catalog = load("reference.xml");

    let textit = catalog.get_command_from_package("textit", "").expect("textit");
    assert_eq!(textit.level, "beginner");
    assert_eq!(textit.label, vec!["text", "font"]);
    assert_eq!(textit.short_description["en"], "Italic text.");
    assert_eq!(textit.short_description["de"], "Kursiver Text.");
    assert!(textit.description.is_empty());

    let textbf = catalog.get_command_from_package("textbf", "").expect("textbf");
    assert_eq!(
        textbf.description["en"],
        "Typesets its argument in a <b>bold</b> face."
    );
    assert_eq!(textbf.variants[0].description["en"], "The usual form.");

    let section = catalog.get_command_from_package("Section", "").expect("Section");
    assert_eq!(section.level, "expert");
    assert_eq!(section.variants.len(), 2);
    assert_eq!(section.variants[0].name, "");
    assert_eq!(section.variants[1].name, "*");

    let first = &section.variants[0].arguments;
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].name, "short title");
    assert!(first[0].optional);
    assert_eq!(first[0].kind, ArgumentType::OptionalSingle);
    assert!(!first[1].optional);
    assert_eq!(first[1].kind, ArgumentType::MandatorySingle);
}

#[test]
fn absent_level_decodes_as_empty() {
    let catalog = load("reference.xml");

    let textbf = catalog.get_command_from_package("textbf", "").expect("textbf");
    assert_eq!(textbf.level, "");
    let center = catalog.get_environment_with_name("center").expect("center");
    assert_eq!(center.level, "");
    let amsmath = catalog.get_package_with_name("amsmath").expect("amsmath");
    assert_eq!(amsmath.level, "");
}

#[test]
fn packages_nest_options_and_commands() {
    let catalog = load("reference.xml");
    let graphicx = catalog.get_package_with_name("graphicx").expect("graphicx");

    assert_eq!(graphicx.loads_packages, vec!["keyval", "graphics"]);
    assert_eq!(graphicx.options.len(), 1);
    assert_eq!(graphicx.options[0].name, "draft");
    assert!(!graphicx.options[0].default);

    let include = catalog
        .get_command_from_package("includegraphics", "graphicx")
        .expect("includegraphics");
    let arguments = &include.variants[0].arguments;
    assert_eq!(arguments[0].kind, ArgumentType::OptionalList);
    assert_eq!(arguments[1].kind, ArgumentType::MandatorySingle);
}

#[test]
fn document_classes_nest_option_groups() {
    let catalog = load("reference.xml");
    let article = catalog.get_document_class("article").expect("article");

    assert_eq!(article.option_groups.len(), 2);
    let paper = &article.option_groups[0];
    assert_eq!(paper.name, "paper");
    assert_eq!(paper.short_description["en"], "Paper size");
    assert_eq!(paper.options.len(), 2);
    assert!(!paper.options[0].default);
    assert!(paper.options[1].default);
    assert_eq!(paper.options[1].description["en"], "The default size.");

    let fonts = &article.option_groups[1];
    assert_eq!(fonts.name, "");
    assert_eq!(
        names(fonts.options.iter().map(|o| o.name.as_str())),
        vec!["10pt", "11pt"]
    );
    assert!(fonts.options[0].short_description.is_empty());
}

#[test]
fn repeated_language_blocks_keep_the_last() {
    let catalog = load("legacy.xml");
    let hbox = catalog.get_command_from_package("hbox", "").expect("hbox");

    assert_eq!(hbox.short_description.len(), 1);
    assert_eq!(hbox.short_description["en"], "Second.");
}

#[test]
fn cdata_and_nested_markup_are_kept_as_text() {
    let catalog = load("legacy.xml");
    let hbox = catalog.get_command_from_package("hbox", "").expect("hbox");

    assert_eq!(hbox.description["en"], "Use <b>with care</b> & thought.");
    assert_eq!(hbox.description["de"], "Eine <em>Box</em>.");
}

#[test]
fn unknown_elements_attributes_and_tokens_are_ignored() {
    let catalog = load("legacy.xml");
    assert_eq!(catalog.version, "0.9");

    let hbox = catalog.get_command_from_package("hbox", "").expect("hbox");
    assert_eq!(hbox.label, vec!["box"]);
    assert_eq!(hbox.level, "");

    let arguments = &hbox.variants[0].arguments;
    assert_eq!(arguments.len(), 2);
    assert_eq!(arguments[0].kind, ArgumentType::Unset);
    assert!(!arguments[0].optional, "only \"yes\" is true");
    assert_eq!(arguments[1].kind, ArgumentType::DimensionOrSpreadDimension);

    let figure = catalog.get_environment_with_name("figure").expect("figure");
    assert!(figure.label.is_empty());
    assert!(figure.short_description.is_empty());
}

#[test]
fn nameless_entities_are_dropped() {
    let catalog = load("legacy.xml");

    assert_eq!(catalog.commands.len(), 1);
    assert!(catalog.commands.iter().all(|c| !c.name.is_empty()));
    assert!(!catalog.tags().contains(&"orphan".to_string()));
}

#[test]
fn bogus_argument_type_is_not_an_error() {
    let xml = r#"<ltxref version="1"><command name="x"><variant><argument name="a" type="bogus"/></variant></command></ltxref>"#;
    let catalog = Catalog::from_bytes(xml.as_bytes()).expect("decode");

    let argument = &catalog.commands[0].variants[0].arguments[0];
    assert_eq!(argument.kind, ArgumentType::default());
    assert_eq!(argument.name, "a");
}

#[test]
fn root_without_namespace_is_accepted() {
    let xml = r#"<ltxref version="2"><environment name="itemize"/></ltxref>"#;
    let catalog = Catalog::from_bytes(xml.as_bytes()).expect("decode");

    assert_eq!(catalog.version, "2");
    assert_eq!(catalog.environments[0].name, "itemize");
}

#[test]
fn mismatched_end_tag_returns_partial_catalog_and_error() {
    let xml = r#"<ltxref version="3">
  <command name="zeta"></command>
  <command name="alpha"></command>
  <environment name="broken"><variant></environment>
</ltxref>"#;

    let (partial, err) = ltxref::read_partial(xml.as_bytes());
    assert!(matches!(err, Some(LtxrefError::Xml { .. })), "got {:?}", err);
    assert_eq!(partial.version, "3");
    assert_eq!(
        names(partial.commands.iter().map(|c| c.name.as_str())),
        vec!["alpha", "zeta"]
    );
    assert!(partial.environments.is_empty());

    assert!(Catalog::from_bytes(xml.as_bytes()).is_err());
}

#[test]
fn truncated_document_is_an_error() {
    let xml = r#"<ltxref version="1"><command name="x"><shortdescription lang="en">cut"#;

    match Catalog::from_bytes(xml.as_bytes()) {
        Err(LtxrefError::UnexpectedEof { element }) => assert_eq!(element, "shortdescription"),
        Err(LtxrefError::Xml { .. }) => {}
        other => panic!("expected an error, got {:?}", other),
    }
}

#[test]
fn empty_input_is_an_error() {
    assert!(Catalog::from_bytes(b"").is_err());
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Catalog::from_path(fixture_path("does-not-exist.xml")).unwrap_err();
    assert!(matches!(err, LtxrefError::Io(_)));
}

#[test]
fn nested_markup_stays_well_formed() {
    let xml = r#"<ltxref version="1">
  <command name="newline">
    <description lang="en">a<br/>b <b>1 &lt; 2</b></description>
  </command>
</ltxref>"#;
    let catalog = Catalog::from_bytes(xml.as_bytes()).unwrap();
    let description = &catalog.commands[0].description["en"];

    assert_eq!(description, "a<br/>b <b>1 &lt; 2</b>");
    assert_eq!(ltxref::ltxref::text::plain_text(description), "a\nb 1 < 2");
}
