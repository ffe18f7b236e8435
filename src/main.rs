use ltxref::{Catalog, TextOptions, TextRenderer};
use std::env;
use std::io::{self, Write};

const USAGE: &str = "Usage: ltxref <reference.xml> [--lang <LANG>] [--filter <PATTERN>] [--tag <TAG>] \
[--package <NAME>] [--show <NAME>] [--tags] [--export]";

/// Returns the value following `flag`, exiting if the flag is present without one.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let idx = args.iter().position(|arg| arg == flag)?;
    match args.get(idx + 1) {
        Some(value) => Some(value.as_str()),
        None => {
            eprintln!("ERROR: {} flag requires an argument.", flag);
            std::process::exit(1);
        }
    }
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|arg| arg == flag)
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1].starts_with("--") {
        eprintln!("{}", USAGE);
        std::process::exit(1);
    }

    let path = &args[1];
    let catalog = match Catalog::from_path(path) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("ERROR: Failed to read reference file {}", path);
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    let options = TextOptions {
        lang: flag_value(&args, "--lang").unwrap_or("en").to_string(),
        fallback_lang: Some("en".to_string()),
    };
    let renderer = TextRenderer::new(options);

    if let Err(e) = run(&args, &catalog, &renderer) {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &[String], catalog: &Catalog, renderer: &TextRenderer) -> ltxref::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if has_flag(args, "--export") {
        return catalog.write_to(&mut out);
    }

    if has_flag(args, "--tags") {
        for tag in catalog.tags() {
            writeln!(out, "{}", tag)?;
        }
        return Ok(());
    }

    let package = flag_value(args, "--package").unwrap_or("");

    if let Some(name) = flag_value(args, "--show") {
        if let Some(command) = catalog.get_command_from_package(name, package) {
            return renderer.write_command(&mut out, command);
        }
        if let Some(environment) = catalog.get_environment_with_name(name) {
            return renderer.write_environment(&mut out, environment);
        }
        if let Some(pkg) = catalog.get_package_with_name(name) {
            return renderer.write_package(&mut out, pkg);
        }
        if let Some(class) = catalog.get_document_class(name) {
            return renderer.write_document_class(&mut out, class);
        }
        writeln!(out, "Nothing named '{}' found.", name)?;
        return Ok(());
    }

    let pattern = flag_value(args, "--filter").unwrap_or("");
    let tag = flag_value(args, "--tag").unwrap_or("");

    if pattern.is_empty() && tag.is_empty() {
        return renderer.write_catalog(&mut out, catalog);
    }

    let mut selection = Catalog::new(catalog.version.clone());
    selection.commands = catalog.filter_commands(pattern, tag).into_iter().cloned().collect();
    selection.environments = catalog
        .filter_environments(pattern, tag)
        .into_iter()
        .cloned()
        .collect();
    selection.packages = catalog.filter_packages(pattern, tag).into_iter().cloned().collect();
    selection.document_classes = catalog
        .filter_document_classes(pattern, tag)
        .into_iter()
        .cloned()
        .collect();
    renderer.write_catalog(&mut out, &selection)
}
