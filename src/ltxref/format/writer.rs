//! Encoder for the reference XML format.
//!
//! Output layout:
//! - One root `ltxref` element in [`NAMESPACE`] carrying `version`
//! - Kernel commands, then environments, then document classes, then packages
//! - Language blocks written in ascending language-tag order, so the same
//!   catalog always yields the same bytes
//! - An empty `level` written as [`DEFAULT_LEVEL`](crate::DEFAULT_LEVEL)

use std::io::Write;

use log::{debug, info};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::attributes::*;
use crate::ltxref::types::error::Result;
use crate::ltxref::types::models::*;

/// Layout settings for the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Spaces per nesting level; `None` writes everything on one line.
    pub indent: Option<usize>,
    /// Whether to start with an `<?xml ...?>` declaration.
    pub declaration: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            indent: Some(2),
            declaration: true,
        }
    }
}

/// Encodes `catalog` into `sink` with the default layout.
pub fn write<W: Write>(catalog: &Catalog, sink: W) -> Result<()> {
    write_with(catalog, sink, &EncodeOptions::default())
}

/// Encodes `catalog` into `sink`.
///
/// # Errors
/// Fails only if the sink does.
pub fn write_with<W: Write>(catalog: &Catalog, sink: W, options: &EncodeOptions) -> Result<()> {
    let writer = match options.indent {
        Some(width) => Writer::new_with_indent(sink, b' ', width),
        None => Writer::new(sink),
    };
    let mut encoder = Encoder { writer };

    if options.declaration {
        encoder
            .writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    }
    encoder.write_catalog(catalog)?;

    let mut sink = encoder.writer.into_inner();
    sink.flush()?;

    info!(
        "Encoded catalog version '{}': {} commands, {} environments, {} packages, {} document classes",
        catalog.version,
        catalog.commands.len(),
        catalog.environments.len(),
        catalog.packages.len(),
        catalog.document_classes.len()
    );
    Ok(())
}

struct Encoder<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> Encoder<W> {
    fn start(&mut self, element: BytesStart<'_>) -> Result<()> {
        self.writer.write_event(Event::Start(element))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn empty(&mut self, element: BytesStart<'_>) -> Result<()> {
        self.writer.write_event(Event::Empty(element))?;
        Ok(())
    }

    /// One `element` per language, in ascending language order.
    fn write_multilingual(&mut self, element: &str, texts: &Multilingual) -> Result<()> {
        for (lang, text) in texts {
            let mut start = BytesStart::new(element);
            start.push_attribute((ATTR_LANG, lang.as_str()));
            // An indenting writer would put whitespace into an empty start/end pair.
            if text.is_empty() {
                self.empty(start)?;
            } else {
                self.start(start)?;
                self.writer.write_event(Event::Text(BytesText::new(text)))?;
                self.end(element)?;
            }
        }
        Ok(())
    }

    fn write_catalog(&mut self, catalog: &Catalog) -> Result<()> {
        let mut root = BytesStart::new(ROOT);
        root.push_attribute(("xmlns", NAMESPACE));
        root.push_attribute((ATTR_VERSION, catalog.version.as_str()));
        self.start(root)?;

        for command in &catalog.commands {
            self.write_command(command)?;
        }
        for environment in &catalog.environments {
            self.write_environment(environment)?;
        }
        for class in &catalog.document_classes {
            self.write_documentclass(class)?;
        }
        for package in &catalog.packages {
            self.write_package(package)?;
        }

        self.end(ROOT)
    }

    fn write_command(&mut self, command: &Command) -> Result<()> {
        debug!("Encoding command '{}'", command.name);
        let label = join_list(&command.label);
        let mut start = BytesStart::new(COMMAND);
        start.push_attribute((ATTR_NAME, command.name.as_str()));
        start.push_attribute((ATTR_LEVEL, effective_level(&command.level)));
        start.push_attribute((ATTR_LABEL, label.as_str()));
        self.start(start)?;

        self.write_multilingual(SHORTDESCRIPTION, &command.short_description)?;
        self.write_multilingual(DESCRIPTION, &command.description)?;
        for variant in &command.variants {
            self.write_variant(variant)?;
        }

        self.end(COMMAND)
    }

    fn write_environment(&mut self, environment: &Environment) -> Result<()> {
        debug!("Encoding environment '{}'", environment.name);
        let label = join_list(&environment.label);
        let mut start = BytesStart::new(ENVIRONMENT);
        start.push_attribute((ATTR_NAME, environment.name.as_str()));
        start.push_attribute((ATTR_LEVEL, effective_level(&environment.level)));
        start.push_attribute((ATTR_LABEL, label.as_str()));
        self.start(start)?;

        self.write_multilingual(SHORTDESCRIPTION, &environment.short_description)?;
        self.write_multilingual(DESCRIPTION, &environment.description)?;
        for variant in &environment.variants {
            self.write_variant(variant)?;
        }

        self.end(ENVIRONMENT)
    }

    fn write_variant(&mut self, variant: &Variant) -> Result<()> {
        let mut start = BytesStart::new(VARIANT);
        start.push_attribute((ATTR_NAME, variant.name.as_str()));
        self.start(start)?;

        for argument in &variant.arguments {
            self.write_argument(argument)?;
        }
        self.write_multilingual(DESCRIPTION, &variant.description)?;

        self.end(VARIANT)
    }

    fn write_argument(&mut self, argument: &Argument) -> Result<()> {
        let mut start = BytesStart::new(ARGUMENT);
        start.push_attribute((ATTR_NAME, argument.name.as_str()));
        start.push_attribute((ATTR_OPTIONAL, format_bool(argument.optional)));
        start.push_attribute((ATTR_TYPE, argument.kind.as_str()));
        self.empty(start)
    }

    fn write_package(&mut self, package: &Package) -> Result<()> {
        debug!("Encoding package '{}'", package.name);
        let label = join_list(&package.label);
        let loads = join_list(&package.loads_packages);
        let mut start = BytesStart::new(PACKAGE);
        start.push_attribute((ATTR_NAME, package.name.as_str()));
        start.push_attribute((ATTR_LEVEL, effective_level(&package.level)));
        start.push_attribute((ATTR_LABEL, label.as_str()));
        start.push_attribute((ATTR_LOADSPACKAGES, loads.as_str()));
        self.start(start)?;

        self.write_multilingual(SHORTDESCRIPTION, &package.short_description)?;
        self.write_multilingual(DESCRIPTION, &package.description)?;
        for option in &package.options {
            self.write_packageoption(option)?;
        }
        for command in &package.commands {
            self.write_command(command)?;
        }

        self.end(PACKAGE)
    }

    fn write_packageoption(&mut self, option: &PackageOption) -> Result<()> {
        let mut start = BytesStart::new(PACKAGEOPTION);
        start.push_attribute((ATTR_NAME, option.name.as_str()));
        start.push_attribute((ATTR_DEFAULT, format_bool(option.default)));
        self.start(start)?;

        self.write_multilingual(SHORTDESCRIPTION, &option.short_description)?;
        self.write_multilingual(DESCRIPTION, &option.description)?;

        self.end(PACKAGEOPTION)
    }

    fn write_documentclass(&mut self, class: &DocumentClass) -> Result<()> {
        debug!("Encoding document class '{}'", class.name);
        let label = join_list(&class.label);
        let mut start = BytesStart::new(DOCUMENTCLASS);
        start.push_attribute((ATTR_NAME, class.name.as_str()));
        start.push_attribute((ATTR_LEVEL, effective_level(&class.level)));
        start.push_attribute((ATTR_LABEL, label.as_str()));
        self.start(start)?;

        self.write_multilingual(SHORTDESCRIPTION, &class.short_description)?;
        self.write_multilingual(DESCRIPTION, &class.description)?;
        for group in &class.option_groups {
            self.write_optiongroup(group)?;
        }

        self.end(DOCUMENTCLASS)
    }

    fn write_optiongroup(&mut self, group: &OptionGroup) -> Result<()> {
        let mut start = BytesStart::new(OPTIONGROUP);
        if !group.name.is_empty() {
            start.push_attribute((ATTR_NAME, group.name.as_str()));
        }
        self.start(start)?;

        self.write_multilingual(SHORTDESCRIPTION, &group.short_description)?;
        for option in &group.options {
            self.write_classoption(option)?;
        }

        self.end(OPTIONGROUP)
    }

    fn write_classoption(&mut self, option: &ClassOption) -> Result<()> {
        let mut start = BytesStart::new(CLASSOPTION);
        start.push_attribute((ATTR_NAME, option.name.as_str()));
        start.push_attribute((ATTR_DEFAULT, format_bool(option.default)));
        self.start(start)?;

        self.write_multilingual(SHORTDESCRIPTION, &option.short_description)?;
        self.write_multilingual(DESCRIPTION, &option.description)?;

        self.end(CLASSOPTION)
    }
}
