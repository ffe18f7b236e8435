//! Streaming decoder for the reference XML format.
//!
//! The document is consumed token by token; no DOM is built. Each entity
//! element is handled by a dedicated sub-reader that takes its scalar fields
//! from attributes and then consumes children until its own end tag:
//!
//! ```text
//! ltxref
//! ├── command ─────────── variant ── argument
//! ├── environment ─────── variant ── argument
//! ├── documentclass ───── optiongroup ── classoption
//! └── package ─┬───────── packageoption
//!              └───────── command ── variant ── argument
//! ```
//!
//! `shortdescription` and `description` children may repeat; they are
//! merged into the owner's language map, the last one winning per language.
//! Unknown elements and attributes are skipped.

use std::collections::HashMap;
use std::io::BufRead;

use log::{debug, info, trace, warn};
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::attributes::*;
use crate::ltxref::types::argument::ArgumentType;
use crate::ltxref::types::error::{LtxrefError, Result};
use crate::ltxref::types::models::*;

/// Decodes a catalog, discarding any partial result on failure.
pub fn read<R: BufRead>(source: R) -> Result<Catalog> {
    match read_partial(source) {
        (catalog, None) => Ok(catalog),
        (_, Some(err)) => Err(err),
    }
}

/// Decodes a catalog and returns it together with the first error, if any.
///
/// When an error is returned the catalog holds whatever was complete at the
/// point of failure. It is sorted, but it must not be treated as valid.
pub fn read_partial<R: BufRead>(source: R) -> (Catalog, Option<LtxrefError>) {
    let mut catalog = Catalog::default();
    let mut decoder = Decoder::new(source);
    let outcome = decoder.read_catalog(&mut catalog);
    catalog.sort_entries();

    match outcome {
        Ok(()) => {
            info!(
                "Decoded catalog version '{}': {} commands, {} environments, {} packages, {} document classes",
                catalog.version,
                catalog.commands.len(),
                catalog.environments.len(),
                catalog.packages.len(),
                catalog.document_classes.len()
            );
            (catalog, None)
        }
        Err(err) => {
            warn!("Decoding stopped early: {}", err);
            (catalog, Some(err))
        }
    }
}

type Attributes = HashMap<String, String>;

fn attr(attrs: &Attributes, key: &str) -> String {
    attrs.get(key).cloned().unwrap_or_default()
}

fn local_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

struct Decoder<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
}

impl<R: BufRead> Decoder<R> {
    fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        // `<argument .../>` then arrives as a start/end pair like any other element.
        reader.config_mut().expand_empty_elements = true;
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    fn position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }

    fn next_event(&mut self) -> Result<Event<'static>> {
        self.buf.clear();
        match self.reader.read_event_into(&mut self.buf) {
            Ok(event) => Ok(event.into_owned()),
            Err(source) => Err(LtxrefError::Xml {
                position: self.reader.buffer_position() as u64,
                source,
            }),
        }
    }

    fn attributes(&self, start: &BytesStart<'_>) -> Result<Attributes> {
        start
            .attributes()
            .map(|attr_result| {
                let attr = attr_result.map_err(|e| LtxrefError::Attribute {
                    position: self.position(),
                    reason: e.to_string(),
                })?;
                let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
                let value = attr
                    .unescape_value()
                    .map_err(|e| LtxrefError::Attribute {
                        position: self.position(),
                        reason: format!("cannot unescape '{}': {}", key, e),
                    })?
                    .into_owned();
                Ok((key, value))
            })
            .collect()
    }

    fn read_catalog(&mut self, catalog: &mut Catalog) -> Result<()> {
        loop {
            match self.next_event()? {
                Event::Start(start) => match local_name(&start).as_str() {
                    ROOT => {
                        let attrs = self.attributes(&start)?;
                        catalog.version = attr(&attrs, ATTR_VERSION);
                        debug!("Root element found, version '{}'", catalog.version);
                    }
                    COMMAND => {
                        let command = self.read_command(&start)?;
                        push_named(&mut catalog.commands, command);
                    }
                    ENVIRONMENT => {
                        let environment = self.read_environment(&start)?;
                        push_named(&mut catalog.environments, environment);
                    }
                    DOCUMENTCLASS => {
                        let class = self.read_documentclass(&start)?;
                        push_named(&mut catalog.document_classes, class);
                    }
                    PACKAGE => {
                        let package = self.read_package(&start)?;
                        push_named(&mut catalog.packages, package);
                    }
                    // Wrapper elements are transparent; their entity children still count.
                    other => trace!("Descending into unknown element <{}>", other),
                },
                Event::End(end) if end.local_name().as_ref() == ROOT.as_bytes() => return Ok(()),
                Event::Eof => {
                    return Err(LtxrefError::UnexpectedEof {
                        element: ROOT.to_string(),
                    });
                }
                _ => {}
            }
        }
    }

    /// Consumes the children of `element` up to and including its end tag.
    ///
    /// `on_child` returns `false` for elements it does not handle; those are
    /// skipped with all their content.
    fn read_children<F>(&mut self, element: &str, mut on_child: F) -> Result<()>
    where
        F: FnMut(&mut Self, &str, &BytesStart<'static>) -> Result<bool>,
    {
        loop {
            match self.next_event()? {
                Event::Start(child) => {
                    let name = local_name(&child);
                    if !on_child(self, &name, &child)? {
                        trace!("Skipping unknown <{}> inside <{}>", name, element);
                        self.skip_element(&name)?;
                    }
                }
                // End names are checked by the tokenizer, so this is our own end tag.
                Event::End(_) => return Ok(()),
                Event::Text(text) => {
                    if !text.iter().all(u8::is_ascii_whitespace) {
                        trace!("Ignoring stray text inside <{}>", element);
                    }
                }
                Event::Eof => {
                    return Err(LtxrefError::UnexpectedEof {
                        element: element.to_string(),
                    });
                }
                _ => {}
            }
        }
    }

    fn skip_element(&mut self, element: &str) -> Result<()> {
        let mut depth = 1usize;
        while depth > 0 {
            match self.next_event()? {
                Event::Start(_) => depth += 1,
                Event::End(_) => depth -= 1,
                Event::Eof => {
                    return Err(LtxrefError::UnexpectedEof {
                        element: element.to_string(),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Reads the content of a `shortdescription` or `description` element.
    ///
    /// Character data is unescaped and CDATA is taken literally. If the
    /// element has nested children the whole content is returned as markup
    /// instead: tags are kept, character data stays escaped and childless
    /// elements are written self-closed.
    fn read_text(&mut self, element: &str) -> Result<String> {
        let mut plain = String::new();
        let mut markup = String::new();
        let mut has_children = false;
        let mut depth = 0usize;
        // Empty elements arrive expanded; an end tag right after its start collapses.
        let mut just_opened = false;
        loop {
            let event = self.next_event()?;
            let opened = matches!(event, Event::Start(_));
            match event {
                Event::Text(chunk) => {
                    let unescaped = chunk.unescape().map_err(|e| LtxrefError::Xml {
                        position: self.position(),
                        source: e.into(),
                    })?;
                    markup.push_str(&escape(&*unescaped));
                    plain.push_str(&unescaped);
                }
                Event::CData(chunk) => {
                    let literal = String::from_utf8_lossy(&chunk);
                    markup.push_str(&escape(&*literal));
                    plain.push_str(&literal);
                }
                Event::Start(start) => {
                    has_children = true;
                    depth += 1;
                    markup.push('<');
                    markup.push_str(&String::from_utf8_lossy(&start));
                    markup.push('>');
                }
                Event::End(end) => {
                    if depth == 0 {
                        return Ok(if has_children { markup } else { plain });
                    }
                    depth -= 1;
                    if just_opened {
                        markup.pop();
                        markup.push_str("/>");
                    } else {
                        markup.push_str("</");
                        markup.push_str(&String::from_utf8_lossy(&end));
                        markup.push('>');
                    }
                }
                Event::Eof => {
                    return Err(LtxrefError::UnexpectedEof {
                        element: element.to_string(),
                    });
                }
                _ => {}
            }
            just_opened = opened;
        }
    }

    /// Reads one language block and stores it in `target`.
    fn read_multilingual(
        &mut self,
        element: &str,
        start: &BytesStart<'_>,
        target: &mut Multilingual,
    ) -> Result<()> {
        let attrs = self.attributes(start)?;
        let lang = attr(&attrs, ATTR_LANG);
        let text = self.read_text(element)?;
        if target.insert(lang.clone(), text).is_some() {
            debug!("Repeated <{}> for language '{}', keeping the last", element, lang);
        }
        Ok(())
    }

    fn read_command(&mut self, start: &BytesStart<'_>) -> Result<Command> {
        let attrs = self.attributes(start)?;
        let mut command = Command::new(attr(&attrs, ATTR_NAME));
        command.level = attr(&attrs, ATTR_LEVEL);
        command.label = split_list(&attr(&attrs, ATTR_LABEL));

        self.read_children(COMMAND, |this, name, child| {
            match name {
                SHORTDESCRIPTION => {
                    this.read_multilingual(name, child, &mut command.short_description)?
                }
                DESCRIPTION => this.read_multilingual(name, child, &mut command.description)?,
                VARIANT => command.variants.push(this.read_variant(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        debug!("Decoded command '{}' ({} variants)", command.name, command.variants.len());
        Ok(command)
    }

    fn read_environment(&mut self, start: &BytesStart<'_>) -> Result<Environment> {
        let attrs = self.attributes(start)?;
        let mut environment = Environment::new(attr(&attrs, ATTR_NAME));
        environment.level = attr(&attrs, ATTR_LEVEL);
        environment.label = split_list(&attr(&attrs, ATTR_LABEL));

        self.read_children(ENVIRONMENT, |this, name, child| {
            match name {
                SHORTDESCRIPTION => {
                    this.read_multilingual(name, child, &mut environment.short_description)?
                }
                DESCRIPTION => {
                    this.read_multilingual(name, child, &mut environment.description)?
                }
                VARIANT => environment.variants.push(this.read_variant(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        debug!(
            "Decoded environment '{}' ({} variants)",
            environment.name,
            environment.variants.len()
        );
        Ok(environment)
    }

    fn read_variant(&mut self, start: &BytesStart<'_>) -> Result<Variant> {
        let attrs = self.attributes(start)?;
        let mut variant = Variant::new(attr(&attrs, ATTR_NAME));

        self.read_children(VARIANT, |this, name, child| {
            match name {
                ARGUMENT => variant.arguments.push(this.read_argument(child)?),
                DESCRIPTION => this.read_multilingual(name, child, &mut variant.description)?,
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(variant)
    }

    fn read_argument(&mut self, start: &BytesStart<'_>) -> Result<Argument> {
        let attrs = self.attributes(start)?;
        let token = attr(&attrs, ATTR_TYPE);
        let kind = ArgumentType::from_token(&token);
        if kind.is_unset() && !token.is_empty() {
            warn!("Unknown argument type '{}', leaving it unset", token);
        }
        let argument = Argument::new(
            attr(&attrs, ATTR_NAME),
            kind,
            parse_bool(&attr(&attrs, ATTR_OPTIONAL)),
        );
        // Arguments have no children, but tolerate any.
        self.read_children(ARGUMENT, |_, _, _| Ok(false))?;
        Ok(argument)
    }

    fn read_package(&mut self, start: &BytesStart<'_>) -> Result<Package> {
        let attrs = self.attributes(start)?;
        let mut package = Package::new(attr(&attrs, ATTR_NAME));
        package.level = attr(&attrs, ATTR_LEVEL);
        package.label = split_list(&attr(&attrs, ATTR_LABEL));
        package.loads_packages = split_list(&attr(&attrs, ATTR_LOADSPACKAGES));

        self.read_children(PACKAGE, |this, name, child| {
            match name {
                SHORTDESCRIPTION => {
                    this.read_multilingual(name, child, &mut package.short_description)?
                }
                DESCRIPTION => this.read_multilingual(name, child, &mut package.description)?,
                PACKAGEOPTION => {
                    let option = this.read_packageoption(child)?;
                    if option.name.is_empty() {
                        warn!("Skipping nameless package option in '{}'", package.name);
                    } else {
                        package.options.push(option);
                    }
                }
                COMMAND => {
                    let command = this.read_command(child)?;
                    push_named(&mut package.commands, command);
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        debug!(
            "Decoded package '{}' ({} commands, {} options)",
            package.name,
            package.commands.len(),
            package.options.len()
        );
        Ok(package)
    }

    fn read_packageoption(&mut self, start: &BytesStart<'_>) -> Result<PackageOption> {
        let attrs = self.attributes(start)?;
        let mut option = PackageOption::new(attr(&attrs, ATTR_NAME));
        option.default = parse_bool(&attr(&attrs, ATTR_DEFAULT));

        self.read_children(PACKAGEOPTION, |this, name, child| {
            match name {
                SHORTDESCRIPTION => {
                    this.read_multilingual(name, child, &mut option.short_description)?
                }
                DESCRIPTION => this.read_multilingual(name, child, &mut option.description)?,
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(option)
    }

    fn read_documentclass(&mut self, start: &BytesStart<'_>) -> Result<DocumentClass> {
        let attrs = self.attributes(start)?;
        let mut class = DocumentClass::new(attr(&attrs, ATTR_NAME));
        class.level = attr(&attrs, ATTR_LEVEL);
        class.label = split_list(&attr(&attrs, ATTR_LABEL));

        self.read_children(DOCUMENTCLASS, |this, name, child| {
            match name {
                SHORTDESCRIPTION => {
                    this.read_multilingual(name, child, &mut class.short_description)?
                }
                DESCRIPTION => this.read_multilingual(name, child, &mut class.description)?,
                OPTIONGROUP => class.option_groups.push(this.read_optiongroup(child)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        debug!(
            "Decoded document class '{}' ({} option groups)",
            class.name,
            class.option_groups.len()
        );
        Ok(class)
    }

    fn read_optiongroup(&mut self, start: &BytesStart<'_>) -> Result<OptionGroup> {
        let attrs = self.attributes(start)?;
        let mut group = OptionGroup {
            name: attr(&attrs, ATTR_NAME),
            ..OptionGroup::default()
        };

        self.read_children(OPTIONGROUP, |this, name, child| {
            match name {
                SHORTDESCRIPTION => {
                    this.read_multilingual(name, child, &mut group.short_description)?
                }
                CLASSOPTION => {
                    let option = this.read_classoption(child)?;
                    if option.name.is_empty() {
                        warn!("Skipping nameless class option");
                    } else {
                        group.options.push(option);
                    }
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(group)
    }

    fn read_classoption(&mut self, start: &BytesStart<'_>) -> Result<ClassOption> {
        let attrs = self.attributes(start)?;
        let mut option = ClassOption::new(attr(&attrs, ATTR_NAME));
        option.default = parse_bool(&attr(&attrs, ATTR_DEFAULT));

        self.read_children(CLASSOPTION, |this, name, child| {
            match name {
                SHORTDESCRIPTION => {
                    this.read_multilingual(name, child, &mut option.short_description)?
                }
                DESCRIPTION => this.read_multilingual(name, child, &mut option.description)?,
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(option)
    }
}

/// Appends a decoded entity unless it has no name.
fn push_named<T: Entry>(items: &mut Vec<T>, entity: T) {
    if entity.name().is_empty() {
        warn!("Skipping {} without a name", T::KIND);
    } else {
        items.push(entity);
    }
}
