//! Plain-text views of catalog entities.
//!
//! The renderer is configured once through [`TextOptions`] and holds no
//! global state. Descriptions may carry HTML-like markup; it is stripped
//! before printing.

use std::io::Write;
use std::sync::OnceLock;

use regex::Regex;

use super::types::argument::ArgumentType;
use super::types::error::Result;
use super::types::models::*;

static TAG_PATTERN: OnceLock<Regex> = OnceLock::new();
static BREAK_PATTERN: OnceLock<Regex> = OnceLock::new();

fn tag_regex() -> &'static Regex {
    TAG_PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").expect("Invalid markup regex pattern"))
}

fn break_regex() -> &'static Regex {
    BREAK_PATTERN.get_or_init(|| {
        Regex::new(r"(?i)<br\s*/?>|</p>").expect("Invalid line break regex pattern")
    })
}

/// Text followed by a rule of the same width.
///
/// Level 1 uses `=`, level 2 `-`, anything deeper `·`.
pub fn underline(text: &str, level: u8) -> String {
    let rule = match level {
        1 => "=",
        2 => "-",
        _ => "·",
    };
    format!("{}\n{}\n", text, rule.repeat(text.chars().count()))
}

/// How an argument of the given kind looks in a call sketch.
pub fn argument_sketch(kind: ArgumentType) -> &'static str {
    match kind {
        ArgumentType::OptionalSingle => "[...]",
        ArgumentType::OptionalList => "[...,...,...]",
        ArgumentType::MandatorySingle => "{...}",
        ArgumentType::MandatoryList => "{...,...,...}",
        ArgumentType::DimensionOrSpreadDimension => "to ‹dimen› [or] spread ‹dimen›",
        ArgumentType::Unset => "??",
    }
}

/// The 1-based argument number centred under its sketch.
///
/// Optional arguments are numbered in parentheses. When the width is odd
/// the extra space goes to the left.
pub fn placeholder(kind: ArgumentType, index: usize, optional: bool) -> String {
    let number = if optional {
        format!("({})", index + 1)
    } else {
        (index + 1).to_string()
    };
    let spare = argument_sketch(kind)
        .chars()
        .count()
        .saturating_sub(number.chars().count());
    let right = spare / 2;
    let left = spare - right;
    format!("{}{}{}", " ".repeat(left), number, " ".repeat(right))
}

/// Strips markup and unescapes entities.
pub fn plain_text(description: &str) -> String {
    let with_breaks = break_regex().replace_all(description, "\n");
    let stripped = tag_regex().replace_all(&with_breaks, "");
    let unescaped = match quick_xml::escape::unescape(&stripped) {
        Ok(text) => text.into_owned(),
        Err(_) => stripped.to_string(),
    };
    unescaped
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Language selection for the text views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOptions {
    pub lang: String,
    /// Used when an entity has no text in `lang`.
    pub fallback_lang: Option<String>,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            fallback_lang: None,
        }
    }
}

/// Renders entities as fixed-width text.
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    options: TextOptions,
}

impl TextRenderer {
    pub fn new(options: TextOptions) -> Self {
        Self { options }
    }

    /// Text in the configured language, then the fallback, else empty.
    pub fn localized<'a>(&self, texts: &'a Multilingual) -> &'a str {
        texts
            .get(&self.options.lang)
            .or_else(|| {
                self.options
                    .fallback_lang
                    .as_ref()
                    .and_then(|lang| texts.get(lang))
            })
            .map(String::as_str)
            .unwrap_or_default()
    }

    fn write_paragraph(&self, out: &mut impl Write, texts: &Multilingual) -> Result<()> {
        let text = plain_text(self.localized(texts));
        if !text.is_empty() {
            writeln!(out, "{}\n", text)?;
        }
        Ok(())
    }

    /// Writes the call sketch, the numbering line and the argument names.
    fn write_variant(&self, out: &mut impl Write, prefix: &str, variant: &Variant) -> Result<()> {
        let sketch: String = variant
            .arguments
            .iter()
            .map(|argument| argument_sketch(argument.kind))
            .collect();
        let numbers: String = variant
            .arguments
            .iter()
            .enumerate()
            .map(|(i, argument)| placeholder(argument.kind, i, argument.optional))
            .collect();

        writeln!(out, "{}{}", prefix, sketch)?;
        if !variant.arguments.is_empty() {
            let indent = " ".repeat(prefix.chars().count());
            writeln!(out, "{}{}", indent, numbers.trim_end())?;
            for (i, argument) in variant.arguments.iter().enumerate() {
                if argument.optional {
                    writeln!(out, "  ({}): {}", i + 1, argument.name)?;
                } else {
                    writeln!(out, "  {}: {}", i + 1, argument.name)?;
                }
            }
        }
        writeln!(out)?;
        self.write_paragraph(out, &variant.description)
    }

    pub fn write_command(&self, out: &mut impl Write, command: &Command) -> Result<()> {
        write!(out, "{}", underline(&format!("\\{}", command.name), 1))?;
        writeln!(out)?;
        self.write_paragraph(out, &command.short_description)?;
        for variant in &command.variants {
            let prefix = format!("\\{}{}", command.name, variant.name);
            self.write_variant(out, &prefix, variant)?;
        }
        self.write_paragraph(out, &command.description)
    }

    pub fn write_environment(&self, out: &mut impl Write, environment: &Environment) -> Result<()> {
        write!(out, "{}", underline(&environment.name, 1))?;
        writeln!(out)?;
        self.write_paragraph(out, &environment.short_description)?;
        for variant in &environment.variants {
            let prefix = format!("\\begin{{{}{}}}", environment.name, variant.name);
            self.write_variant(out, &prefix, variant)?;
            writeln!(out, "  ...")?;
            writeln!(out, "\\end{{{}{}}}\n", environment.name, variant.name)?;
        }
        self.write_paragraph(out, &environment.description)
    }

    pub fn write_package(&self, out: &mut impl Write, package: &Package) -> Result<()> {
        write!(out, "{}", underline(&package.name, 1))?;
        writeln!(out)?;
        self.write_paragraph(out, &package.short_description)?;
        if !package.loads_packages.is_empty() {
            writeln!(out, "Loads: {}\n", package.loads_packages.join(", "))?;
        }
        self.write_paragraph(out, &package.description)?;

        if !package.options.is_empty() {
            write!(out, "{}", underline("Options", 2))?;
            for option in &package.options {
                let marker = if option.default { " (default)" } else { "" };
                writeln!(
                    out,
                    "  {}{}: {}",
                    option.name,
                    marker,
                    plain_text(self.localized(&option.short_description))
                )?;
            }
            writeln!(out)?;
        }

        if !package.commands.is_empty() {
            write!(out, "{}", underline("Commands", 2))?;
            for command in &package.commands {
                writeln!(
                    out,
                    "  \\{}: {}",
                    command.name,
                    plain_text(self.localized(&command.short_description))
                )?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    pub fn write_document_class(&self, out: &mut impl Write, class: &DocumentClass) -> Result<()> {
        write!(out, "{}", underline(&class.name, 1))?;
        writeln!(out)?;
        self.write_paragraph(out, &class.short_description)?;
        self.write_paragraph(out, &class.description)?;

        for group in &class.option_groups {
            let mut title = plain_text(self.localized(&group.short_description));
            if title.is_empty() {
                title = if group.name.is_empty() {
                    "Options".to_string()
                } else {
                    group.name.clone()
                };
            }
            write!(out, "{}", underline(&title, 2))?;
            for option in &group.options {
                let marker = if option.default { " (default)" } else { "" };
                writeln!(
                    out,
                    "  {}{}: {}",
                    option.name,
                    marker,
                    plain_text(self.localized(&option.short_description))
                )?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// One line per entity, grouped by kind.
    pub fn write_catalog(&self, out: &mut impl Write, catalog: &Catalog) -> Result<()> {
        let title = if catalog.version.is_empty() {
            "LaTeX reference".to_string()
        } else {
            format!("LaTeX reference (version {})", catalog.version)
        };
        write!(out, "{}", underline(&title, 1))?;
        writeln!(out)?;

        let commands = catalog
            .commands
            .iter()
            .map(|c| (format!("\\{}", c.name), &c.short_description));
        self.write_section(out, "Commands", commands)?;

        let environments = catalog
            .environments
            .iter()
            .map(|e| (e.name.clone(), &e.short_description));
        self.write_section(out, "Environments", environments)?;

        let packages = catalog
            .packages
            .iter()
            .map(|p| (p.name.clone(), &p.short_description));
        self.write_section(out, "Packages", packages)?;

        let classes = catalog
            .document_classes
            .iter()
            .map(|d| (d.name.clone(), &d.short_description));
        self.write_section(out, "Document classes", classes)
    }

    fn write_section<'a>(
        &self,
        out: &mut impl Write,
        title: &str,
        rows: impl Iterator<Item = (String, &'a Multilingual)>,
    ) -> Result<()> {
        let rows: Vec<_> = rows.collect();
        if rows.is_empty() {
            return Ok(());
        }
        let width = rows.iter().map(|(name, _)| name.chars().count()).max().unwrap_or(0);
        write!(out, "{}", underline(title, 2))?;
        for (name, short) in rows {
            let pad = width - name.chars().count();
            writeln!(
                out,
                "{}{}  {}",
                name,
                " ".repeat(pad),
                plain_text(self.localized(short))
            )?;
        }
        writeln!(out)?;
        Ok(())
    }
}
