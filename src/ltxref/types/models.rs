//! Core data structures for the reference catalog.
//!
//! This module defines the entity graph held in memory:
//! - The top-level [`Catalog`] with its four sorted collections
//! - Commands, environments, packages and document classes
//! - Their nested parts (variants, arguments, option groups and options)
//!
//! Ownership follows containment. Kernel commands live in
//! [`Catalog::commands`]; package commands live in [`Package::commands`].
//! There are no back-pointers.

use std::collections::BTreeMap;

use super::argument::ArgumentType;

/// Level written by the encoder when an entity has none.
pub const DEFAULT_LEVEL: &str = "beginner";

/// Text keyed by language tag (`"en"`, `"de"`, ...).
///
/// A `BTreeMap` keeps language keys sorted, which makes encoder output
/// reproducible.
pub type Multilingual = BTreeMap<String, String>;

/// One argument of a command or environment variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Argument {
    pub optional: bool,
    pub name: String,
    pub kind: ArgumentType,
}

impl Argument {
    pub fn new(name: impl Into<String>, kind: ArgumentType, optional: bool) -> Self {
        Self {
            optional,
            name: name.into(),
            kind,
        }
    }
}

/// An alternate call form of a command or environment.
///
/// `\section` and `\section*` are one [`Command`] with two variants. The
/// default form has an empty name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variant {
    pub name: String,
    pub arguments: Vec<Argument>,
    pub description: Multilingual,
}

impl Variant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A command, either from the kernel or from a package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub level: String,
    pub label: Vec<String>,
    pub short_description: Multilingual,
    pub description: Multilingual,
    pub variants: Vec<Variant>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// An environment. Always kernel-scoped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub name: String,
    pub level: String,
    pub label: Vec<String>,
    pub short_description: Multilingual,
    pub description: Multilingual,
    pub variants: Vec<Variant>,
}

impl Environment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// An option accepted by `\usepackage[...]{name}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageOption {
    pub name: String,
    pub default: bool,
    pub short_description: Multilingual,
    pub description: Multilingual,
}

impl PackageOption {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A package with its own command namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub level: String,
    pub label: Vec<String>,
    /// Packages pulled in by this one. Informational, never resolved.
    pub loads_packages: Vec<String>,
    pub short_description: Multilingual,
    pub description: Multilingual,
    pub commands: Vec<Command>,
    pub options: Vec<PackageOption>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// An option accepted by `\documentclass[...]{name}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassOption {
    pub name: String,
    pub default: bool,
    pub short_description: Multilingual,
    pub description: Multilingual,
}

impl ClassOption {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A set of mutually related class options, such as the paper sizes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionGroup {
    /// Optional; most groups are identified by their short description.
    pub name: String,
    pub short_description: Multilingual,
    pub options: Vec<ClassOption>,
}

/// A document class such as `article` or `scrbook`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentClass {
    pub name: String,
    pub level: String,
    pub label: Vec<String>,
    pub short_description: Multilingual,
    pub description: Multilingual,
    pub option_groups: Vec<OptionGroup>,
}

impl DocumentClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// The complete reference: kernel commands, environments, packages and
/// document classes.
///
/// Every collection, and the command list of every package, is kept sorted
/// by case-insensitive name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub version: String,
    pub commands: Vec<Command>,
    pub environments: Vec<Environment>,
    pub packages: Vec<Package>,
    pub document_classes: Vec<DocumentClass>,
}

impl Catalog {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Self::default()
        }
    }

    /// Restores the name order of every collection, package command lists
    /// included.
    pub fn sort_entries(&mut self) {
        sort_by_name(&mut self.commands);
        sort_by_name(&mut self.environments);
        sort_by_name(&mut self.packages);
        sort_by_name(&mut self.document_classes);
        for package in &mut self.packages {
            sort_by_name(&mut package.commands);
        }
    }
}

/// Common view over the four top-level entity kinds.
pub trait Entry {
    /// A short name used for logging.
    const KIND: &'static str;

    fn name(&self) -> &str;

    fn labels(&self) -> &[String];

    /// Exact, case-sensitive label test.
    fn has_label(&self, tag: &str) -> bool {
        self.labels().iter().any(|label| label == tag)
    }
}

macro_rules! impl_entry {
    ($ty:ty, $kind:literal) => {
        impl Entry for $ty {
            const KIND: &'static str = $kind;

            fn name(&self) -> &str {
                &self.name
            }

            fn labels(&self) -> &[String] {
                &self.label
            }
        }
    };
}

impl_entry!(Command, "command");
impl_entry!(Environment, "environment");
impl_entry!(Package, "package");
impl_entry!(DocumentClass, "documentclass");

/// Key used for catalog ordering.
pub(crate) fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// Stable sort by case-insensitive name; equal names keep insertion order.
pub(crate) fn sort_by_name<T: Entry>(items: &mut [T]) {
    items.sort_by(|a, b| name_key(a.name()).cmp(&name_key(b.name())));
}
