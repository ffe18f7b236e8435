//! # ltxref
//!
//! A reference catalog for LaTeX: kernel commands, environments, packages
//! and document classes, each with multilingual descriptions, argument
//! signatures and tags.
//!
//! The catalog round-trips through a namespaced XML format, can be queried
//! by tag, by scoped name or by fuzzy name pattern, and renders as plain
//! text.
//!
//! ```no_run
//! use ltxref::Catalog;
//!
//! let catalog = Catalog::from_path("ltxref.xml").unwrap();
//! for command in catalog.filter_commands("tbf", "") {
//!     println!("\\{}", command.name);
//! }
//! ```
pub mod ltxref;

// Re-export the main types for convenience
pub use ltxref::{
    format::{read, read_partial, write, write_with, EncodeOptions},
    text::{TextOptions, TextRenderer},
    Argument, ArgumentType, Catalog, ClassOption, Command, DocumentClass, Entry, Environment,
    LtxrefError, Multilingual, OptionGroup, Package, PackageOption, Result, Variant,
    DEFAULT_LEVEL,
};
