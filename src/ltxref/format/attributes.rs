//! Element and attribute vocabulary shared by the reader and the writer.

use crate::ltxref::types::models::DEFAULT_LEVEL;

/// Namespace of the root element. Only needs to agree between writer and
/// reader; the reader matches on local names.
pub const NAMESPACE: &str = "urn:speedata.de:2015/latexref";

pub const ROOT: &str = "ltxref";
pub const COMMAND: &str = "command";
pub const ENVIRONMENT: &str = "environment";
pub const PACKAGE: &str = "package";
pub const DOCUMENTCLASS: &str = "documentclass";
pub const VARIANT: &str = "variant";
pub const ARGUMENT: &str = "argument";
pub const OPTIONGROUP: &str = "optiongroup";
pub const CLASSOPTION: &str = "classoption";
pub const PACKAGEOPTION: &str = "packageoption";
pub const SHORTDESCRIPTION: &str = "shortdescription";
pub const DESCRIPTION: &str = "description";

pub const ATTR_VERSION: &str = "version";
pub const ATTR_NAME: &str = "name";
pub const ATTR_LEVEL: &str = "level";
pub const ATTR_LABEL: &str = "label";
pub const ATTR_LOADSPACKAGES: &str = "loadspackages";
pub const ATTR_LANG: &str = "lang";
pub const ATTR_OPTIONAL: &str = "optional";
pub const ATTR_TYPE: &str = "type";
pub const ATTR_DEFAULT: &str = "default";

/// `"yes"` / `"no"`.
pub fn format_bool(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Only the exact token `"yes"` is true.
pub fn parse_bool(value: &str) -> bool {
    value == "yes"
}

/// Splits a comma-separated list, dropping empty items.
///
/// Items are kept as written so that a list survives a write and read.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

pub fn join_list(items: &[String]) -> String {
    items.join(",")
}

/// The level to write for an entity, substituting [`DEFAULT_LEVEL`] when empty.
pub fn effective_level(level: &str) -> &str {
    if level.is_empty() { DEFAULT_LEVEL } else { level }
}
