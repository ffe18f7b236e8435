//! Core reference module.
//!
//! # Module Organization
//!
//! - [`types`]: Entity graph, argument kinds and the error type
//! - [`format`]: XML decoder and encoder
//! - [`query`]: Insertion, lookup, tag and filter operations on a catalog
//! - [`fuzzy`]: Ordered-subsequence name matching
//! - [`text`]: Plain-text views
//!
//! Data flows one way: bytes are decoded into a [`Catalog`], queries select
//! entities from it, and the selection goes either to the text views or back
//! through the encoder.

pub mod format;
pub mod fuzzy;
pub mod query;
pub mod text;
pub mod types;

pub use types::argument::ArgumentType;
pub use types::error::{LtxrefError, Result};
pub use types::models::*;
