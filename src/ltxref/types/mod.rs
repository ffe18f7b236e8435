//! Foundational data structures, the argument enumeration, and error types.

pub mod argument;
pub mod error;
pub mod models;
