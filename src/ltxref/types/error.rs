//! Custom error types for the ltxref crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum LtxrefError {
    /// An error originating from I/O operations on the byte source or sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not well-formed XML.
    #[error("Malformed XML at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// An attribute could not be parsed or unescaped.
    #[error("Malformed attribute at byte {position}: {reason}")]
    Attribute { position: u64, reason: String },

    /// The input ended while an element was still open.
    #[error("Unexpected end of input inside <{element}>")]
    UnexpectedEof { element: String },
}

/// Writer-side XML faults carry no meaningful input position.
impl From<quick_xml::Error> for LtxrefError {
    fn from(source: quick_xml::Error) -> Self {
        LtxrefError::Xml { position: 0, source }
    }
}

/// A convenience `Result` type alias using the crate's `LtxrefError` type.
pub type Result<T> = std::result::Result<T, LtxrefError>;
