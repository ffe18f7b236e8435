//! Wire format layer: the reference XML schema.
//!
//! This module bridges byte sources and sinks and the in-memory
//! [`Catalog`](crate::Catalog).
//!
//! # Module Organization
//!
//! - [`attributes`]: Element and attribute vocabulary, list and flag helpers
//! - [`reader`]: Streaming decoder, one sub-reader per entity element
//! - [`writer`]: Encoder with deterministic output
//!
//! # Document Shape
//!
//! ```text
//! <ltxref xmlns="urn:speedata.de:2015/latexref" version="...">
//!   <command name="..." level="..." label="a,b">
//!     <shortdescription lang="en">...</shortdescription>
//!     <description lang="en">...</description>
//!     <variant name="">
//!       <argument name="..." optional="no" type="mandarg"/>
//!       <description lang="en">...</description>
//!     </variant>
//!   </command>
//!   <environment .../>
//!   <documentclass .../>
//!   <package ... loadspackages="x,y"/>
//! </ltxref>
//! ```

pub mod attributes;
pub mod reader;
pub mod writer;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::info;

pub use reader::{read, read_partial};
pub use writer::{write, write_with, EncodeOptions};

use crate::ltxref::types::error::Result;
use crate::ltxref::types::models::Catalog;

impl Catalog {
    /// Reads a catalog from an XML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or is not well-formed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening reference file: {}", path.display());
        let file = File::open(path)?;
        read(BufReader::new(file))
    }

    /// Reads a catalog from an in-memory document.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        read(data)
    }

    /// Writes the catalog to an XML file, replacing any existing content.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        info!("Writing reference file: {}", path.display());
        let file = File::create(path)?;
        write(self, BufWriter::new(file))
    }

    /// Writes the catalog to any sink with the default layout.
    pub fn write_to(&self, sink: impl std::io::Write) -> Result<()> {
        write(self, sink)
    }

    /// Encodes the catalog into a byte vector.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        write(self, &mut out)?;
        Ok(out)
    }
}
