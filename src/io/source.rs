//! Where annotations come from and where they go
//!
//! Loaders accept a [`Values`], resolved once at entry: nothing, an array
//! already in memory, or a text source to parse. Writers accept a
//! [`Destination`]. Files are opened and closed within a single call.

use std::fs::File;
use std::io::{BufRead, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use super::array::Array;
use crate::error::Result;

/// A text source: a file on disk or an open reader
pub enum Source<'a> {
    /// Path to a UTF-8 text file
    Path(PathBuf),
    /// An already opened reader
    Reader(&'a mut dyn BufRead),
}

impl Source<'_> {
    /// Read the whole source into memory
    pub fn read_to_string(self) -> Result<String> {
        let mut text = String::new();
        match self {
            Source::Path(path) => {
                log::debug!("Reading annotations from {}", path.display());
                File::open(&path)?.read_to_string(&mut text)?;
            }
            Source::Reader(reader) => {
                // Left open; the caller owns the handle
                reader.read_to_string(&mut text)?;
            }
        }
        Ok(text)
    }
}

impl std::fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Source::Reader(_) => f.write_str("Reader(..)"),
        }
    }
}

impl From<&Path> for Source<'_> {
    fn from(path: &Path) -> Self {
        Source::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for Source<'_> {
    fn from(path: PathBuf) -> Self {
        Source::Path(path)
    }
}

impl From<&str> for Source<'_> {
    fn from(path: &str) -> Self {
        Source::Path(PathBuf::from(path))
    }
}

impl<'a, R: BufRead> From<&'a mut R> for Source<'a> {
    fn from(reader: &'a mut R) -> Self {
        Source::Reader(reader)
    }
}

/// Input accepted by the annotation loaders
#[derive(Debug)]
pub enum Values<'a> {
    /// No values at all
    Empty,
    /// Values already in memory
    Memory(Array),
    /// Values to be parsed from text
    Source(Source<'a>),
}

impl From<Array> for Values<'_> {
    fn from(array: Array) -> Self {
        Values::Memory(array)
    }
}

impl From<Vec<f64>> for Values<'_> {
    fn from(values: Vec<f64>) -> Self {
        Values::Memory(Array::Vector(values))
    }
}

impl<'a> From<Source<'a>> for Values<'a> {
    fn from(source: Source<'a>) -> Self {
        Values::Source(source)
    }
}

impl<'a> From<Option<Array>> for Values<'a> {
    fn from(array: Option<Array>) -> Self {
        array.map_or(Values::Empty, Values::Memory)
    }
}

impl From<&Path> for Values<'_> {
    fn from(path: &Path) -> Self {
        Values::Source(Source::from(path))
    }
}

impl From<PathBuf> for Values<'_> {
    fn from(path: PathBuf) -> Self {
        Values::Source(Source::Path(path))
    }
}

impl From<&str> for Values<'_> {
    fn from(path: &str) -> Self {
        Values::Source(Source::from(path))
    }
}

/// A text destination: a file on disk (created or truncated) or an open writer
pub enum Destination<'a> {
    /// Path to the output file
    Path(PathBuf),
    /// An already opened writer
    Writer(&'a mut dyn Write),
}

impl Destination<'_> {
    /// Write `text` to the destination and flush it
    pub fn write_text(self, text: &str) -> Result<()> {
        match self {
            Destination::Path(path) => {
                log::debug!("Writing annotations to {}", path.display());
                // Truncates an existing file
                let mut writer = BufWriter::new(File::create(&path)?);
                writer.write_all(text.as_bytes())?;
                writer.flush()?;
            }
            Destination::Writer(writer) => {
                writer.write_all(text.as_bytes())?;
                writer.flush()?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Destination<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Destination::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Destination::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}

impl From<&Path> for Destination<'_> {
    fn from(path: &Path) -> Self {
        Destination::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for Destination<'_> {
    fn from(path: PathBuf) -> Self {
        Destination::Path(path)
    }
}

impl From<&str> for Destination<'_> {
    fn from(path: &str) -> Self {
        Destination::Path(PathBuf::from(path))
    }
}

impl<'a, W: Write> From<&'a mut W> for Destination<'a> {
    fn from(writer: &'a mut W) -> Self {
        Destination::Writer(writer)
    }
}
