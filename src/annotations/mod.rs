//! Annotation readers and writers
//!
//! One module per annotation type:
//! - Events and onsets (one time per line)
//! - Beats, with optional beat-position labels for downbeats
//! - Chord segments (start, end, label)
//! - Tempo estimates with strengths

pub mod beats;
pub mod chords;
pub mod events;
pub mod tempo;

use crate::error::Result;
use crate::io::array::{Array, Matrix};
use crate::io::source::Values;
use crate::io::text::{parse_numeric, ParseOptions};

/// Resolve loader input into an array
///
/// Files and readers are parsed with at least one dimension, so a single
/// line or a single column comes back as a vector.
pub(crate) fn resolve_values(values: Values<'_>) -> Result<Array> {
    match values {
        Values::Empty => Ok(Array::Vector(Vec::new())),
        Values::Memory(array) => Ok(array),
        Values::Source(source) => parse_numeric(source, &ParseOptions::default()),
    }
}

/// Column 0 of a matrix; empty for a matrix without rows
pub(crate) fn first_column(matrix: &Matrix) -> Result<Vec<f64>> {
    if matrix.rows() == 0 {
        return Ok(Vec::new());
    }
    matrix.column(0)
}
