//! Chord segment annotations
//!
//! Expected format, one segment per line, times in seconds:
//!
//! ```text
//! start_time end_time chord_label
//! ```
//!
//! Chord files have no comments, since labels such as `C#:maj` contain `#`.

use serde::{Deserialize, Serialize};

use crate::error::{AnnotationError, Result};
use crate::io::source::{Destination, Source};
use crate::io::text::{format_rows, parse_float, parse_records, Cell, ColumnFormat};

/// Maximum chord label length in characters
pub const MAX_LABEL_LEN: usize = 32;

/// A labelled time segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordSegment {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Chord label
    pub label: String,
}

impl ChordSegment {
    /// Create a segment
    pub fn new(start: f64, end: f64, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }
}

/// Load labelled chord segments
///
/// # Arguments
///
/// * `source` - Path or reader with `start end label` lines
///
/// # Returns
///
/// One [`ChordSegment`] per line. Labels longer than [`MAX_LABEL_LEN`]
/// characters are truncated. Segment order and overlap are not checked.
///
/// # Errors
///
/// Returns `AnnotationError::Parse` if a line does not have exactly three
/// fields or a time is not numeric.
///
/// # Example
///
/// ```
/// use stratum_annotations::{load_chords, ChordSegment};
///
/// let mut reader = std::io::Cursor::new("0.0 2.0 F#:min\n2.0 4.0 N\n");
/// let chords = load_chords(&mut reader)?;
/// assert_eq!(chords[0], ChordSegment::new(0.0, 2.0, "F#:min"));
/// # Ok::<(), stratum_annotations::AnnotationError>(())
/// ```
pub fn load_chords<'a>(source: impl Into<Source<'a>>) -> Result<Vec<ChordSegment>> {
    // No comment marker: '#' is part of sharp chord names
    let records = parse_records(source.into(), None)?;
    let mut chords = Vec::with_capacity(records.len());
    for record in records {
        let [start, end, label] = record.fields.as_slice() else {
            return Err(AnnotationError::parse(
                record.line,
                format!("expected 3 fields, found {}", record.fields.len()),
            ));
        };
        let mut label = label.clone();
        // Counted in characters, not bytes
        if label.chars().count() > MAX_LABEL_LEN {
            log::warn!(
                "Chord label '{}' on line {} truncated to {} characters",
                label,
                record.line,
                MAX_LABEL_LEN
            );
            label = label.chars().take(MAX_LABEL_LEN).collect();
        }
        chords.push(ChordSegment {
            start: parse_float(start, record.line)?,
            end: parse_float(end, record.line)?,
            label,
        });
    }
    log::debug!("Loaded {} chord segments", chords.len());
    Ok(chords)
}

/// Write chord segments as `start\tend\tlabel` lines
///
/// Returns the segments unchanged.
pub fn write_chords<'c, 'a>(
    chords: &'c [ChordSegment],
    destination: impl Into<Destination<'a>>,
) -> Result<&'c [ChordSegment]> {
    let rows: Vec<Vec<Cell<'_>>> = chords
        .iter()
        .map(|c| vec![Cell::Number(c.start), Cell::Number(c.end), Cell::Text(&c.label)])
        .collect();
    format_rows(
        destination.into(),
        &rows,
        &[ColumnFormat::Fixed(3), ColumnFormat::Fixed(3), ColumnFormat::Text],
        "\t",
        "",
    )?;
    Ok(chords)
}
