//! Beat annotations
//!
//! Expected format, one beat per line:
//!
//! ```text
//! beat_time [beat_number]
//! ```
//!
//! Beats numbered 1 are downbeats.

use super::{first_column, resolve_values};
use crate::config::WriteOptions;
use crate::error::{AnnotationError, Result};
use crate::io::array::Array;
use crate::io::source::{Destination, Values};
use crate::io::text::{format_array, ColumnFormat};

/// Beat number marking the first beat of a bar
pub const DOWNBEAT_NUMBER: f64 = 1.0;

/// Load beats from nothing, memory, or text
///
/// # Arguments
///
/// * `values` - `Values::Empty`, an array in memory, or a text source
/// * `downbeats` - Return only the beats numbered [`DOWNBEAT_NUMBER`]
///
/// # Returns
///
/// Beat times in seconds, in their original order. 1-D input carries no
/// beat numbers and is returned as-is either way.
///
/// # Errors
///
/// Returns `AnnotationError::InvalidInput` if downbeats are requested from
/// a 2-D array without a beat-number column.
///
/// # Example
///
/// ```
/// use stratum_annotations::{load_beats, Source};
///
/// let mut reader = std::io::Cursor::new("0.5 1\n1.0 2\n1.5 1\n");
/// let downbeats = load_beats(Source::from(&mut reader), true)?;
/// assert_eq!(downbeats, vec![0.5, 1.5]);
/// # Ok::<(), stratum_annotations::AnnotationError>(())
/// ```
pub fn load_beats<'a>(values: impl Into<Values<'a>>, downbeats: bool) -> Result<Vec<f64>> {
    let matrix = match resolve_values(values.into())? {
        Array::Vector(beats) => return Ok(beats),
        Array::Matrix(matrix) => matrix,
    };
    if !downbeats {
        return first_column(&matrix);
    }
    // An empty matrix has no downbeats rather than a missing column
    if matrix.rows() > 0 && matrix.cols() < 2 {
        return Err(AnnotationError::InvalidInput(
            "downbeats require a beat number column".to_string(),
        ));
    }
    let downbeat_times: Vec<f64> = matrix
        .iter_rows()
        .filter(|row| row[1] == DOWNBEAT_NUMBER)
        .map(|row| row[0])
        .collect();
    log::debug!(
        "Selected {} downbeats from {} beats",
        downbeat_times.len(),
        matrix.rows()
    );
    Ok(downbeat_times)
}

/// Write beats to a text file
///
/// Beat times use `%.3f`; a beat number column, if present, uses `%d`.
/// Returns the beats unchanged.
pub fn write_beats<'b, 'a>(
    beats: &'b Array,
    destination: impl Into<Destination<'a>>,
) -> Result<&'b Array> {
    write_beats_with(beats, destination, &WriteOptions::default())
}

/// Write beats with a custom delimiter and header
///
/// Column formats still follow the shape of `beats` (`%.3f`, plus `%d` for
/// the beat number column); `options.formats` is ignored.
///
/// # Example
///
/// ```
/// use stratum_annotations::{write_beats_with, Array, WriteOptions};
///
/// let beats = Array::try_from(vec![vec![0.5, 1.0], vec![1.0, 2.0]])?;
/// let options = WriteOptions { delimiter: ",".to_string(), ..WriteOptions::default() };
/// let mut out: Vec<u8> = Vec::new();
/// write_beats_with(&beats, &mut out, &options)?;
/// assert_eq!(String::from_utf8(out).unwrap(), "0.500,1\n1.000,2\n");
/// # Ok::<(), stratum_annotations::AnnotationError>(())
/// ```
pub fn write_beats_with<'b, 'a>(
    beats: &'b Array,
    destination: impl Into<Destination<'a>>,
    options: &WriteOptions,
) -> Result<&'b Array> {
    let formats: &[ColumnFormat] = match beats {
        Array::Vector(_) => &[ColumnFormat::Fixed(3)],
        Array::Matrix(_) => &[ColumnFormat::Fixed(3), ColumnFormat::Integer],
    };
    log::debug!("Writing {} beats", beats.len());
    format_array(
        destination.into(),
        beats,
        formats,
        &options.delimiter,
        &options.header,
    )?;
    Ok(beats)
}
