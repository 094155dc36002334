//! Event and onset annotations
//!
//! Expected format, one event per line:
//!
//! ```text
//! event_time [additional columns are ignored]
//! ```
//!
//! Lines starting with `#` are comments.

use super::{first_column, resolve_values};
use crate::config::WriteOptions;
use crate::error::Result;
use crate::io::array::Array;
use crate::io::source::{Destination, Source, Values};
use crate::io::text::{format_array, parse_numeric, ParseOptions};

/// Load events from a text file, one time per line
///
/// Only the first column is returned.
pub fn load_events<'a>(source: impl Into<Source<'a>>) -> Result<Vec<f64>> {
    // Always 2-D so a one-line file with extra columns keeps only its time
    let array = parse_numeric(
        source.into(),
        &ParseOptions {
            min_dims: 2,
            ..ParseOptions::default()
        },
    )?;
    match array {
        Array::Vector(values) => Ok(values),
        Array::Matrix(matrix) => first_column(&matrix),
    }
}

/// Write events with `%.3f` precision, one per line
///
/// Returns the events unchanged so writers can be chained behind loaders.
pub fn write_events<'e, 'a>(
    events: &'e [f64],
    destination: impl Into<Destination<'a>>,
) -> Result<&'e [f64]> {
    log::debug!("Writing {} events", events.len());
    let options = WriteOptions::default(); // %.3f, tab, no header
    format_array(
        destination.into(),
        &Array::Vector(events.to_vec()),
        &options.formats,
        &options.delimiter,
        &options.header,
    )?;
    Ok(events)
}

/// Write an event array with custom formats, delimiter and header
pub fn write_events_with<'e, 'a>(
    events: &'e Array,
    destination: impl Into<Destination<'a>>,
    options: &WriteOptions,
) -> Result<&'e Array> {
    log::debug!("Writing {} event rows", events.len());
    format_array(
        destination.into(),
        events,
        &options.formats,
        &options.delimiter,
        &options.header,
    )?;
    Ok(events)
}

/// Load onsets from nothing, memory, or text
///
/// Only the first column of 2-D input is kept.
pub fn load_onsets<'a>(values: impl Into<Values<'a>>) -> Result<Vec<f64>> {
    match resolve_values(values.into())? {
        Array::Vector(onsets) => Ok(onsets),
        Array::Matrix(matrix) => first_column(&matrix),
    }
}

/// Write onsets; same format as [`write_events`]
pub fn write_onsets<'e, 'a>(
    onsets: &'e [f64],
    destination: impl Into<Destination<'a>>,
) -> Result<&'e [f64]> {
    write_events(onsets, destination)
}
