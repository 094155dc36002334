//! Tempo annotations
//!
//! Tempo values come in one of these layouts (whitespace separated when
//! read from text):
//!
//! ```text
//! tempo_one tempo_two relative_strength
//! tempo_one tempo_two strength_one strength_two
//! ```
//!
//! If no strengths are given, the tempi are assumed equally strong.
//!
//! Tempi and strengths are told apart by magnitude only (see
//! [`TempoOptions::split_value`]). A genuine tempo at or below the split
//! value is read as a strength.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::resolve_values;
use crate::config::{TempoOptions, WriteOptions};
use crate::error::{AnnotationError, Result};
use crate::io::source::{Destination, Values};
use crate::io::text::{format_rows, Cell};

/// Tempo below which a lone tempo is paired with its double instead of its half
///
/// Boundary from Tzanetakis & Percival (2013), "An effective, simple tempo
/// estimation method based on self-similarity and regularity", ICASSP.
pub const OCTAVE_BOUNDARY_BPM: f64 = 68.0;

/// Row format of the tempo report line
pub const REPORT_FORMAT: &str = "%.2f\t%.2f\t%.2f";

/// A tempo with its strength
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TempoPair {
    /// Tempo in BPM
    pub tempo: f64,
    /// Relative strength of this tempo
    pub strength: f64,
}

impl TempoPair {
    /// Create a pair
    pub fn new(tempo: f64, strength: f64) -> Self {
        Self { tempo, strength }
    }
}

/// The two reported tempi and the strength of the first one relative to both
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TempoReport {
    /// First tempo in BPM
    pub tempo_1: f64,
    /// Second tempo in BPM
    pub tempo_2: f64,
    /// Strength of `tempo_1` relative to both (0.0-1.0)
    pub strength: f64,
}

impl TempoReport {
    /// Reduce tempo pairs to the two reported tempi
    ///
    /// - No pairs: `(0, 0, 1)`
    /// - One pair: the second tempo is synthesized, doubled below
    ///   [`OCTAVE_BOUNDARY_BPM`] and halved otherwise, with strength 1
    /// - More: the first two pairs in the given order, strength
    ///   `s0 / (s0 + s1)`; sort the pairs first to report the dominant tempi
    ///
    /// With `mirex` set the lower tempo is reported first and the strength
    /// flipped to stay relative to it.
    pub fn from_pairs(tempi: &[TempoPair], mirex: bool) -> Self {
        let (mut tempo_1, mut tempo_2, mut strength) = match tempi {
            [] => (0.0, 0.0, 1.0),
            [only] => {
                // Generate a second tempo an octave away
                let t1 = only.tempo;
                let t2 = if t1 < OCTAVE_BOUNDARY_BPM {
                    t1 * 2.0
                } else {
                    t1 / 2.0
                };
                (t1, t2, 1.0)
            }
            // Only the first two pairs count
            [first, second, ..] => (
                first.tempo,
                second.tempo,
                first.strength / (first.strength + second.strength),
            ),
        };
        // MIREX expects the lower tempo first
        if mirex && tempo_1 > tempo_2 {
            std::mem::swap(&mut tempo_1, &mut tempo_2);
            strength = 1.0 - strength;
        }
        Self {
            tempo_1,
            tempo_2,
            strength,
        }
    }
}

/// Load tempo information from nothing, memory, or text
///
/// # Arguments
///
/// * `values` - `Values::Empty`, an in-memory array, a path, or an open reader
/// * `options` - Split value, sorting, normalization and maximum length
///
/// # Returns
///
/// Tempo/strength pairs, one per tempo, at most `options.max_len` of them
///
/// # Algorithm
///
/// 1. Reject `max_len == Some(0)` before touching the input
/// 2. Flatten the values in row-major order (text is parsed as 1-D)
/// 3. Values greater than `split_value` are tempi, the rest strengths
/// 4. Sum the strengths once
/// 5. One strength short of the tempi: append `1 - sum` (must not be negative)
/// 6. Sum of zero: every tempo gets strength `1 / len(tempi)`
/// 7. Otherwise, with `norm_strengths`: divide by the sum from step 4,
///    not by a sum recomputed after step 5
/// 8. Tempi and strengths must now have the same length
/// 9. Pair them up
/// 10. With `sort`: stable sort by descending strength
/// 11. Truncate to `max_len`
///
/// # Errors
///
/// - `AnnotationError::InvalidInput` if `max_len` is `Some(0)`
/// - `AnnotationError::InvariantViolation` if a completed strength is
///   negative or the tempi and strengths differ in number
///
/// # Example
///
/// ```
/// use stratum_annotations::{load_tempo, TempoOptions};
///
/// // two tempi, relative strength of the first one
/// let tempi = load_tempo(vec![120.0, 60.0, 0.7], &TempoOptions::default())?;
/// assert_eq!(tempi[0].tempo, 120.0);
/// assert_eq!(tempi[0].strength, 0.7);
/// assert!((tempi[1].strength - 0.3).abs() < 1e-9);
/// # Ok::<(), stratum_annotations::AnnotationError>(())
/// ```
pub fn load_tempo<'a>(
    values: impl Into<Values<'a>>,
    options: &TempoOptions,
) -> Result<Vec<TempoPair>> {
    if options.max_len == Some(0) {
        return Err(AnnotationError::InvalidInput(
            "max_len must be greater or equal to 1".to_string(),
        ));
    }
    let values = resolve_values(values.into())?;
    let values = values.values();

    // Split by magnitude: there is no column telling tempi and strengths apart
    let split_value = options.split_value;
    let tempi: Vec<f64> = values.iter().copied().filter(|&v| v > split_value).collect();
    let mut strengths: Vec<f64> = values.iter().copied().filter(|&v| v <= split_value).collect();

    // Computed once; completion and normalization both refer to the given strengths
    let strength_sum: f64 = strengths.iter().sum();

    // Relative strength format: one strength less than tempi
    if tempi.len() == strengths.len() + 1 {
        strengths.push(1.0 - strength_sum);
        if strengths.iter().any(|&s| s < 0.0) {
            return Err(AnnotationError::InvariantViolation(format!(
                "strengths must be non-negative, got {:?}",
                strengths
            )));
        }
    }

    if strength_sum == 0.0 {
        // No strengths given, assume an even distribution
        strengths = vec![1.0 / tempi.len() as f64; tempi.len()];
    } else if options.norm_strengths {
        // Divide by the sum before completion
        for strength in &mut strengths {
            *strength /= strength_sum;
        }
    }

    // Neither "N tempi, N-1 strengths" nor "N tempi, N strengths"
    if tempi.len() != strengths.len() {
        return Err(AnnotationError::InvariantViolation(format!(
            "tempi and strengths must have same length, got {} tempi and {} strengths",
            tempi.len(),
            strengths.len()
        )));
    }

    let mut pairs: Vec<TempoPair> = tempi
        .into_iter()
        .zip(strengths)
        .map(|(tempo, strength)| TempoPair { tempo, strength })
        .collect();

    if options.sort {
        // Stable, so equally strong tempi keep their input order
        pairs.sort_by(|a, b| b.strength.partial_cmp(&a.strength).unwrap_or(Ordering::Equal));
    }

    // At most max_len tempi, order preserved
    if let Some(max_len) = options.max_len {
        pairs.truncate(max_len);
    }

    log::debug!("Loaded {} tempi", pairs.len());
    Ok(pairs)
}

/// Write the two most dominant tempi and their relative strength
///
/// # Arguments
///
/// * `tempi` - Tempo/strength pairs, strongest first if dominance matters
/// * `destination` - Path or writer receiving the report line
/// * `mirex` - Report the lower tempo first
///
/// # Returns
///
/// The reported `TempoReport`, regardless of what the destination holds
///
/// # Algorithm
///
/// See [`TempoReport::from_pairs`]. The report is written as a single
/// `%.2f\t%.2f\t%.2f` line. Two pairs whose strengths sum to zero give a
/// NaN strength, written as `NaN`.
///
/// # Example
///
/// ```
/// use stratum_annotations::{write_tempo, TempoPair};
///
/// let mut out: Vec<u8> = Vec::new();
/// let report = write_tempo(&[TempoPair::new(60.0, 1.0)], &mut out, false)?;
/// assert_eq!(report.tempo_2, 120.0);
/// assert_eq!(String::from_utf8(out).unwrap(), "60.00\t120.00\t1.00\n");
/// # Ok::<(), stratum_annotations::AnnotationError>(())
/// ```
pub fn write_tempo<'a>(
    tempi: &[TempoPair],
    destination: impl Into<Destination<'a>>,
    mirex: bool,
) -> Result<TempoReport> {
    let report = TempoReport::from_pairs(tempi, mirex);
    log::debug!(
        "Writing tempo report {:.2}/{:.2} (strength {:.2}) from {} tempi",
        report.tempo_1,
        report.tempo_2,
        report.strength,
        tempi.len()
    );
    let options = WriteOptions::from_row_format(REPORT_FORMAT)?;
    let row = vec![
        Cell::Number(report.tempo_1),
        Cell::Number(report.tempo_2),
        Cell::Number(report.strength),
    ];
    format_rows(
        destination.into(),
        &[row],
        &options.formats,
        &options.delimiter,
        &options.header,
    )?;
    Ok(report)
}
