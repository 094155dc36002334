//! # Stratum Annotations
//!
//! Readers and writers for music information retrieval annotations: onset
//! times, beat times with downbeat labels, chord segments, and tempo
//! estimates with strengths.
//!
//! ## Formats
//!
//! - **Events / onsets**: one time per line, extra columns ignored, `#` comments
//! - **Beats**: `beat_time [beat_number]`, downbeats are numbered 1
//! - **Chords**: `start end label`, no comments (labels may contain `#`)
//! - **Tempo**: `tempo_one tempo_two relative_strength` or
//!   `tempo_one tempo_two strength_one strength_two`; written as
//!   `%.2f\t%.2f\t%.2f`
//!
//! ## Quick Start
//!
//! ```
//! use stratum_annotations::{load_tempo, write_tempo, TempoOptions};
//!
//! let options = TempoOptions { sort: true, ..TempoOptions::default() };
//! let tempi = load_tempo(vec![120.0, 60.0, 0.7], &options)?;
//!
//! let mut out: Vec<u8> = Vec::new();
//! let report = write_tempo(&tempi, &mut out, true)?;
//! assert_eq!(report.tempo_1, 60.0);
//! assert_eq!(String::from_utf8(out).unwrap(), "60.00\t120.00\t0.30\n");
//! # Ok::<(), stratum_annotations::AnnotationError>(())
//! ```
//!
//! Loaders take anything convertible into [`Values`]: `Values::Empty`, an
//! in-memory [`Array`] or `Vec<f64>`, a path, or a [`Source`] wrapping an
//! open reader. Writers take a path or any `std::io::Write` and return their
//! input, so they can be chained behind loaders.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod annotations;
pub mod config;
pub mod error;
pub mod io;

// Re-export main types
pub use annotations::beats::{load_beats, write_beats, write_beats_with};
pub use annotations::chords::{load_chords, write_chords, ChordSegment};
pub use annotations::events::{
    load_events, load_onsets, write_events, write_events_with, write_onsets,
};
pub use annotations::tempo::{load_tempo, write_tempo, TempoPair, TempoReport};
pub use config::{AudioOptions, TempoOptions, WriteOptions};
pub use error::{AnnotationError, Result};
pub use io::array::{Array, Matrix};
pub use io::audio::{load_audio_file, AudioSignal};
pub use io::source::{Destination, Source, Values};
pub use io::text::ColumnFormat;
