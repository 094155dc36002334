//! Configuration parameters for annotation loading and writing

use crate::error::Result;
use crate::io::text::{parse_row_format, ColumnFormat};

/// Options controlling how raw tempo values are turned into tempo/strength pairs
#[derive(Debug, Clone, PartialEq)]
pub struct TempoOptions {
    /// Value separating tempi from strengths (default: 1.0)
    ///
    /// Values greater than this are tempi in BPM, values less than or equal
    /// to it are strengths. A tempo at or below the split value is read as a
    /// strength; there is no schema tag to tell the two apart.
    pub split_value: f64,

    /// Sort the tempi by descending strength (default: false)
    pub sort: bool,

    /// Normalize the strengths to sum 1 (default: false)
    pub norm_strengths: bool,

    /// Return at most this many tempi (default: None = all)
    pub max_len: Option<usize>,
}

impl Default for TempoOptions {
    fn default() -> Self {
        Self {
            split_value: 1.0,
            sort: false,
            norm_strengths: false,
            max_len: None,
        }
    }
}

/// Options for writing numeric annotation columns
#[derive(Debug, Clone, PartialEq)]
pub struct WriteOptions {
    /// Per-column formats (default: `%.3f`)
    ///
    /// A single format is applied to every column. A whole row format such
    /// as `%.2f\t%.2f` can be given through [`WriteOptions::from_row_format`].
    pub formats: Vec<ColumnFormat>,

    /// Column delimiter (default: tab)
    pub delimiter: String,

    /// Header written as `# ` prefixed comment lines (default: none)
    pub header: String,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            formats: vec![ColumnFormat::Fixed(3)],
            delimiter: "\t".to_string(),
            header: String::new(),
        }
    }
}

impl WriteOptions {
    /// Default options with the given per-column formats
    pub fn with_formats(formats: Vec<ColumnFormat>) -> Self {
        Self {
            formats,
            ..Self::default()
        }
    }

    /// Default options from a printf-style row format
    ///
    /// The text between specifiers becomes the delimiter; a single
    /// specifier keeps the default tab.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::InvalidInput` if the row format is malformed
    pub fn from_row_format(format: &str) -> Result<Self> {
        let (formats, delimiter) = parse_row_format(format)?;
        let mut options = Self::with_formats(formats);
        if let Some(delimiter) = delimiter {
            options.delimiter = delimiter;
        }
        Ok(options)
    }
}

/// Options for audio file loading
#[derive(Debug, Clone, Default)]
pub struct AudioOptions {
    /// Down-mix all channels to mono by averaging (default: false)
    pub mono: bool,
}
