//! Delimited text parsing and formatting
//!
//! The narrow text interface the annotation adapters are built on:
//! - [`parse_numeric`]: whitespace separated numeric columns into an [`Array`]
//! - [`parse_records`]: whitespace separated string fields, for mixed schemas
//! - [`format_rows`] / [`format_array`]: rows into delimited text with
//!   per-column formats and an optional comment header

use std::fmt;
use std::str::FromStr;

use super::array::{Array, Matrix};
use super::source::{Destination, Source};
use crate::error::{AnnotationError, Result};

/// Comment marker used by the numeric annotation formats
pub const COMMENT_CHAR: char = '#';

/// Options for [`parse_numeric`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Minimum number of dimensions of the result (1 or 2)
    ///
    /// With 1, a single row or a single column collapses to a vector.
    /// With 2, the result is always a matrix with one row per line.
    pub min_dims: usize,

    /// Comment marker; the rest of a line after it is ignored
    pub comments: Option<char>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            min_dims: 1,
            comments: Some(COMMENT_CHAR),
        }
    }
}

/// One non-empty line of a text source, split into fields
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// 1-based line number
    pub line: usize,
    /// Whitespace separated fields
    pub fields: Vec<String>,
}

/// Split text into records, skipping blank lines and comments
pub fn parse_records(source: Source<'_>, comments: Option<char>) -> Result<Vec<Record>> {
    let text = source.read_to_string()?;
    Ok(split_records(&text, comments))
}

fn split_records(text: &str, comments: Option<char>) -> Vec<Record> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            // Everything after the comment marker is dropped
            let content = match comments {
                Some(marker) => line.split(marker).next().unwrap_or(""),
                None => line,
            };
            let fields: Vec<String> = content.split_whitespace().map(str::to_string).collect();
            if fields.is_empty() {
                None
            } else {
                Some(Record { line: i + 1, fields })
            }
        })
        .collect()
}

/// Parse whitespace separated numeric columns
///
/// # Arguments
///
/// * `source` - Path or reader holding the text
/// * `options` - Minimum dimensions and comment marker
///
/// # Returns
///
/// A vector for a single line or a single column when `min_dims` is 1,
/// otherwise a matrix with one row per data line
///
/// # Algorithm
///
/// 1. Strip comments and skip blank lines
/// 2. Take the column count from the first data line
/// 3. Parse every field as `f64`, checking each line's column count
/// 4. Collapse to a vector if the shape allows it and `min_dims` is 1
///
/// # Errors
///
/// Returns `AnnotationError::Parse` for non-numeric fields or lines whose
/// column count differs from the first data line, and
/// `AnnotationError::InvalidInput` if `min_dims` is not 1 or 2.
///
/// # Example
///
/// ```
/// use stratum_annotations::io::text::{parse_numeric, ParseOptions};
/// use stratum_annotations::Source;
///
/// let mut reader = std::io::Cursor::new("# beats\n0.5 1\n1.0 2\n");
/// let array = parse_numeric(Source::from(&mut reader), &ParseOptions::default())?;
/// assert_eq!(array.ndim(), 2);
/// assert_eq!(array.values(), &[0.5, 1.0, 1.0, 2.0]);
/// # Ok::<(), stratum_annotations::AnnotationError>(())
/// ```
pub fn parse_numeric(source: Source<'_>, options: &ParseOptions) -> Result<Array> {
    if !(1..=2).contains(&options.min_dims) {
        return Err(AnnotationError::InvalidInput(format!(
            "min_dims must be 1 or 2, got {}",
            options.min_dims
        )));
    }
    let text = source.read_to_string()?;
    let records = split_records(&text, options.comments);

    // An empty source still has one (empty) column
    let cols = records.first().map_or(1, |r| r.fields.len());
    let mut data = Vec::with_capacity(records.len() * cols);
    for record in &records {
        // Every line must be as wide as the first one
        if record.fields.len() != cols {
            return Err(AnnotationError::parse(
                record.line,
                format!(
                    "wrong number of columns: expected {}, found {}",
                    cols,
                    record.fields.len()
                ),
            ));
        }
        for field in &record.fields {
            data.push(parse_float(field, record.line)?);
        }
    }

    let rows = records.len();
    log::debug!("Parsed {} rows x {} columns of numeric text", rows, cols);

    // Single row or single column: squeeze to 1-D
    if options.min_dims == 1 && (rows <= 1 || cols == 1) {
        return Ok(Array::Vector(data));
    }
    Ok(Array::Matrix(Matrix::new(data, rows, cols)?))
}

pub(crate) fn parse_float(field: &str, line: usize) -> Result<f64> {
    field
        .parse::<f64>()
        .map_err(|_| AnnotationError::parse(line, format!("could not convert '{}' to float", field)))
}

/// printf-style format of one output column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnFormat {
    /// `%.Nf`: fixed point with N decimals (`%f` is `%.6f`)
    Fixed(usize),
    /// `%d`: integer, fractional part truncated
    Integer,
    /// `%s`: plain text
    Text,
}

impl ColumnFormat {
    /// Render one cell with this format
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::InvalidInput` when a text cell meets a numeric format
    pub fn render(&self, cell: &Cell<'_>) -> Result<String> {
        match (self, cell) {
            (ColumnFormat::Fixed(decimals), Cell::Number(v)) => Ok(format!("{:.*}", decimals, v)),
            (ColumnFormat::Integer, Cell::Number(v)) => Ok(format!("{}", v.trunc() as i64)),
            (ColumnFormat::Text, Cell::Number(v)) => Ok(v.to_string()),
            (ColumnFormat::Text, Cell::Text(s)) => Ok((*s).to_string()),
            (format, Cell::Text(s)) => Err(AnnotationError::InvalidInput(format!(
                "cannot format text '{}' with {}",
                s, format
            ))),
        }
    }
}

impl fmt::Display for ColumnFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnFormat::Fixed(decimals) => write!(f, "%.{}f", decimals),
            ColumnFormat::Integer => f.write_str("%d"),
            ColumnFormat::Text => f.write_str("%s"),
        }
    }
}

impl FromStr for ColumnFormat {
    type Err = AnnotationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "%f" => Ok(ColumnFormat::Fixed(6)),
            "%d" | "%i" => Ok(ColumnFormat::Integer),
            "%s" => Ok(ColumnFormat::Text),
            _ => s
                .strip_prefix("%.")
                .and_then(|rest| rest.strip_suffix('f'))
                .and_then(|digits| digits.parse::<usize>().ok())
                .map(ColumnFormat::Fixed)
                .ok_or_else(|| {
                    AnnotationError::InvalidInput(format!("unsupported column format '{}'", s))
                }),
        }
    }
}

/// Split a printf-style row format such as `%.2f\t%.2f\t%.2f`
///
/// # Returns
///
/// The column formats and the separator between them (`None` for a single
/// specifier)
///
/// # Errors
///
/// Returns `AnnotationError::InvalidInput` for unknown specifiers, text
/// before the first or after the last specifier, adjacent specifiers, or
/// separators that differ between columns.
///
/// # Example
///
/// ```
/// use stratum_annotations::io::text::{parse_row_format, ColumnFormat};
///
/// let (formats, delimiter) = parse_row_format("%.3f\t%d")?;
/// assert_eq!(formats, vec![ColumnFormat::Fixed(3), ColumnFormat::Integer]);
/// assert_eq!(delimiter.as_deref(), Some("\t"));
/// # Ok::<(), stratum_annotations::AnnotationError>(())
/// ```
pub fn parse_row_format(format: &str) -> Result<(Vec<ColumnFormat>, Option<String>)> {
    let invalid = || AnnotationError::InvalidInput(format!("unsupported row format '{}'", format));

    let mut formats = Vec::new();
    let mut separators: Vec<&str> = Vec::new();
    let mut rest = format;
    loop {
        // Each column starts with a conversion specifier
        let len = specifier_len(rest).ok_or_else(invalid)?;
        formats.push(rest[..len].parse::<ColumnFormat>()?);
        rest = &rest[len..];
        if rest.is_empty() {
            break;
        }
        // The separator runs up to the next specifier
        let next = rest.find('%').ok_or_else(invalid)?;
        if next == 0 {
            return Err(invalid());
        }
        separators.push(&rest[..next]);
        rest = &rest[next..];
    }

    match separators.split_first() {
        None => Ok((formats, None)),
        Some((first, others)) if others.iter().all(|s| s == first) => {
            Ok((formats, Some((*first).to_string())))
        }
        Some(_) => Err(invalid()),
    }
}

/// Length of the `%[.N]c` specifier at the start of `s`
fn specifier_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&b'%') {
        return None;
    }
    let mut i = 1;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
    }
    match bytes.get(i) {
        Some(b'f' | b'd' | b'i' | b's') => Some(i + 1),
        _ => None,
    }
}

/// One value to be written
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    /// Numeric value
    Number(f64),
    /// Text value
    Text(&'a str),
}

/// Format rows of cells as delimited text and write them to `destination`
///
/// # Arguments
///
/// * `destination` - Path or writer receiving the text
/// * `rows` - Cells to write, one `Vec` per output line
/// * `formats` - One format for all columns, or one per column
/// * `delimiter` - Column separator
/// * `header` - Written first as `# ` prefixed lines if non-empty
///
/// # Returns
///
/// `Ok(())` once the whole text is written and flushed
///
/// # Errors
///
/// Returns `AnnotationError::InvalidInput` if the number of formats does not
/// match a row, or a text cell meets a numeric format, and
/// `AnnotationError::Io` if writing fails. Nothing is written on a format error.
///
/// # Example
///
/// ```
/// use stratum_annotations::io::text::{format_rows, Cell, ColumnFormat};
///
/// let mut out: Vec<u8> = Vec::new();
/// let rows = vec![vec![Cell::Number(0.5), Cell::Number(1.5), Cell::Text("C:maj")]];
/// let formats = [ColumnFormat::Fixed(3), ColumnFormat::Fixed(3), ColumnFormat::Text];
/// format_rows((&mut out).into(), &rows, &formats, "\t", "")?;
/// assert_eq!(String::from_utf8(out).unwrap(), "0.500\t1.500\tC:maj\n");
/// # Ok::<(), stratum_annotations::AnnotationError>(())
/// ```
pub fn format_rows(
    destination: Destination<'_>,
    rows: &[Vec<Cell<'_>>],
    formats: &[ColumnFormat],
    delimiter: &str,
    header: &str,
) -> Result<()> {
    // Render everything first so a bad format leaves the destination untouched
    let mut out = String::new();
    if !header.is_empty() {
        for line in header.lines() {
            out.push_str("# ");
            out.push_str(line);
            out.push('\n');
        }
    }
    for row in rows {
        let fields = render_row(row, formats)?;
        out.push_str(&fields.join(delimiter));
        out.push('\n');
    }
    destination.write_text(&out)
}

fn render_row(row: &[Cell<'_>], formats: &[ColumnFormat]) -> Result<Vec<String>> {
    match formats {
        [] => Err(AnnotationError::InvalidInput(
            "at least one column format is required".to_string(),
        )),
        [single] => row.iter().map(|cell| single.render(cell)).collect(),
        _ if formats.len() != row.len() => Err(AnnotationError::InvalidInput(format!(
            "{} column formats given for {} columns",
            formats.len(),
            row.len()
        ))),
        _ => formats
            .iter()
            .zip(row)
            .map(|(format, cell)| format.render(cell))
            .collect(),
    }
}

/// Format a numeric array, one entry per line
pub fn format_array(
    destination: Destination<'_>,
    array: &Array,
    formats: &[ColumnFormat],
    delimiter: &str,
    header: &str,
) -> Result<()> {
    let rows: Vec<Vec<Cell<'_>>> = array
        .to_matrix()
        .iter_rows()
        .map(|row| row.iter().map(|&v| Cell::Number(v)).collect())
        .collect();
    format_rows(destination, &rows, formats, delimiter, header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str, min_dims: usize) -> Result<Array> {
        let mut cursor = Cursor::new(text.to_string());
        parse_numeric(
            Source::from(&mut cursor),
            &ParseOptions {
                min_dims,
                ..ParseOptions::default()
            },
        )
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let array = parse("# onsets\n0.1\n\n0.2 # second\n", 1).unwrap();
        assert_eq!(array, Array::Vector(vec![0.1, 0.2]));
    }

    #[test]
    fn test_single_row_collapses_with_min_dims_1() {
        let array = parse("120 60 0.7\n", 1).unwrap();
        assert_eq!(array, Array::Vector(vec![120.0, 60.0, 0.7]));
    }

    #[test]
    fn test_single_row_kept_with_min_dims_2() {
        let array = parse("1.0 2\n", 2).unwrap();
        assert_eq!(array.ndim(), 2);
        assert_eq!(array.len(), 1);
    }

    #[test]
    fn test_empty_text_with_min_dims_2_has_one_column() {
        match parse("# nothing\n", 2).unwrap() {
            Array::Matrix(m) => {
                assert_eq!(m.rows(), 0);
                assert_eq!(m.cols(), 1);
            }
            other => panic!("expected matrix, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_column_count() {
        let err = parse("1.0 1\n2.0\n", 1).unwrap_err();
        assert!(matches!(err, AnnotationError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_non_numeric_field() {
        let err = parse("1.0\nabc\n", 1).unwrap_err();
        assert!(matches!(err, AnnotationError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_column_format_from_str() {
        assert_eq!("%.3f".parse::<ColumnFormat>().unwrap(), ColumnFormat::Fixed(3));
        assert_eq!("%f".parse::<ColumnFormat>().unwrap(), ColumnFormat::Fixed(6));
        assert_eq!("%d".parse::<ColumnFormat>().unwrap(), ColumnFormat::Integer);
        assert_eq!("%s".parse::<ColumnFormat>().unwrap(), ColumnFormat::Text);
        assert!("%x".parse::<ColumnFormat>().is_err());
        assert_eq!(ColumnFormat::Fixed(2).to_string(), "%.2f");
    }

    #[test]
    fn test_parse_row_format() {
        let (formats, delimiter) = parse_row_format("%.2f\t%.2f\t%.2f").unwrap();
        assert_eq!(formats, vec![ColumnFormat::Fixed(2); 3]);
        assert_eq!(delimiter.as_deref(), Some("\t"));

        let (formats, delimiter) = parse_row_format("%.3f").unwrap();
        assert_eq!(formats, vec![ColumnFormat::Fixed(3)]);
        assert_eq!(delimiter, None);

        let (formats, delimiter) = parse_row_format("%.3f, %s").unwrap();
        assert_eq!(formats, vec![ColumnFormat::Fixed(3), ColumnFormat::Text]);
        assert_eq!(delimiter.as_deref(), Some(", "));
    }

    #[test]
    fn test_parse_row_format_rejects_malformed() {
        // mixed separators
        assert!(parse_row_format("%.2f\t%.2f %.2f").is_err());
        // trailing text, leading text, adjacent specifiers
        assert!(parse_row_format("%.2f\t").is_err());
        assert!(parse_row_format("t=%.2f").is_err());
        assert!(parse_row_format("%d%d").is_err());
        assert!(parse_row_format("%.f").is_err());
        assert!(parse_row_format("%x").is_err());
    }

    #[test]
    fn test_format_rows_with_header() {
        let mut buf: Vec<u8> = Vec::new();
        let rows = vec![
            vec![Cell::Number(0.5), Cell::Number(1.0)],
            vec![Cell::Number(1.0), Cell::Number(2.0)],
        ];
        format_rows(
            Destination::from(&mut buf),
            &rows,
            &[ColumnFormat::Fixed(3), ColumnFormat::Integer],
            "\t",
            "beats\nfrom test",
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "# beats\n# from test\n0.500\t1\n1.000\t2\n"
        );
    }

    #[test]
    fn test_format_mismatched_formats() {
        let mut buf: Vec<u8> = Vec::new();
        let rows = vec![vec![Cell::Number(1.0), Cell::Number(2.0), Cell::Number(3.0)]];
        let err = format_rows(
            Destination::from(&mut buf),
            &rows,
            &[ColumnFormat::Fixed(3), ColumnFormat::Integer],
            "\t",
            "",
        )
        .unwrap_err();
        assert!(matches!(err, AnnotationError::InvalidInput(_)));
    }

    #[test]
    fn test_text_cell_needs_text_format() {
        let err = ColumnFormat::Fixed(3).render(&Cell::Text("C:maj")).unwrap_err();
        assert!(matches!(err, AnnotationError::InvalidInput(_)));
    }
}
