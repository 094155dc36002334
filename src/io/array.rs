//! Numeric arrays exchanged between the text layer and the annotation adapters

use crate::error::{AnnotationError, Result};

/// Row-major 2-D array of `f64`, every row the same width
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Create a matrix from row-major data
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::InvalidInput` if `data.len()` is not `rows * cols`
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(AnnotationError::InvalidInput(format!(
                "{} values cannot fill a {}x{} matrix",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { data, rows, cols })
    }

    /// Create a matrix from a list of rows
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::InvalidInput` if the rows have different widths
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        // The first row fixes the width
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(AnnotationError::InvalidInput(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row `i` as a slice
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Iterate over the rows
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.rows).map(move |i| self.row(i))
    }

    /// Copy of column `j`
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::InvalidInput` if the column does not exist
    pub fn column(&self, j: usize) -> Result<Vec<f64>> {
        if j >= self.cols {
            return Err(AnnotationError::InvalidInput(format!(
                "column {} requested from an array with {} columns",
                j, self.cols
            )));
        }
        Ok(self.iter_rows().map(|row| row[j]).collect())
    }

    /// All values in row-major order
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// A 1-D or 2-D numeric array
#[derive(Debug, Clone, PartialEq)]
pub enum Array {
    /// One value per entry
    Vector(Vec<f64>),
    /// One row per entry, several columns
    Matrix(Matrix),
}

impl Array {
    /// Number of dimensions (1 or 2)
    pub fn ndim(&self) -> usize {
        match self {
            Array::Vector(_) => 1,
            Array::Matrix(_) => 2,
        }
    }

    /// Number of entries along the first axis
    pub fn len(&self) -> usize {
        match self {
            Array::Vector(v) => v.len(),
            Array::Matrix(m) => m.rows(),
        }
    }

    /// True if the array has no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All values in row-major order
    pub fn values(&self) -> &[f64] {
        match self {
            Array::Vector(v) => v,
            Array::Matrix(m) => m.as_slice(),
        }
    }

    /// The array as 2-D: a vector becomes a single column
    pub fn to_matrix(&self) -> Matrix {
        match self {
            // N x 1, same data
            Array::Vector(v) => Matrix {
                data: v.clone(),
                rows: v.len(),
                cols: 1,
            },
            Array::Matrix(m) => m.clone(),
        }
    }
}

impl From<Vec<f64>> for Array {
    fn from(values: Vec<f64>) -> Self {
        Array::Vector(values)
    }
}

impl From<Matrix> for Array {
    fn from(matrix: Matrix) -> Self {
        Array::Matrix(matrix)
    }
}

impl TryFrom<Vec<Vec<f64>>> for Array {
    type Error = AnnotationError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Matrix::from_rows(&rows).map(Array::Matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_ragged() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        let err = Matrix::from_rows(&rows).unwrap_err();
        assert!(matches!(err, AnnotationError::InvalidInput(_)));
    }

    #[test]
    fn test_column_and_rows() {
        let m = Matrix::from_rows(&[[0.5, 1.0], [1.0, 2.0], [1.5, 1.0]]).unwrap();
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 2);
        assert_eq!(m.column(0).unwrap(), vec![0.5, 1.0, 1.5]);
        assert_eq!(m.row(1), &[1.0, 2.0]);
        assert!(m.column(2).is_err());
    }

    #[test]
    fn test_values_row_major() {
        let a = Array::try_from(vec![vec![120.0, 0.6], vec![60.0, 0.4]]).unwrap();
        assert_eq!(a.ndim(), 2);
        assert_eq!(a.len(), 2);
        assert_eq!(a.values(), &[120.0, 0.6, 60.0, 0.4]);
    }

    #[test]
    fn test_vector_to_matrix() {
        let m = Array::from(vec![1.0, 2.0]).to_matrix();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 1);
    }
}
