//! Matrix type for 2D numeric data.

use super::Vector;
use crate::error::{PatrecError, Result};
use serde::{Deserialize, Serialize};

/// A 2D matrix (row-major storage).
///
/// # Examples
///
/// ```
/// use patrec::primitives::Matrix;
///
/// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("data length matches rows * cols");
/// assert_eq!(m.shape(), (2, 3));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Copy> Matrix<T> {
    /// Creates a new matrix from a vector of data.
    ///
    /// # Errors
    ///
    /// Returns an error if data length doesn't match rows * cols.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> std::result::Result<Self, &'static str> {
        if data.len() != rows * cols {
            return Err("Data length must equal rows * cols");
        }
        Ok(Self { data, rows, cols })
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Gets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    /// Sets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }

    /// Returns a row as a Vector.
    #[must_use]
    pub fn row(&self, row_idx: usize) -> Vector<T> {
        let start = row_idx * self.cols;
        let end = start + self.cols;
        Vector::from_slice(&self.data[start..end])
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: Copy + Default> Matrix<T> {
    /// Creates a matrix filled with `T::default()` (zero for numbers).
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![T::default(); rows * cols],
            rows,
            cols,
        }
    }
}

impl Matrix<f32> {
    /// Stacks equal-length vectors as the rows of a matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if the vectors differ in length.
    pub fn from_rows(rows: &[Vector<f32>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vector::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(PatrecError::dimension_mismatch("row length", cols, row.len()));
            }
            data.extend_from_slice(row.as_slice());
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// Matrix-vector multiplication.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions don't match.
    pub fn matvec(&self, vec: &Vector<f32>) -> std::result::Result<Vector<f32>, &'static str> {
        if self.cols != vec.len() {
            return Err("Matrix columns must match vector length");
        }

        Ok((0..self.rows).map(|i| self.row(i).dot(vec)).collect())
    }

    /// Computes the quadratic form `vᵀ · A · v`.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is not square or `v` has the wrong length.
    pub fn quadratic_form(&self, v: &Vector<f32>) -> Result<f32> {
        if self.rows != self.cols {
            return Err(PatrecError::DimensionMismatch {
                expected: "square matrix".to_string(),
                actual: format!("{}x{}", self.rows, self.cols),
            });
        }
        let av = self
            .matvec(v)
            .map_err(|_| PatrecError::dimension_mismatch("vector length", self.cols, v.len()))?;
        Ok(v.dot(&av))
    }

    /// Adds another matrix element-wise.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions don't match.
    pub fn add(&self, other: &Self) -> std::result::Result<Self, &'static str> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err("Matrix dimensions must match for addition");
        }

        let data: Vec<f32> = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a + b)
            .collect();

        Ok(Self {
            data,
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// Multiplies each element by a scalar.
    #[must_use]
    pub fn mul_scalar(&self, scalar: f32) -> Self {
        Self {
            data: self.data.iter().map(|x| x * scalar).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Inverts the matrix by Gauss-Jordan elimination with partial pivoting.
    ///
    /// A pivot counts as zero when it is within `n · ε · max|a_ij|` of zero,
    /// so the singularity check does not depend on the scale of the entries.
    ///
    /// # Errors
    ///
    /// Returns [`PatrecError::DimensionMismatch`] if the matrix is not square and
    /// [`PatrecError::SingularMatrix`] if a pivot vanishes.
    pub fn inverse(&self) -> Result<Self> {
        if self.rows != self.cols {
            return Err(PatrecError::DimensionMismatch {
                expected: "square matrix".to_string(),
                actual: format!("{}x{}", self.rows, self.cols),
            });
        }
        let n = self.rows;
        let width = 2 * n;
        let max_abs = self.data.iter().fold(0.0_f32, |m, x| m.max(x.abs()));
        let tolerance = n as f32 * f32::EPSILON * max_abs;

        // Augment with the identity: [A | I]
        let mut aug = vec![0.0_f32; n * width];
        for i in 0..n {
            aug[i * width..i * width + n].copy_from_slice(&self.data[i * n..(i + 1) * n]);
            aug[i * width + n + i] = 1.0;
        }

        for col in 0..n {
            let pivot_row = (col..n)
                .max_by(|&a, &b| aug[a * width + col].abs().total_cmp(&aug[b * width + col].abs()))
                .unwrap_or(col);
            if pivot_row != col {
                for j in 0..width {
                    aug.swap(col * width + j, pivot_row * width + j);
                }
            }

            let pivot = aug[col * width + col];
            if pivot.abs() <= tolerance {
                return Err(PatrecError::SingularMatrix { pivot: pivot.abs() });
            }

            for j in 0..width {
                aug[col * width + j] /= pivot;
            }

            for row in 0..n {
                if row == col {
                    continue;
                }
                let factor = aug[row * width + col];
                if factor == 0.0 {
                    continue;
                }
                for j in 0..width {
                    aug[row * width + j] -= factor * aug[col * width + j];
                }
            }
        }

        let mut data = Vec::with_capacity(n * n);
        for i in 0..n {
            data.extend_from_slice(&aug[i * width + n..(i + 1) * width]);
        }
        Ok(Self {
            data,
            rows: n,
            cols: n,
        })
    }
}

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod tests;
