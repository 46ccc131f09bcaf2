//! Elementwise operations, reductions, extraction and arithmetic.

use num_traits::NumCast;

use duomat_core::{MatrixError, Result, Scalar};

use crate::matrix::Matrix;
use crate::storage::{Storage, StorageMode};

impl<T: Scalar> Matrix<T> {
    // ------------------------------------------------------------------
    // Shape transformations
    // ------------------------------------------------------------------

    /// Returns the transpose, keeping the storage mode.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut result = self.derived(self.cols, self.rows, self.mode());
        match &self.storage {
            Storage::Dense(_) => {
                for i in 0..self.rows {
                    for j in 0..self.cols {
                        result.put(j, i, self.at(i, j));
                    }
                }
            }
            Storage::Sparse(_) => {
                self.storage.for_each_nonzero(|offset, value| {
                    let (i, j) = (offset / self.stride, offset % self.stride);
                    result.put(j, i, value);
                });
            }
        }
        result
    }

    /// Returns the matrix rotated by 180 degrees: both axes reversed.
    #[must_use]
    pub fn rotate_180(&self) -> Self {
        let mut result = self.derived(self.rows, self.cols, self.mode());
        for i in 0..self.rows {
            for j in 0..self.cols {
                result.put(self.rows - 1 - i, self.cols - 1 - j, self.at(i, j));
            }
        }
        result
    }

    /// Returns a dense `rows x cols` matrix refilled in row-major order from
    /// this matrix's values; cells past the end of the source are zero.
    #[must_use]
    pub fn resize(&self, rows: usize, cols: usize) -> Self {
        let mut result = self.derived(rows, cols, StorageMode::Dense);
        for (offset, value) in self.values().take(rows * cols).enumerate() {
            result.storage.set(offset, value);
        }
        result
    }

    /// Replaces every entry with magnitude below the configured tolerance
    /// by exact zero.
    pub fn set_zero(&mut self) {
        let eps = self.config.eps;
        for i in 0..self.rows {
            for j in 0..self.cols {
                let value = self.at(i, j);
                if !value.is_zero() && value.is_negligible(eps) {
                    self.put(i, j, T::zero());
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Rows, columns and submatrices
    // ------------------------------------------------------------------

    fn check_row(&self, r: usize) -> Result<()> {
        if r == 0 || r > self.rows {
            return Err(MatrixError::OutOfRange {
                row: r,
                col: 1,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    fn check_col(&self, c: usize) -> Result<()> {
        if c == 0 || c > self.cols {
            return Err(MatrixError::OutOfRange {
                row: 1,
                col: c,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Returns the values of 1-based row `r`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfRange`] if `r` is not in `1..=rows`.
    pub fn get_row(&self, r: usize) -> Result<Vec<T>> {
        self.check_row(r)?;
        Ok((0..self.cols).map(|j| self.at(r - 1, j)).collect())
    }

    /// Returns the values of 1-based column `c`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfRange`] if `c` is not in `1..=cols`.
    pub fn get_col(&self, c: usize) -> Result<Vec<T>> {
        self.check_col(c)?;
        Ok((0..self.rows).map(|i| self.at(i, c - 1)).collect())
    }

    /// Returns a copy of the inclusive 1-based range
    /// `row_start..=row_end` x `col_start..=col_end`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidCoordinates`] if a range is inverted,
    /// starts at 0 or runs past the matrix.
    pub fn get_submatrix(
        &self,
        row_start: usize,
        row_end: usize,
        col_start: usize,
        col_end: usize,
    ) -> Result<Self> {
        if row_start == 0 || col_start == 0 {
            return Err(MatrixError::InvalidCoordinates {
                reason: "submatrix coordinates are 1-based",
            });
        }
        if row_start > row_end || col_start > col_end {
            return Err(MatrixError::InvalidCoordinates {
                reason: "submatrix range is inverted",
            });
        }
        if row_end > self.rows || col_end > self.cols {
            return Err(MatrixError::InvalidCoordinates {
                reason: "submatrix range exceeds the matrix",
            });
        }

        let rows = row_end - row_start + 1;
        let cols = col_end - col_start + 1;
        let mut result = self.derived(rows, cols, self.mode());
        for i in 0..rows {
            for j in 0..cols {
                result.put(i, j, self.at(row_start - 1 + i, col_start - 1 + j));
            }
        }
        Ok(result)
    }

    /// Returns the cofactor minor: the matrix without row `x` and column `y`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::CoordinateExceedsBounds`] if `(x, y)` is not a
    /// cell of the matrix.
    pub fn get_cominor(&self, x: usize, y: usize) -> Result<Self> {
        if x == 0 || x > self.rows || y == 0 || y > self.cols {
            return Err(MatrixError::CoordinateExceedsBounds {
                row: x,
                col: y,
                rows: self.rows,
                cols: self.cols,
            });
        }

        let mut result = self.derived(self.rows - 1, self.cols - 1, self.mode());
        for (ri, i) in (0..self.rows).filter(|&i| i != x - 1).enumerate() {
            for (rj, j) in (0..self.cols).filter(|&j| j != y - 1).enumerate() {
                result.put(ri, rj, self.at(i, j));
            }
        }
        Ok(result)
    }

    // ------------------------------------------------------------------
    // Reductions
    // ------------------------------------------------------------------

    /// Returns the largest element.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfRange`] if the matrix is empty.
    pub fn max(&self) -> Result<T> {
        let seed = self.get(1, 1)?;
        Ok(self.values().fold(seed, larger))
    }

    /// Returns the smallest element.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfRange`] if the matrix is empty.
    pub fn min(&self) -> Result<T> {
        let seed = self.get(1, 1)?;
        Ok(self.values().fold(seed, smaller))
    }

    /// Returns the sum of all elements.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfRange`] if the matrix is empty.
    pub fn sum(&self) -> Result<T> {
        let seed = self.get(1, 1)?;
        Ok(self.values().skip(1).fold(seed, |acc, v| acc + v))
    }

    /// Returns the mean of all elements.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfRange`] if the matrix is empty and
    /// [`MatrixError::NumericCast`] if the element count does not fit in `T`.
    pub fn avg(&self) -> Result<T> {
        let sum = self.sum()?;
        let count = <T as NumCast>::from(self.len()).ok_or(MatrixError::NumericCast)?;
        Ok(sum / count)
    }

    /// Returns the largest element of 1-based row `r`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfRange`] if the row does not exist or is empty.
    pub fn max_row(&self, r: usize) -> Result<T> {
        let seed = self.get(r, 1)?;
        Ok(self.get_row(r)?.into_iter().fold(seed, larger))
    }

    /// Returns the smallest element of 1-based row `r`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfRange`] if the row does not exist or is empty.
    pub fn min_row(&self, r: usize) -> Result<T> {
        let seed = self.get(r, 1)?;
        Ok(self.get_row(r)?.into_iter().fold(seed, smaller))
    }

    /// Returns the sum of 1-based row `r`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfRange`] if the row does not exist or is empty.
    pub fn sum_row(&self, r: usize) -> Result<T> {
        let seed = self.get(r, 1)?;
        Ok(self.get_row(r)?.into_iter().skip(1).fold(seed, |acc, v| acc + v))
    }

    /// Returns the largest element of 1-based column `c`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfRange`] if the column does not exist or is empty.
    pub fn max_col(&self, c: usize) -> Result<T> {
        let seed = self.get(1, c)?;
        Ok(self.get_col(c)?.into_iter().fold(seed, larger))
    }

    /// Returns the smallest element of 1-based column `c`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfRange`] if the column does not exist or is empty.
    pub fn min_col(&self, c: usize) -> Result<T> {
        let seed = self.get(1, c)?;
        Ok(self.get_col(c)?.into_iter().fold(seed, smaller))
    }

    /// Returns the sum of 1-based column `c`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfRange`] if the column does not exist or is empty.
    pub fn sum_col(&self, c: usize) -> Result<T> {
        let seed = self.get(1, c)?;
        Ok(self.get_col(c)?.into_iter().skip(1).fold(seed, |acc, v| acc + v))
    }

    /// Returns the sum of the diagonal.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NotSquareMatrix`] if rows != cols.
    pub fn trace(&self) -> Result<T> {
        if !self.is_square() {
            return Err(MatrixError::NotSquareMatrix {
                op: "trace",
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok((0..self.rows).fold(T::zero(), |acc, i| acc + self.at(i, i)))
    }

    // ------------------------------------------------------------------
    // Arithmetic
    // ------------------------------------------------------------------

    fn zip_with<F>(&self, other: &Self, f: F) -> Result<Self>
    where
        F: Fn(T, T) -> T,
    {
        if self.shape() != other.shape() {
            return Err(MatrixError::InvalidDimensions {
                reason: "operands must have the same shape",
            });
        }
        let mut result = self.derived(self.rows, self.cols, StorageMode::Dense);
        for i in 0..self.rows {
            for j in 0..self.cols {
                result.put(i, j, f(self.at(i, j), other.at(i, j)));
            }
        }
        Ok(result)
    }

    /// Elementwise sum.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidDimensions`] if the shapes differ.
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Elementwise difference.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidDimensions`] if the shapes differ.
    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Multiplies every entry by `k`.
    #[must_use]
    pub fn scale(&self, k: T) -> Self {
        let mut result = self.derived(self.rows, self.cols, StorageMode::Dense);
        for i in 0..self.rows {
            for j in 0..self.cols {
                result.put(i, j, self.at(i, j) * k);
            }
        }
        result.set_zero();
        result
    }

    /// Matrix product `self * other`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::DimensionsNotMatched`] if `self.cols != other.rows`.
    pub fn matmul(&self, other: &Self) -> Result<Self> {
        if self.cols != other.rows {
            return Err(MatrixError::DimensionsNotMatched {
                lhs: self.shape(),
                rhs: other.shape(),
            });
        }
        let mut result = self.derived(self.rows, other.cols, StorageMode::Dense);
        for i in 0..self.rows {
            for j in 0..other.cols {
                let sum = (0..self.cols).fold(T::zero(), |acc, k| acc + self.at(i, k) * other.at(k, j));
                result.put(i, j, sum);
            }
        }
        result.set_zero();
        Ok(result)
    }

    /// Matrix-vector product `self * x` for a column vector `x`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::DimensionsNotMatched`] if `x.len() != cols`.
    pub fn mul_vector(&self, x: &[T]) -> Result<Vec<T>> {
        if x.len() != self.cols {
            return Err(MatrixError::DimensionsNotMatched {
                lhs: self.shape(),
                rhs: (x.len(), 1),
            });
        }
        Ok((0..self.rows)
            .map(|i| {
                x.iter()
                    .enumerate()
                    .fold(T::zero(), |acc, (j, &v)| acc + self.at(i, j) * v)
            })
            .collect())
    }

    /// Left-multiplies by the vector `x`.
    ///
    /// If `self` is a `1 x n` row and `x` has `n` entries, `x` is taken as a
    /// column and the `n x n` outer product is returned. Otherwise `x` is a
    /// row vector and the `1 x cols` product `x * self` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::DimensionsNotMatched`] if neither form applies.
    pub fn vector_mul(&self, x: &[T]) -> Result<Self> {
        if self.rows == 1 && self.cols == x.len() {
            let n = self.cols;
            let mut result = self.derived(n, n, StorageMode::Dense);
            for (i, &xi) in x.iter().enumerate() {
                for j in 0..n {
                    result.put(i, j, xi * self.at(0, j));
                }
            }
            return Ok(result);
        }
        if self.rows != 1 && self.rows == x.len() {
            let mut result = self.derived(1, self.cols, StorageMode::Dense);
            for j in 0..self.cols {
                let sum = x
                    .iter()
                    .enumerate()
                    .fold(T::zero(), |acc, (i, &xi)| acc + xi * self.at(i, j));
                result.put(0, j, sum);
            }
            return Ok(result);
        }
        Err(MatrixError::DimensionsNotMatched {
            lhs: (1, x.len()),
            rhs: self.shape(),
        })
    }
}

fn larger<T: PartialOrd>(acc: T, v: T) -> T {
    if v > acc {
        v
    } else {
        acc
    }
}

fn smaller<T: PartialOrd>(acc: T, v: T) -> T {
    if v < acc {
        v
    } else {
        acc
    }
}
