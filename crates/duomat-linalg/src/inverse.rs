//! Matrix inverse by Gauss-Jordan elimination on `[A | I]`.

use tracing::debug;

use duomat_core::{MatrixError, Real, Result};

use crate::matrix::Matrix;
use crate::storage::StorageMode;

impl<T: Real> Matrix<T> {
    /// Computes the inverse.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NotSquareMatrix`] if rows != cols and
    /// [`MatrixError::NotInvertible`] if some column has no pivot with
    /// magnitude at or above the configured tolerance.
    pub fn inverse(&self) -> Result<Self> {
        if !self.is_square() {
            return Err(MatrixError::NotSquareMatrix {
                op: "inverse",
                rows: self.rows,
                cols: self.cols,
            });
        }
        let n = self.rows;
        let eps = self.config.eps;

        // Augmented matrix [A | I]
        let mut aug = self.derived(n, 2 * n, StorageMode::Dense);
        for i in 0..n {
            for j in 0..n {
                aug.put(i, j, self.at(i, j));
            }
            aug.put(i, n + i, T::one());
        }

        for col in 0..n {
            let pivot_row = (col + 1..n).fold(col, |best, row| {
                if aug.at(row, col).abs() > aug.at(best, col).abs() {
                    row
                } else {
                    best
                }
            });
            if aug.at(pivot_row, col).is_negligible(eps) {
                debug!("inverse of {}x{} matrix: no pivot in column {}", n, n, col + 1);
                return Err(MatrixError::NotInvertible { column: col + 1 });
            }
            aug.swap_rows(col, pivot_row);

            // Eliminate above and below the pivot
            let pivot = aug.at(col, col);
            for row in (0..n).filter(|&row| row != col) {
                let ratio = aug.at(row, col) / pivot;
                if ratio.is_zero() {
                    continue;
                }
                aug.add_scaled_row(row, col, -ratio, 0);
            }
        }

        // Normalize so every pivot is 1, keeping only the right half
        let mut inv = self.derived(n, n, StorageMode::Dense);
        for i in 0..n {
            let pivot = aug.at(i, i);
            for j in 0..n {
                inv.put(i, j, aug.at(i, n + j) / pivot);
            }
        }
        Ok(inv)
    }
}
