//! Gaussian elimination with partial pivoting.
//!
//! The echelon form produced here backs [`Matrix::rank`], [`Matrix::det`]
//! and the eigenvector recovery in the decomposition module.

use tracing::trace;

use duomat_core::{MatrixError, Real, Result};

use crate::matrix::Matrix;

/// The row-echelon form of a matrix plus the bookkeeping of how it was
/// reached.
#[derive(Clone, Debug)]
pub struct Echelon<T> {
    /// The upper-triangular result, residuals below tolerance set to zero.
    pub matrix: Matrix<T>,
    /// 1-based `(row, col)` of every pivot, in elimination order.
    pub pivots: Vec<(usize, usize)>,
    /// Number of row exchanges performed.
    pub swaps: usize,
    /// Number of row updates performed below pivots.
    pub eliminations: usize,
}

impl<T> Echelon<T> {
    /// Returns the number of pivots found.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.pivots.len()
    }

    /// Returns row exchanges plus elimination steps.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.swaps + self.eliminations
    }
}

impl<T: Real> Matrix<T> {
    /// Returns the row-echelon form of the matrix.
    #[must_use]
    pub fn gauss(&self) -> Self {
        self.gauss_counted().matrix
    }

    /// Gaussian elimination with partial pivoting.
    ///
    /// For each column the row with the largest magnitude at or below the
    /// current pivot row is swapped into place; columns whose candidates are
    /// all below the configured tolerance are skipped.
    #[must_use]
    pub fn gauss_counted(&self) -> Echelon<T> {
        let eps = self.config.eps;
        let mut m = self.clone();
        let mut pivots = Vec::new();
        let mut swaps = 0;
        let mut eliminations = 0;
        let mut pivot_row = 0;
        let mut pivot_col = 0;

        while pivot_row < m.rows && pivot_col < m.cols {
            let max_row = (pivot_row + 1..m.rows).fold(pivot_row, |best, row| {
                if m.at(row, pivot_col).abs() > m.at(best, pivot_col).abs() {
                    row
                } else {
                    best
                }
            });

            if m.at(max_row, pivot_col).is_negligible(eps) {
                pivot_col += 1;
                continue;
            }

            if max_row != pivot_row {
                m.swap_rows(pivot_row, max_row);
                swaps += 1;
            }

            let pivot = m.at(pivot_row, pivot_col);
            for row in pivot_row + 1..m.rows {
                let entry = m.at(row, pivot_col);
                if entry.is_zero() {
                    continue;
                }
                m.add_scaled_row(row, pivot_row, -entry / pivot, pivot_col + 1);
                m.put(row, pivot_col, T::zero());
                eliminations += 1;
            }

            pivots.push((pivot_row + 1, pivot_col + 1));
            pivot_row += 1;
            pivot_col += 1;
        }

        m.set_zero();
        trace!(
            "eliminated {}x{} matrix: rank {}, {} swaps, {} row updates",
            m.rows,
            m.cols,
            pivots.len(),
            swaps,
            eliminations
        );

        Echelon {
            matrix: m,
            pivots,
            swaps,
            eliminations,
        }
    }

    /// Returns the rank: the number of nonzero rows of the echelon form.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.gauss_counted().rank()
    }

    /// Returns the determinant.
    ///
    /// Computed as the product of the echelon diagonal, negated once per row
    /// exchange.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NotSquareMatrix`] if rows != cols.
    pub fn det(&self) -> Result<T> {
        if !self.is_square() {
            return Err(MatrixError::NotSquareMatrix {
                op: "determinant",
                rows: self.rows,
                cols: self.cols,
            });
        }

        let echelon = self.gauss_counted();
        if echelon.rank() < self.rows {
            return Ok(T::zero());
        }

        let product = (0..self.rows).fold(T::one(), |acc, i| acc * echelon.matrix.at(i, i));
        if echelon.swaps % 2 == 1 {
            Ok(-product)
        } else {
            Ok(product)
        }
    }
}
