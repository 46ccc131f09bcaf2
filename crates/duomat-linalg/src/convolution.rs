//! Two-dimensional discrete correlation.

use duomat_core::Scalar;

use crate::matrix::Matrix;
use crate::storage::StorageMode;

impl<T: Scalar> Matrix<T> {
    /// Slides `kernel` over the matrix and returns a dense matrix of the same
    /// shape.
    ///
    /// Output cell `(i, j)` is the sum of
    /// `self[i + m - kr / 2][j + n - kc / 2] * kernel[m][n]` over the kernel,
    /// where `kr x kc` is the kernel shape. Terms that fall outside the matrix
    /// are omitted. The kernel is not flipped; pass `kernel.rotate_180()` for
    /// a true convolution.
    #[must_use]
    pub fn conv(&self, kernel: &Self) -> Self {
        let (cr, cc) = (kernel.rows / 2, kernel.cols / 2);
        let mut result = self.derived(self.rows, self.cols, StorageMode::Dense);

        for i in 0..self.rows {
            for j in 0..self.cols {
                let mut acc = T::zero();
                for m in 0..kernel.rows {
                    let Some(si) = (i + m).checked_sub(cr).filter(|&si| si < self.rows) else {
                        continue;
                    };
                    for n in 0..kernel.cols {
                        let Some(sj) = (j + n).checked_sub(cc).filter(|&sj| sj < self.cols) else {
                            continue;
                        };
                        acc = acc + self.at(si, sj) * kernel.at(m, n);
                    }
                }
                result.put(i, j, acc);
            }
        }
        result
    }
}
