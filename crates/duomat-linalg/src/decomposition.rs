//! QR decomposition via Householder reflections and eigen extraction by
//! QR iteration.
//!
//! # Algorithm
//!
//! For each column `k` the reflection `H = I - 2 v v^T` maps the part of the
//! column at and below the diagonal onto `alpha * e_k`. Accumulating the
//! reflections gives `H_{n-1} ... H_1 A = R`, so `Q` is the transpose of the
//! accumulated product.
//!
//! Eigenvalues are read off the diagonal after a fixed number of iterations
//! of `A_{k+1} = R_k Q_k`. Each eigenvector is recovered from the echelon
//! form of `A - lambda I` by back-substitution.

use tracing::{debug, trace};

use duomat_core::{MatrixError, Real, Result};

use crate::matrix::Matrix;
use crate::storage::StorageMode;

/// Result of a QR decomposition: `A = Q R`.
#[derive(Clone, Debug)]
pub struct Qr<T> {
    /// Orthogonal factor.
    pub q: Matrix<T>,
    /// Upper-triangular factor.
    pub r: Matrix<T>,
}

/// Eigenvalues and eigenvectors of a square matrix.
#[derive(Clone, Debug)]
pub struct Eigen<T> {
    /// `1 x n` row of eigenvalues.
    pub values: Matrix<T>,
    /// `n x n` matrix whose column `i` is the unit eigenvector for
    /// eigenvalue `i`.
    pub vectors: Matrix<T>,
}

#[allow(clippy::many_single_char_names)]
impl<T: Real> Matrix<T> {
    /// Computes the QR decomposition of a square matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidDimensions`] if the matrix is not square
    /// and [`MatrixError::DecompositionFailed`] if a column at or below the
    /// diagonal vanishes so no reflection can be formed.
    pub fn qr(&self) -> Result<Qr<T>> {
        if !self.is_square() {
            return Err(MatrixError::InvalidDimensions {
                reason: "QR decomposition requires a square matrix",
            });
        }
        let n = self.rows;
        let two = T::one() + T::one();

        let mut a = self.clone();
        a.to_dense();
        let mut q = Self::identity(n).with_config(self.config);

        for k in 0..n.saturating_sub(1) {
            // Scale by the largest magnitude to avoid overflow in the norm
            let mut u = (k..n).fold(T::zero(), |acc, i| acc.max(a.at(i, k).abs()));
            if u.is_zero() {
                debug!("QR decomposition: column {} vanishes", k + 1);
                return Err(MatrixError::DecompositionFailed { column: k + 1 });
            }
            let norm_sq = (k..n).fold(T::zero(), |acc, i| {
                let t = a.at(i, k) / u;
                acc + t * t
            });
            if a.at(k, k) > T::zero() {
                u = -u;
            }
            let alpha = u * norm_sq.sqrt();
            if alpha.abs() < T::epsilon() {
                debug!("QR decomposition: degenerate reflection at column {}", k + 1);
                return Err(MatrixError::DecompositionFailed { column: k + 1 });
            }

            let u = (two * alpha * (alpha - a.at(k, k))).sqrt();
            if u.abs() < T::epsilon() {
                continue;
            }

            // v is stored in column k of the working matrix
            a.put(k, k, (a.at(k, k) - alpha) / u);
            for i in k + 1..n {
                a.put(i, k, a.at(i, k) / u);
            }

            for j in 0..n {
                let t = (k..n).fold(T::zero(), |acc, m| acc + a.at(m, k) * q.at(m, j));
                for i in k..n {
                    q.put(i, j, q.at(i, j) - two * t * a.at(i, k));
                }
            }

            for j in k + 1..n {
                let t = (k..n).fold(T::zero(), |acc, m| acc + a.at(m, k) * a.at(m, j));
                for i in k..n {
                    a.put(i, j, a.at(i, j) - two * t * a.at(i, k));
                }
            }

            a.put(k, k, alpha);
            for i in k + 1..n {
                a.put(i, k, T::zero());
            }
        }

        Ok(Qr {
            q: q.transpose(),
            r: a,
        })
    }

    /// Computes the QR decomposition into caller-provided containers.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidDimensions`] unless `q`, `r` and `self`
    /// are all square and of the same size, plus the errors of [`Matrix::qr`].
    pub fn qr_into(&self, q: &mut Self, r: &mut Self) -> Result<()> {
        if !q.is_square() || !r.is_square() || q.shape() != r.shape() || q.shape() != self.shape() {
            return Err(MatrixError::InvalidDimensions {
                reason: "Q and R must be square and match the source",
            });
        }
        let Qr { q: q_out, r: r_out } = self.qr()?;
        *q = q_out;
        *r = r_out;
        Ok(())
    }

    /// Approximates eigenvalues and eigenvectors.
    ///
    /// Runs `config().eigen_iterations` rounds of QR iteration. Accuracy is
    /// not guaranteed for repeated or complex eigenvalues.
    ///
    /// Each round zeroes entries below `config().eps` in absolute terms, so a
    /// matrix whose entries are all near or below `eps` loses its contents
    /// and the next QR step fails. Lower `eps` with [`Matrix::with_config`]
    /// for such matrices.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidDimensions`] if the matrix is not square,
    /// plus the errors of [`Matrix::qr`].
    pub fn eigen(&self) -> Result<Eigen<T>> {
        if !self.is_square() {
            return Err(MatrixError::InvalidDimensions {
                reason: "only square matrices have eigenvalues and eigenvectors",
            });
        }
        let n = self.rows;

        let mut work = self.clone();
        for _ in 0..self.config.eigen_iterations {
            let Qr { q, r } = work.qr()?;
            work = r.matmul(&q)?;
        }
        trace!(
            "QR iteration on {}x{} matrix finished after {} rounds",
            n,
            n,
            self.config.eigen_iterations
        );

        let mut values = self.derived(1, n, StorageMode::Dense);
        let mut vectors = self.derived(n, n, StorageMode::Dense);
        for i in 0..n {
            let lambda = work.at(i, i);
            values.put(0, i, lambda);
            for (row, component) in self.null_vector(lambda).into_iter().enumerate() {
                vectors.put(row, i, component);
            }
        }

        Ok(Eigen { values, vectors })
    }

    /// Approximates eigenvalues and eigenvectors into caller-provided
    /// containers.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidDimensions`] if the matrix is not square,
    /// `values` is not `1 x n` or `vectors` is not `n x n`, plus the errors of
    /// [`Matrix::eigen`].
    pub fn eigen_into(&self, values: &mut Self, vectors: &mut Self) -> Result<()> {
        if !self.is_square() {
            return Err(MatrixError::InvalidDimensions {
                reason: "only square matrices have eigenvalues and eigenvectors",
            });
        }
        if values.shape() != (1, self.cols) {
            return Err(MatrixError::InvalidDimensions {
                reason: "eigenvalue container must be 1 x n",
            });
        }
        if vectors.shape() != self.shape() {
            return Err(MatrixError::InvalidDimensions {
                reason: "eigenvector container must be n x n",
            });
        }
        let Eigen {
            values: v_out,
            vectors: e_out,
        } = self.eigen()?;
        *values = v_out;
        *vectors = e_out;
        Ok(())
    }

    /// Returns a unit vector spanning (part of) the near-null space of
    /// `self - lambda I`.
    ///
    /// When elimination finds no free column the last pivot is treated as
    /// round-off and its column is freed instead.
    fn null_vector(&self, lambda: T) -> Vec<T> {
        let n = self.rows;
        let mut shifted = self.clone();
        for i in 0..n {
            shifted.put(i, i, shifted.at(i, i) - lambda);
        }

        let echelon = shifted.gauss_counted();
        let u = &echelon.matrix;
        let mut pivots: Vec<(usize, usize)> = echelon
            .pivots
            .iter()
            .map(|&(row, col)| (row - 1, col - 1))
            .collect();

        let free = (0..n).find(|&col| pivots.iter().all(|&(_, pc)| pc != col));
        let free = match free {
            Some(col) => col,
            None => match pivots.pop() {
                Some((_, col)) => col,
                None => return Vec::new(),
            },
        };

        let mut x = vec![T::zero(); n];
        x[free] = T::one();
        for &(row, col) in pivots.iter().rev() {
            let s = (col + 1..n).fold(T::zero(), |acc, j| acc + u.at(row, j) * x[j]);
            x[col] = -s / u.at(row, col);
        }

        let norm = x.iter().fold(T::zero(), |acc, &v| acc + v * v).sqrt();
        if norm > T::zero() {
            for v in &mut x {
                *v = *v / norm;
            }
        }
        x
    }
}
