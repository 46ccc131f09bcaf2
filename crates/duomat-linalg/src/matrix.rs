//! The matrix container.
//!
//! [`Matrix`] owns exactly one [`Storage`] backend and exposes bounds-checked
//! access with 1-based coordinates. Internally every algorithm works with
//! 0-based offsets: `offset(x, y) = (x - 1) * stride + (y - 1)`.

use rand::distributions::uniform::SampleUniform;
use rand::Rng;
use tracing::debug;

use duomat_core::{MatrixError, NumericConfig, Result, Scalar, StoragePolicy};

use crate::storage::{Storage, StorageMode};

/// A two-dimensional numeric matrix with switchable dense/sparse storage.
#[derive(Clone, Debug)]
pub struct Matrix<T> {
    /// The live backend.
    pub(crate) storage: Storage<T>,
    /// Number of rows.
    pub(crate) rows: usize,
    /// Number of columns.
    pub(crate) cols: usize,
    /// Row pitch; always equal to `cols`.
    pub(crate) stride: usize,
    /// Tolerances inherited by every matrix derived from this one.
    pub(crate) config: NumericConfig,
}

impl<T: Scalar> Matrix<T> {
    /// Creates a dense all-zero matrix.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_mode(rows, cols, StorageMode::Dense)
    }

    /// Creates a sparse all-zero matrix.
    #[must_use]
    pub fn sparse(rows: usize, cols: usize) -> Self {
        Self::with_mode(rows, cols, StorageMode::Sparse)
    }

    /// Creates an all-zero matrix with the given storage mode.
    #[must_use]
    pub fn with_mode(rows: usize, cols: usize, mode: StorageMode) -> Self {
        Self {
            storage: Storage::zeros(rows * cols, mode),
            rows,
            cols,
            stride: cols,
            config: NumericConfig::default(),
        }
    }

    /// Creates a matrix filled from `values` in row-major order.
    ///
    /// Filling stops when either the values or the grid run out: excess
    /// values are ignored and missing ones leave the remaining cells zero.
    #[must_use]
    pub fn from_values(rows: usize, cols: usize, values: &[T], sparse: bool) -> Self {
        let mode = if sparse {
            StorageMode::Sparse
        } else {
            StorageMode::Dense
        };
        let mut m = Self::with_mode(rows, cols, mode);
        for (offset, &value) in values.iter().take(rows * cols).enumerate() {
            m.storage.set(offset, value);
        }
        m
    }

    /// Creates a dense matrix from a row-major nested sequence.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidDimensions`] if the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != num_cols) {
            return Err(MatrixError::InvalidDimensions {
                reason: "all rows must have the same length",
            });
        }
        let data: Vec<T> = rows.into_iter().flatten().collect();
        Ok(Self {
            storage: Storage::Dense(data),
            rows: num_rows,
            cols: num_cols,
            stride: num_cols,
            config: NumericConfig::default(),
        })
    }

    /// Creates a dense `n x n` identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::new(n, n);
        for i in 0..n {
            m.put(i, i, T::one());
        }
        m
    }

    /// Creates a dense matrix of values drawn uniformly from `[low, high)`.
    ///
    /// # Panics
    ///
    /// Panics if `low >= high`.
    #[must_use]
    pub fn random<R>(rows: usize, cols: usize, low: T, high: T, rng: &mut R) -> Self
    where
        T: SampleUniform,
        R: Rng + ?Sized,
    {
        let data: Vec<T> = (0..rows * cols).map(|_| rng.gen_range(low..high)).collect();
        Self {
            storage: Storage::Dense(data),
            rows,
            cols,
            stride: cols,
            config: NumericConfig::default(),
        }
    }

    /// Returns this matrix with a different numeric configuration.
    #[must_use]
    pub fn with_config(mut self, config: NumericConfig) -> Self {
        self.config = config;
        self
    }

    /// An all-zero matrix carrying this matrix's configuration.
    pub(crate) fn derived(&self, rows: usize, cols: usize, mode: StorageMode) -> Self {
        Self::with_mode(rows, cols, mode).with_config(self.config)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the row pitch used for linear offsets.
    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns `(rows, cols)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Checks if the matrix has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks if the matrix is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Returns the current storage mode.
    #[must_use]
    pub fn mode(&self) -> StorageMode {
        self.storage.mode()
    }

    /// Checks if the matrix is stored sparse.
    #[must_use]
    pub fn is_sparse(&self) -> bool {
        self.mode() == StorageMode::Sparse
    }

    /// Returns the live backend.
    #[must_use]
    pub fn storage(&self) -> &Storage<T> {
        &self.storage
    }

    /// Returns the numeric configuration.
    #[must_use]
    pub fn config(&self) -> &NumericConfig {
        &self.config
    }

    /// Returns the number of nonzero entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.storage.nnz()
    }

    /// Returns the density (fraction of nonzero entries).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn density(&self) -> f64 {
        let total = self.len();
        if total == 0 {
            0.0
        } else {
            self.nnz() as f64 / total as f64
        }
    }

    // ------------------------------------------------------------------
    // Indexed access
    // ------------------------------------------------------------------

    /// Linear offset of 1-based `(x, y)`, or `OutOfRange`.
    fn offset(&self, x: usize, y: usize) -> Result<usize> {
        if x == 0 || x > self.rows || y == 0 || y > self.cols {
            debug!(
                "index ({}, {}) out of range 1-{}, 1-{}",
                x, y, self.rows, self.cols
            );
            return Err(MatrixError::OutOfRange {
                row: x,
                col: y,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok((x - 1) * self.stride + (y - 1))
    }

    /// Returns the element at 1-based `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfRange`] if `x` is not in `1..=rows` or `y`
    /// is not in `1..=cols`.
    pub fn get(&self, x: usize, y: usize) -> Result<T> {
        let offset = self.offset(x, y)?;
        Ok(self.storage.get(offset))
    }

    /// Sets the element at 1-based `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfRange`] if `x` is not in `1..=rows` or `y`
    /// is not in `1..=cols`.
    pub fn set(&mut self, x: usize, y: usize, value: T) -> Result<()> {
        let offset = self.offset(x, y)?;
        self.storage.set(offset, value);
        Ok(())
    }

    /// Reads 0-based `(i, j)` without a bounds check against the shape.
    #[inline]
    pub(crate) fn at(&self, i: usize, j: usize) -> T {
        debug_assert!(i < self.rows && j < self.cols);
        self.storage.get(i * self.stride + j)
    }

    /// Writes 0-based `(i, j)` without a bounds check against the shape.
    #[inline]
    pub(crate) fn put(&mut self, i: usize, j: usize, value: T) {
        debug_assert!(i < self.rows && j < self.cols);
        self.storage.set(i * self.stride + j, value);
    }

    /// Iterates over all values in row-major order.
    pub fn values(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.rows).flat_map(move |i| (0..self.cols).map(move |j| self.at(i, j)))
    }

    /// Swaps two 0-based rows in-place.
    pub(crate) fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for j in 0..self.cols {
            let tmp = self.at(a, j);
            self.put(a, j, self.at(b, j));
            self.put(b, j, tmp);
        }
    }

    /// Adds a scaled row to another, starting at column `from`:
    /// `row[target] += scale * row[source]`.
    pub(crate) fn add_scaled_row(&mut self, target: usize, source: usize, scale: T, from: usize) {
        for j in from..self.cols {
            let value = self.at(target, j) + scale * self.at(source, j);
            self.put(target, j, value);
        }
    }

    // ------------------------------------------------------------------
    // Storage conversion
    // ------------------------------------------------------------------

    /// Switches to dense storage. Does nothing if already dense.
    pub fn to_dense(&mut self) {
        if !self.is_sparse() {
            return;
        }
        let len = self.len();
        let storage = std::mem::replace(&mut self.storage, Storage::Dense(Vec::new()));
        self.storage = storage.into_dense(len);
        debug!("converted {}x{} matrix to dense storage", self.rows, self.cols);
    }

    /// Switches to sparse storage. Does nothing if already sparse.
    pub fn to_sparse(&mut self) {
        if self.is_sparse() {
            return;
        }
        let storage = std::mem::replace(&mut self.storage, Storage::Dense(Vec::new()));
        self.storage = storage.into_sparse();
        debug!(
            "converted {}x{} matrix to sparse storage ({} nonzeros)",
            self.rows,
            self.cols,
            self.nnz()
        );
    }

    /// Converts storage according to the matrix's current density.
    ///
    /// Returns the mode in effect afterwards.
    pub fn apply_storage_policy(&mut self, policy: &StoragePolicy) -> StorageMode {
        let density = self.density();
        if policy.prefers_sparse(density) {
            self.to_sparse();
        } else {
            self.to_dense();
        }
        debug!(
            "storage policy (threshold {}) chose {:?} at density {:.3}",
            policy.sparse_threshold,
            self.mode(),
            density
        );
        self.mode()
    }

    // ------------------------------------------------------------------
    // Nested-sequence conversion
    // ------------------------------------------------------------------

    /// Returns the contents as rows of values.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        (0..self.rows)
            .map(|i| (0..self.cols).map(|j| self.at(i, j)).collect())
            .collect()
    }
}

impl<T: Scalar> PartialEq for Matrix<T> {
    /// Matrices are equal when their shapes and values agree, regardless of
    /// storage mode or configuration.
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.values().eq(other.values())
    }
}

impl<T: Scalar> From<&Matrix<T>> for Vec<Vec<T>> {
    fn from(m: &Matrix<T>) -> Self {
        m.to_rows()
    }
}
