//! Numeric configuration threaded through every matrix.

/// Tolerances and iteration counts used by the numerical routines.
///
/// Every matrix carries a copy; matrices derived from it (clones,
/// transposes, products, reductions) inherit the same configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumericConfig {
    /// Values with magnitude below this are treated as zero by pivot
    /// selection and residual cleanup.
    pub eps: f64,
    /// Number of QR iterations performed by eigenvalue extraction.
    pub eigen_iterations: usize,
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self {
            eps: 1e-9,
            eigen_iterations: 50,
        }
    }
}

impl NumericConfig {
    /// Returns a copy with a different zero tolerance.
    #[must_use]
    pub fn with_eps(self, eps: f64) -> Self {
        Self { eps, ..self }
    }

    /// Returns a copy with a different QR iteration count.
    #[must_use]
    pub fn with_eigen_iterations(self, eigen_iterations: usize) -> Self {
        Self {
            eigen_iterations,
            ..self
        }
    }
}

/// Density-based choice between dense and sparse storage.
///
/// The policy is only consulted when explicitly applied to a matrix; writes
/// never switch storage on their own.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StoragePolicy {
    /// Matrices whose fraction of nonzero entries is below this threshold
    /// are stored sparse, all others dense.
    pub sparse_threshold: f64,
}

impl Default for StoragePolicy {
    fn default() -> Self {
        Self {
            sparse_threshold: 0.25,
        }
    }
}

impl StoragePolicy {
    /// Returns true if a matrix with the given density should be sparse.
    #[must_use]
    pub fn prefers_sparse(&self, density: f64) -> bool {
        density < self.sparse_threshold
    }
}
