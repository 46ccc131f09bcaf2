//! # duomat
//!
//! Generic numeric matrices whose storage can be switched between a dense
//! buffer and a sparse map of nonzeros.
//!
//! ## Quick Start
//!
//! ```
//! use duomat::prelude::*;
//!
//! let m = Matrix::from_rows(vec![vec![4.0_f64, 7.0], vec![2.0, 6.0]])?;
//! assert!((m.det()? - 10.0).abs() < 1e-12);
//!
//! let inv = m.inverse()?;
//! assert!((inv.get(1, 1)? - 0.6).abs() < 1e-12);
//!
//! let mut s = m.clone();
//! s.to_sparse();
//! assert_eq!(s, m);
//! # Ok::<(), MatrixError>(())
//! ```
//!
//! ## Crate Organization
//!
//! - [`numeric`]: element traits, error type and numeric configuration
//! - [`linalg`]: the matrix, its storage backends and algorithms

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use duomat_core as numeric;
pub use duomat_linalg as linalg;

/// Commonly used types.
pub mod prelude {
    pub use duomat_core::{MatrixError, NumericConfig, Real, Result, Scalar, StoragePolicy};
    pub use duomat_linalg::{Echelon, Eigen, Matrix, Qr, RenderStyle, Storage, StorageMode};
}
