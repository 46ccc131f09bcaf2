//! # duomat-linalg
//!
//! Generic matrices with switchable dense/sparse storage.
//!
//! This crate provides:
//! - [`Matrix`] with 1-based bounds-checked access over a [`Storage`] backend
//!   that is either a contiguous buffer or a hash map of nonzeros
//! - Reductions, row/column/submatrix extraction, transpose and arithmetic
//! - Gaussian elimination with partial pivoting: echelon form, rank,
//!   determinant
//! - Gauss-Jordan inverse
//! - Householder QR and QR-iteration eigen extraction
//! - Two-dimensional correlation
//!
//! ## Storage Selection
//!
//! Storage never changes behind the caller's back. Construct with
//! [`Matrix::new`] or [`Matrix::sparse`], convert with [`Matrix::to_dense`] /
//! [`Matrix::to_sparse`], or let [`Matrix::apply_storage_policy`] choose from
//! the current density. Results of arithmetic are dense.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod convolution;
pub mod decomposition;
pub mod display;
pub mod elimination;
pub mod inverse;
pub mod matrix;
pub mod ops;
pub mod storage;

pub use decomposition::{Eigen, Qr};
pub use display::RenderStyle;
pub use duomat_core::{MatrixError, NumericConfig, Real, Result, Scalar, StoragePolicy};
pub use elimination::Echelon;
pub use matrix::Matrix;
pub use storage::{Storage, StorageMode};

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod tests;
