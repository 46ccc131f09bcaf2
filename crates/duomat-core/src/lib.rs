//! # duomat-core
//!
//! Foundation crate for duomat.
//!
//! This crate provides:
//! - Element traits: `Scalar`, `Real`
//! - The error type shared by every matrix operation
//! - Numeric configuration: tolerance, eigen iteration count, storage policy
//!
//! ## Trait Hierarchy
//!
//! ```text
//! Scalar
//!  └── Real
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod scalar;

pub use config::{NumericConfig, StoragePolicy};
pub use error::{MatrixError, Result};
pub use scalar::{Real, Scalar};
