//! Errors returned by matrix operations.

use thiserror::Error;

/// Errors that can occur while accessing or transforming a matrix.
///
/// Coordinates carried by the variants are the 1-based coordinates the
/// caller supplied.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// An element index fell outside `1..=rows` x `1..=cols`.
    #[error("index ({row}, {col}) out of range 1-{rows}, 1-{cols}")]
    OutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Number of rows of the matrix.
        rows: usize,
        /// Number of columns of the matrix.
        cols: usize,
    },

    /// Operand or container shapes are incompatible with the operation.
    #[error("invalid dimensions: {reason}")]
    InvalidDimensions {
        /// What was wrong with the shapes.
        reason: &'static str,
    },

    /// Inner dimensions of a product disagree.
    #[error("dimensions not matched for multiply: {}x{} by {}x{}", lhs.0, lhs.1, rhs.0, rhs.1)]
    DimensionsNotMatched {
        /// Shape of the left operand.
        lhs: (usize, usize),
        /// Shape of the right operand.
        rhs: (usize, usize),
    },

    /// The operation is only defined for square matrices.
    #[error("{op} requires a square matrix, got {rows}x{cols}")]
    NotSquareMatrix {
        /// Name of the operation.
        op: &'static str,
        /// Number of rows of the matrix.
        rows: usize,
        /// Number of columns of the matrix.
        cols: usize,
    },

    /// Elimination found no usable pivot.
    #[error("matrix is not invertible: no pivot in column {column}")]
    NotInvertible {
        /// 1-based column without a pivot.
        column: usize,
    },

    /// A cofactor position lies outside the matrix.
    #[error("coordinate ({row}, {col}) exceeds bounds of {rows}x{cols} matrix")]
    CoordinateExceedsBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Number of rows of the matrix.
        rows: usize,
        /// Number of columns of the matrix.
        cols: usize,
    },

    /// A submatrix range is inverted or out of bounds.
    #[error("invalid coordinates: {reason}")]
    InvalidCoordinates {
        /// What was wrong with the range.
        reason: &'static str,
    },

    /// A Householder reflection could not be formed.
    #[error("QR decomposition failed: degenerate reflection at column {column}")]
    DecompositionFailed {
        /// 1-based column of the degenerate reflection.
        column: usize,
    },

    /// A count could not be converted into the element type.
    #[error("value cannot be represented in the element type")]
    NumericCast,
}

/// Convenience alias used throughout duomat.
pub type Result<T> = std::result::Result<T, MatrixError>;
