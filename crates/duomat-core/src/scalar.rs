//! Numeric element traits.
//!
//! Storage, statistics, arithmetic and convolution only need the operations
//! of [`Scalar`]. Anything that divides by a pivot or takes a square root
//! (elimination, inverse, QR, eigen) requires [`Real`].

use std::fmt::{Debug, Display};

use num_traits::{Float, Num, NumCast};

/// An element that can be stored in a matrix.
///
/// # Laws
///
/// - `zero()` is the value of every entry absent from a sparse backend
/// - Ordering is only partial: comparisons involving NaN are false
pub trait Scalar: Num + NumCast + Copy + PartialOrd + Debug + Display {
    /// Returns `|self|` as an `f64`.
    ///
    /// Values that cannot be represented are treated as infinitely large so
    /// they are never mistaken for zero.
    fn magnitude(self) -> f64 {
        self.to_f64().map_or(f64::INFINITY, f64::abs)
    }

    /// Returns true if `|self| < eps`.
    fn is_negligible(self, eps: f64) -> bool {
        self.magnitude() < eps
    }
}

impl<T> Scalar for T where T: Num + NumCast + Copy + PartialOrd + Debug + Display {}

/// A real-valued floating point element (`f32`, `f64`).
pub trait Real: Scalar + Float {}

impl<T> Real for T where T: Scalar + Float {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude() {
        assert!((Scalar::magnitude(-2.5_f64) - 2.5).abs() < f64::EPSILON);
        assert!((Scalar::magnitude(-7_i32) - 7.0).abs() < f64::EPSILON);
        assert!((Scalar::magnitude(3_u8) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_is_negligible() {
        assert!(1e-12_f64.is_negligible(1e-9));
        assert!(!1e-6_f64.is_negligible(1e-9));
        assert!(0_i64.is_negligible(1e-9));
        assert!(!1_i64.is_negligible(1e-9));
    }

    #[test]
    fn test_nan_is_never_negligible() {
        assert!(!f64::NAN.is_negligible(1e-9));
    }
}
