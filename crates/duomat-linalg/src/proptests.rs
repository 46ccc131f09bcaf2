//! Property-based tests for storage and algorithms.

#[cfg(test)]
#[allow(clippy::cast_precision_loss)]
mod tests {
    use proptest::prelude::*;

    use crate::Matrix;

    // Strategy for a shape plus matching row-major values
    fn small_matrix() -> impl Strategy<Value = (usize, usize, Vec<i64>)> {
        (1usize..6, 1usize..6).prop_flat_map(|(r, c)| {
            (
                Just(r),
                Just(c),
                prop::collection::vec(prop_oneof![Just(0i64), -50i64..50], r * c),
            )
        })
    }

    // Strategy for strictly diagonally dominant (hence invertible) matrices
    fn dominant_matrix() -> impl Strategy<Value = Matrix<f64>> {
        (1usize..6).prop_flat_map(|n| {
            prop::collection::vec(-1.0f64..1.0, n * n).prop_map(move |values| {
                let mut m = Matrix::from_values(n, n, &values, false);
                for i in 1..=n {
                    let row_sum: f64 = m.get_row(i).unwrap().iter().map(|v| v.abs()).sum();
                    m.set(i, i, row_sum + 1.0).unwrap();
                }
                m
            })
        })
    }

    proptest! {
        #[test]
        fn set_then_get(
            (r, c, values) in small_matrix(),
            sparse in any::<bool>(),
            v in -1000i64..1000,
        ) {
            let mut m = Matrix::from_values(r, c, &values, sparse);
            m.set(r, c, v).unwrap();
            prop_assert_eq!(m.get(r, c).unwrap(), v);
            prop_assert_eq!(m.is_sparse(), sparse);
        }

        #[test]
        fn dense_sparse_round_trip((r, c, values) in small_matrix()) {
            let original = Matrix::from_values(r, c, &values, false);
            let mut m = original.clone();
            m.to_sparse();
            prop_assert_eq!(m.nnz(), values.iter().filter(|&&v| v != 0).count());
            m.to_dense();
            prop_assert_eq!(m.to_rows(), original.to_rows());
        }

        #[test]
        fn transpose_involution((r, c, values) in small_matrix(), sparse in any::<bool>()) {
            let m = Matrix::from_values(r, c, &values, sparse);
            let t = m.transpose();
            prop_assert_eq!(t.shape(), (c, r));
            prop_assert_eq!(t.is_sparse(), sparse);
            prop_assert_eq!(t.transpose(), m);
        }

        #[test]
        fn sum_matches_rows((r, c, values) in small_matrix()) {
            let m = Matrix::from_values(r, c, &values, true);
            let by_rows: i64 = (1..=r).map(|i| m.sum_row(i).unwrap()).sum();
            prop_assert_eq!(m.sum().unwrap(), by_rows);
            prop_assert_eq!(m.sum().unwrap(), values.iter().sum::<i64>());
        }

        #[test]
        fn rank_bounded_by_shape((r, c, values) in small_matrix()) {
            let floats: Vec<f64> = values.iter().map(|&v| v as f64).collect();
            let m = Matrix::from_values(r, c, &floats, false);
            prop_assert!(m.rank() <= r.min(c));
            prop_assert_eq!(m.rank(), m.transpose().rank());
        }

        #[test]
        fn inverse_times_original_is_identity(m in dominant_matrix()) {
            let n = m.rows();
            let product = m.inverse().unwrap().matmul(&m).unwrap();
            for i in 1..=n {
                for j in 1..=n {
                    let expected = if i == j { 1.0 } else { 0.0 };
                    prop_assert!((product.get(i, j).unwrap() - expected).abs() < 1e-9);
                }
            }
        }

        #[test]
        fn qr_reconstructs(m in dominant_matrix()) {
            let qr = m.qr().unwrap();
            let back = qr.q.matmul(&qr.r).unwrap();
            for (a, b) in back.values().zip(m.values()) {
                prop_assert!((a - b).abs() < 1e-9);
            }
        }
    }
}
