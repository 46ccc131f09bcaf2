//! Integration tests for duomat-linalg.

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod integration_tests {
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::{Eigen, Matrix, MatrixError, NumericConfig, Qr, StorageMode, StoragePolicy};

    fn close(a: &Matrix<f64>, b: &Matrix<f64>, eps: f64) -> bool {
        a.shape() == b.shape() && a.values().zip(b.values()).all(|(x, y)| (x - y).abs() < eps)
    }

    #[test]
    fn test_dense_sparse_equivalence() {
        let values = [3.0, 0.0, 1.0, 0.0, 2.0, 2.0, -4.0, 0.0, 5.0];
        let dense = Matrix::from_values(3, 3, &values, false);
        let sparse = Matrix::from_values(3, 3, &values, true);

        assert_eq!(dense.transpose(), sparse.transpose());
        assert_eq!(dense.max().unwrap(), sparse.max().unwrap());
        assert_eq!(dense.min_col(1).unwrap(), sparse.min_col(1).unwrap());
        assert_eq!(dense.sum_row(3).unwrap(), sparse.sum_row(3).unwrap());
        assert_eq!(
            dense.get_submatrix(2, 3, 2, 3).unwrap(),
            sparse.get_submatrix(2, 3, 2, 3).unwrap()
        );
        assert_relative_eq!(dense.det().unwrap(), sparse.det().unwrap(), epsilon = 1e-12);
        assert!(close(
            &dense.inverse().unwrap(),
            &sparse.inverse().unwrap(),
            1e-12
        ));
    }

    #[test]
    fn test_round_trip_preserves_values() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let original = Matrix::random(6, 4, -10.0, 10.0, &mut rng);
        let mut m = original.clone();
        m.to_sparse();
        assert_eq!(m.mode(), StorageMode::Sparse);
        assert_eq!(m.nnz(), 24);
        m.to_dense();
        assert_eq!(m.to_rows(), original.to_rows());
    }

    #[test]
    fn test_sparse_zero_write_removes_entry() {
        let mut m: Matrix<f64> = Matrix::sparse(3, 3);
        m.set(2, 2, 4.0).unwrap();
        assert_eq!(m.nnz(), 1);
        m.set(2, 2, 0.0).unwrap();
        assert_eq!(m.nnz(), 0);
        // Reading a missing entry does not insert it
        assert_eq!(m.get(3, 3).unwrap(), 0.0);
        assert_eq!(m.nnz(), 0);
    }

    #[test]
    fn test_singular_example() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap();
        assert_eq!(m.det().unwrap(), 0.0);
        assert!(matches!(
            m.inverse(),
            Err(MatrixError::NotInvertible { .. })
        ));
    }

    #[test]
    fn test_inverse_example() {
        let m = Matrix::from_rows(vec![vec![4.0, 7.0], vec![2.0, 6.0]]).unwrap();
        let inv = m.inverse().unwrap();
        let expected = Matrix::from_rows(vec![vec![0.6, -0.7], vec![-0.2, 0.4]]).unwrap();
        assert!(close(&inv, &expected, 1e-12));

        let eps = m.config().eps;
        assert!(close(&inv.matmul(&m).unwrap(), &Matrix::identity(2), eps));
        assert!(close(&m.matmul(&inv).unwrap(), &Matrix::identity(2), eps));
    }

    #[test]
    fn test_transpose_involution() {
        let m = Matrix::from_rows(vec![vec![1, 2, 3, 4], vec![5, 6, 7, 8]]).unwrap();
        assert_eq!(m.transpose().transpose(), m);

        let mut s = m.clone();
        s.to_sparse();
        assert_eq!(s.transpose().transpose(), s);
    }

    #[test]
    fn test_rank_example() {
        let m = Matrix::from_rows(vec![
            vec![1.0, 2.0, 1.0],
            vec![0.0, 0.0, 0.0],
            vec![-1.0, -2.0, -1.0],
        ])
        .unwrap();
        assert_eq!(m.rank(), 1);
        let echelon = m.gauss_counted();
        assert_eq!(echelon.rank(), 1);
        assert_eq!(echelon.pivots, vec![(1, 1)]);
    }

    #[test]
    fn test_cominor_corners() {
        let m = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]).unwrap();
        let corners = m.get_cominor(2, 2).unwrap();
        assert_eq!(corners.to_rows(), vec![vec![1, 3], vec![7, 9]]);
    }

    #[test]
    fn test_convolution_example() {
        let values: Vec<i32> = (1..=16).collect();
        let ramp = Matrix::from_values(4, 4, &values, false);
        let kernel = Matrix::from_values(3, 3, &[1, 2, 1, 0, 0, 0, -1, -2, -1], false);
        let out = ramp.conv(&kernel);
        assert_eq!(
            out.to_rows(),
            vec![
                vec![-16, -24, -28, -23],
                vec![-24, -32, -32, -24],
                vec![-24, -32, -32, -24],
                vec![28, 40, 44, 35],
            ]
        );
    }

    #[test]
    fn test_derived_matrices_inherit_config() {
        let cfg = NumericConfig::default().with_eps(1e-4).with_eigen_iterations(80);
        let m = Matrix::from_rows(vec![vec![2.0, 1.0], vec![1.0, 3.0]])
            .unwrap()
            .with_config(cfg);

        assert_eq!(*m.transpose().config(), cfg);
        assert_eq!(*m.inverse().unwrap().config(), cfg);
        assert_eq!(*m.matmul(&m).unwrap().config(), cfg);
        assert_eq!(*m.get_submatrix(1, 1, 1, 2).unwrap().config(), cfg);
        let Qr { q, r } = m.qr().unwrap();
        assert_eq!(*q.config(), cfg);
        assert_eq!(*r.config(), cfg);
    }

    #[test]
    fn test_storage_policy_threshold() {
        let mut m: Matrix<i32> = Matrix::new(10, 10);
        for i in 1..=10 {
            m.set(i, 1, 1).unwrap();
            m.set(i, 2, 1).unwrap();
        }
        // density 0.2 < 0.25
        assert_eq!(m.apply_storage_policy(&StoragePolicy::default()), StorageMode::Sparse);

        let strict = StoragePolicy { sparse_threshold: 0.1 };
        assert_eq!(m.apply_storage_policy(&strict), StorageMode::Dense);
        assert_eq!(m.sum().unwrap(), 20);
    }

    #[test]
    fn test_eigen_diagonal() {
        let m = Matrix::from_values(3, 3, &[5.0, 0.0, 0.0, 0.0, -2.0, 0.0, 0.0, 0.0, 1.0], true);
        let Eigen { values, vectors } = m.eigen().unwrap();
        let mut found = values.get_row(1).unwrap();
        found.sort_by(f64::total_cmp);
        assert_relative_eq!(found[0], -2.0, epsilon = 1e-9);
        assert_relative_eq!(found[1], 1.0, epsilon = 1e-9);
        assert_relative_eq!(found[2], 5.0, epsilon = 1e-9);

        for col in 1..=3 {
            let v = vectors.get_col(col).unwrap();
            let norm: f64 = v.iter().map(|x| x * x).sum::<f64>().sqrt();
            assert_relative_eq!(norm, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_true_convolution_via_rotation() {
        let m = Matrix::from_values(3, 3, &[0, 0, 0, 0, 1, 0, 0, 0, 0], false);
        let k = Matrix::from_values(3, 3, &[1, 2, 3, 4, 5, 6, 7, 8, 9], false);
        // Convolving a unit impulse reproduces the kernel
        assert_eq!(m.conv(&k.rotate_180()), k);
    }
}
