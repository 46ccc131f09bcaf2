//! Backing stores for a matrix.
//!
//! A matrix keeps its entries either in a contiguous row-major buffer or in
//! a hash map from linear offset to value. Exactly one of the two is live at
//! any time; switching consumes the old store after migrating every entry.

use rustc_hash::FxHashMap;

use duomat_core::Scalar;

/// Which backend a matrix currently uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageMode {
    /// Every cell is stored, zeros included.
    Dense,
    /// Only nonzero cells are stored.
    Sparse,
}

/// The live backend of a matrix.
#[derive(Clone, Debug)]
pub enum Storage<T> {
    /// Row-major buffer of `rows * cols` entries.
    Dense(Vec<T>),
    /// Map from linear offset to value; absent offsets hold zero.
    Sparse(FxHashMap<usize, T>),
}

impl<T: Scalar> Storage<T> {
    /// Creates an all-zero store holding `len` logical cells.
    #[must_use]
    pub fn zeros(len: usize, mode: StorageMode) -> Self {
        match mode {
            StorageMode::Dense => Self::Dense(vec![T::zero(); len]),
            StorageMode::Sparse => Self::Sparse(FxHashMap::default()),
        }
    }

    /// Returns the mode of this store.
    #[must_use]
    pub fn mode(&self) -> StorageMode {
        match self {
            Self::Dense(_) => StorageMode::Dense,
            Self::Sparse(_) => StorageMode::Sparse,
        }
    }

    /// Reads the value at a linear offset.
    ///
    /// A sparse lookup that misses returns zero and never inserts.
    ///
    /// # Panics
    ///
    /// Panics if a dense store has no cell at `offset`. Sparse stores do not
    /// know their length and return zero for any offset.
    #[must_use]
    pub fn get(&self, offset: usize) -> T {
        match self {
            Self::Dense(data) => data[offset],
            Self::Sparse(map) => map.get(&offset).copied().unwrap_or_else(T::zero),
        }
    }

    /// Writes the value at a linear offset.
    ///
    /// Writing zero into a sparse store removes the entry.
    ///
    /// # Panics
    ///
    /// Panics if a dense store has no cell at `offset`. Sparse stores accept
    /// any offset.
    pub fn set(&mut self, offset: usize, value: T) {
        match self {
            Self::Dense(data) => data[offset] = value,
            Self::Sparse(map) => {
                if value.is_zero() {
                    map.remove(&offset);
                } else {
                    map.insert(offset, value);
                }
            }
        }
    }

    /// Returns the number of nonzero entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        match self {
            Self::Dense(data) => data.iter().filter(|v| !v.is_zero()).count(),
            Self::Sparse(map) => map.len(),
        }
    }

    /// Calls `f` with every nonzero entry and its offset, in no particular
    /// order for sparse stores.
    pub fn for_each_nonzero<F>(&self, mut f: F)
    where
        F: FnMut(usize, T),
    {
        match self {
            Self::Dense(data) => {
                for (offset, &value) in data.iter().enumerate() {
                    if !value.is_zero() {
                        f(offset, value);
                    }
                }
            }
            Self::Sparse(map) => {
                for (&offset, &value) in map {
                    f(offset, value);
                }
            }
        }
    }

    /// Converts into a dense store of `len` cells.
    ///
    /// # Panics
    ///
    /// Panics if a sparse entry sits at an offset `>= len`.
    #[must_use]
    pub fn into_dense(self, len: usize) -> Self {
        match self {
            Self::Dense(_) => self,
            Self::Sparse(map) => {
                let mut data = vec![T::zero(); len];
                for (offset, value) in map {
                    data[offset] = value;
                }
                Self::Dense(data)
            }
        }
    }

    /// Converts into a sparse store keeping only nonzero cells.
    #[must_use]
    pub fn into_sparse(self) -> Self {
        match self {
            Self::Sparse(_) => self,
            Self::Dense(data) => {
                let map: FxHashMap<usize, T> = data
                    .into_iter()
                    .enumerate()
                    .filter(|(_, v)| !v.is_zero())
                    .collect();
                Self::Sparse(map)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let dense: Storage<f64> = Storage::zeros(6, StorageMode::Dense);
        let sparse: Storage<f64> = Storage::zeros(6, StorageMode::Sparse);
        assert_eq!(dense.mode(), StorageMode::Dense);
        assert_eq!(sparse.mode(), StorageMode::Sparse);
        for offset in 0..6 {
            assert_eq!(dense.get(offset), 0.0);
            assert_eq!(sparse.get(offset), 0.0);
        }
        assert_eq!(dense.nnz(), 0);
        assert_eq!(sparse.nnz(), 0);
    }

    #[test]
    fn test_sparse_miss_does_not_insert() {
        let store: Storage<i32> = Storage::zeros(4, StorageMode::Sparse);
        assert_eq!(store.get(3), 0);
        match store {
            Storage::Sparse(map) => assert!(map.is_empty()),
            Storage::Dense(_) => panic!("expected sparse store"),
        }
    }

    #[test]
    fn test_sparse_zero_write_removes_entry() {
        let mut store: Storage<i32> = Storage::zeros(4, StorageMode::Sparse);
        store.set(2, 7);
        assert_eq!(store.nnz(), 1);
        store.set(2, 0);
        assert_eq!(store.nnz(), 0);
        assert_eq!(store.get(2), 0);
    }

    #[test]
    fn test_conversions() {
        let mut store: Storage<i32> = Storage::zeros(4, StorageMode::Dense);
        store.set(1, 5);
        store.set(3, -2);

        let sparse = store.into_sparse();
        assert_eq!(sparse.mode(), StorageMode::Sparse);
        assert_eq!(sparse.nnz(), 2);

        let dense = sparse.into_dense(4);
        assert_eq!(dense.mode(), StorageMode::Dense);
        let values: Vec<i32> = (0..4).map(|o| dense.get(o)).collect();
        assert_eq!(values, vec![0, 5, 0, -2]);
    }

    #[test]
    fn test_for_each_nonzero() {
        let mut store: Storage<i32> = Storage::zeros(5, StorageMode::Dense);
        store.set(0, 1);
        store.set(4, 9);
        let mut seen = Vec::new();
        store.for_each_nonzero(|offset, value| seen.push((offset, value)));
        assert_eq!(seen, vec![(0, 1), (4, 9)]);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_dense_get_past_end_panics() {
        let store: Storage<i32> = Storage::zeros(4, StorageMode::Dense);
        let _ = store.get(4);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_into_dense_too_short_panics() {
        let mut store: Storage<i32> = Storage::zeros(8, StorageMode::Sparse);
        store.set(6, 1);
        let _ = store.into_dense(4);
    }
}
