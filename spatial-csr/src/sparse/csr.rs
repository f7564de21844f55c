//! Compressed Sparse Row (CSR) matrix format
//!
//! CSR format stores:
//! - `values`: Non-zero entries in row-major order
//! - `col_index`: Column index for each value
//! - `row_index`: Index into values/col_index where each row starts
//!
//! A [`CsrMatrix`] is built once from a dense array and never mutated
//! afterwards. Operations that derive a new weights matrix
//! ([`CsrMatrix::row_standardized`], [`CsrMatrix::windowed`]) return a new
//! instance.

use super::convert::{CsrStorage, convert_with, count_nonzero, dense_to_csr};
use crate::config::CsrConfig;
use crate::error::{CsrError, Result};
use crate::parallel::parallel_map_indexed;
use crate::traits::{LinearOperator, RealField};
use ndarray::{Array1, Array2};
use std::collections::BTreeMap;
use std::ops::Range;

/// Compressed Sparse Row (CSR) matrix format
///
/// Memory-efficient storage for sparse matrices with O(nnz) space complexity.
/// Matrix-vector products are O(nnz) instead of O(m·n) for dense matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix<T: RealField = f64> {
    num_rows: usize,
    num_cols: usize,
    storage: CsrStorage<T>,
}

impl<T: RealField> CsrMatrix<T> {
    /// Create a CSR matrix from a flat row-major dense array
    ///
    /// Element `(i, j)` is read from `data[i * num_cols + j]`. Values equal to
    /// zero (exact comparison) are not stored.
    ///
    /// # Errors
    ///
    /// - [`CsrError::DimensionMismatch`] if `num_rows * num_cols != data.len()`
    /// - [`CsrError::DimensionOverflow`] if the shape cannot be addressed
    ///
    /// # Example
    ///
    /// ```
    /// use spatial_csr::CsrMatrix;
    ///
    /// let data = [0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0];
    /// let csr = CsrMatrix::new(&data, 3, 3).unwrap();
    ///
    /// assert_eq!(csr.nnz(), 3);
    /// assert_eq!(csr.row_index(), &[0, 1, 1, 3]);
    /// ```
    pub fn new(data: &[T], num_rows: usize, num_cols: usize) -> Result<Self> {
        let storage = dense_to_csr(data, num_rows, num_cols)?;
        Ok(Self::from_storage(num_rows, num_cols, storage))
    }

    /// Create a CSR matrix from a dense 2-D array
    pub fn from_dense(dense: &Array2<T>) -> Self {
        let (num_rows, num_cols) = dense.dim();
        let nnz = count_nonzero(dense.iter());
        let storage = convert_with(num_rows, num_cols, nnz, |i, j| dense[[i, j]]);
        Self::from_storage(num_rows, num_cols, storage)
    }

    /// Create a matrix with no stored entries
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self::from_storage(num_rows, num_cols, CsrStorage::empty(num_rows))
    }

    fn from_storage(num_rows: usize, num_cols: usize, storage: CsrStorage<T>) -> Self {
        log::debug!(
            "CSR matrix {}x{} with {} stored entries",
            num_rows,
            num_cols,
            storage.values.len()
        );
        Self {
            num_rows,
            num_cols,
            storage,
        }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.num_cols
    }

    /// Number of non-zero entries
    pub fn nnz(&self) -> usize {
        self.storage.values.len()
    }

    /// Non-zero values in row-major order
    pub fn values(&self) -> &[T] {
        &self.storage.values
    }

    /// Column index of each stored value
    pub fn col_index(&self) -> &[usize] {
        &self.storage.col_index
    }

    /// Row offsets: `row_index()[i]` is where row `i` starts in
    /// [`values`](Self::values). Length is `rows + 1`.
    pub fn row_index(&self) -> &[usize] {
        &self.storage.row_index
    }

    /// Sparsity ratio (fraction of non-zero entries)
    pub fn sparsity(&self) -> f64 {
        if self.num_rows == 0 || self.num_cols == 0 {
            0.0
        } else {
            self.nnz() as f64 / (self.num_rows as f64 * self.num_cols as f64)
        }
    }

    /// Get the range of indices in values/col_index for a given row
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()`.
    pub fn row_range(&self, row: usize) -> Range<usize> {
        self.storage.row_index[row]..self.storage.row_index[row + 1]
    }

    /// Get the (col, value) pairs for a row, in ascending column order
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()`.
    pub fn row_entries(&self, row: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        let range = self.row_range(row);
        self.storage.col_index[range.clone()]
            .iter()
            .copied()
            .zip(self.storage.values[range].iter().copied())
    }

    /// Get element at (row, col), returns 0 if not stored
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()`.
    pub fn get(&self, row: usize, col: usize) -> T {
        self.row_entries(row)
            .find(|&(j, _)| j == col)
            .map_or_else(T::zero, |(_, v)| v)
    }

    fn check_vector(&self, vec: &[T], context: &'static str) -> Result<()> {
        if vec.len() != self.num_cols {
            return Err(CsrError::DimensionMismatch {
                context,
                expected: self.num_cols,
                got: vec.len(),
            });
        }
        Ok(())
    }

    /// Row dot product without bounds checks on `row` or `vec`
    #[inline]
    fn row_dot_unchecked(&self, row: usize, vec: &[T]) -> T {
        let mut sum = T::zero();
        for idx in self.row_range(row) {
            sum += self.storage.values[idx] * vec[self.storage.col_index[idx]];
        }
        sum
    }

    /// Matrix-vector product: y = A * x
    ///
    /// Each row is summed in stored (ascending column) order. Rows with no
    /// stored entries yield zero.
    ///
    /// # Errors
    ///
    /// Returns [`CsrError::DimensionMismatch`] if `vec.len() != self.cols()`.
    pub fn mulvec(&self, vec: &[T]) -> Result<Array1<T>> {
        self.mulvec_with_config(vec, &CsrConfig::default())
    }

    /// Matrix-vector product with explicit configuration
    ///
    /// Uses parallel processing when the `rayon` feature is enabled and the
    /// matrix has at least `config.parallel_row_threshold` rows. The result is
    /// identical on both paths.
    pub fn mulvec_with_config(&self, vec: &[T], config: &CsrConfig) -> Result<Array1<T>> {
        self.check_vector(vec, "mulvec")?;

        if config.use_parallel(self.num_rows) {
            log::trace!("parallel mulvec over {} rows", self.num_rows);
            let results = parallel_map_indexed(self.num_rows, |i| self.row_dot_unchecked(i, vec));
            return Ok(Array1::from_vec(results));
        }

        Ok((0..self.num_rows)
            .map(|i| self.row_dot_unchecked(i, vec))
            .collect())
    }

    /// Dot product of a single row with `vec`, equivalent to `mulvec(vec)[row]`
    ///
    /// # Errors
    ///
    /// - [`CsrError::DimensionMismatch`] if `vec.len() != self.cols()`
    /// - [`CsrError::IndexOutOfRange`] if `row >= self.rows()`
    pub fn dot_row(&self, vec: &[T], row: usize) -> Result<T> {
        self.check_vector(vec, "dot_row")?;
        if row >= self.num_rows {
            return Err(CsrError::IndexOutOfRange {
                index: row,
                len: self.num_rows,
            });
        }
        Ok(self.row_dot_unchecked(row, vec))
    }

    /// Coordinate representation: one `(row, col) -> value` entry per stored value
    ///
    /// Rows without stored entries are skipped by following `row_index`
    /// rather than relying on every row contributing an entry.
    pub fn coordinates(&self) -> BTreeMap<(usize, usize), T> {
        let row_index = &self.storage.row_index;
        let mut coords = BTreeMap::new();

        let mut row = 0;
        for (k, (&col, &value)) in self
            .storage
            .col_index
            .iter()
            .zip(self.storage.values.iter())
            .enumerate()
        {
            // k < nnz == row_index[rows], so this stops at a valid row
            while k >= row_index[row + 1] {
                row += 1;
            }
            coords.insert((row, col), value);
        }

        coords
    }

    /// Sum of the diagonal entries
    pub fn trace(&self) -> T {
        let n = self.num_rows.min(self.num_cols);
        let mut sum = T::zero();
        for i in 0..n {
            sum += self.get(i, i);
        }
        sum
    }

    /// Convert to dense matrix (for debugging/small matrices)
    pub fn to_dense(&self) -> Array2<T> {
        let mut dense = Array2::from_elem((self.num_rows, self.num_cols), T::zero());

        for i in 0..self.num_rows {
            for (j, v) in self.row_entries(i) {
                dense[[i, j]] = v;
            }
        }

        dense
    }

    /// New matrix with every row scaled to sum to one
    ///
    /// Rows whose entries sum to exactly zero (including rows with no stored
    /// entries) are copied unchanged.
    pub fn row_standardized(&self) -> Self {
        let mut storage = CsrStorage::with_capacity(self.num_rows, self.nnz());

        for i in 0..self.num_rows {
            storage.start_row();

            let mut row_sum = T::zero();
            for (_, v) in self.row_entries(i) {
                row_sum += v;
            }

            for (j, v) in self.row_entries(i) {
                if row_sum.is_structural_zero() {
                    storage.push(j, v);
                    continue;
                }
                let scaled = v / row_sum;
                if !scaled.is_structural_zero() {
                    storage.push(j, scaled);
                }
            }
        }
        storage.finish();

        Self::from_storage(self.num_rows, self.num_cols, storage)
    }

    /// Windowed weights: the matrix plus the identity if its trace is zero
    ///
    /// A matrix with a non-zero trace is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CsrError::DimensionMismatch`] if the matrix is not square.
    pub fn windowed(&self) -> Result<Self> {
        if self.num_rows != self.num_cols {
            return Err(CsrError::DimensionMismatch {
                context: "windowed",
                expected: self.num_rows,
                got: self.num_cols,
            });
        }

        if !self.trace().is_structural_zero() {
            return Ok(self.clone());
        }

        let mut storage = CsrStorage::with_capacity(self.num_rows, self.nnz() + self.num_rows);

        for i in 0..self.num_rows {
            storage.start_row();

            let mut placed = false;
            for (j, v) in self.row_entries(i) {
                if !placed && j >= i {
                    placed = true;
                    if j == i {
                        let shifted = v + T::one();
                        if !shifted.is_structural_zero() {
                            storage.push(j, shifted);
                        }
                        continue;
                    }
                    storage.push(i, T::one());
                }
                storage.push(j, v);
            }
            if !placed {
                storage.push(i, T::one());
            }
        }
        storage.finish();

        Ok(Self::from_storage(self.num_rows, self.num_cols, storage))
    }
}

impl<T: RealField> LinearOperator<T> for CsrMatrix<T> {
    fn num_rows(&self) -> usize {
        self.num_rows
    }

    fn num_cols(&self) -> usize {
        self.num_cols
    }

    fn apply(&self, x: &Array1<T>) -> Result<Array1<T>> {
        match x.as_slice() {
            Some(slice) => self.mulvec(slice),
            None => self.mulvec(&x.to_vec()),
        }
    }
}
