//! Dense-to-CSR conversion
//!
//! Two passes over the dense input: the first counts the non-zeros so the
//! value and column buffers can be allocated at their exact size, the second
//! fills them and records where each row starts.

use crate::error::{CsrError, Result};
use crate::traits::RealField;

/// The three CSR buffers, owned together and released together.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CsrStorage<T> {
    /// Non-zero values in row-major order
    pub(crate) values: Vec<T>,
    /// Column of each value
    pub(crate) col_index: Vec<usize>,
    /// Offset of each row's first value; `row_index[rows] == nnz`
    pub(crate) row_index: Vec<usize>,
}

impl<T> CsrStorage<T> {
    /// Storage for a matrix with no stored entries
    pub(crate) fn empty(num_rows: usize) -> Self {
        Self {
            values: Vec::new(),
            col_index: Vec::new(),
            row_index: vec![0; num_rows + 1],
        }
    }

    pub(crate) fn with_capacity(num_rows: usize, nnz_estimate: usize) -> Self {
        Self {
            values: Vec::with_capacity(nnz_estimate),
            col_index: Vec::with_capacity(nnz_estimate),
            row_index: Vec::with_capacity(num_rows + 1),
        }
    }

    /// Append a stored entry to the row currently being written
    #[inline]
    pub(crate) fn push(&mut self, col: usize, value: T) {
        self.values.push(value);
        self.col_index.push(col);
    }

    /// Mark the start of the next row at the current write cursor
    #[inline]
    pub(crate) fn start_row(&mut self) {
        self.row_index.push(self.values.len());
    }

    /// Close the last row so that `row_index[rows] == nnz`
    #[inline]
    pub(crate) fn finish(&mut self) {
        self.row_index.push(self.values.len());
    }
}

/// Convert a flat row-major array into CSR buffers.
///
/// Element `(i, j)` is read from `data[i * cols + j]`. Only values that differ
/// from zero under exact comparison are stored.
///
/// # Errors
///
/// - [`CsrError::DimensionOverflow`] if `rows * cols` overflows `usize`, or
///   the `rows + 1` row offsets cannot be addressed
/// - [`CsrError::DimensionMismatch`] if `data.len() != rows * cols`
pub(crate) fn dense_to_csr<T: RealField>(
    data: &[T],
    num_rows: usize,
    num_cols: usize,
) -> Result<CsrStorage<T>> {
    let expected = num_rows
        .checked_mul(num_cols)
        .ok_or(CsrError::DimensionOverflow {
            rows: num_rows,
            cols: num_cols,
        })?;

    let max_offsets = isize::MAX as usize / std::mem::size_of::<usize>();
    if num_rows.checked_add(1).is_none_or(|len| len > max_offsets) {
        return Err(CsrError::DimensionOverflow {
            rows: num_rows,
            cols: num_cols,
        });
    }

    if data.len() != expected {
        return Err(CsrError::DimensionMismatch {
            context: "dense_to_csr",
            expected,
            got: data.len(),
        });
    }

    let nnz = count_nonzero(data.iter());
    Ok(convert_with(num_rows, num_cols, nnz, |i, j| data[i * num_cols + j]))
}

/// First pass: number of entries that will be stored
pub(crate) fn count_nonzero<'a, T, I>(entries: I) -> usize
where
    T: RealField,
    I: Iterator<Item = &'a T>,
{
    entries.filter(|v| !v.is_structural_zero()).count()
}

/// Second pass over any row-major accessor, given the non-zero count.
///
/// The caller guarantees `at(i, j)` is valid for every `i < num_rows`,
/// `j < num_cols`, and that `nnz` was counted over the same entries.
pub(crate) fn convert_with<T, F>(
    num_rows: usize,
    num_cols: usize,
    nnz: usize,
    at: F,
) -> CsrStorage<T>
where
    T: RealField,
    F: Fn(usize, usize) -> T,
{
    let mut storage = CsrStorage::with_capacity(num_rows, nnz);

    for i in 0..num_rows {
        storage.start_row();
        for j in 0..num_cols {
            let entry = at(i, j);
            if !entry.is_structural_zero() {
                storage.push(j, entry);
            }
        }
    }
    storage.finish();

    debug_assert_eq!(storage.values.len(), nnz);
    storage
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_example() {
        let data = [0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0];
        let storage = dense_to_csr(&data, 3, 3).unwrap();

        assert_eq!(storage.values, vec![1.0, 1.0, 1.0]);
        assert_eq!(storage.col_index, vec![1, 0, 2]);
        assert_eq!(storage.row_index, vec![0, 1, 1, 3]);
    }

    #[test]
    fn test_convert_anti_diagonal() {
        let data = [0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0];
        let storage = dense_to_csr(&data, 3, 3).unwrap();

        assert_eq!(storage.values, vec![1.0, 1.0, 1.0]);
        assert_eq!(storage.col_index, vec![2, 1, 0]);
        assert_eq!(storage.row_index, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_convert_length_mismatch() {
        let err = dense_to_csr::<f64>(&[], 3, 3).unwrap_err();
        assert_eq!(
            err,
            CsrError::DimensionMismatch {
                context: "dense_to_csr",
                expected: 9,
                got: 0
            }
        );
    }

    #[test]
    fn test_convert_overflow() {
        let err = dense_to_csr::<f64>(&[1.0], usize::MAX, 2).unwrap_err();
        assert!(matches!(err, CsrError::DimensionOverflow { .. }));
    }

    #[test]
    fn test_convert_exact_zero_policy() {
        let data = [1e-300, -0.0, f64::MIN_POSITIVE, 0.0];
        let storage = dense_to_csr(&data, 2, 2).unwrap();

        assert_eq!(storage.col_index, vec![0, 0]);
        assert_eq!(storage.row_index, vec![0, 1, 2]);
    }

    #[test]
    fn test_convert_unaddressable_rows() {
        let err = dense_to_csr::<f64>(&[], usize::MAX, 0).unwrap_err();
        assert_eq!(
            err,
            CsrError::DimensionOverflow {
                rows: usize::MAX,
                cols: 0
            }
        );

        let err = dense_to_csr::<f64>(&[], isize::MAX as usize, 0).unwrap_err();
        assert!(matches!(err, CsrError::DimensionOverflow { .. }));
    }

    #[test]
    fn test_count_nonzero() {
        assert_eq!(count_nonzero([0.0, 2.0, -0.0, f64::NAN].iter()), 2);
    }

    #[test]
    fn test_convert_zero_columns() {
        let storage = dense_to_csr::<f64>(&[], 4, 0).unwrap();
        assert!(storage.values.is_empty());
        assert_eq!(storage.row_index, vec![0; 5]);
    }

    #[test]
    fn test_convert_zero_rows() {
        let storage = dense_to_csr::<f64>(&[], 0, 7).unwrap();
        assert_eq!(storage.row_index, vec![0]);
    }

    #[test]
    fn test_empty_storage() {
        let storage: CsrStorage<f64> = CsrStorage::empty(2);
        assert_eq!(storage.row_index, vec![0, 0, 0]);
    }
}
