//! Spatially lagged variables
//!
//! Each function multiplies a (possibly transformed) weights matrix by the
//! observed values. The weights matrix itself is never modified.

use crate::error::Result;
use crate::sparse::CsrMatrix;
use crate::traits::RealField;
use ndarray::Array1;

/// Sum of each observation's neighbour values: `W * x`
pub fn neighbor_sum<T: RealField>(weights: &CsrMatrix<T>, values: &[T]) -> Result<Array1<T>> {
    weights.mulvec(values)
}

/// Weighted average of each observation's neighbour values
///
/// Uses the row-standardized weights, so islands (rows without neighbours) lag to zero.
pub fn neighbor_average<T: RealField>(weights: &CsrMatrix<T>, values: &[T]) -> Result<Array1<T>> {
    weights.row_standardized().mulvec(values)
}

/// Sum over each observation's window (itself plus its neighbours)
pub fn window_sum<T: RealField>(weights: &CsrMatrix<T>, values: &[T]) -> Result<Array1<T>> {
    weights.windowed()?.mulvec(values)
}

/// Average over each observation's window (itself plus its neighbours)
pub fn window_average<T: RealField>(weights: &CsrMatrix<T>, values: &[T]) -> Result<Array1<T>> {
    weights.windowed()?.row_standardized().mulvec(values)
}
