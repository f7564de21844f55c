//! Core traits for sparse linear algebra
//!
//! - [`RealField`]: scalar types a weights matrix can hold
//! - [`LinearOperator`]: matrix-like objects that can perform matrix-vector products

use crate::error::Result;
use ndarray::Array1;
use num_traits::{Float, FromPrimitive, NumAssign};
use std::fmt::Debug;

/// Trait for real scalar types stored in a sparse matrix.
///
/// Blanket-implemented for every type satisfying the bounds, which in
/// practice means `f64` (the default) and `f32`.
pub trait RealField: Float + NumAssign + FromPrimitive + Send + Sync + Debug + 'static {
    /// Exact test against zero, used as the sparsity criterion.
    ///
    /// `-0.0` compares equal to zero; `NaN` does not.
    #[inline]
    fn is_structural_zero(&self) -> bool {
        *self == Self::zero()
    }
}

impl<T> RealField for T where
    T: Float + NumAssign + FromPrimitive + Send + Sync + Debug + 'static
{
}

/// Trait for linear operators (matrices) that can perform matrix-vector products.
pub trait LinearOperator<T: RealField>: Send + Sync {
    /// Number of rows in the operator
    fn num_rows(&self) -> usize;

    /// Number of columns in the operator
    fn num_cols(&self) -> usize;

    /// Apply the operator: y = A * x
    fn apply(&self, x: &Array1<T>) -> Result<Array1<T>>;

    /// Check if the operator is square
    fn is_square(&self) -> bool {
        self.num_rows() == self.num_cols()
    }
}
