//! Error types for sparse matrix operations.
//!
//! Every check is performed before any internal buffer is indexed, so an
//! error always means the matrix was left untouched.

use thiserror::Error;

/// Errors that can occur while building or querying a CSR matrix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsrError {
    /// A supplied array does not have the length implied by the matrix shape.
    #[error("dimension mismatch in {context}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Operation that detected the mismatch
        context: &'static str,
        /// Length required by the matrix shape
        expected: usize,
        /// Length actually supplied
        got: usize,
    },

    /// A row index falls outside `[0, rows)`.
    #[error("row index {index} out of range for matrix with {len} rows")]
    IndexOutOfRange {
        /// The offending row index
        index: usize,
        /// Number of rows in the matrix
        len: usize,
    },

    /// `rows * cols` does not fit in `usize`.
    #[error("dimensions {rows} x {cols} overflow usize")]
    DimensionOverflow {
        /// Requested number of rows
        rows: usize,
        /// Requested number of columns
        cols: usize,
    },
}

/// A specialized `Result` type for CSR operations.
pub type Result<T> = std::result::Result<T, CsrError>;

impl CsrError {
    /// Returns `true` if this is a shape-related error.
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            CsrError::DimensionMismatch { .. } | CsrError::DimensionOverflow { .. }
        )
    }

    /// Returns `true` if this is a row index error.
    pub fn is_index_error(&self) -> bool {
        matches!(self, CsrError::IndexOutOfRange { .. })
    }
}
