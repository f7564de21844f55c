//! Sparse matrix structures (CSR format)
//!
//! This module provides Compressed Sparse Row (CSR) format for efficient
//! storage and matrix-vector operations with sparse weights matrices.

mod convert;
mod csr;

pub use csr::CsrMatrix;
