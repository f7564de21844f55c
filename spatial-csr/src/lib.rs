//! Sparse spatial weights in Compressed Sparse Row format
//!
//! This crate provides a CSR matrix tailored to spatial weights matrices:
//! built once from a dense row-major array, then queried read-only.
//!
//! # Features
//!
//! - **CSR Matrix**: exact-size construction from dense data, matrix-vector
//!   products, single-row dot products and coordinate extraction
//! - **Weights**: keyed neighbour lists converted to dense or sparse form,
//!   row standardization and windowing
//! - **Spatial lag**: neighbour and window sums/averages
//! - **Parallel products**: rows are distributed with rayon (`rayon` feature)
//!   without changing results
//!
//! # Example
//!
//! ```
//! use spatial_csr::CsrMatrix;
//!
//! let data = [0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0];
//! let csr = CsrMatrix::new(&data, 3, 3)?;
//!
//! assert_eq!(csr.mulvec(&[1.0, 1.0, 1.0])?.to_vec(), vec![1.0, 0.0, 2.0]);
//! assert_eq!(csr.dot_row(&[1.0, 1.0, 1.0], 2)?, 2.0);
//! assert_eq!(csr.coordinates().len(), 3);
//! # Ok::<(), spatial_csr::CsrError>(())
//! ```

pub mod config;
pub mod error;
pub mod lag;
pub mod parallel;
pub mod sparse;
pub mod traits;
pub mod weights;

// Re-export main types
pub use config::CsrConfig;
pub use error::{CsrError, Result};
pub use sparse::CsrMatrix;
pub use traits::{LinearOperator, RealField};
pub use weights::{Neighbor, WeightsMatrix};
