//! Tuning knobs for sparse matrix-vector products

/// Default row count from which `mulvec` switches to the parallel path.
pub const DEFAULT_PARALLEL_ROW_THRESHOLD: usize = 256;

/// Configuration for matrix-vector products
///
/// Results never depend on the configuration: each row is always summed
/// sequentially in stored column order, whichever path computes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsrConfig {
    /// Minimum number of rows before rows are distributed across threads
    /// (only meaningful with the `rayon` feature)
    pub parallel_row_threshold: usize,
}

impl Default for CsrConfig {
    fn default() -> Self {
        Self {
            parallel_row_threshold: DEFAULT_PARALLEL_ROW_THRESHOLD,
        }
    }
}

impl CsrConfig {
    /// Configuration that never uses the parallel path
    pub fn sequential() -> Self {
        Self {
            parallel_row_threshold: usize::MAX,
        }
    }

    /// Set the parallel row threshold
    pub fn with_parallel_row_threshold(mut self, threshold: usize) -> Self {
        self.parallel_row_threshold = threshold;
        self
    }

    /// Whether a matrix with `num_rows` rows should use the parallel path
    pub fn use_parallel(&self, num_rows: usize) -> bool {
        crate::parallel::is_parallel_available() && num_rows >= self.parallel_row_threshold
    }
}
