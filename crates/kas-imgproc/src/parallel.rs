use std::ops::Range;

use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The band height for AutoRows must be valid.
    #[error("rows per band must be > 0 for AutoRows strategy")]
    InvalidRowStride(usize),

    /// The buffer is not a whole number of rows.
    #[error("buffer length {0} is not a multiple of the row stride {1}")]
    SizeMismatch(usize, usize),
}

/// Controls how row-banded operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread, as a single band covering every row.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    #[default]
    Serial,

    /// Use the global Rayon thread pool to process bands of rows in parallel.
    ///
    /// You must provide the number of rows per band.
    AutoRows(usize),

    /// Run on a local thread pool with `n` threads, one band per thread.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

impl ExecutionStrategy {
    /// Check the strategy parameters without running anything.
    pub fn validate(&self) -> Result<(), ParallelError> {
        match *self {
            ExecutionStrategy::AutoRows(0) => Err(ParallelError::InvalidRowStride(0)),
            ExecutionStrategy::Fixed(0) => Err(ParallelError::InvalidThreadCount(0)),
            _ => Ok(()),
        }
    }
}

/// Trait to execute operations over disjoint bands of rows of a buffer.
pub trait ExecuteRowBandsExt<T> {
    /// Split the buffer into bands of whole rows and run `op` on each band.
    ///
    /// # Arguments
    ///
    /// * `strategy` - The execution strategy.
    /// * `row_stride` - The number of values in one row (width * channels).
    /// * `op` - The operation, called with the row range of the band and the band's values.
    ///
    /// # Returns
    ///
    /// A result indicating success or failure.
    fn execute_row_bands<F>(
        &mut self,
        strategy: ExecutionStrategy,
        row_stride: usize,
        op: F,
    ) -> Result<(), ParallelError>
    where
        F: Fn(Range<usize>, &mut [T]) + Sync + Send;
}

impl<T: Send> ExecuteRowBandsExt<T> for [T] {
    fn execute_row_bands<F>(
        &mut self,
        strategy: ExecutionStrategy,
        row_stride: usize,
        op: F,
    ) -> Result<(), ParallelError>
    where
        F: Fn(Range<usize>, &mut [T]) + Sync + Send,
    {
        strategy.validate()?;

        // nothing to split for an empty image
        if row_stride == 0 || self.is_empty() {
            return Ok(());
        }

        if self.len() % row_stride != 0 {
            return Err(ParallelError::SizeMismatch(self.len(), row_stride));
        }

        let num_rows = self.len() / row_stride;

        match strategy {
            ExecutionStrategy::Serial => {
                op(0..num_rows, self);
            }
            ExecutionStrategy::AutoRows(rows) => {
                for_each_band(self, row_stride, rows, &op);
            }
            ExecutionStrategy::Fixed(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| ParallelError::BuildError(e.to_string()))?;

                let rows = num_rows.div_ceil(n);
                pool.install(|| for_each_band(self, row_stride, rows, &op));
            }
        }
        Ok(())
    }
}

fn for_each_band<T, F>(buf: &mut [T], row_stride: usize, rows: usize, op: &F)
where
    T: Send,
    F: Fn(Range<usize>, &mut [T]) + Sync + Send,
{
    log::trace!(
        "dispatching {} bands of {} rows",
        (buf.len() / row_stride).div_ceil(rows),
        rows
    );

    buf.par_chunks_mut(rows * row_stride)
        .enumerate()
        .for_each(|(i, band)| {
            let start = i * rows;
            let end = start + band.len() / row_stride;
            op(start..end, band);
        });
}
