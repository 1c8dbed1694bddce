use kas_image::ImageError;

use crate::parallel::ParallelError;

/// Errors related to morphological operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MorphologyError {
    /// A construction parameter is outside its valid range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation cannot be performed with the current configuration.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Error raised by the image buffer.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error raised while dispatching work to the thread pool.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
