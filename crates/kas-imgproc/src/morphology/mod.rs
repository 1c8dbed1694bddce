//! Circular morphological dilation.
//!
//! A [`StructuringElement`] is built once per radius and reused across images. The
//! [`DilationScanner`] walks every row left to right and, at each qualifying pixel, only
//! stamps the part of the disk that the previous qualifying pixel of the row did not
//! already cover.

/// Error types used for morphological operations.
pub mod error;
pub use error::MorphologyError;

/// Color classification of pixels into the target class of a call.
pub mod classify;
pub use classify::ClassificationSet;

/// Disk-shaped structuring element and its incremental schedule.
pub mod structuring;
pub use structuring::{PixelOffset, StructuringElement};

/// Dilation scanner and the full-stamp reference dilation.
pub mod dilation;
pub use dilation::{dilate_disk, dilate_full_stamp, DilationScanner};
