#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// morphological operations module.
pub mod morphology;

/// module containing parallization utilities.
pub mod parallel;
