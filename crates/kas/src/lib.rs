#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use kas_image as image;

#[doc(inline)]
pub use kas_imgproc as imgproc;
