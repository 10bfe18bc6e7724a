//! Image ingestion for the inference pipeline.
//!
//! Encoded PNG/JPEG bytes are sniffed into an [`EncodedImage`], then decoded
//! and bilinearly resampled into a batched float tensor in NHWC layout:
//! `[1, height, width, channels]`.

mod convert;
pub use convert::*;

mod encoded;
pub use encoded::*;

pub mod error;
pub use error::ImageError;

mod format;
pub use format::*;

mod resample;
pub use resample::*;
