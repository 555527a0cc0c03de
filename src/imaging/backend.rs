//! Image I/O backend trait and shared types.
//!
//! The background engine works on decoded [`RgbImage`]s only. Everything that
//! touches files (identify, decode, encode) goes through the [`ImageBackend`]
//! trait so the engine and the batch driver can be tested without a disk.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate.

use super::params::Quality;
use image::RgbImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image I/O backends.
pub trait ImageBackend {
    /// Get image dimensions without decoding pixels.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode an image into 8-bit RGB.
    fn load(&self, path: &Path) -> Result<RgbImage, BackendError>;

    /// Encode an image, inferring the format from the output extension.
    fn save(&self, image: &RgbImage, path: &Path, quality: Quality) -> Result<(), BackendError>;
}
