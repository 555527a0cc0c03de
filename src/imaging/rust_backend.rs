//! Pure Rust I/O backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` |
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::ImageReader` → `to_rgb8` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` at the requested quality |
//! | Encode → PNG, TIFF, WebP | `RgbImage::write_to` (lossless) |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::Quality;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, ImageReader, RgbImage};
use std::io::Cursor;
use std::path::Path;
use std::sync::LazyLock;

/// Extensions with decoders compiled in.
const PHOTO_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    PHOTO_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Pure Rust backend using the `image` crate ecosystem.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn lowercase_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!(
                "Failed to read dimensions of {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Dimensions { width, height })
    }

    fn load(&self, path: &Path) -> Result<RgbImage, BackendError> {
        let img = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| {
                BackendError::ProcessingFailed(format!(
                    "Failed to decode {}: {}",
                    path.display(),
                    e
                ))
            })?;
        Ok(img.to_rgb8())
    }

    fn save(&self, image: &RgbImage, path: &Path, quality: Quality) -> Result<(), BackendError> {
        let ext = lowercase_extension(path);
        let format = ImageFormat::from_extension(&ext)
            .filter(|f| f.writing_enabled())
            .ok_or_else(|| BackendError::UnsupportedFormat(ext.clone()))?;

        // Encode fully in memory so a failed encode never leaves a partial file.
        let mut encoded = Vec::new();
        if format == ImageFormat::Jpeg {
            let encoder = JpegEncoder::new_with_quality(&mut encoded, quality.value() as u8);
            image
                .write_with_encoder(encoder)
                .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e)))?;
        } else {
            image
                .write_to(&mut Cursor::new(&mut encoded), format)
                .map_err(|e| {
                    BackendError::ProcessingFailed(format!("{ext} encode failed: {}", e))
                })?;
        }

        std::fs::write(path, encoded)?;
        Ok(())
    }
}
