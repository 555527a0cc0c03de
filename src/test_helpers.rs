//! Shared test utilities: synthetic images and canvas assertions.
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let src = with_pixels(solid(10, 20, Rgb([40, 40, 40])), &[(0, 3, Rgb([200, 0, 0]))]);
//! let out = generate_from_image(&src, &request).unwrap();
//! assert_source_centered(&out.canvas, &src, out.geometry.offset_x);
//! assert_margins_filled(&out.canvas, &out.geometry, src.width(), Rgb([0, 0, 0]));
//! ```

use image::{Rgb, RgbImage};
use std::path::Path;

use crate::imaging::CanvasGeometry;

// =========================================================================
// Synthetic images
// =========================================================================

/// Uniform image of a single color.
pub fn solid(width: u32, height: u32, color: Rgb<u8>) -> RgbImage {
    RgbImage::from_pixel(width, height, color)
}

/// Image whose pixels are all distinct enough to catch misplaced pastes.
pub fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

/// Copy of `img` with individual pixels overwritten.
pub fn with_pixels(mut img: RgbImage, pixels: &[(u32, u32, Rgb<u8>)]) -> RgbImage {
    for &(x, y, color) in pixels {
        img.put_pixel(x, y, color);
    }
    img
}

/// Write a synthetic image, format picked by extension.
pub fn write_image(path: &Path, img: &RgbImage) {
    img.save(path).unwrap();
}

// =========================================================================
// Canvas assertions: panic with the offending coordinate
// =========================================================================

/// Assert the source appears unmodified at `(offset_x, 0)` on the canvas.
pub fn assert_source_centered(canvas: &RgbImage, src: &RgbImage, offset_x: u32) {
    for (x, y, pixel) in src.enumerate_pixels() {
        let actual = canvas.get_pixel(x + offset_x, y);
        assert_eq!(
            actual, pixel,
            "canvas pixel ({}, {}) differs from source pixel ({x}, {y})",
            x + offset_x,
            y
        );
    }
}

/// Assert every pixel outside the source region has `color`.
pub fn assert_margins_filled(
    canvas: &RgbImage,
    geometry: &CanvasGeometry,
    src_width: u32,
    color: Rgb<u8>,
) {
    let source_cols = geometry.offset_x..geometry.offset_x + src_width;
    for (x, y, pixel) in canvas.enumerate_pixels() {
        if source_cols.contains(&x) {
            continue;
        }
        assert_eq!(*pixel, color, "margin pixel ({x}, {y}) has the wrong color");
    }
}
