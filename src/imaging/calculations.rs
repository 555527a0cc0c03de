//! Pure calculation functions for canvas geometry and pixel brightness.
//!
//! All functions here are pure and testable without any I/O or images.

use image::Rgb;
use serde::Serialize;

/// Where the source sits on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CanvasGeometry {
    /// Canvas width.
    pub width: u32,
    /// Canvas height (always the source height).
    pub height: u32,
    /// Horizontal paste offset of the source.
    pub offset_x: u32,
    /// True when the ratio asked for a canvas narrower than the source and
    /// the width was clamped to the source width.
    pub clamped: bool,
}

/// Calculate the canvas for a source and a resolved ratio.
///
/// Width is `floor(src_h * ratio)`, clamped up to `src_w`; the source is
/// centered horizontally with a truncating offset.
///
/// # Examples
/// ```
/// # use backgrounder::imaging::canvas_geometry;
/// // 100x200 portrait at 4:5 → 160x200 canvas, source at x=30
/// let g = canvas_geometry(100, 200, 0.8);
/// assert_eq!((g.width, g.height, g.offset_x), (160, 200, 30));
/// ```
pub fn canvas_geometry(src_w: u32, src_h: u32, ratio: f64) -> CanvasGeometry {
    let raw = raw_canvas_width(src_h, ratio).min(u32::MAX as u64) as u32;
    let clamped = raw < src_w;
    let width = raw.max(src_w);

    CanvasGeometry {
        width,
        height: src_h,
        offset_x: (width - src_w) / 2,
        clamped,
    }
}

/// Unclamped canvas width, as the ratio alone dictates.
pub fn raw_canvas_width(src_h: u32, ratio: f64) -> u64 {
    let raw = (src_h as f64 * ratio).floor();
    if raw.is_finite() && raw > 0.0 {
        raw as u64
    } else {
        0
    }
}

/// Gaussian blur radius for a blurred background of the given width.
pub fn blur_radius(canvas_width: u32) -> u32 {
    canvas_width / 5
}

/// Perceived brightness using ITU-R BT.709 luma weights.
pub fn perceived_brightness(pixel: Rgb<u8>) -> f64 {
    let [r, g, b] = pixel.0;
    0.2126 * r as f64 + 0.7152 * g as f64 + 0.0722 * b as f64
}
