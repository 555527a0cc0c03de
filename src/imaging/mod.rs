//! Background synthesis: pure Rust, built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Blurred fill** | `imageops::resize` (Catmull-Rom) + `imageops::fast_blur` |
//! | **Solid fill** | `RgbImage::from_pixel` |
//! | **Edge sampling** | BT.709 luma over the left/right source columns |
//! | **Paste** | `imageops::replace` at the centered offset |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for canvas geometry and brightness (unit testable)
//! - **Parameters**: Fill kinds, sampling thresholds, encode quality
//! - **Sampling**: Brightest/darkest edge-color scanners
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`] for decode/encode
//! - **Operations**: The generation entry points combining all of the above

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;
mod sampling;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{
    CanvasGeometry, blur_radius, canvas_geometry, perceived_brightness, raw_canvas_width,
};
pub use operations::{
    BackgroundRequest, Fill, GenerateError, GeneratedBackground, generate_from_image,
    generate_from_path,
};
pub use params::{
    BLACK, BackgroundKind, ParamsError, Quality, SamplingParams, WHITE, hex_color, parse_color,
};
pub use rust_backend::{RustBackend, supported_input_extensions};
pub use sampling::{brightest_edge_color, darkest_edge_color};
