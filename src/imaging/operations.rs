//! Background generation.
//!
//! [`generate_from_image`] is the core: it takes a decoded source, computes
//! the canvas with [`canvas_geometry`], fills it according to the
//! [`BackgroundKind`], and pastes the untouched source centered on top.
//! [`generate_from_path`] decodes through an [`ImageBackend`] first.
//!
//! The source is never modified; every call allocates a new canvas.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{CanvasGeometry, blur_radius, canvas_geometry};
use super::params::{BLACK, BackgroundKind, SamplingParams, WHITE, hex_color};
use super::sampling::{brightest_edge_color, darkest_edge_color};
use crate::aspect::AspectRatio;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Result type for generation.
pub type Result<T> = std::result::Result<T, GenerateError>;

/// Everything needed to build one canvas, apart from the source pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundRequest {
    pub aspect: AspectRatio,
    pub kind: BackgroundKind,
    pub sampling: SamplingParams,
}

impl BackgroundRequest {
    pub fn new(aspect: AspectRatio, kind: BackgroundKind) -> Self {
        Self {
            aspect,
            kind,
            sampling: SamplingParams::default(),
        }
    }
}

/// How the margins were filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Blurred { radius: u32 },
    Solid(Rgb<u8>),
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fill::Blurred { radius } => write!(f, "blur:{radius}"),
            Fill::Solid(c) => f.write_str(&hex_color(*c)),
        }
    }
}

impl Serialize for Fill {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A generated canvas and how it was built.
#[derive(Debug, Clone)]
pub struct GeneratedBackground {
    pub canvas: RgbImage,
    pub geometry: CanvasGeometry,
    pub fill: Fill,
}

/// Build a background canvas around an already-decoded source.
pub fn generate_from_image(
    src: &RgbImage,
    request: &BackgroundRequest,
) -> Result<GeneratedBackground> {
    let (src_w, src_h) = src.dimensions();
    if src_w == 0 || src_h == 0 {
        return Err(GenerateError::InvalidInput(format!(
            "source image is empty ({src_w}x{src_h})"
        )));
    }

    let geometry = canvas_geometry(src_w, src_h, request.aspect.ratio);
    if geometry.clamped {
        warn!(
            "ratio {} gives a canvas narrower than the {src_w}px source; using the source width",
            request.aspect
        );
    }
    debug!(
        width = geometry.width,
        height = geometry.height,
        offset_x = geometry.offset_x,
        "canvas geometry"
    );

    let (mut canvas, fill) = match request.kind {
        BackgroundKind::Blurred => blurred_canvas(src, &geometry),
        BackgroundKind::Black => solid_canvas(&geometry, BLACK),
        BackgroundKind::White => solid_canvas(&geometry, WHITE),
        BackgroundKind::Color(color) => solid_canvas(&geometry, color),
        BackgroundKind::Brightest => {
            solid_canvas(&geometry, brightest_edge_color(src, &request.sampling))
        }
        BackgroundKind::Darkest => {
            solid_canvas(&geometry, darkest_edge_color(src, &request.sampling))
        }
    };
    if let Fill::Solid(color) = fill {
        debug!("{} fill {}", request.kind.token(), hex_color(color));
    }

    imageops::replace(&mut canvas, src, geometry.offset_x as i64, 0);

    Ok(GeneratedBackground {
        canvas,
        geometry,
        fill,
    })
}

/// Decode `path` through `backend`, then build its background.
pub fn generate_from_path(
    backend: &impl ImageBackend,
    path: &Path,
    request: &BackgroundRequest,
) -> Result<GeneratedBackground> {
    if !path.is_file() {
        return Err(GenerateError::InvalidInput(format!(
            "{} is not a file",
            path.display()
        )));
    }
    let src = backend.load(path)?;
    generate_from_image(&src, request)
}

fn solid_canvas(geometry: &CanvasGeometry, color: Rgb<u8>) -> (RgbImage, Fill) {
    (
        RgbImage::from_pixel(geometry.width, geometry.height, color),
        Fill::Solid(color),
    )
}

/// Stretch the whole source to the canvas, then blur it.
fn blurred_canvas(src: &RgbImage, geometry: &CanvasGeometry) -> (RgbImage, Fill) {
    let stretched = imageops::resize(
        src,
        geometry.width,
        geometry.height,
        FilterType::CatmullRom,
    );
    let radius = blur_radius(geometry.width);
    let canvas = if radius == 0 {
        stretched
    } else {
        imageops::fast_blur(&stretched, radius as f32)
    };
    (canvas, Fill::Blurred { radius })
}
