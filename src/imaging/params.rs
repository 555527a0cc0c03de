//! Parameter types for background generation.
//!
//! These types describe *what* to build, not *how*. They are the interface
//! between the caller (CLI, config, batch driver) and the
//! [`operations`](super::operations) module that does the pixel work.
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100, default 95). Clamped on construction.
//! - [`BackgroundKind`]: Which fill strategy to use, carrying its color where it has one.
//! - [`SamplingParams`]: Thresholds for the brightest/darkest edge scanners.

use image::Rgb;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("unknown background type {0:?} (expected one of BLURRED, BLACK, WHITE, COLOR, BRIGHTEST, DARKEST)")]
    UnknownKind(String),
    #[error("invalid color {0:?} (expected #rrggbb or r,g,b)")]
    InvalidColor(String),
}

/// Quality setting for lossy image encoding (1-100).
///
/// Only [`Quality::new`] builds one, so the value is always in range:
///
/// ```compile_fail
/// use backgrounder::imaging::Quality;
/// let unchecked = Quality(0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(95)
    }
}

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Fill strategy for the canvas margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundKind {
    /// Stretched, blurred copy of the source.
    #[default]
    Blurred,
    Black,
    White,
    Color(Rgb<u8>),
    /// Brightest non-blown-out pixel from the top half of the side edges.
    Brightest,
    /// Darkest pixel from the side edges.
    Darkest,
}

impl BackgroundKind {
    /// Every token accepted by [`BackgroundKind::from_token`].
    pub const TOKENS: &'static [&'static str] =
        &["BLURRED", "BLACK", "WHITE", "COLOR", "BRIGHTEST", "DARKEST"];

    /// Parse a case-sensitive token. `COLOR` takes `color`, defaulting to black.
    pub fn from_token(token: &str, color: Option<Rgb<u8>>) -> Result<Self, ParamsError> {
        match token {
            "BLURRED" => Ok(Self::Blurred),
            "BLACK" => Ok(Self::Black),
            "WHITE" => Ok(Self::White),
            "COLOR" => Ok(Self::Color(color.unwrap_or(BLACK))),
            "BRIGHTEST" => Ok(Self::Brightest),
            "DARKEST" => Ok(Self::Darkest),
            other => Err(ParamsError::UnknownKind(other.to_string())),
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Self::Blurred => "BLURRED",
            Self::Black => "BLACK",
            Self::White => "WHITE",
            Self::Color(_) => "COLOR",
            Self::Brightest => "BRIGHTEST",
            Self::Darkest => "DARKEST",
        }
    }
}

impl fmt::Display for BackgroundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(c) => write!(f, "COLOR {}", hex_color(*c)),
            other => f.write_str(other.token()),
        }
    }
}

/// Parse `#rrggbb`, `rrggbb`, or `r,g,b`.
pub fn parse_color(s: &str) -> Result<Rgb<u8>, ParamsError> {
    let invalid = || ParamsError::InvalidColor(s.to_string());
    let trimmed = s.trim();

    if trimmed.contains(',') {
        let channels: Vec<u8> = trimmed
            .split(',')
            .map(|c| c.trim().parse::<u8>())
            .collect::<Result<_, _>>()
            .map_err(|_| invalid())?;
        return match channels.as_slice() {
            [r, g, b] => Ok(Rgb([*r, *g, *b])),
            _ => Err(invalid()),
        };
    }

    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

/// Format a color as `#rrggbb`.
pub fn hex_color(c: Rgb<u8>) -> String {
    let [r, g, b] = c.0;
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Thresholds for edge-color sampling.
///
/// - `brightest_threshold` / `brightest_threshold_count`: a pixel is skipped by
///   the brightest scan when at least `count` channels exceed `threshold`.
/// - `darkest_ceiling`: the darkest scan only considers pixels whose perceived
///   brightness is at or below this value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub brightest_threshold: u8,
    pub brightest_threshold_count: u8,
    pub darkest_ceiling: f64,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            brightest_threshold: 150,
            brightest_threshold_count: 3,
            darkest_ceiling: 100.0,
        }
    }
}
