//! Aspect-ratio expression parsing.
//!
//! A user supplies the target canvas shape as a short expression. Two forms
//! are understood:
//!
//! - **Decimal** `0 < d < 1`: used directly as the width multiplier applied
//!   to the source height (`"0.8"` → canvas width = 0.8 × height).
//! - **Pair** `<int><sep><int>` with `sep` one of `:` `/` `-` `|`: the
//!   leftmost pair in the string wins (`"4/5"`, `"16:9"`, `"ratio 3-2"`).
//!
//! For a pair `a:b` the orientation is [`Orientation::Horizontal`] when
//! `a > b` and [`Orientation::Vertical`] otherwise (ties are vertical). The
//! ratio is always the minor/major relationship: `a/b` when vertical, `b/a`
//! when horizontal.
//!
//! Anything else falls back to [`FALLBACK_RATIO`]. [`AspectRatioResolver::resolve`]
//! never fails; it logs a warning and falls back. Callers that want to surface
//! typos use [`AspectRatioResolver::try_resolve`] instead.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::warn;

/// Expression used when neither the config nor the CLI names one.
pub const DEFAULT_ASPECT_RATIO: &str = "4/5";

/// Ratio used when an expression cannot be resolved.
pub const FALLBACK_RATIO: f64 = 1.0;

const PAIR_SEPARATORS: &[char] = &[':', '/', '-', '|'];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AspectRatioError {
    #[error("unrecognized aspect ratio expression: {0:?}")]
    Unparsable(String),
    #[error("decimal aspect ratio {0} is outside (0, 1)")]
    OutOfRange(f64),
    #[error("aspect ratio {0:?} has a zero term")]
    ZeroTerm(String),
}

/// Which dimension of an `a:b` pair is the major one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Vertical => write!(f, "vertical"),
            Orientation::Horizontal => write!(f, "horizontal"),
        }
    }
}

/// A resolved aspect ratio: canvas width = `floor(src_h * ratio)`.
///
/// Invariant: `ratio > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AspectRatio {
    pub ratio: f64,
    pub orientation: Orientation,
}

impl AspectRatio {
    /// The fallback ratio with the given orientation.
    pub fn fallback(orientation: Orientation) -> Self {
        Self {
            ratio: FALLBACK_RATIO,
            orientation,
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} ({})", self.ratio, self.orientation)
    }
}

/// Resolves expressions against explicit defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatioResolver {
    /// Orientation reported for decimal expressions and fallbacks.
    pub default_orientation: Orientation,
    /// Ratio returned when an expression cannot be resolved.
    pub fallback_ratio: f64,
}

impl Default for AspectRatioResolver {
    fn default() -> Self {
        Self {
            default_orientation: Orientation::Vertical,
            fallback_ratio: FALLBACK_RATIO,
        }
    }
}

impl AspectRatioResolver {
    pub fn new(default_orientation: Orientation) -> Self {
        Self {
            default_orientation,
            ..Self::default()
        }
    }

    /// Resolve an expression, falling back on anything unrecognized.
    pub fn resolve(&self, expr: &str) -> AspectRatio {
        self.try_resolve(expr).unwrap_or_else(|e| {
            warn!("{e}; using ratio {}", self.fallback_ratio);
            AspectRatio {
                ratio: self.fallback_ratio,
                orientation: self.default_orientation,
            }
        })
    }

    /// Resolve an expression, reporting why it could not be resolved.
    pub fn try_resolve(&self, expr: &str) -> Result<AspectRatio, AspectRatioError> {
        let trimmed = expr.trim();

        // A string that reads as a number never goes on to the pair search
        if let Ok(d) = trimmed.parse::<f64>() {
            return if d > 0.0 && d < 1.0 {
                Ok(AspectRatio {
                    ratio: d,
                    orientation: self.default_orientation,
                })
            } else {
                Err(AspectRatioError::OutOfRange(d))
            };
        }

        let (a, b) = find_pair(trimmed)
            .ok_or_else(|| AspectRatioError::Unparsable(expr.to_string()))?;
        if a == 0 || b == 0 {
            return Err(AspectRatioError::ZeroTerm(expr.to_string()));
        }

        let orientation = if a > b {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let ratio = match orientation {
            Orientation::Vertical => a as f64 / b as f64,
            Orientation::Horizontal => b as f64 / a as f64,
        };
        Ok(AspectRatio { ratio, orientation })
    }
}

/// Resolve with the stock fallback ratio.
pub fn resolve(expr: &str, default_orientation: Orientation) -> AspectRatio {
    AspectRatioResolver::new(default_orientation).resolve(expr)
}

/// Find the leftmost `<digits><sep><digits>` in `s`.
///
/// Digit runs are maximal. Runs too long for a `u64` are skipped.
fn find_pair(s: &str) -> Option<(u64, u64)> {
    let bytes = s.as_bytes();
    let digit_run_end = |from: usize| {
        let mut end = from;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        end
    };

    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let first_end = digit_run_end(i);
        let sep_ok = first_end < bytes.len()
            && PAIR_SEPARATORS.contains(&(bytes[first_end] as char));
        if sep_ok {
            let second_end = digit_run_end(first_end + 1);
            if second_end > first_end + 1 {
                let a = s[i..first_end].parse::<u64>();
                let b = s[first_end + 1..second_end].parse::<u64>();
                if let (Ok(a), Ok(b)) = (a, b) {
                    return Some((a, b));
                }
            }
        }
        // A shorter prefix of this run is followed by a digit, never a separator
        i = first_end;
    }
    None
}
