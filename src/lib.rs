//! # Backgrounder
//!
//! Pads a photo onto a target aspect ratio. The photo keeps its pixels and
//! its height; it is centered horizontally on a wider canvas whose side
//! margins are filled with a blurred copy of the photo, a solid color, or a
//! color sampled from the photo's own edges.
//!
//! ```text
//!            src_w
//!          ┌───────┐
//!  ┌──────┬┴───────┴┬──────┐
//!  │ fill │  photo  │ fill │  height = src_h
//!  └──────┴─────────┴──────┘
//!  ◄── floor(src_h * ratio) ─►
//! ```
//!
//! # Pipeline
//!
//! ```text
//! 1. Resolve  "4/5"          →  AspectRatio        (once per run)
//! 2. Scan     file | dir     →  [PathBuf]
//! 3. Process  each path      →  canvas ─► <uuid>.<ext>   (sequential)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`aspect`] | Aspect-ratio expressions (`0.8`, `4/5`, `16:9`) to ratio + orientation |
//! | [`imaging`] | Canvas geometry, fill strategies, edge sampling, decode/encode backends |
//! | [`scan`] | Input discovery: a single file or one directory level |
//! | [`process`] | Sequential batch driver with per-item failure reporting |
//! | [`naming`] | Unique `<uuid>.<ext>` output names and output directory setup |
//! | [`config`] | `backgrounder.toml` loading, merging, and validation |
//! | [`types`] | Report types shared by `process`, `output`, and `--report` |
//! | [`output`] | CLI output formatting |
//! | [`logger`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## Never Fail On A Ratio
//!
//! An unreadable aspect ratio is not an error for the CLI: it falls back to
//! 1.0 with a `warn!`, so a batch is never lost to a typo in one flag.
//! [`aspect::AspectRatioResolver::try_resolve`] exposes the underlying error
//! for callers that want to be strict.
//!
//! ## Width Follows Height
//!
//! The canvas width is always derived from the photo height, whichever
//! orientation the ratio reports. A ratio that would produce a canvas
//! narrower than the photo is clamped to the photo width.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, resizing, blurring and encoding all go through the `image` crate.
//! The binary has no system dependencies.

pub mod aspect;
pub mod config;
pub mod imaging;
pub mod logger;
pub mod naming;
pub mod output;
pub mod process;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
