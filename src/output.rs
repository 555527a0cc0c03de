//! CLI output formatting.
//!
//! Every image is shown by its positional index and file name, with the
//! canvas details as indented context lines:
//!
//! ## Generate
//!
//! ```text
//! Generating BLURRED backgrounds at 0.8000 (vertical) for 3 images
//! 001 001-dawn.jpg
//!     Canvas: 160x200 (offset 30)
//!     Fill: blur:32
//!     Saved: output/5b0c…e1.jpg
//! 002 wide.jpg
//!     Canvas: 200x100 (clamped)
//!     Fill: #ffffff
//! 003 broken.jpg
//!     Failed: Processing failed: …
//!
//! Generated 2 backgrounds, 1 failed
//! ```
//!
//! ## Check
//!
//! ```text
//! Planned canvases at 0.8000 (vertical)
//! 001 001-dawn.jpg 100x200
//!     Canvas: 160x200 (offset 30)
//! 002 notes.jpg
//!     Unreadable: Processing failed: …
//! ```
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::aspect::AspectRatio;
use crate::imaging::CanvasGeometry;
use crate::process::ProcessEvent;
use crate::types::{BatchSummary, PlannedItem};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// File name of `path`, or the whole path when it has none.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn image_line(index: usize, path: &Path) -> String {
    format!("{} {}", format_index(index), display_name(path))
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// ```text
/// Canvas: 160x200 (offset 30)
/// Canvas: 200x100 (clamped)
/// ```
fn canvas_line(geometry: &CanvasGeometry) -> String {
    let detail = if geometry.clamped {
        "clamped".to_string()
    } else {
        format!("offset {}", geometry.offset_x)
    };
    format!(
        "{}Canvas: {}x{} ({})",
        indent(1),
        geometry.width,
        geometry.height,
        detail
    )
}

// ============================================================================
// Generate
// ============================================================================

/// Format a single batch progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::Started {
            total,
            aspect,
            kind,
        } => vec![format!(
            "Generating {} backgrounds at {} for {}",
            kind.token(),
            aspect,
            plural(*total, "image")
        )],
        ProcessEvent::ImageGenerated { index, report } => {
            let geometry = CanvasGeometry {
                width: report.width,
                height: report.height,
                offset_x: report.offset_x,
                clamped: report.clamped,
            };
            let mut lines = vec![
                image_line(*index, &report.source),
                canvas_line(&geometry),
                format!("{}Fill: {}", indent(1), report.fill),
            ];
            if let Some(output) = &report.output {
                lines.push(format!("{}Saved: {}", indent(1), output.display()));
            }
            lines
        }
        ProcessEvent::ImageFailed {
            index,
            source,
            error,
        } => vec![
            image_line(*index, source),
            format!("{}Failed: {}", indent(1), error),
        ],
    }
}

/// Format the closing summary line of a batch.
pub fn format_summary(summary: &BatchSummary) -> Vec<String> {
    let mut line = format!("Generated {}", plural(summary.generated.len(), "background"));
    if !summary.is_success() {
        line.push_str(&format!(", {} failed", summary.failed.len()));
    }
    vec![String::new(), line]
}

/// Print the batch summary to stdout.
pub fn print_summary(summary: &BatchSummary) {
    for line in format_summary(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_header(aspect: &AspectRatio) -> String {
    format!("Planned canvases at {}", aspect)
}

/// Format one planned input, or the reason it could not be identified.
pub fn format_check_entry(
    index: usize,
    source: &Path,
    plan: Result<&PlannedItem, &str>,
) -> Vec<String> {
    match plan {
        Ok(item) => vec![
            format!(
                "{} {}x{}",
                image_line(index, source),
                item.dimensions.width,
                item.dimensions.height
            ),
            canvas_line(&item.geometry),
        ],
        Err(reason) => vec![
            image_line(index, source),
            format!("{}Unreadable: {}", indent(1), reason),
        ],
    }
}

/// Print one planned input to stdout.
pub fn print_check_entry(index: usize, source: &Path, plan: Result<&PlannedItem, &str>) {
    for line in format_check_entry(index, source, plan) {
        println!("{}", line);
    }
}
