//! Input discovery.
//!
//! Turns the `--input` argument into the list of source images to process.
//!
//! - **File**: taken as-is, whatever its extension. Decoding decides whether
//!   it is really an image.
//! - **Directory**: scanned one level deep. Regular files whose lowercase
//!   extension has a decoder compiled in are kept, hidden files are skipped,
//!   and the result is sorted by path.
//!
//! ```text
//! shoot/
//! ├── 001-dawn.jpg        ✓
//! ├── 002-dusk.JPEG       ✓
//! ├── 003-noon.png        ✓
//! ├── notes.txt           ✗ not an image
//! ├── .DS_Store           ✗ hidden
//! └── rejects/            ✗ not descended into
//! ```

use crate::imaging::supported_input_extensions;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Input not found: {0}")]
    InputNotFound(PathBuf),
}

/// Discover the source images named by `input`.
pub fn discover_inputs(input: &Path) -> Result<Vec<PathBuf>, ScanError> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(ScanError::InputNotFound(input.to_path_buf()));
    }

    let mut images: Vec<PathBuf> = fs::read_dir(input)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| !is_hidden(p) && is_image(p))
        .collect();

    images.sort();
    Ok(images)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|n| n.to_string_lossy().starts_with('.'))
}

fn is_image(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    supported_input_extensions().contains(&ext.as_str())
}
