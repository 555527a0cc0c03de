//! Output file naming.
//!
//! Generated canvases are written as `<uuid-v4>.<ext>` where `ext` is the
//! source file's extension, kept as written (`IMG_01.JPG` → `<uuid>.JPG`). Random
//! names never collide between runs, so nothing in the output directory is
//! ever overwritten.
//!
//! The output directory is created on demand with `create_dir_all`, which is
//! a no-op when it already exists.

use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Extension used when the source has none.
pub const FALLBACK_EXTENSION: &str = "jpg";

/// Extension to carry over from `source`.
pub fn output_extension(source: &Path) -> String {
    source
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string())
}

/// A fresh, unique output path in `dir` for a canvas generated from `source`.
pub fn unique_output_path(dir: &Path, source: &Path) -> PathBuf {
    dir.join(format!("{}.{}", Uuid::new_v4(), output_extension(source)))
}

/// Create `dir` and its parents if missing.
pub fn ensure_output_dir(dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dir)
}
