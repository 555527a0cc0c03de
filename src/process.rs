//! Sequential batch driver.
//!
//! Runs the background engine over every discovered input, one at a time:
//!
//! ```text
//! for each source:
//!     load ─► generate_from_image ─► (save as <uuid>.<ext>)? ─► ItemReport
//!                 └─────── any error ───────► FailedItem, keep going
//! ```
//!
//! A failing item never aborts the batch. It is logged with `error!`, sent as
//! [`ProcessEvent::ImageFailed`], and recorded in [`BatchSummary::failed`].
//! The only fatal error is failing to create the output directory, which
//! happens once before the first item.
//!
//! Progress is streamed over an optional `mpsc` channel so the CLI can print
//! lines as they happen while the library stays free of stdout.

use crate::aspect::AspectRatio;
use crate::imaging::{
    BackendError, BackgroundKind, BackgroundRequest, GenerateError, ImageBackend, Quality,
    canvas_geometry, generate_from_path,
};
use crate::naming;
use crate::types::{BatchSummary, FailedItem, ItemReport, PlannedItem};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{debug, error, info, info_span};

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error("Save failed: {0}")]
    Save(#[from] BackendError),
}

/// Where and how generated canvases are written.
#[derive(Debug, Clone)]
pub struct SaveTarget {
    pub dir: PathBuf,
    pub quality: Quality,
}

#[derive(Debug, Clone)]
pub struct BatchSettings {
    pub request: BackgroundRequest,
    /// `None` computes and reports canvases without writing them.
    pub save: Option<SaveTarget>,
}

/// Progress events, in batch order. Indices are 1-based.
#[derive(Debug, Clone)]
pub enum ProcessEvent {
    Started {
        total: usize,
        aspect: AspectRatio,
        kind: BackgroundKind,
    },
    ImageGenerated {
        index: usize,
        report: ItemReport,
    },
    ImageFailed {
        index: usize,
        source: PathBuf,
        error: String,
    },
}

/// Generate a background for every input.
pub fn process_batch(
    backend: &impl ImageBackend,
    inputs: &[PathBuf],
    settings: &BatchSettings,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<BatchSummary, ProcessError> {
    if let Some(target) = &settings.save {
        naming::ensure_output_dir(&target.dir)?;
    }

    info!(
        total = inputs.len(),
        "generating {} backgrounds at {}",
        settings.request.kind,
        settings.request.aspect
    );
    emit(
        &progress,
        ProcessEvent::Started {
            total: inputs.len(),
            aspect: settings.request.aspect,
            kind: settings.request.kind,
        },
    );

    let mut summary = BatchSummary::default();
    for (i, source) in inputs.iter().enumerate() {
        let index = i + 1;
        let _span = info_span!("image", index, source = %source.display()).entered();
        match process_one(backend, source, settings) {
            Ok(report) => {
                emit(
                    &progress,
                    ProcessEvent::ImageGenerated {
                        index,
                        report: report.clone(),
                    },
                );
                summary.generated.push(report);
            }
            Err(e) => {
                error!("{}: {e}", source.display());
                let error = e.to_string();
                emit(
                    &progress,
                    ProcessEvent::ImageFailed {
                        index,
                        source: source.clone(),
                        error: error.clone(),
                    },
                );
                summary.failed.push(FailedItem {
                    source: source.clone(),
                    error,
                });
            }
        }
    }

    info!(
        generated = summary.generated.len(),
        failed = summary.failed.len(),
        "batch finished"
    );
    Ok(summary)
}

fn process_one(
    backend: &impl ImageBackend,
    source: &Path,
    settings: &BatchSettings,
) -> Result<ItemReport, ProcessError> {
    let generated = generate_from_path(backend, source, &settings.request)?;
    let mut report = ItemReport::new(source.to_path_buf(), &generated.geometry, generated.fill);

    if let Some(target) = &settings.save {
        let output = naming::unique_output_path(&target.dir, source);
        backend.save(&generated.canvas, &output, target.quality)?;
        debug!("{} -> {}", source.display(), output.display());
        report.output = Some(output);
    }
    Ok(report)
}

/// Events are best-effort: a dropped receiver does not stop the batch.
fn emit(progress: &Option<Sender<ProcessEvent>>, event: ProcessEvent) {
    if let Some(tx) = progress {
        tx.send(event).ok();
    }
}

/// Identify `source` and compute the canvas it would get at `aspect`.
pub fn plan_item(
    backend: &impl ImageBackend,
    source: &Path,
    aspect: &AspectRatio,
) -> Result<PlannedItem, BackendError> {
    let dimensions = backend.identify(source)?;
    let geometry = canvas_geometry(dimensions.width, dimensions.height, aspect.ratio);
    Ok(PlannedItem {
        source: source.to_path_buf(),
        dimensions,
        geometry,
    })
}

/// Write the batch summary as pretty JSON.
pub fn write_report(summary: &BatchSummary, path: &Path) -> Result<(), ProcessError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)?;
    Ok(())
}
