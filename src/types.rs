//! Report types shared by the batch driver, the CLI printer, and `--report`.

use crate::imaging::{CanvasGeometry, Dimensions, Fill};
use serde::Serialize;
use std::path::PathBuf;

/// One successfully generated background.
#[derive(Debug, Clone, Serialize)]
pub struct ItemReport {
    pub source: PathBuf,
    /// Where the canvas was written; `None` when saving is off.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    pub offset_x: u32,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub clamped: bool,
    pub fill: Fill,
}

impl ItemReport {
    pub fn new(source: PathBuf, geometry: &CanvasGeometry, fill: Fill) -> Self {
        Self {
            source,
            output: None,
            width: geometry.width,
            height: geometry.height,
            offset_x: geometry.offset_x,
            clamped: geometry.clamped,
            fill,
        }
    }
}

/// A source that could not be turned into a background.
#[derive(Debug, Clone, Serialize)]
pub struct FailedItem {
    pub source: PathBuf,
    pub error: String,
}

/// Outcome of a whole batch, in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub generated: Vec<ItemReport>,
    pub failed: Vec<FailedItem>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.generated.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Canvas geometry planned from a source's header, without decoding pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedItem {
    pub source: PathBuf,
    pub dimensions: Dimensions,
    pub geometry: CanvasGeometry,
}
