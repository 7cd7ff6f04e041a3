//! JSON project files: the only persisted format.
//!
//! ```json
//! {
//!   "version": "1.0.0",
//!   "timestamp": "2024-05-01T12:00:00+00:00",
//!   "canvasWidth": 100,
//!   "components": [ { "id": "...", "type": "text", "position": {...}, "props": {...} } ]
//! }
//! ```
//!
//! Import is strict about the two fields the editor needs (`components` and
//! `canvasWidth`) and ignores everything else.

use crate::model::Component;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Format version written into every export.
pub const PROJECT_VERSION: &str = "1.0.0";

/// Valid range for the canvas width percentage.
pub const MIN_CANVAS_WIDTH: u32 = 10;
pub const MAX_CANVAS_WIDTH: u32 = 100;

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid JSON format: missing components array")]
    MissingComponents,

    #[error("Invalid JSON format: missing canvasWidth")]
    MissingCanvasWidth,

    #[error("Invalid JSON format: canvasWidth must be a number, got {0}")]
    InvalidCanvasWidth(String),

    #[error("Invalid component at index {index}: {source}")]
    InvalidComponent {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// The on-disk project document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    pub version: String,
    pub timestamp: String,
    pub canvas_width: u32,
    pub components: Vec<Component>,
}

/// What an import hands back to the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedProject {
    pub components: Vec<Component>,
    /// Raw width from the file; the editor clamps it into range.
    pub canvas_width: f64,
}

/// Serialize `components` into a pretty-printed project file stamped with
/// the current time.
#[must_use]
pub fn export_json(components: &[Component], canvas_width: u32) -> String {
    let file = ProjectFile {
        version: PROJECT_VERSION.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        canvas_width,
        components: components.to_vec(),
    };
    log::info!(
        "export json: {} components, canvas {}%",
        components.len(),
        canvas_width
    );
    serde_json::to_string_pretty(&file).unwrap_or_else(|_| "{}".to_string())
}

/// Parse a project file.
///
/// Requires `components` to be an array and `canvasWidth` to be truthy
/// (present and not `null`, `false`, `0` or `""`). Any other shape fails.
pub fn import_json(json: &str) -> Result<ImportedProject, ProjectError> {
    let data: Value = serde_json::from_str(json)?;

    let Some(raw_components) = data.get("components").and_then(Value::as_array) else {
        return Err(ProjectError::MissingComponents);
    };

    let canvas_width = match data.get("canvasWidth") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => {
            return Err(ProjectError::MissingCanvasWidth);
        }
        Some(Value::String(s)) if s.is_empty() => return Err(ProjectError::MissingCanvasWidth),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(w) if w != 0.0 => w,
            _ => return Err(ProjectError::MissingCanvasWidth),
        },
        Some(other) => return Err(ProjectError::InvalidCanvasWidth(other.to_string())),
    };

    let components = raw_components
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            Component::deserialize(raw)
                .map_err(|source| ProjectError::InvalidComponent { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::info!(
        "import json: {} components, canvas {}%",
        components.len(),
        canvas_width
    );
    Ok(ImportedProject {
        components,
        canvas_width,
    })
}

/// Clamp a raw width percentage into `[10, 100]`.
pub fn clamp_canvas_width(width: f64) -> u32 {
    if width.is_nan() {
        return MAX_CANVAS_WIDTH;
    }
    width
        .round()
        .clamp(f64::from(MIN_CANVAS_WIDTH), f64::from(MAX_CANVAS_WIDTH)) as u32
}
