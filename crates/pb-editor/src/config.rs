//! Editor configuration.
//!
//! Read from JSON by the host (camelCase keys). Every field is optional;
//! missing fields take their default.
//!
//! ```json
//! { "historyLimit": 50, "duplicateOffset": {"x": 20, "y": 20},
//!   "canvasWidth": 100, "canvasPixelWidth": 1200 }
//! ```

use crate::history::DEFAULT_LIMIT;
use pb_core::ordering::DUPLICATE_OFFSET;
use pb_core::project::{MAX_CANVAS_WIDTH, clamp_canvas_width};
use pb_core::Point;
use serde::{Deserialize, Serialize};

/// Canvas pixel width assumed until the host reports the real one.
pub const DEFAULT_CANVAS_PIXEL_WIDTH: f64 = 1200.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Snapshots kept by the undo history. Default: **50**.
    pub history_limit: usize,

    /// Offset applied to duplicates. Default: **(20, 20)**.
    pub duplicate_offset: Point,

    /// Initial canvas width percentage, clamped into 10–100. Default: **100**.
    pub canvas_width: u32,

    /// Initial live canvas width in pixels. Default: **1200**.
    pub canvas_pixel_width: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_LIMIT,
            duplicate_offset: DUPLICATE_OFFSET,
            canvas_width: MAX_CANVAS_WIDTH,
            canvas_pixel_width: DEFAULT_CANVAS_PIXEL_WIDTH,
        }
    }
}

impl EditorConfig {
    /// Parse a config document and bring every value into range.
    ///
    /// # Errors
    /// Returns the serde error if `json` is not a valid config object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: EditorConfig = serde_json::from_str(json)?;
        Ok(config.normalized())
    }

    /// Clamp out-of-range values instead of rejecting them.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.history_limit = self.history_limit.max(1);
        self.canvas_width = clamp_canvas_width(f64::from(self.canvas_width));
        if !self.canvas_pixel_width.is_finite() || self.canvas_pixel_width < 0.0 {
            self.canvas_pixel_width = DEFAULT_CANVAS_PIXEL_WIDTH;
        }
        self
    }
}
