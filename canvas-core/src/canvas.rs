//! Canvas configuration: background, size, zoom and alignment assist.

use serde::{Deserialize, Serialize};

use crate::element::Point;
use crate::style::Breakpoint;

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f32 = 0.25;

/// Largest allowed zoom factor.
pub const MAX_ZOOM: f32 = 2.0;

/// Default canvas background.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Parse a user-entered dimension, falling back to `default` for malformed,
/// non-finite or non-positive input.
#[must_use]
pub fn parse_dimension(input: &str, default: f32) -> f32 {
    match input.trim().trim_end_matches("px").trim().parse::<f32>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => {
            tracing::debug!(input, default, "malformed dimension, using default");
            default
        }
    }
}

/// Canvas-level settings. Everything but the active breakpoint is persisted
/// with the workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasConfig {
    /// Page background color.
    pub background: String,
    /// Active breakpoint. Editor state only; never written to a snapshot.
    #[serde(skip)]
    pub breakpoint: Breakpoint,
    /// Custom canvas width, overriding the breakpoint default.
    #[serde(default)]
    pub width: Option<f32>,
    /// Custom canvas height, overriding the breakpoint default.
    #[serde(default)]
    pub height: Option<f32>,
    /// Zoom factor; read through [`CanvasConfig::zoom`].
    zoom: f32,
    /// Whether moves snap to other elements.
    pub alignment_assist: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND.to_string(),
            breakpoint: Breakpoint::Desktop,
            width: None,
            height: None,
            zoom: 1.0,
            alignment_assist: true,
        }
    }
}

impl CanvasConfig {
    /// The zoom factor, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        if self.zoom.is_finite() {
            self.zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            1.0
        }
    }

    /// Set the zoom factor, clamping it into range.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = if zoom.is_finite() {
            zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            1.0
        };
    }

    /// Effective `(width, height)`: the custom size where set, else the
    /// active breakpoint's default.
    #[must_use]
    pub fn size(&self) -> (f32, f32) {
        let (default_w, default_h) = self.breakpoint.default_canvas_size();
        (self.width.unwrap_or(default_w), self.height.unwrap_or(default_h))
    }

    /// Set a custom size from text input; malformed values fall back to the
    /// active breakpoint's default dimension.
    pub fn set_custom_size_input(&mut self, width: &str, height: &str) {
        let (default_w, default_h) = self.breakpoint.default_canvas_size();
        self.width = Some(parse_dimension(width, default_w));
        self.height = Some(parse_dimension(height, default_h));
    }

    /// Drop the custom size and follow the breakpoint default again.
    pub fn clear_custom_size(&mut self) {
        self.width = None;
        self.height = None;
    }

    /// Convert a pointer offset inside the canvas viewport into logical
    /// canvas coordinates.
    #[must_use]
    pub fn screen_to_canvas(&self, point: Point) -> Point {
        let zoom = self.zoom();
        Point::new(point.x / zoom, point.y / zoom)
    }
}
