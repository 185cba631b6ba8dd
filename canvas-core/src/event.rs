//! Input events for canvas interaction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CanvasError, ElementId, ElementKind, Point};

/// One of the eight resize handles around an element.
///
/// Corner handles are always available; edge midpoints only when the element
/// has eight-joint mode enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    /// Top edge midpoint.
    N,
    /// Top-right corner.
    Ne,
    /// Right edge midpoint.
    E,
    /// Bottom-right corner.
    Se,
    /// Bottom edge midpoint.
    S,
    /// Bottom-left corner.
    Sw,
    /// Left edge midpoint.
    W,
    /// Top-left corner.
    Nw,
}

impl ResizeHandle {
    /// All handles, clockwise from the top.
    pub const ALL: [Self; 8] = [
        Self::N,
        Self::Ne,
        Self::E,
        Self::Se,
        Self::S,
        Self::Sw,
        Self::W,
        Self::Nw,
    ];

    /// Whether this is a corner handle.
    #[must_use]
    pub const fn is_corner(self) -> bool {
        matches!(self, Self::Ne | Self::Se | Self::Sw | Self::Nw)
    }

    /// Whether dragging moves the top edge.
    #[must_use]
    pub const fn moves_top(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    /// Whether dragging moves the bottom edge.
    #[must_use]
    pub const fn moves_bottom(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    /// Whether dragging moves the left edge.
    #[must_use]
    pub const fn moves_left(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    /// Whether dragging moves the right edge.
    #[must_use]
    pub const fn moves_right(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    /// Lowercase compass name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::Ne => "ne",
            Self::E => "e",
            Self::Se => "se",
            Self::S => "s",
            Self::Sw => "sw",
            Self::W => "w",
            Self::Nw => "nw",
        }
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResizeHandle {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|h| h.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CanvasError::InvalidOperation(format!("unknown resize handle: {s}")))
    }
}

/// What a pointer press landed on.
///
/// Move and resize use distinct targets, so a single press can only ever
/// open one kind of session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "lowercase")]
pub enum PointerTarget {
    /// An element's body (starts a drag).
    Body {
        /// The pressed element.
        element: ElementId,
    },
    /// One of an element's resize handles (starts a resize).
    Handle {
        /// The pressed element.
        element: ElementId,
        /// The pressed handle.
        handle: ResizeHandle,
    },
    /// Empty canvas (clears the selection).
    Canvas,
}

/// All input events the canvas can receive.
///
/// Pointer positions are viewport pixels relative to the canvas origin;
/// they are divided by the zoom factor before touching geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum InputEvent {
    /// A palette shape released over the canvas.
    PaletteDrop {
        /// Shape to create.
        kind: ElementKind,
        /// Release position.
        at: Point,
    },
    /// Pointer pressed.
    PointerDown {
        /// What was pressed.
        target: PointerTarget,
        /// Press position.
        at: Point,
    },
    /// Pointer moved.
    PointerMove {
        /// Current position.
        at: Point,
    },
    /// Pointer released; always ends the open session.
    PointerUp,
    /// Key pressed.
    Key {
        /// Key name, e.g. `Delete`.
        key: String,
    },
}
