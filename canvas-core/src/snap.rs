//! Alignment snapping for element moves.
//!
//! A moving box exposes six features: left, horizontal center and right on
//! the x axis; top, vertical center and bottom on the y axis. Each is compared
//! against the same features of every other box, and the closest pair within
//! [`SNAP_THRESHOLD`] on each axis pulls the box onto the other feature.
//!
//! ```text
//!        guide (vertical, x = 180)
//!              │
//!   ┌────────┐ │ ┌──────┐
//!   │   A    │ │ │  B   │   B.left snaps to A.right
//!   └────────┘ │ └──────┘
//!              │
//! ```

use serde::{Deserialize, Serialize};

use crate::element::Rect;

/// Maximum distance (exclusive) at which two features snap together.
pub const SNAP_THRESHOLD: f32 = 5.0;

/// Orientation of a guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideOrientation {
    /// A vertical line at a fixed x.
    Vertical,
    /// A horizontal line at a fixed y.
    Horizontal,
}

/// A transient guide line marking an alignment snap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    /// Line orientation.
    pub orientation: GuideOrientation,
    /// The fixed coordinate (x for vertical, y for horizontal).
    pub position: f32,
    /// Start of the span along the other axis.
    pub start: f32,
    /// End of the span along the other axis.
    pub end: f32,
}

/// Outcome of snapping a candidate box.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    /// Committed left position.
    pub x: f32,
    /// Committed top position.
    pub y: f32,
    /// Guides for the snaps that fired (at most one per axis).
    pub guides: Vec<Guide>,
}

/// Closest feature pair found on one axis.
struct AxisMatch {
    distance: f32,
    /// Offset of the candidate's feature from its leading edge.
    offset: f32,
    /// The other box's feature value.
    target: f32,
    other: Rect,
}

/// `(offset from leading edge, value)` for each of a box's features on one axis.
fn features(start: f32, extent: f32) -> [(f32, f32); 3] {
    [
        (0.0, start),
        (extent / 2.0, start + extent / 2.0),
        (extent, start + extent),
    ]
}

fn closest_on_axis<'a>(
    candidate: [(f32, f32); 3],
    others: impl Iterator<Item = &'a Rect>,
    axis: impl Fn(&Rect) -> [(f32, f32); 3],
) -> Option<AxisMatch> {
    let mut best: Option<AxisMatch> = None;
    for other in others {
        for (offset, value) in candidate {
            for (_, target) in axis(other) {
                let distance = (value - target).abs();
                if distance < SNAP_THRESHOLD && best.as_ref().map_or(true, |b| distance < b.distance)
                {
                    best = Some(AxisMatch {
                        distance,
                        offset,
                        target,
                        other: *other,
                    });
                }
            }
        }
    }
    best
}

/// Snap `candidate` against `others`.
///
/// Ties go to the earliest box in `others`, so results are deterministic for
/// a fixed element order.
#[must_use]
pub fn snap(candidate: Rect, others: &[Rect]) -> SnapResult {
    let vertical = closest_on_axis(
        features(candidate.x, candidate.width),
        others.iter(),
        |r| features(r.x, r.width),
    );
    let horizontal = closest_on_axis(
        features(candidate.y, candidate.height),
        others.iter(),
        |r| features(r.y, r.height),
    );

    let x = vertical.as_ref().map_or(candidate.x, |m| m.target - m.offset);
    let y = horizontal.as_ref().map_or(candidate.y, |m| m.target - m.offset);
    let snapped = Rect::new(x, y, candidate.width, candidate.height);

    let mut guides = Vec::with_capacity(2);
    if let Some(m) = vertical {
        guides.push(Guide {
            orientation: GuideOrientation::Vertical,
            position: m.target,
            start: snapped.y.min(m.other.y),
            end: snapped.bottom().max(m.other.bottom()),
        });
    }
    if let Some(m) = horizontal {
        guides.push(Guide {
            orientation: GuideOrientation::Horizontal,
            position: m.target,
            start: snapped.x.min(m.other.x),
            end: snapped.right().max(m.other.right()),
        });
    }

    SnapResult { x, y, guides }
}
