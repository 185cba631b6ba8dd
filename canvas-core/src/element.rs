//! Canvas elements - the building blocks of a layout.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CanvasError;

/// Minimum width and height an element can be resized to.
pub const MIN_ELEMENT_SIZE: f32 = 30.0;

/// Unique identifier for an element.
///
/// Ids are allocated from a monotonically increasing counter and are never
/// reused within a workspace, even after the element is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(u64);

impl ElementId {
    /// Largest id a snapshot may carry. Ids stay exact as JavaScript numbers.
    pub const MAX: u64 = (1 << 53) - 1;

    /// Create an id from its raw counter value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ElementId {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| CanvasError::InvalidOperation(format!("invalid element id {s:?}: {e}")))
    }
}

/// The type of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Filled rectangle.
    Rectangle,
    /// Filled square.
    Square,
    /// Filled circle (always rendered with a 50% radius).
    Circle,
    /// Block of text.
    Paragraph,
    /// Single-line text field; content is the placeholder.
    Input,
    /// Clickable button; content is the label.
    Button,
}

impl ElementKind {
    /// All element kinds, in palette order.
    pub const ALL: [Self; 6] = [
        Self::Rectangle,
        Self::Square,
        Self::Circle,
        Self::Paragraph,
        Self::Input,
        Self::Button,
    ];

    /// Lowercase name used in snapshots, class names and the CLI.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Square => "square",
            Self::Circle => "circle",
            Self::Paragraph => "paragraph",
            Self::Input => "input",
            Self::Button => "button",
        }
    }

    /// Default `(width, height)` for a freshly placed element.
    #[must_use]
    pub const fn default_size(self) -> (f32, f32) {
        match self {
            Self::Rectangle => (120.0, 80.0),
            Self::Square | Self::Circle => (80.0, 80.0),
            Self::Paragraph => (200.0, 100.0),
            Self::Input => (200.0, 40.0),
            Self::Button => (120.0, 40.0),
        }
    }

    /// Whether this kind is a plain filled shape.
    #[must_use]
    pub const fn is_shape(self) -> bool {
        matches!(self, Self::Rectangle | Self::Square | Self::Circle)
    }

    /// Whether this kind renders text.
    #[must_use]
    pub const fn is_textual(self) -> bool {
        matches!(self, Self::Paragraph | Self::Input | Self::Button)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CanvasError::InvalidOperation(format!("unknown element type: {s}")))
    }
}

/// Visual variant of a button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    /// Solid fill.
    #[default]
    Primary,
    /// Muted solid fill.
    Secondary,
    /// Transparent fill with a colored border.
    Outline,
}

impl ButtonVariant {
    /// Lowercase name, also used in the generated class `btn-<name>`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Outline => "outline",
        }
    }
}

impl FromStr for ButtonVariant {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" => Ok(Self::Primary),
            "secondary" => Ok(Self::Secondary),
            "outline" => Ok(Self::Outline),
            other => Err(CanvasError::InvalidOperation(format!(
                "unknown button variant: {other}"
            ))),
        }
    }
}

/// A point in logical canvas pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned box in logical canvas pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Horizontal center.
    #[must_use]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Vertical center.
    #[must_use]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Whether the point lies inside (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

/// Normalize an angle in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_rotation(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Geometry and visual style of an element.
///
/// These are the fields a breakpoint override may replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    /// Left position in base coordinate space.
    pub x: f32,
    /// Top position in base coordinate space.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
    /// Fill color.
    pub background_color: String,
    /// Text color.
    pub color: String,
    /// Border color.
    pub border_color: String,
    /// Border width (0 = no border).
    pub border_width: f32,
    /// Corner radius.
    pub border_radius: f32,
    /// Font size in pixels.
    pub font_size: f32,
    /// Rotation in degrees, normalized to `[0, 360)`.
    pub rotation: f32,
}

impl Style {
    /// Default style for a kind, positioned at the origin.
    #[must_use]
    pub fn for_kind(kind: ElementKind) -> Self {
        let (width, height) = kind.default_size();
        let mut style = Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            background_color: "#3498db".to_string(),
            color: "#333333".to_string(),
            border_color: "#000000".to_string(),
            border_width: 0.0,
            border_radius: 0.0,
            font_size: 16.0,
            rotation: 0.0,
        };
        match kind {
            ElementKind::Rectangle | ElementKind::Square => style.border_radius = 4.0,
            ElementKind::Circle => {}
            ElementKind::Paragraph => style.background_color = "transparent".to_string(),
            ElementKind::Input => {
                style.background_color = "#ffffff".to_string();
                style.border_color = "#cccccc".to_string();
                style.border_width = 1.0;
                style.border_radius = 4.0;
            }
            ElementKind::Button => {
                style.color = "#ffffff".to_string();
                style.border_radius = 4.0;
            }
        }
        style
    }

    /// The element's box.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A canvas element: its base record, authoritative for the desktop breakpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// Element type.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Geometry and visual style.
    #[serde(flatten)]
    pub style: Style,
    /// Text content, placeholder or label depending on kind.
    #[serde(default)]
    pub content: String,
    /// Button variant (ignored for other kinds).
    #[serde(default)]
    pub variant: ButtonVariant,
    /// Locked elements cannot be moved, resized or restyled.
    #[serde(default)]
    pub locked: bool,
    /// Enables the four edge-midpoint resize handles.
    #[serde(default)]
    pub use_eight_joints: bool,
}

impl Element {
    /// Create an element with the kind's default style and content.
    #[must_use]
    pub fn new(id: ElementId, kind: ElementKind) -> Self {
        let content = match kind {
            ElementKind::Paragraph => "Text",
            ElementKind::Input => "Enter text...",
            ElementKind::Button => "Button",
            _ => "",
        };
        Self {
            id,
            kind,
            style: Style::for_kind(kind),
            content: content.to_string(),
            variant: ButtonVariant::default(),
            locked: false,
            use_eight_joints: false,
        }
    }

    /// Set position and size.
    #[must_use]
    pub fn with_rect(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.style.x = x;
        self.style.y = y;
        self.style.width = width;
        self.style.height = height;
        self
    }

    /// Set the fill color.
    #[must_use]
    pub fn with_fill(mut self, color: &str) -> Self {
        self.style.background_color = color.to_string();
        self
    }

    /// Set the text color.
    #[must_use]
    pub fn with_color(mut self, color: &str) -> Self {
        self.style.color = color.to_string();
        self
    }

    /// Set the font size.
    #[must_use]
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.style.font_size = size;
        self
    }

    /// Set the corner radius.
    #[must_use]
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.style.border_radius = radius;
        self
    }

    /// Set the border.
    #[must_use]
    pub fn with_border(mut self, width: f32, color: &str) -> Self {
        self.style.border_width = width;
        self.style.border_color = color.to_string();
        self
    }

    /// Set the content text.
    #[must_use]
    pub fn with_content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }

    /// Set the button variant.
    #[must_use]
    pub fn with_variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the locked flag.
    #[must_use]
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// The element's base box.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.style.rect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sizes() {
        assert_eq!(ElementKind::Circle.default_size(), (80.0, 80.0));
        assert_eq!(ElementKind::Square.default_size(), (80.0, 80.0));
        assert_eq!(ElementKind::Button.default_size(), (120.0, 40.0));
        assert_eq!(ElementKind::Paragraph.default_size(), (200.0, 100.0));
    }

    #[test]
    fn test_new_element_defaults() {
        let button = Element::new(ElementId::new(3), ElementKind::Button);
        assert_eq!(button.content, "Button");
        assert_eq!(button.variant, ButtonVariant::Primary);
        assert!(!button.locked);
        assert!(!button.use_eight_joints);
        assert!((button.style.rotation).abs() < f32::EPSILON);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Circle".parse::<ElementKind>().ok(), Some(ElementKind::Circle));
        assert!("hexagon".parse::<ElementKind>().is_err());
    }

    #[test]
    fn test_normalize_rotation() {
        assert!((normalize_rotation(370.0) - 10.0).abs() < 1e-4);
        assert!((normalize_rotation(-90.0) - 270.0).abs() < 1e-4);
        assert!((normalize_rotation(360.0)).abs() < f32::EPSILON);
        assert!((normalize_rotation(f32::NAN)).abs() < f32::EPSILON);
        assert!(normalize_rotation(-1e-10) < 360.0);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(Point::new(15.0, 29.0)));
        assert!(!rect.contains(Point::new(31.0, 15.0)));
        assert!((rect.center_x() - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_element_serializes_flat() {
        let element = Element::new(ElementId::new(7), ElementKind::Circle);
        let json = serde_json::to_value(&element).expect("serialize");
        assert_eq!(json["id"], 7);
        assert_eq!(json["type"], "circle");
        assert_eq!(json["width"], 80.0);
        assert_eq!(json["useEightJoints"], false);
    }
}
