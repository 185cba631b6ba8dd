//! Breakpoints, sparse override patches and the effective-style resolver.
//!
//! The desktop breakpoint is the base: its styles live on the element record
//! itself. Tablet and mobile store only the fields that differ, and every read
//! merges those fields over the base record.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::{normalize_rotation, Element, ElementId, Rect, Style};
use crate::CanvasError;

/// A named viewport context.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    /// The base breakpoint; never has overrides.
    #[default]
    Desktop,
    /// Tablet viewport.
    Tablet,
    /// Mobile viewport.
    Mobile,
}

impl Breakpoint {
    /// All breakpoints, base first.
    pub const ALL: [Self; 3] = [Self::Desktop, Self::Tablet, Self::Mobile];

    /// Whether this is the base breakpoint.
    #[must_use]
    pub const fn is_base(self) -> bool {
        matches!(self, Self::Desktop)
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Tablet => "tablet",
            Self::Mobile => "mobile",
        }
    }

    /// Default canvas `(width, height)` for this breakpoint.
    #[must_use]
    pub const fn default_canvas_size(self) -> (f32, f32) {
        match self {
            Self::Desktop => (1200.0, 800.0),
            Self::Tablet => (768.0, 1024.0),
            Self::Mobile => (375.0, 667.0),
        }
    }

    /// Max viewport width of the media query scoping this breakpoint's
    /// overrides, or `None` for the base breakpoint.
    #[must_use]
    pub const fn media_max_width(self) -> Option<u32> {
        match self {
            Self::Desktop => None,
            Self::Tablet => Some(1024),
            Self::Mobile => Some(768),
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Breakpoint {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|bp| bp.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CanvasError::InvalidOperation(format!("unknown breakpoint: {s}")))
    }
}

/// A sparse set of style fields. `None` means "inherit".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)] // Fields mirror `Style`
pub struct StylePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
}

impl StylePatch {
    /// Patch that moves an element.
    #[must_use]
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Patch that sets position and size.
    #[must_use]
    pub fn geometry(rect: Rect) -> Self {
        Self {
            x: Some(rect.x),
            y: Some(rect.y),
            width: Some(rect.width),
            height: Some(rect.height),
            ..Self::default()
        }
    }

    /// Patch that sets rotation.
    #[must_use]
    pub fn rotation(degrees: f32) -> Self {
        Self {
            rotation: Some(degrees),
            ..Self::default()
        }
    }

    /// Whether no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Copy with rotation normalized.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.rotation = self.rotation.map(normalize_rotation);
        self
    }

    /// Merge `other` into `self`; fields set in `other` win.
    pub fn merge(&mut self, other: &Self) {
        self.x = other.x.or(self.x);
        self.y = other.y.or(self.y);
        self.width = other.width.or(self.width);
        self.height = other.height.or(self.height);
        if other.background_color.is_some() {
            self.background_color.clone_from(&other.background_color);
        }
        if other.color.is_some() {
            self.color.clone_from(&other.color);
        }
        if other.border_color.is_some() {
            self.border_color.clone_from(&other.border_color);
        }
        self.border_width = other.border_width.or(self.border_width);
        self.border_radius = other.border_radius.or(self.border_radius);
        self.font_size = other.font_size.or(self.font_size);
        self.rotation = other.rotation.or(self.rotation);
    }

    /// Write the set fields onto a full style.
    pub fn apply_to(&self, style: &mut Style) {
        if let Some(x) = self.x {
            style.x = x;
        }
        if let Some(y) = self.y {
            style.y = y;
        }
        if let Some(width) = self.width {
            style.width = width;
        }
        if let Some(height) = self.height {
            style.height = height;
        }
        if let Some(color) = &self.background_color {
            style.background_color.clone_from(color);
        }
        if let Some(color) = &self.color {
            style.color.clone_from(color);
        }
        if let Some(color) = &self.border_color {
            style.border_color.clone_from(color);
        }
        if let Some(width) = self.border_width {
            style.border_width = width;
        }
        if let Some(radius) = self.border_radius {
            style.border_radius = radius;
        }
        if let Some(size) = self.font_size {
            style.font_size = size;
        }
        if let Some(rotation) = self.rotation {
            style.rotation = normalize_rotation(rotation);
        }
    }
}

/// Per-breakpoint override patches, keyed by breakpoint then element id.
///
/// Ordered maps keep iteration (and therefore generated code) deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Overrides(BTreeMap<Breakpoint, BTreeMap<ElementId, StylePatch>>);

impl Overrides {
    /// Create an empty override store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The patch for an element under a breakpoint, if any.
    #[must_use]
    pub fn get(&self, breakpoint: Breakpoint, id: ElementId) -> Option<&StylePatch> {
        self.0.get(&breakpoint).and_then(|entries| entries.get(&id))
    }

    /// Shallow-merge `patch` into the element's entry under `breakpoint`.
    ///
    /// Upserts on the base breakpoint are ignored: the base record is the
    /// desktop style.
    pub fn upsert(&mut self, breakpoint: Breakpoint, id: ElementId, patch: &StylePatch) {
        if breakpoint.is_base() || patch.is_empty() {
            return;
        }
        self.0
            .entry(breakpoint)
            .or_default()
            .entry(id)
            .or_default()
            .merge(&patch.clone().normalized());
    }

    /// Remove the element's entries from every breakpoint.
    pub fn purge(&mut self, id: ElementId) {
        for entries in self.0.values_mut() {
            entries.remove(&id);
        }
        self.0.retain(|_, entries| !entries.is_empty());
    }

    /// Drop entries whose element no longer exists.
    pub fn retain_elements(&mut self, mut exists: impl FnMut(ElementId) -> bool) {
        for entries in self.0.values_mut() {
            entries.retain(|id, _| exists(*id));
        }
        self.0.retain(|bp, entries| !bp.is_base() && !entries.is_empty());
    }

    /// Entries under one breakpoint, ordered by element id.
    pub fn entries(&self, breakpoint: Breakpoint) -> impl Iterator<Item = (ElementId, &StylePatch)> {
        self.0
            .get(&breakpoint)
            .into_iter()
            .flat_map(|entries| entries.iter().map(|(id, patch)| (*id, patch)))
    }

    /// Whether the breakpoint has at least one entry.
    #[must_use]
    pub fn has_entries(&self, breakpoint: Breakpoint) -> bool {
        self.0.get(&breakpoint).is_some_and(|entries| !entries.is_empty())
    }

    /// Whether any element references this id.
    #[must_use]
    pub fn references(&self, id: ElementId) -> bool {
        self.0.values().any(|entries| entries.contains_key(&id))
    }

    /// Whether there are no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeMap::is_empty)
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Compute an element's effective style under a breakpoint.
///
/// Under the base breakpoint this is the element's own style; otherwise the
/// breakpoint's patch (if any) is shallow-merged over it.
#[must_use]
pub fn effective_style(element: &Element, overrides: &Overrides, breakpoint: Breakpoint) -> Style {
    let mut style = element.style.clone();
    if !breakpoint.is_base() {
        if let Some(patch) = overrides.get(breakpoint, element.id) {
            patch.apply_to(&mut style);
        }
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ElementKind;

    fn rect_element(id: u64) -> Element {
        Element::new(ElementId::new(id), ElementKind::Rectangle).with_rect(10.0, 20.0, 100.0, 50.0)
    }

    #[test]
    fn test_base_breakpoint_ignores_overrides() {
        let element = rect_element(1);
        let mut overrides = Overrides::new();
        overrides.upsert(Breakpoint::Tablet, element.id, &StylePatch::position(0.0, 0.0));

        let style = effective_style(&element, &overrides, Breakpoint::Desktop);
        assert_eq!(style, element.style);
    }

    #[test]
    fn test_upsert_accumulates_fields() {
        let element = rect_element(1);
        let mut overrides = Overrides::new();
        overrides.upsert(Breakpoint::Mobile, element.id, &StylePatch::position(5.0, 6.0));
        overrides.upsert(
            Breakpoint::Mobile,
            element.id,
            &StylePatch {
                background_color: Some("#ff0000".to_string()),
                ..StylePatch::default()
            },
        );

        let style = effective_style(&element, &overrides, Breakpoint::Mobile);
        assert!((style.x - 5.0).abs() < f32::EPSILON);
        assert!((style.y - 6.0).abs() < f32::EPSILON);
        assert_eq!(style.background_color, "#ff0000");
        assert!((style.width - 100.0).abs() < f32::EPSILON);

        // Tablet inherits base untouched
        let tablet = effective_style(&element, &overrides, Breakpoint::Tablet);
        assert_eq!(tablet, element.style);
    }

    #[test]
    fn test_upsert_on_base_is_ignored() {
        let mut overrides = Overrides::new();
        overrides.upsert(Breakpoint::Desktop, ElementId::new(1), &StylePatch::position(1.0, 1.0));
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_purge_removes_every_breakpoint() {
        let id = ElementId::new(4);
        let mut overrides = Overrides::new();
        overrides.upsert(Breakpoint::Tablet, id, &StylePatch::rotation(10.0));
        overrides.upsert(Breakpoint::Mobile, id, &StylePatch::rotation(20.0));
        overrides.upsert(Breakpoint::Mobile, ElementId::new(5), &StylePatch::rotation(30.0));

        overrides.purge(id);
        assert!(!overrides.references(id));
        assert!(!overrides.has_entries(Breakpoint::Tablet));
        assert!(overrides.has_entries(Breakpoint::Mobile));
    }

    #[test]
    fn test_override_rotation_is_normalized() {
        let id = ElementId::new(1);
        let mut overrides = Overrides::new();
        overrides.upsert(Breakpoint::Tablet, id, &StylePatch::rotation(-45.0));
        let rotation = overrides
            .get(Breakpoint::Tablet, id)
            .and_then(|p| p.rotation)
            .expect("rotation set");
        assert!((rotation - 315.0).abs() < 1e-4);
    }

    #[test]
    fn test_overrides_json_shape() {
        let mut overrides = Overrides::new();
        overrides.upsert(Breakpoint::Tablet, ElementId::new(2), &StylePatch::position(1.0, 2.0));
        let json = serde_json::to_value(&overrides).expect("serialize");
        assert_eq!(json["tablet"]["2"]["x"], 1.0);
        assert!(json["tablet"]["2"].get("width").is_none());

        let back: Overrides = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, overrides);
    }

    #[test]
    fn test_breakpoint_parse() {
        assert_eq!("Tablet".parse::<Breakpoint>().ok(), Some(Breakpoint::Tablet));
        assert!("watch".parse::<Breakpoint>().is_err());
    }
}
