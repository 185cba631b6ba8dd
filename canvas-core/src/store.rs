//! The element store: base records in creation order, breakpoint overrides,
//! and the id counter.
//!
//! All writes go through [`ElementStore::write`], which decides between
//! mutating the base record and upserting an override patch.

use crate::element::{Element, ElementId, ElementKind, Point, Style};
use crate::style::{effective_style, Breakpoint, Overrides, StylePatch};
use crate::{CanvasError, CanvasResult};

/// First id handed out by a fresh store.
const FIRST_ID: u64 = 1;

/// Canonical collection of elements and their overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementStore {
    /// Elements in creation order.
    elements: Vec<Element>,
    /// Sparse per-breakpoint patches.
    overrides: Overrides,
    /// Next id to allocate. Never decreases except on [`ElementStore::clear`].
    next_id: u64,
}

impl Default for ElementStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            overrides: Overrides::new(),
            next_id: FIRST_ID,
        }
    }

    /// Rebuild a store from persisted parts.
    ///
    /// Override entries for missing elements are dropped, and the counter is
    /// raised past the highest existing id so restored ids are never reused.
    #[must_use]
    pub fn from_parts(elements: Vec<Element>, mut overrides: Overrides, next_id: u64) -> Self {
        let highest = elements.iter().map(|e| e.id.get()).max().unwrap_or(0);
        overrides.retain_elements(|id| elements.iter().any(|e| e.id == id));
        Self {
            elements,
            overrides,
            next_id: next_id.max(highest.saturating_add(1)).max(FIRST_ID),
        }
    }

    /// Allocate the next id.
    pub fn allocate_id(&mut self) -> ElementId {
        let id = ElementId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// Create an element of `kind` with a fresh id and its kind defaults.
    pub fn create(&mut self, kind: ElementKind) -> ElementId {
        let id = self.allocate_id();
        self.elements.push(Element::new(id, kind));
        id
    }

    /// Append an element, assigning it a fresh id.
    pub fn insert(&mut self, mut element: Element) -> ElementId {
        element.id = self.allocate_id();
        let id = element.id;
        self.elements.push(element);
        id
    }

    /// Get an element's base record.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an element's base record.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Whether the element exists.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    /// All elements in creation order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// All elements as a slice, in creation order.
    #[must_use]
    pub fn as_slice(&self) -> &[Element] {
        &self.elements
    }

    /// The override store.
    #[must_use]
    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// The next id that will be allocated.
    #[must_use]
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the store has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Effective style of an element under a breakpoint.
    #[must_use]
    pub fn effective_style(&self, id: ElementId, breakpoint: Breakpoint) -> Option<Style> {
        self.get(id)
            .map(|element| effective_style(element, &self.overrides, breakpoint))
    }

    /// The element record with its style replaced by the effective style.
    #[must_use]
    pub fn effective_element(&self, id: ElementId, breakpoint: Breakpoint) -> Option<Element> {
        self.get(id).map(|element| {
            let mut resolved = element.clone();
            resolved.style = effective_style(element, &self.overrides, breakpoint);
            resolved
        })
    }

    /// Write style fields for an element under a breakpoint.
    ///
    /// On the base breakpoint the base record is mutated directly; otherwise
    /// the patch is merged into that breakpoint's override entry.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ElementNotFound`] if the element does not exist.
    pub fn write(
        &mut self,
        id: ElementId,
        patch: &StylePatch,
        breakpoint: Breakpoint,
    ) -> CanvasResult<()> {
        if breakpoint.is_base() {
            let element = self.get_mut(id).ok_or(CanvasError::ElementNotFound(id))?;
            patch.apply_to(&mut element.style);
        } else {
            if !self.contains(id) {
                return Err(CanvasError::ElementNotFound(id));
            }
            self.overrides.upsert(breakpoint, id, patch);
        }
        tracing::trace!(%id, %breakpoint, ?patch, "style write");
        Ok(())
    }

    /// Update an element's base record using a closure.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ElementNotFound`] if the element does not exist.
    pub fn update_element<F>(&mut self, id: ElementId, f: F) -> CanvasResult<()>
    where
        F: FnOnce(&mut Element),
    {
        let element = self.get_mut(id).ok_or(CanvasError::ElementNotFound(id))?;
        f(element);
        Ok(())
    }

    /// Remove an element and purge its overrides from every breakpoint.
    ///
    /// The id counter is not touched.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ElementNotFound`] if the element does not exist.
    pub fn remove(&mut self, id: ElementId) -> CanvasResult<Element> {
        let index = self
            .elements
            .iter()
            .position(|e| e.id == id)
            .ok_or(CanvasError::ElementNotFound(id))?;
        self.overrides.purge(id);
        Ok(self.elements.remove(index))
    }

    /// Remove every element and override, and reset the id counter.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.overrides.clear();
        self.next_id = FIRST_ID;
    }

    /// Topmost element whose effective box contains the point.
    #[must_use]
    pub fn element_at(&self, point: Point, breakpoint: Breakpoint) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|e| effective_style(e, &self.overrides, breakpoint).rect().contains(point))
            .map(|e| e.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_increase_and_are_not_reused() {
        let mut store = ElementStore::new();
        let a = store.create(ElementKind::Rectangle);
        let b = store.create(ElementKind::Circle);
        assert!(b > a);

        store.remove(b).expect("remove");
        let c = store.create(ElementKind::Square);
        assert!(c > b, "deleted ids must not be reused");
    }

    #[test]
    fn test_clear_resets_counter() {
        let mut store = ElementStore::new();
        store.create(ElementKind::Rectangle);
        store.create(ElementKind::Rectangle);
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.create(ElementKind::Button), ElementId::new(1));
    }

    #[test]
    fn test_write_base_mutates_record() {
        let mut store = ElementStore::new();
        let id = store.create(ElementKind::Rectangle);
        store
            .write(id, &StylePatch::position(42.0, 7.0), Breakpoint::Desktop)
            .expect("write");

        let element = store.get(id).expect("exists");
        assert!((element.style.x - 42.0).abs() < f32::EPSILON);
        assert!(store.overrides().is_empty());
    }

    #[test]
    fn test_write_non_base_leaves_record() {
        let mut store = ElementStore::new();
        let id = store.create(ElementKind::Rectangle);
        store
            .write(id, &StylePatch::position(42.0, 7.0), Breakpoint::Tablet)
            .expect("write");

        let element = store.get(id).expect("exists");
        assert!((element.style.x).abs() < f32::EPSILON);
        let tablet = store.effective_style(id, Breakpoint::Tablet).expect("style");
        assert!((tablet.x - 42.0).abs() < f32::EPSILON);
        let desktop = store.effective_style(id, Breakpoint::Desktop).expect("style");
        assert_eq!(&desktop, &element.style);
    }

    #[test]
    fn test_write_missing_element_fails() {
        let mut store = ElementStore::new();
        let result = store.write(ElementId::new(9), &StylePatch::default(), Breakpoint::Mobile);
        assert!(matches!(result, Err(CanvasError::ElementNotFound(_))));
    }

    #[test]
    fn test_remove_purges_overrides() {
        let mut store = ElementStore::new();
        let id = store.create(ElementKind::Circle);
        store
            .write(id, &StylePatch::rotation(15.0), Breakpoint::Tablet)
            .expect("tablet");
        store
            .write(id, &StylePatch::rotation(30.0), Breakpoint::Mobile)
            .expect("mobile");

        store.remove(id).expect("remove");
        assert!(!store.overrides().references(id));
    }

    #[test]
    fn test_from_parts_repairs_counter_and_orphans() {
        let elements = vec![Element::new(ElementId::new(5), ElementKind::Square)];
        let mut overrides = Overrides::new();
        overrides.upsert(Breakpoint::Tablet, ElementId::new(5), &StylePatch::position(1.0, 1.0));
        overrides.upsert(Breakpoint::Tablet, ElementId::new(6), &StylePatch::position(1.0, 1.0));

        let store = ElementStore::from_parts(elements, overrides, 2);
        assert_eq!(store.next_id(), 6);
        assert!(!store.overrides().references(ElementId::new(6)));
        assert!(store.overrides().references(ElementId::new(5)));
    }

    #[test]
    fn test_element_at_prefers_topmost() {
        let mut store = ElementStore::new();
        let below = store.create(ElementKind::Rectangle);
        let above = store.create(ElementKind::Square);
        assert_ne!(below, above);
        assert_eq!(store.element_at(Point::new(10.0, 10.0), Breakpoint::Desktop), Some(above));
        assert_eq!(store.element_at(Point::new(110.0, 70.0), Breakpoint::Desktop), Some(below));
        assert_eq!(store.element_at(Point::new(500.0, 500.0), Breakpoint::Desktop), None);
    }
}
