//! Pointer-driven interaction: placement, selection, drag, resize and
//! property edits.
//!
//! ## Session lifecycle
//!
//! ```text
//!            begin_drag              pointer_move*        pointer_release
//!   Idle ───────────────▶ Dragging ───────────────▶ ... ───────────────▶ Idle
//!     │      begin_resize             pointer_move*        pointer_release
//!     └─────────────────▶ Resizing ───────────────▶ ... ───────────────▶ Idle
//! ```
//!
//! A session carries the anchor values captured at its start. Only one may
//! be open at a time, and release always closes it, committing whatever
//! geometry was last written. There is no cancel path.

use serde::{Deserialize, Serialize};

use crate::element::{ButtonVariant, Element, ElementId, ElementKind, Point, Rect, MIN_ELEMENT_SIZE};
use crate::event::{InputEvent, PointerTarget, ResizeHandle};
use crate::snap::snap;
use crate::style::{effective_style, StylePatch};
use crate::workspace::Workspace;
use crate::{CanvasError, CanvasResult};

/// Anchor data for an open move session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    /// Element being moved.
    pub element: ElementId,
    /// Pointer position at press, in viewport pixels.
    pub pointer_origin: Point,
    /// Element position at press, in canvas pixels.
    pub element_origin: Point,
}

/// Anchor data for an open resize session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeSession {
    /// Element being resized.
    pub element: ElementId,
    /// Handle being dragged.
    pub handle: ResizeHandle,
    /// Pointer position at press, in viewport pixels.
    pub pointer_origin: Point,
    /// Element box at press, in canvas pixels.
    pub element_origin: Rect,
}

/// An open pointer session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Session {
    /// Moving an element.
    Dragging(DragSession),
    /// Resizing an element.
    Resizing(ResizeSession),
}

impl Session {
    /// The element this session manipulates.
    #[must_use]
    pub const fn element(&self) -> ElementId {
        match self {
            Self::Dragging(drag) => drag.element,
            Self::Resizing(resize) => resize.element,
        }
    }
}

/// A single property edit on an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "edit", content = "value", rename_all = "camelCase")]
pub enum PropertyEdit {
    /// Style fields, written through the active breakpoint.
    Style(StylePatch),
    /// Text content, placeholder or label.
    Content(String),
    /// Button variant.
    Variant(ButtonVariant),
    /// Lock toggle; the only edit allowed on a locked element.
    Locked(bool),
    /// Eight-joint resize handle mode.
    EightJoints(bool),
}

/// Resize `origin` by dragging `handle` by `(dx, dy)` canvas pixels.
///
/// The edge or corner opposite the handle stays fixed, and neither dimension
/// drops below [`MIN_ELEMENT_SIZE`].
#[must_use]
pub fn resize_rect(origin: Rect, handle: ResizeHandle, dx: f32, dy: f32) -> Rect {
    let mut rect = origin;
    if handle.moves_right() {
        rect.width = (origin.width + dx).max(MIN_ELEMENT_SIZE);
    }
    if handle.moves_left() {
        rect.width = (origin.width - dx).max(MIN_ELEMENT_SIZE);
        rect.x = origin.right() - rect.width;
    }
    if handle.moves_bottom() {
        rect.height = (origin.height + dy).max(MIN_ELEMENT_SIZE);
    }
    if handle.moves_top() {
        rect.height = (origin.height - dy).max(MIN_ELEMENT_SIZE);
        rect.y = origin.bottom() - rect.height;
    }
    rect
}

impl Workspace {
    /// Create an element of `kind` centered on `at` (canvas pixels) and
    /// select it.
    pub fn drop_shape(&mut self, kind: ElementKind, at: Point) -> ElementId {
        let (width, height) = kind.default_size();
        let id = self.store.create(kind);
        if let Some(element) = self.store.get_mut(id) {
            element.style.x = at.x - width / 2.0;
            element.style.y = at.y - height / 2.0;
        }
        self.selection = Some(id);
        self.has_local_changes = true;
        tracing::debug!(%id, %kind, x = at.x, y = at.y, "element placed");
        id
    }

    /// Select an element. Returns `false` if it does not exist.
    pub fn select(&mut self, id: ElementId) -> bool {
        if self.store.contains(id) {
            self.selection = Some(id);
            true
        } else {
            false
        }
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.selection = None;
    }

    fn is_locked(&self, id: ElementId) -> bool {
        self.store.get(id).is_some_and(|e| e.locked)
    }

    /// Open a move session on an element.
    ///
    /// Returns `false` without side effects if a session is already open or
    /// the element is missing or locked.
    pub fn begin_drag(&mut self, id: ElementId, pointer: Point) -> bool {
        if self.session.is_some() || self.is_locked(id) {
            return false;
        }
        let Some(style) = self.store.effective_style(id, self.canvas.breakpoint) else {
            return false;
        };
        self.session = Some(Session::Dragging(DragSession {
            element: id,
            pointer_origin: pointer,
            element_origin: Point::new(style.x, style.y),
        }));
        self.selection = Some(id);
        tracing::debug!(%id, "drag session started");
        true
    }

    /// Open a resize session on one of an element's handles.
    ///
    /// Returns `false` without side effects if a session is already open, the
    /// element is missing or locked, or an edge handle is used without
    /// eight-joint mode.
    pub fn begin_resize(&mut self, id: ElementId, handle: ResizeHandle, pointer: Point) -> bool {
        if self.session.is_some() {
            return false;
        }
        let Some(element) = self.store.effective_element(id, self.canvas.breakpoint) else {
            return false;
        };
        if element.locked || (!handle.is_corner() && !element.use_eight_joints) {
            return false;
        }
        self.session = Some(Session::Resizing(ResizeSession {
            element: id,
            handle,
            pointer_origin: pointer,
            element_origin: element.rect(),
        }));
        self.selection = Some(id);
        tracing::debug!(%id, %handle, "resize session started");
        true
    }

    /// Feed a pointer move to the open session. No-op when idle.
    pub fn pointer_move(&mut self, pointer: Point) {
        let Some(session) = self.session else {
            return;
        };
        if self.is_locked(session.element()) {
            return;
        }
        let zoom = self.canvas.zoom();
        let result = match session {
            Session::Dragging(drag) => {
                let dx = (pointer.x - drag.pointer_origin.x) / zoom;
                let dy = (pointer.y - drag.pointer_origin.y) / zoom;
                self.drag_to(drag, dx, dy)
            }
            Session::Resizing(resize) => {
                let dx = (pointer.x - resize.pointer_origin.x) / zoom;
                let dy = (pointer.y - resize.pointer_origin.y) / zoom;
                let rect = resize_rect(resize.element_origin, resize.handle, dx, dy);
                self.store
                    .write(resize.element, &StylePatch::geometry(rect), self.canvas.breakpoint)
            }
        };
        match result {
            Ok(()) => self.has_local_changes = true,
            Err(e) => tracing::warn!("pointer move dropped: {e}"),
        }
    }

    fn drag_to(&mut self, drag: DragSession, dx: f32, dy: f32) -> CanvasResult<()> {
        let breakpoint = self.canvas.breakpoint;
        let Some(style) = self.store.effective_style(drag.element, breakpoint) else {
            return Err(CanvasError::ElementNotFound(drag.element));
        };
        let candidate = Rect::new(
            drag.element_origin.x + dx,
            drag.element_origin.y + dy,
            style.width,
            style.height,
        );

        let (x, y) = if self.canvas.alignment_assist {
            let overrides = self.store.overrides();
            let others: Vec<Rect> = self
                .store
                .elements()
                .filter(|e| e.id != drag.element)
                .map(|e| effective_style(e, overrides, breakpoint).rect())
                .collect();
            let result = snap(candidate, &others);
            if !result.guides.is_empty() {
                tracing::trace!(id = %drag.element, guides = result.guides.len(), "snapped");
            }
            self.guides = result.guides;
            (result.x, result.y)
        } else {
            self.guides.clear();
            (candidate.x, candidate.y)
        };

        self.store
            .write(drag.element, &StylePatch::position(x, y), breakpoint)
    }

    /// Close the open session, clearing guides. Returns the closed session.
    pub fn pointer_release(&mut self) -> Option<Session> {
        self.guides.clear();
        let session = self.session.take();
        if let Some(session) = &session {
            tracing::debug!(id = %session.element(), "session released");
        }
        session
    }

    /// Write style fields through the active breakpoint.
    ///
    /// Returns `Ok(false)` (a silent no-op) when the element is locked.
    ///
    /// # Errors
    ///
    /// Returns an error if the element does not exist.
    pub fn write_style(&mut self, id: ElementId, patch: &StylePatch) -> CanvasResult<bool> {
        self.apply_edit(id, PropertyEdit::Style(patch.clone()))
    }

    /// Apply a property edit.
    ///
    /// Returns `Ok(false)` when the edit was ignored because the element is
    /// locked; lock toggles are always applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the element does not exist.
    pub fn apply_edit(&mut self, id: ElementId, edit: PropertyEdit) -> CanvasResult<bool> {
        let element = self
            .store
            .get(id)
            .ok_or(CanvasError::ElementNotFound(id))?;
        if element.locked && !matches!(edit, PropertyEdit::Locked(_)) {
            tracing::debug!(%id, "edit ignored on locked element");
            return Ok(false);
        }
        match edit {
            PropertyEdit::Style(patch) => self.store.write(id, &patch, self.canvas.breakpoint)?,
            PropertyEdit::Content(content) => self.store.update_element(id, |e| e.content = content)?,
            PropertyEdit::Variant(variant) => self.store.update_element(id, |e| e.variant = variant)?,
            PropertyEdit::Locked(locked) => self.store.update_element(id, |e| e.locked = locked)?,
            PropertyEdit::EightJoints(on) => {
                self.store.update_element(id, |e| e.use_eight_joints = on)?;
            }
        }
        self.has_local_changes = true;
        Ok(true)
    }

    /// Delete an element, purging its overrides. Any session or selection
    /// on it is dropped.
    ///
    /// Returns `Ok(None)` without side effects if the element is locked.
    ///
    /// # Errors
    ///
    /// Returns an error if the element does not exist.
    pub fn delete(&mut self, id: ElementId) -> CanvasResult<Option<Element>> {
        if self.is_locked(id) {
            tracing::debug!(%id, "delete ignored on locked element");
            return Ok(None);
        }
        let removed = self.store.remove(id)?;
        if self.selection == Some(id) {
            self.selection = None;
        }
        if self.session.is_some_and(|s| s.element() == id) {
            self.pointer_release();
        }
        self.has_local_changes = true;
        tracing::debug!(%id, "element deleted");
        Ok(Some(removed))
    }

    /// Delete the selected element, if any and unlocked.
    pub fn delete_selected(&mut self) -> Option<Element> {
        let id = self.selection?;
        self.delete(id).ok().flatten()
    }

    /// Remove every element and override and reset the id counter.
    pub fn clear(&mut self) {
        self.store.clear();
        self.selection = None;
        self.session = None;
        self.guides.clear();
        self.has_local_changes = true;
        tracing::info!("workspace cleared");
    }

    /// Process an input event.
    pub fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PaletteDrop { kind, at } => {
                let at = self.canvas.screen_to_canvas(*at);
                self.drop_shape(*kind, at);
            }
            InputEvent::PointerDown { target, at } => {
                if self.session.is_some() {
                    return;
                }
                match *target {
                    PointerTarget::Body { element } => {
                        self.select(element);
                        self.begin_drag(element, *at);
                    }
                    PointerTarget::Handle { element, handle } => {
                        self.select(element);
                        self.begin_resize(element, handle, *at);
                    }
                    PointerTarget::Canvas => self.deselect(),
                }
            }
            InputEvent::PointerMove { at } => self.pointer_move(*at),
            InputEvent::PointerUp => {
                self.pointer_release();
            }
            InputEvent::Key { key } => {
                if self.session.is_none() && matches!(key.as_str(), "Delete" | "Backspace") {
                    self.delete_selected();
                }
            }
        }
    }
}
