//! WebAssembly bindings for canvas-core.
//!
//! [`WasmEditor`] wraps a [`Workspace`] behind JavaScript-callable methods.
//! Structured values cross the boundary as JSON strings; failures come back
//! as error strings.

use wasm_bindgen::prelude::*;

use crate::{
    Breakpoint, ElementId, ElementKind, InputEvent, Point, PropertyEdit, ResizeHandle, Workspace,
    WorkspaceSnapshot,
};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Editor instance for WASM hosts.
#[wasm_bindgen]
pub struct WasmEditor {
    workspace: Workspace,
}

#[wasm_bindgen]
impl WasmEditor {
    /// Create an empty editor.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            workspace: Workspace::new(),
        }
    }

    /// Restore an editor from snapshot JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if the JSON is not a valid snapshot.
    #[wasm_bindgen(js_name = fromSnapshot)]
    pub fn from_snapshot(json: &str) -> Result<WasmEditor, String> {
        let snapshot = WorkspaceSnapshot::from_json(json).map_err(|e| e.to_string())?;
        Ok(Self {
            workspace: Workspace::from_snapshot(snapshot),
        })
    }

    /// Drop a palette shape at a viewport position. Returns the new id.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown shape name.
    #[wasm_bindgen(js_name = dropShape)]
    pub fn drop_shape(&mut self, kind: &str, x: f32, y: f32) -> Result<u64, String> {
        let kind: ElementKind = kind.parse().map_err(|e: crate::CanvasError| e.to_string())?;
        let at = self.workspace.canvas().screen_to_canvas(Point::new(x, y));
        Ok(self.workspace.drop_shape(kind, at).get())
    }

    /// Start moving an element. Returns `false` if the press was ignored.
    #[wasm_bindgen(js_name = beginDrag)]
    pub fn begin_drag(&mut self, id: u64, x: f32, y: f32) -> bool {
        self.workspace.begin_drag(ElementId::new(id), Point::new(x, y))
    }

    /// Start resizing from a handle (`n`, `ne`, ... `nw`).
    #[wasm_bindgen(js_name = beginResize)]
    pub fn begin_resize(&mut self, id: u64, handle: &str, x: f32, y: f32) -> bool {
        handle.parse::<ResizeHandle>().is_ok_and(|handle| {
            self.workspace
                .begin_resize(ElementId::new(id), handle, Point::new(x, y))
        })
    }

    /// Feed a pointer move to the open session.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.workspace.pointer_move(Point::new(x, y));
    }

    /// Release the pointer, closing the session.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) {
        self.workspace.pointer_release();
    }

    /// Process an [`InputEvent`] given as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if the event JSON is malformed.
    #[wasm_bindgen(js_name = processEvent)]
    pub fn process_event(&mut self, json: &str) -> Result<(), String> {
        let event: InputEvent = serde_json::from_str(json).map_err(|e| e.to_string())?;
        self.workspace.process_event(&event);
        Ok(())
    }

    /// Current guide lines as an array of `{orientation, position, start, end}`.
    #[wasm_bindgen(js_name = getGuides)]
    #[must_use]
    pub fn get_guides(&self) -> js_sys::Array {
        self.workspace
            .guides()
            .iter()
            .map(|guide| {
                let obj = js_sys::Object::new();
                let orientation = match guide.orientation {
                    crate::GuideOrientation::Vertical => "vertical",
                    crate::GuideOrientation::Horizontal => "horizontal",
                };
                let _ = js_sys::Reflect::set(&obj, &"orientation".into(), &orientation.into());
                let _ = js_sys::Reflect::set(&obj, &"position".into(), &guide.position.into());
                let _ = js_sys::Reflect::set(&obj, &"start".into(), &guide.start.into());
                let _ = js_sys::Reflect::set(&obj, &"end".into(), &guide.end.into());
                JsValue::from(obj)
            })
            .collect()
    }

    /// Select an element. Returns `false` if it does not exist.
    pub fn select(&mut self, id: u64) -> bool {
        self.workspace.select(ElementId::new(id))
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.workspace.deselect();
    }

    /// The selected element id, if any.
    #[must_use]
    pub fn selected(&self) -> Option<u64> {
        self.workspace.selected().map(ElementId::get)
    }

    /// Topmost element at a viewport position.
    #[wasm_bindgen(js_name = elementAt)]
    #[must_use]
    pub fn element_at(&self, x: f32, y: f32) -> Option<u64> {
        let at = self.workspace.canvas().screen_to_canvas(Point::new(x, y));
        self.workspace
            .store()
            .element_at(at, self.workspace.breakpoint())
            .map(ElementId::get)
    }

    /// Apply a [`PropertyEdit`] given as JSON. Returns `false` for locked
    /// elements.
    ///
    /// # Errors
    ///
    /// Returns an error string for malformed JSON or an unknown element.
    #[wasm_bindgen(js_name = applyEdit)]
    pub fn apply_edit(&mut self, id: u64, json: &str) -> Result<bool, String> {
        let edit: PropertyEdit = serde_json::from_str(json).map_err(|e| e.to_string())?;
        self.workspace
            .apply_edit(ElementId::new(id), edit)
            .map_err(|e| e.to_string())
    }

    /// Delete the selected element. Returns whether one was deleted.
    #[wasm_bindgen(js_name = deleteSelected)]
    pub fn delete_selected(&mut self) -> bool {
        self.workspace.delete_selected().is_some()
    }

    /// Remove everything and reset ids.
    pub fn clear(&mut self) {
        self.workspace.clear();
    }

    /// Switch the active breakpoint (`desktop`, `tablet`, `mobile`).
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown breakpoint.
    #[wasm_bindgen(js_name = setBreakpoint)]
    pub fn set_breakpoint(&mut self, name: &str) -> Result<(), String> {
        let breakpoint: Breakpoint = name.parse().map_err(|e: crate::CanvasError| e.to_string())?;
        self.workspace.set_breakpoint(breakpoint);
        Ok(())
    }

    /// Set the zoom factor (clamped).
    #[wasm_bindgen(js_name = setZoom)]
    pub fn set_zoom(&mut self, zoom: f32) {
        self.workspace.canvas_mut().set_zoom(zoom);
    }

    /// Set the canvas background color.
    #[wasm_bindgen(js_name = setBackground)]
    pub fn set_background(&mut self, color: &str) {
        self.workspace.canvas_mut().background = color.to_string();
    }

    /// Set a custom canvas size from text inputs.
    #[wasm_bindgen(js_name = setCustomSize)]
    pub fn set_custom_size(&mut self, width: &str, height: &str) {
        self.workspace
            .canvas_mut()
            .set_custom_size_input(width, height);
    }

    /// Toggle alignment assist.
    #[wasm_bindgen(js_name = setAlignmentAssist)]
    pub fn set_alignment_assist(&mut self, on: bool) {
        self.workspace.canvas_mut().alignment_assist = on;
    }

    /// An element with its effective style under the active breakpoint, as
    /// JSON. Empty string if it does not exist.
    #[wasm_bindgen(js_name = getElementJson)]
    #[must_use]
    pub fn get_element_json(&self, id: u64) -> String {
        self.workspace
            .effective_element(ElementId::new(id))
            .and_then(|e| serde_json::to_string(&e).ok())
            .unwrap_or_default()
    }

    /// The whole workspace snapshot as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if serialization fails.
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, String> {
        self.workspace.snapshot().to_json().map_err(|e| e.to_string())
    }

    /// Replace the workspace with snapshot JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if the JSON is not a valid snapshot; the
    /// workspace is unchanged in that case.
    #[wasm_bindgen(js_name = restoreSnapshot)]
    pub fn restore_snapshot(&mut self, json: &str) -> Result<(), String> {
        let snapshot = WorkspaceSnapshot::from_json(json).map_err(|e| e.to_string())?;
        self.workspace.restore(snapshot);
        Ok(())
    }

    /// Whether there are changes not yet persisted by the host.
    #[wasm_bindgen(js_name = hasLocalChanges)]
    #[must_use]
    pub fn has_local_changes(&self) -> bool {
        self.workspace.has_local_changes
    }

    /// Mark the current state as persisted.
    #[wasm_bindgen(js_name = markSaved)]
    pub fn mark_saved(&mut self) {
        self.workspace.mark_saved();
    }
}

impl Default for WasmEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_and_drag() {
        let mut editor = WasmEditor::new();
        let id = editor.drop_shape("circle", 100.0, 100.0).expect("drop");
        assert_eq!(editor.selected(), Some(id));
        assert!(editor.begin_drag(id, 100.0, 100.0));
        editor.pointer_move(150.0, 100.0);
        editor.pointer_up();

        let json = editor.get_element_json(id);
        let value: serde_json::Value = serde_json::from_str(&json).expect("json");
        assert_eq!(value["x"], 110.0);
    }

    #[test]
    fn test_unknown_shape_rejected() {
        let mut editor = WasmEditor::new();
        assert!(editor.drop_shape("hexagon", 0.0, 0.0).is_err());
    }

    #[test]
    fn test_edge_handle_needs_eight_joints() {
        let mut editor = WasmEditor::new();
        let id = editor.drop_shape("square", 100.0, 100.0).expect("drop");
        assert!(!editor.begin_resize(id, "e", 140.0, 100.0));
        editor
            .apply_edit(id, r#"{"edit":"eightJoints","value":true}"#)
            .expect("edit");
        assert!(editor.begin_resize(id, "e", 140.0, 100.0));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut editor = WasmEditor::new();
        editor.drop_shape("button", 200.0, 200.0).expect("drop");
        editor.set_breakpoint("tablet").expect("breakpoint");
        let json = editor.snapshot_json().expect("snapshot");

        let restored = WasmEditor::from_snapshot(&json).expect("restore");
        assert_eq!(restored.snapshot_json().expect("snapshot"), json);
    }

    #[test]
    fn test_restore_rejects_garbage() {
        let mut editor = WasmEditor::new();
        editor.drop_shape("input", 10.0, 10.0).expect("drop");
        assert!(editor.restore_snapshot("{ not json").is_err());
        assert_eq!(editor.element_at(10.0, 10.0), Some(1));
    }
}
