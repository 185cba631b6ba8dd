//! Workspace state: the element store, canvas configuration and the
//! ephemeral interaction state that drives them.

use crate::canvas::CanvasConfig;
use crate::element::{Element, ElementId};
use crate::interaction::Session;
use crate::snap::Guide;
use crate::snapshot::WorkspaceSnapshot;
use crate::store::ElementStore;
use crate::style::Breakpoint;

/// The complete editor state.
///
/// The workspace is the only writer to its [`ElementStore`]; views read
/// effective styles through [`Workspace::store`].
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    pub(crate) store: ElementStore,
    pub(crate) canvas: CanvasConfig,
    pub(crate) selection: Option<ElementId>,
    pub(crate) session: Option<Session>,
    pub(crate) guides: Vec<Guide>,
    /// Whether there are changes not yet written to the local snapshot.
    pub has_local_changes: bool,
}

impl Workspace {
    /// Create an empty workspace with default canvas settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a workspace from a snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: WorkspaceSnapshot) -> Self {
        let mut workspace = Self::new();
        workspace.restore(snapshot);
        workspace.has_local_changes = false;
        workspace
    }

    /// Capture the persistent part of the workspace.
    ///
    /// Selection, sessions and guides are ephemeral and left out.
    #[must_use]
    pub fn snapshot(&self) -> WorkspaceSnapshot {
        WorkspaceSnapshot {
            elements: self.store.as_slice().to_vec(),
            overrides: self.store.overrides().clone(),
            canvas_config: self.canvas.clone(),
            next_id: self.store.next_id(),
        }
    }

    /// Replace all state with the snapshot's contents (no merge).
    pub fn restore(&mut self, snapshot: WorkspaceSnapshot) {
        self.store =
            ElementStore::from_parts(snapshot.elements, snapshot.overrides, snapshot.next_id);
        self.canvas = snapshot.canvas_config;
        self.selection = None;
        self.session = None;
        self.guides.clear();
        self.has_local_changes = true;
        tracing::debug!(elements = self.store.len(), "workspace restored");
    }

    /// The element store.
    #[must_use]
    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    /// The canvas configuration.
    #[must_use]
    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Mutable canvas configuration.
    pub fn canvas_mut(&mut self) -> &mut CanvasConfig {
        self.has_local_changes = true;
        &mut self.canvas
    }

    /// The active breakpoint.
    #[must_use]
    pub fn breakpoint(&self) -> Breakpoint {
        self.canvas.breakpoint
    }

    /// Switch the active breakpoint.
    ///
    /// The breakpoint is not part of the snapshot, so switching alone leaves
    /// nothing to save.
    pub fn set_breakpoint(&mut self, breakpoint: Breakpoint) {
        self.canvas.breakpoint = breakpoint;
    }

    /// The element with its effective style under the active breakpoint.
    #[must_use]
    pub fn effective_element(&self, id: ElementId) -> Option<Element> {
        self.store.effective_element(id, self.canvas.breakpoint)
    }

    /// The currently selected element.
    #[must_use]
    pub fn selected(&self) -> Option<ElementId> {
        self.selection
    }

    /// The open pointer session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Guide lines for the current drag.
    #[must_use]
    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    /// Mark the workspace as written to durable storage.
    pub fn mark_saved(&mut self) {
        self.has_local_changes = false;
    }
}
