//! Durable local snapshots of the whole workspace.
//!
//! The snapshot is a single JSON document stored under a fixed key in a data
//! directory. Loading is wholesale: a snapshot replaces in-memory state, it is
//! never merged into it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::canvas::CanvasConfig;
use crate::element::{Element, ElementId};
use crate::style::Overrides;
use crate::workspace::Workspace;

/// Fixed key the workspace is stored under.
pub const WORKSPACE_KEY: &str = "workspace";

/// Errors that can occur while writing or reading the local snapshot.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// An I/O error occurred (including running out of space).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The document parsed but its contents are unusable.
    #[error("Invalid snapshot: {0}")]
    Invalid(String),
}

/// The persisted form of a workspace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSnapshot {
    /// Element base records in creation order.
    pub elements: Vec<Element>,
    /// Per-breakpoint override patches.
    #[serde(default)]
    pub overrides: Overrides,
    /// Canvas settings.
    #[serde(default)]
    pub canvas_config: CanvasConfig,
    /// Next id to allocate.
    pub next_id: u64,
}

impl WorkspaceSnapshot {
    /// Serialize the snapshot to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize and validate a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, has the wrong shape, or
    /// fails [`WorkspaceSnapshot::validate`].
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check that the id counter can keep allocating fresh ids.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Invalid`] if an element id or the counter
    /// is past [`ElementId::MAX`].
    pub fn validate(&self) -> Result<(), PersistenceError> {
        if let Some(element) = self.elements.iter().find(|e| e.id.get() > ElementId::MAX) {
            return Err(PersistenceError::Invalid(format!(
                "element id {} is out of range",
                element.id
            )));
        }
        if self.next_id > ElementId::MAX {
            return Err(PersistenceError::Invalid(format!(
                "id counter {} is out of range",
                self.next_id
            )));
        }
        Ok(())
    }
}

/// Local snapshot storage rooted at a data directory.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    data_dir: PathBuf,
}

impl SnapshotStore {
    /// Create a store writing into `data_dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Io`] if the directory cannot be created.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    /// The data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.data_dir.join(format!("{WORKSPACE_KEY}.json"))
    }

    /// Write a snapshot.
    ///
    /// The document is written to a temporary file and renamed over the old
    /// one, so a failed write never leaves a truncated snapshot behind.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails; the caller may
    /// retry.
    pub fn save(&self, snapshot: &WorkspaceSnapshot) -> Result<(), PersistenceError> {
        let json = snapshot.to_json()?;
        let path = self.path();
        let tmp = self.data_dir.join(format!("{WORKSPACE_KEY}.json.tmp"));
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &path)?;
        tracing::debug!(path = %path.display(), elements = snapshot.elements.len(), "snapshot saved");
        Ok(())
    }

    /// Read the snapshot, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<WorkspaceSnapshot>, PersistenceError> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)?;
        Ok(Some(WorkspaceSnapshot::from_json(&contents)?))
    }

    /// Load the saved workspace, or an empty one if there is none.
    ///
    /// A corrupt or unreadable snapshot is treated as "no saved workspace".
    #[must_use]
    pub fn load_or_default(&self) -> Workspace {
        match self.load() {
            Ok(Some(snapshot)) => {
                tracing::info!(elements = snapshot.elements.len(), "loaded saved workspace");
                Workspace::from_snapshot(snapshot)
            }
            Ok(None) => Workspace::new(),
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable snapshot at {}: {e}",
                    self.path().display()
                );
                Workspace::new()
            }
        }
    }

    /// Save the workspace if it has unsaved changes, then mark it saved.
    ///
    /// Returns whether a write happened. On failure the workspace stays
    /// marked as changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save_if_changed(&self, workspace: &mut Workspace) -> Result<bool, PersistenceError> {
        if !workspace.has_local_changes {
            return Ok(false);
        }
        self.save(&workspace.snapshot())?;
        workspace.mark_saved();
        Ok(true)
    }

    /// Remove the saved snapshot. No-op if there is none.
    pub fn delete(&self) {
        let path = self.path();
        if path.exists() {
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::warn!("Failed to delete snapshot {}: {e}", path.display());
            }
        }
    }
}
