//! Remote project storage contract.
//!
//! The remote service is an external collaborator: this crate only defines
//! the trait it must satisfy and the workspace helpers that call it. Every
//! call either succeeds with a payload or fails with a message; a failure
//! never touches in-memory state.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::snapshot::WorkspaceSnapshot;
use crate::workspace::Workspace;
use crate::CanvasResult;

/// Opaque identifier assigned to a project by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Wrap a remote-assigned identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Listing entry for a stored project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    /// Project identifier.
    pub id: ProjectId,
    /// Display name.
    pub name: String,
    /// Owning user.
    pub owner_id: String,
    /// Creation time, milliseconds since the Unix epoch.
    pub created_at_ms: u64,
}

/// A failed remote call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("remote storage failed: {message}")]
pub struct RemoteError {
    /// Message reported by the remote service.
    pub message: String,
}

impl RemoteError {
    /// Create an error carrying `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Whole-project storage offered by a remote service.
#[async_trait]
pub trait ProjectRemote: Send + Sync {
    /// Store a new project and return its identifier.
    async fn save(
        &self,
        owner_id: &str,
        name: &str,
        payload: &WorkspaceSnapshot,
    ) -> Result<ProjectId, RemoteError>;

    /// Replace an existing project's name and payload.
    async fn update(
        &self,
        id: &ProjectId,
        name: &str,
        payload: &WorkspaceSnapshot,
    ) -> Result<(), RemoteError>;

    /// Fetch a project's payload.
    async fn load(&self, id: &ProjectId) -> Result<WorkspaceSnapshot, RemoteError>;

    /// List an owner's projects, newest first.
    async fn list(&self, owner_id: &str) -> Result<Vec<ProjectMetadata>, RemoteError>;

    /// Delete a project.
    async fn delete(&self, id: &ProjectId) -> Result<(), RemoteError>;
}

impl Workspace {
    /// Save the current workspace as a new remote project.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CanvasError::Remote`] if the remote call fails.
    pub async fn save_remote(
        &self,
        remote: &dyn ProjectRemote,
        owner_id: &str,
        name: &str,
    ) -> CanvasResult<ProjectId> {
        let snapshot = self.snapshot();
        match remote.save(owner_id, name, &snapshot).await {
            Ok(id) => {
                tracing::info!(project = %id, elements = snapshot.elements.len(), "saved remote project");
                Ok(id)
            }
            Err(e) => {
                tracing::warn!("Remote save failed: {e}");
                Err(e.into())
            }
        }
    }

    /// Overwrite an existing remote project with the current workspace.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CanvasError::Remote`] if the remote call fails.
    pub async fn update_remote(
        &self,
        remote: &dyn ProjectRemote,
        id: &ProjectId,
        name: &str,
    ) -> CanvasResult<()> {
        remote
            .update(id, name, &self.snapshot())
            .await
            .map_err(|e| {
                tracing::warn!(project = %id, "Remote update failed: {e}");
                e.into()
            })
    }

    /// Replace the workspace with a remote project's payload.
    ///
    /// State is only replaced once the payload has arrived; on failure the
    /// workspace is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CanvasError::Remote`] if the remote call fails, or
    /// [`crate::CanvasError::Persistence`] if the payload fails validation.
    pub async fn load_remote(
        &mut self,
        remote: &dyn ProjectRemote,
        id: &ProjectId,
    ) -> CanvasResult<()> {
        let snapshot = remote.load(id).await.map_err(|e| {
            tracing::warn!(project = %id, "Remote load failed: {e}");
            e
        })?;
        snapshot.validate()?;
        self.restore(snapshot);
        tracing::info!(project = %id, elements = self.store.len(), "loaded remote project");
        Ok(())
    }
}
