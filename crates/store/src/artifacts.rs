//! On-disk storage for uploaded originals.
//!
//! Layout: `<projects_dir>/<project_id>/files/<file_id><.ext>`. Removal is
//! best-effort: failures are logged and never block removal of the record
//! from the document.

use std::path::{Path, PathBuf};

use tokio::fs;
use verso_core::naming::artifact_file_name;
use verso_core::types::EntityId;

use crate::error::StoreError;

/// Sub-directory of a project directory holding the uploaded originals.
const FILES_DIR: &str = "files";

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    projects_dir: PathBuf,
}

impl ArtifactStore {
    /// Open the store rooted at `projects_dir`, creating it if necessary.
    pub async fn open(projects_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let projects_dir = projects_dir.into();
        fs::create_dir_all(&projects_dir)
            .await
            .map_err(|e| StoreError::io(&projects_dir, e))?;

        tracing::info!(path = %projects_dir.display(), "Artifact store initialized");
        Ok(Self { projects_dir })
    }

    pub fn projects_dir(&self) -> &Path {
        &self.projects_dir
    }

    pub fn project_dir(&self, project_id: EntityId) -> PathBuf {
        self.projects_dir.join(project_id.to_string())
    }

    pub fn files_dir(&self, project_id: EntityId) -> PathBuf {
        self.project_dir(project_id).join(FILES_DIR)
    }

    /// Create the (empty) directory that will hold a project's uploads.
    pub async fn provision_project(&self, project_id: EntityId) -> Result<PathBuf, StoreError> {
        let dir = self.files_dir(project_id);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| StoreError::io(&dir, e))?;
        tracing::debug!(%project_id, path = %dir.display(), "Provisioned project directory");
        Ok(dir)
    }

    /// Persist an uploaded original and return where it was written.
    pub async fn write_file(
        &self,
        project_id: EntityId,
        file_id: EntityId,
        original_name: &str,
        content: &[u8],
    ) -> Result<PathBuf, StoreError> {
        let dir = self.provision_project(project_id).await?;
        let path = dir.join(artifact_file_name(file_id, original_name));
        fs::write(&path, content)
            .await
            .map_err(|e| StoreError::io(&path, e))?;
        tracing::debug!(%project_id, %file_id, size = content.len(), "Stored uploaded original");
        Ok(path)
    }

    /// Recursively delete a project directory. Best-effort.
    pub async fn remove_project(&self, project_id: EntityId) {
        let dir = self.project_dir(project_id);
        match fs::remove_dir_all(&dir).await {
            Ok(()) => tracing::debug!(%project_id, "Removed project directory"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                %project_id,
                path = %dir.display(),
                error = %e,
                "Failed to remove project directory"
            ),
        }
    }

    /// Delete a stored original. Best-effort.
    ///
    /// Paths outside `projects_dir` are left alone: they can only come from a
    /// hand-edited document.
    pub async fn remove_file(&self, path: &Path) {
        if !self.contains(path) {
            tracing::warn!(
                path = %path.display(),
                "Refusing to remove file outside the projects directory"
            );
            return;
        }
        match fs::remove_file(path).await {
            Ok(()) => tracing::debug!(path = %path.display(), "Removed stored original"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to remove stored original"
            ),
        }
    }

    fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.projects_dir)
            && !path
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
    }
}
