//! The single JSON document holding all persisted state.
//!
//! Every mutation is a whole-document read-modify-write. [`DocumentStore`]
//! serializes those cycles behind one in-process lock so concurrent requests
//! cannot interleave writes. There is no cross-process coordination: two
//! servers pointed at the same file will still lose updates.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use verso_core::error::CoreError;
use verso_core::types::EntityId;

use crate::error::StoreError;
use crate::models::legacy::LegacyFile;
use crate::models::project::Project;

/// Root of the persisted state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Flat file records written by earlier deployments. Uploads no longer
    /// append here; project files are the source of truth.
    #[serde(default)]
    pub files: Vec<LegacyFile>,
}

/// Where a file id resolves to inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileLocation {
    /// Owned by the project with this id.
    Project(EntityId),
    /// Index into [`Document::files`] of a record with no live owner.
    Legacy(usize),
}

impl Document {
    pub fn project(&self, id: EntityId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn project_mut(&mut self, id: EntityId) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == id)
    }

    /// Like [`Document::project_mut`], failing with `NotFound`.
    pub fn require_project_mut(&mut self, id: EntityId) -> Result<&mut Project, CoreError> {
        self.project_mut(id)
            .ok_or_else(|| CoreError::not_found("Project", id))
    }

    pub fn require_project(&self, id: EntityId) -> Result<&Project, CoreError> {
        self.project(id).ok_or_else(|| CoreError::not_found("Project", id))
    }

    /// Resolve a file id across all projects, then the flat legacy records.
    ///
    /// A project copy always wins over a legacy record with the same id.
    pub fn locate_file(&self, file_id: EntityId) -> Option<FileLocation> {
        if let Some(project) = self.projects.iter().find(|p| p.file(file_id).is_some()) {
            return Some(FileLocation::Project(project.id));
        }
        self.files
            .iter()
            .position(|f| f.file.id == file_id)
            .map(FileLocation::Legacy)
    }

    /// The flat view of a file, wherever it lives.
    pub fn legacy_view(&self, file_id: EntityId) -> Option<LegacyFile> {
        match self.locate_file(file_id)? {
            FileLocation::Project(project_id) => {
                let project = self.project(project_id)?;
                project
                    .file(file_id)
                    .map(|file| LegacyFile::owned_by(project, file))
            }
            FileLocation::Legacy(idx) => self.files.get(idx).cloned(),
        }
    }

    /// Legacy records not shadowed by a file that still lives in a project.
    pub fn orphaned_legacy_files(&self) -> impl Iterator<Item = &LegacyFile> {
        self.files.iter().filter(move |legacy| {
            !self
                .projects
                .iter()
                .any(|p| p.file(legacy.file.id).is_some())
        })
    }
}

/// Owns the document file and the lock serializing access to it.
#[derive(Debug)]
pub struct DocumentStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl DocumentStore {
    /// Open the document at `path`, creating an empty one if absent.
    ///
    /// An existing document is parsed once so a corrupt file fails at
    /// startup rather than on the first request.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        let store = Self {
            path,
            lock: Mutex::new(()),
        };

        let exists = tokio::fs::try_exists(&store.path)
            .await
            .map_err(|e| StoreError::io(&store.path, e))?;
        if exists {
            let document = store.load().await?;
            tracing::info!(
                path = %store.path.display(),
                projects = document.projects.len(),
                legacy_files = document.files.len(),
                "Opened document store"
            );
        } else {
            store.write(&Document::default()).await?;
            tracing::info!(path = %store.path.display(), "Created empty document store");
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole document.
    pub async fn read(&self) -> Result<Document, StoreError> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    /// Replace the whole document.
    pub async fn replace(&self, document: &Document) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        self.write(document).await
    }

    /// Run one read-modify-write cycle under the store lock.
    ///
    /// `apply` mutates a fresh copy of the document, which is persisted if
    /// `apply` succeeds. On error the file is left untouched.
    pub async fn mutate<T, F>(&self, apply: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Document) -> Result<T, StoreError>,
    {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;
        let value = apply(&mut document)?;
        self.write(&document).await?;
        Ok(value)
    }

    /// Like [`DocumentStore::mutate`], but `Ok(None)` means "nothing to do"
    /// and skips the write.
    pub async fn try_mutate<T, F>(&self, apply: F) -> Result<Option<T>, StoreError>
    where
        F: FnOnce(&mut Document) -> Result<Option<T>, StoreError>,
    {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;
        let outcome = apply(&mut document)?;
        if outcome.is_some() {
            self.write(&document).await?;
        }
        Ok(outcome)
    }

    async fn load(&self) -> Result<Document, StoreError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;
        let document = serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "Loaded document");
        Ok(document)
    }

    /// Write to a sibling temp file, then rename over the document so a
    /// crash mid-write never leaves a truncated file behind.
    async fn write(&self, document: &Document) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(document).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        let tmp_path = self.tmp_path();
        tokio::fs::write(&tmp_path, &bytes)
            .await
            .map_err(|e| StoreError::io(&tmp_path, e))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "Wrote document");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
