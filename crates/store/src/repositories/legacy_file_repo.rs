//! Repository for the deprecated flat file API.
//!
//! Files are addressed by id alone. The view is computed from the files
//! owned by projects; flat records left over from older documents stay
//! reachable when no project owns them. Every mutation goes through the same
//! helpers as [`FileRepo`], so validation and completion recomputation are
//! identical on both paths.

use chrono::Utc;
use verso_core::download::RenderedTranslation;
use verso_core::error::CoreError;
use verso_core::types::{new_id, EntityId};

use crate::artifacts::ArtifactStore;
use crate::document::{Document, DocumentStore, FileLocation};
use crate::error::StoreError;
use crate::models::file::{CompletionUpdate, NewUpload};
use crate::models::legacy::{
    is_default_project_name, LegacyFile, LegacyUpload, DEFAULT_PROJECT_DESCRIPTION,
    DEFAULT_PROJECT_NAME,
};
use crate::models::project::Project;
use crate::repositories::file_repo::{apply_translation, detach_file, FileRepo, PreparedUpload};

pub struct LegacyFileRepo;

impl LegacyFileRepo {
    /// Every file in the document, annotated with its project.
    pub async fn list(store: &DocumentStore) -> Result<Vec<LegacyFile>, StoreError> {
        let document = store.read().await?;
        let mut files: Vec<LegacyFile> = document.orphaned_legacy_files().cloned().collect();
        files.extend(document.projects.iter().flat_map(|project| {
            project
                .files
                .iter()
                .map(move |file| LegacyFile::owned_by(project, file))
        }));
        Ok(files)
    }

    /// Upload into the default project, creating it on first use.
    ///
    /// The upload is validated first, so a rejected upload never creates
    /// the default project.
    pub async fn upload(
        store: &DocumentStore,
        artifacts: &ArtifactStore,
        upload: &NewUpload,
    ) -> Result<LegacyUpload, StoreError> {
        let prepared = PreparedUpload::from_upload(upload)?;
        let project_id = Self::ensure_default_project(store, artifacts).await?;
        let file = FileRepo::attach(store, artifacts, project_id, prepared, &upload.content).await?;
        Ok(LegacyUpload {
            id: file.id,
            project_id,
            file,
        })
    }

    pub async fn find(store: &DocumentStore, file_id: EntityId) -> Result<LegacyFile, StoreError> {
        store
            .read()
            .await?
            .legacy_view(file_id)
            .ok_or_else(|| CoreError::not_found("File", file_id).into())
    }

    /// Overwrite translations of a file located by id alone.
    ///
    /// Flat records without an owning project report a project completion
    /// rate of 0.
    pub async fn update_translation(
        store: &DocumentStore,
        file_id: EntityId,
        segments: Vec<String>,
    ) -> Result<CompletionUpdate, StoreError> {
        let update = store
            .mutate(move |doc| match doc.locate_file(file_id) {
                Some(FileLocation::Project(project_id)) => {
                    apply_translation(doc, project_id, file_id, segments)
                }
                Some(FileLocation::Legacy(idx)) => {
                    let file_completion_rate = doc.files[idx].file.replace_translation(segments)?;
                    Ok(CompletionUpdate {
                        file_completion_rate,
                        project_completion_rate: 0,
                    })
                }
                None => Err(CoreError::not_found("File", file_id).into()),
            })
            .await?;

        tracing::info!(
            %file_id,
            file_completion_rate = update.file_completion_rate,
            project_completion_rate = update.project_completion_rate,
            "Translation updated through flat API"
        );
        Ok(update)
    }

    pub async fn delete(
        store: &DocumentStore,
        artifacts: &ArtifactStore,
        file_id: EntityId,
    ) -> Result<(), StoreError> {
        let removed = store
            .mutate(move |doc| match doc.locate_file(file_id) {
                Some(FileLocation::Project(project_id)) => detach_file(doc, project_id, file_id),
                Some(FileLocation::Legacy(idx)) => Ok(doc.files.remove(idx).file),
                None => Err(CoreError::not_found("File", file_id).into()),
            })
            .await?;

        artifacts.remove_file(&removed.file_path).await;
        tracing::info!(%file_id, "File deleted through flat API");
        Ok(())
    }

    pub async fn download(
        store: &DocumentStore,
        file_id: EntityId,
    ) -> Result<RenderedTranslation, StoreError> {
        let legacy = Self::find(store, file_id).await?;
        Ok(legacy.file.render()?)
    }

    /// Return the id of the default project, creating it if needed.
    async fn ensure_default_project(
        store: &DocumentStore,
        artifacts: &ArtifactStore,
    ) -> Result<EntityId, StoreError> {
        if let Some(id) = default_project_id(&store.read().await?) {
            return Ok(id);
        }

        let created = store
            .try_mutate(|doc| {
                // Another request may have created it since the read above.
                if default_project_id(doc).is_some() {
                    return Ok(None);
                }
                let project = Project::new(
                    new_id(),
                    DEFAULT_PROJECT_NAME.to_string(),
                    DEFAULT_PROJECT_DESCRIPTION.to_string(),
                    Utc::now(),
                );
                let id = project.id;
                doc.projects.push(project);
                Ok(Some(id))
            })
            .await?;

        match created {
            Some(id) => {
                artifacts.provision_project(id).await?;
                tracing::info!(project_id = %id, "Default project created");
                Ok(id)
            }
            None => default_project_id(&store.read().await?).ok_or_else(|| {
                CoreError::Internal("default project disappeared during upload".into()).into()
            }),
        }
    }
}

fn default_project_id(doc: &Document) -> Option<EntityId> {
    doc.projects
        .iter()
        .find(|p| is_default_project_name(&p.name))
        .map(|p| p.id)
}
