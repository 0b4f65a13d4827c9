//! Repository for files owned by a project.

use chrono::Utc;
use verso_core::download::RenderedTranslation;
use verso_core::error::CoreError;
use verso_core::segments::{decode_upload, parse_segments};
use verso_core::types::{new_id, EntityId};
use verso_core::validation::validate_upload_name;

use crate::artifacts::ArtifactStore;
use crate::document::{Document, DocumentStore};
use crate::error::StoreError;
use crate::models::file::{CompletionUpdate, NewUpload, ProjectFile};

/// Provides the lifecycle of files addressed through their project.
///
/// Unknown project or file ids fail with [`CoreError::NotFound`].
pub struct FileRepo;

impl FileRepo {
    /// List the files of a project in upload order.
    pub async fn list_by_project(
        store: &DocumentStore,
        project_id: EntityId,
    ) -> Result<Vec<ProjectFile>, StoreError> {
        let document = store.read().await?;
        Ok(document.require_project(project_id)?.files.clone())
    }

    /// Store an upload, split it into segments, and attach it to a project.
    ///
    /// An unknown project is reported before the upload itself is checked.
    pub async fn upload(
        store: &DocumentStore,
        artifacts: &ArtifactStore,
        project_id: EntityId,
        upload: &NewUpload,
    ) -> Result<ProjectFile, StoreError> {
        store.read().await?.require_project(project_id)?;
        let prepared = PreparedUpload::from_upload(upload)?;
        Self::attach(store, artifacts, project_id, prepared, &upload.content).await
    }

    /// Write the original to disk, then append the file record to its project.
    ///
    /// If the document update fails the stored original is removed again,
    /// along with the project directory when the project vanished meanwhile.
    pub(crate) async fn attach(
        store: &DocumentStore,
        artifacts: &ArtifactStore,
        project_id: EntityId,
        prepared: PreparedUpload,
        content: &[u8],
    ) -> Result<ProjectFile, StoreError> {
        let file_id = new_id();
        let path = artifacts
            .write_file(project_id, file_id, &prepared.file_name, content)
            .await?;
        let file = ProjectFile::new(
            file_id,
            prepared.file_name,
            path,
            prepared.segments,
            Utc::now(),
        );

        let record = file.clone();
        let attached = store
            .mutate(move |doc| {
                let project = doc.require_project_mut(project_id)?;
                project.files.push(record);
                project.refresh_completion();
                project.touch(Utc::now());
                Ok(())
            })
            .await;
        if let Err(e) = attached {
            if matches!(
                e,
                StoreError::Core(CoreError::NotFound {
                    entity: "Project",
                    ..
                })
            ) {
                artifacts.remove_project(project_id).await;
            } else {
                artifacts.remove_file(&file.file_path).await;
            }
            return Err(e);
        }

        tracing::info!(
            %project_id,
            file_id = %file.id,
            file_name = %file.file_name,
            segments = file.original_segments.len(),
            "File uploaded"
        );
        Ok(file)
    }

    /// Find one file of a project.
    pub async fn find(
        store: &DocumentStore,
        project_id: EntityId,
        file_id: EntityId,
    ) -> Result<ProjectFile, StoreError> {
        let document = store.read().await?;
        document
            .require_project(project_id)?
            .file(file_id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("File", file_id).into())
    }

    /// Overwrite a file's translations and recompute both completion rates.
    pub async fn update_translation(
        store: &DocumentStore,
        project_id: EntityId,
        file_id: EntityId,
        segments: Vec<String>,
    ) -> Result<CompletionUpdate, StoreError> {
        let update = store
            .mutate(move |doc| apply_translation(doc, project_id, file_id, segments))
            .await?;

        tracing::info!(
            %project_id,
            %file_id,
            file_completion_rate = update.file_completion_rate,
            project_completion_rate = update.project_completion_rate,
            "Translation updated"
        );
        Ok(update)
    }

    /// Remove a file from its project and delete the stored original.
    pub async fn delete(
        store: &DocumentStore,
        artifacts: &ArtifactStore,
        project_id: EntityId,
        file_id: EntityId,
    ) -> Result<(), StoreError> {
        let removed = store
            .mutate(move |doc| detach_file(doc, project_id, file_id))
            .await?;

        artifacts.remove_file(&removed.file_path).await;
        tracing::info!(%project_id, %file_id, "File deleted");
        Ok(())
    }

    /// Render a fully translated file for download.
    pub async fn download(
        store: &DocumentStore,
        project_id: EntityId,
        file_id: EntityId,
    ) -> Result<RenderedTranslation, StoreError> {
        let file = Self::find(store, project_id, file_id).await?;
        Ok(file.render()?)
    }
}

/// An upload that passed validation: a usable name and its parsed segments.
#[derive(Debug)]
pub(crate) struct PreparedUpload {
    pub(crate) file_name: String,
    pub(crate) segments: Vec<String>,
}

impl PreparedUpload {
    /// Check the file name and decode the content, touching nothing on disk.
    pub(crate) fn from_upload(upload: &NewUpload) -> Result<Self, StoreError> {
        let file_name = validate_upload_name(&upload.file_name)?.to_string();
        let text = decode_upload(&upload.content)?;
        Ok(Self {
            file_name,
            segments: parse_segments(&text),
        })
    }
}

/// Replace the translations of a project file inside an open document.
pub(crate) fn apply_translation(
    doc: &mut Document,
    project_id: EntityId,
    file_id: EntityId,
    segments: Vec<String>,
) -> Result<CompletionUpdate, StoreError> {
    let project = doc.require_project_mut(project_id)?;
    let file = project
        .file_mut(file_id)
        .ok_or_else(|| CoreError::not_found("File", file_id))?;
    let file_completion_rate = file.replace_translation(segments)?;

    project.refresh_completion();
    project.touch(Utc::now());

    Ok(CompletionUpdate {
        file_completion_rate,
        project_completion_rate: project.completion_rate,
    })
}

/// Remove a project file (and any legacy record of it) from an open document.
pub(crate) fn detach_file(
    doc: &mut Document,
    project_id: EntityId,
    file_id: EntityId,
) -> Result<ProjectFile, StoreError> {
    let project = doc.require_project_mut(project_id)?;
    let idx = project
        .files
        .iter()
        .position(|f| f.id == file_id)
        .ok_or_else(|| CoreError::not_found("File", file_id))?;
    let removed = project.files.remove(idx);

    project.refresh_completion();
    project.touch(Utc::now());

    doc.files.retain(|legacy| legacy.file.id != file_id);
    Ok(removed)
}
