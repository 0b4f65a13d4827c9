//! Repository for projects.

use chrono::Utc;
use verso_core::types::{new_id, EntityId};
use verso_core::validation::validate_project_name;

use crate::artifacts::ArtifactStore;
use crate::document::DocumentStore;
use crate::error::StoreError;
use crate::models::project::{CreateProject, Project, UpdateProject};

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Create a project and provision its (empty) upload directory.
    ///
    /// Fails with a validation error if the name is blank.
    pub async fn create(
        store: &DocumentStore,
        artifacts: &ArtifactStore,
        input: &CreateProject,
    ) -> Result<Project, StoreError> {
        let name = validate_project_name(&input.name)?;
        let project = Project::new(
            new_id(),
            name.to_string(),
            input.description.clone().unwrap_or_default(),
            Utc::now(),
        );

        artifacts.provision_project(project.id).await?;

        let record = project.clone();
        let persisted = store
            .mutate(move |doc| {
                doc.projects.push(record);
                Ok(())
            })
            .await;
        if let Err(e) = persisted {
            artifacts.remove_project(project.id).await;
            return Err(e);
        }

        tracing::info!(project_id = %project.id, name = %project.name, "Project created");
        Ok(project)
    }

    /// Find a project by id.
    pub async fn find_by_id(
        store: &DocumentStore,
        id: EntityId,
    ) -> Result<Option<Project>, StoreError> {
        let document = store.read().await?;
        Ok(document.projects.into_iter().find(|p| p.id == id))
    }

    /// List all projects in creation order.
    pub async fn list(store: &DocumentStore) -> Result<Vec<Project>, StoreError> {
        Ok(store.read().await?.projects)
    }

    /// Update a project. Only fields present in `input` are applied; a blank
    /// name is ignored rather than clearing the existing one.
    ///
    /// Returns `None` if no project with the given `id` exists.
    pub async fn update(
        store: &DocumentStore,
        id: EntityId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, StoreError> {
        let updated = store
            .try_mutate(|doc| {
                let Some(project) = doc.project_mut(id) else {
                    return Ok(None);
                };
                if let Some(name) = input.name.as_deref().filter(|n| !n.trim().is_empty()) {
                    project.name = validate_project_name(name)?.to_string();
                }
                if let Some(description) = &input.description {
                    project.description = description.clone();
                }
                project.touch(Utc::now());
                Ok(Some(project.clone()))
            })
            .await?;

        if let Some(project) = &updated {
            tracing::info!(project_id = %project.id, name = %project.name, "Project updated");
        }
        Ok(updated)
    }

    /// Delete a project, its files, and its upload directory.
    ///
    /// The record is removed from the document first; directory cleanup is
    /// best-effort afterwards. Returns `true` if a project was removed.
    pub async fn delete(
        store: &DocumentStore,
        artifacts: &ArtifactStore,
        id: EntityId,
    ) -> Result<bool, StoreError> {
        let removed = store
            .try_mutate(|doc| {
                let Some(idx) = doc.projects.iter().position(|p| p.id == id) else {
                    return Ok(None);
                };
                let project = doc.projects.remove(idx);
                doc.files.retain(|legacy| {
                    legacy.project_id != Some(id) && project.file(legacy.file.id).is_none()
                });
                Ok(Some(project))
            })
            .await?;

        let Some(project) = removed else {
            return Ok(false);
        };

        artifacts.remove_project(id).await;
        tracing::info!(project_id = %id, files = project.files.len(), "Project deleted");
        Ok(true)
    }
}
