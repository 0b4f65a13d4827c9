//! The deprecated flat file view.
//!
//! Older clients address files directly by id, without their project. A
//! [`LegacyFile`] is a [`ProjectFile`] annotated with its owner.

use serde::{Deserialize, Serialize};
use verso_core::types::EntityId;

use crate::models::file::ProjectFile;
use crate::models::project::Project;

/// Name of the project that receives files uploaded through the flat API.
pub const DEFAULT_PROJECT_NAME: &str = "Default Project";

/// Name older deployments gave the default project. Documents written by
/// them keep using that project for flat uploads.
pub const FORMER_DEFAULT_PROJECT_NAME: &str = "默认项目";

/// Whether `name` identifies the project that receives flat uploads.
pub fn is_default_project_name(name: &str) -> bool {
    name == DEFAULT_PROJECT_NAME || name == FORMER_DEFAULT_PROJECT_NAME
}

/// Description given to the default project when it is created on demand.
pub const DEFAULT_PROJECT_DESCRIPTION: &str = "Automatically created project for unassigned files";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyFile {
    #[serde(flatten)]
    pub file: ProjectFile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
}

impl LegacyFile {
    /// Project a file owned by `project` into the flat view.
    pub fn owned_by(project: &Project, file: &ProjectFile) -> Self {
        Self {
            file: file.clone(),
            project_id: Some(project.id),
            project_name: Some(project.name.clone()),
        }
    }
}

/// Response body of a flat upload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyUpload {
    pub id: EntityId,
    pub project_id: EntityId,
    pub file: ProjectFile,
}
