//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use verso_core::completion::{project_completion, SegmentTally};
use verso_core::types::{EntityId, Timestamp};

use crate::models::file::ProjectFile;

/// A translation project and the files it owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub creation_date: Timestamp,
    pub last_modified: Timestamp,
    #[serde(default)]
    pub files: Vec<ProjectFile>,
    #[serde(default)]
    pub completion_rate: u8,
}

impl Project {
    pub fn new(id: EntityId, name: String, description: String, now: Timestamp) -> Self {
        Self {
            id,
            name,
            description,
            creation_date: now,
            last_modified: now,
            files: Vec::new(),
            completion_rate: 0,
        }
    }

    pub fn file(&self, file_id: EntityId) -> Option<&ProjectFile> {
        self.files.iter().find(|f| f.id == file_id)
    }

    pub fn file_mut(&mut self, file_id: EntityId) -> Option<&mut ProjectFile> {
        self.files.iter_mut().find(|f| f.id == file_id)
    }

    /// Segment counts summed over every owned file.
    pub fn tally(&self) -> SegmentTally {
        self.files.iter().map(ProjectFile::tally).sum()
    }

    /// Recompute `completion_rate` from the owned files.
    pub fn refresh_completion(&mut self) {
        self.completion_rate = project_completion(self.files.iter().map(ProjectFile::tally));
    }

    pub fn touch(&mut self, now: Timestamp) {
        self.last_modified = now;
    }
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProject {
    /// Required; a missing name deserializes as empty and fails validation.
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
}
