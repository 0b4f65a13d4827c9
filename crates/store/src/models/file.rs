//! Project file model and DTOs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use verso_core::completion::SegmentTally;
use verso_core::download::{render_translation, RenderedTranslation};
use verso_core::error::CoreError;
use verso_core::types::{EntityId, Timestamp};
use verso_core::validation::validate_segment_count;

/// An uploaded file, split into segments, with its translation so far.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    pub id: EntityId,
    pub file_name: String,
    /// Where the uploaded original is stored on disk.
    pub file_path: PathBuf,
    pub upload_date: Timestamp,
    pub original_segments: Vec<String>,
    pub translated_segments: Vec<String>,
    #[serde(default)]
    pub completion_rate: u8,
}

impl ProjectFile {
    /// Build a freshly uploaded file: every translation starts empty.
    pub fn new(
        id: EntityId,
        file_name: String,
        file_path: PathBuf,
        original_segments: Vec<String>,
        now: Timestamp,
    ) -> Self {
        let translated_segments = vec![String::new(); original_segments.len()];
        let mut file = Self {
            id,
            file_name,
            file_path,
            upload_date: now,
            original_segments,
            translated_segments,
            completion_rate: 0,
        };
        file.completion_rate = file.tally().rate();
        file
    }

    pub fn tally(&self) -> SegmentTally {
        SegmentTally::of(&self.original_segments, &self.translated_segments)
    }

    /// Overwrite the translations and return the new completion rate.
    ///
    /// The new array must have exactly one entry per original segment.
    pub fn replace_translation(&mut self, segments: Vec<String>) -> Result<u8, CoreError> {
        validate_segment_count(self.original_segments.len(), segments.len())?;
        self.translated_segments = segments;
        self.completion_rate = self.tally().rate();
        Ok(self.completion_rate)
    }

    /// Render the finished translation for download.
    pub fn render(&self) -> Result<RenderedTranslation, CoreError> {
        render_translation(self.id, &self.file_name, &self.translated_segments)
    }
}

/// A fully buffered upload, as received from the client.
#[derive(Debug, Clone)]
pub struct NewUpload {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// Body of a translation update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTranslation {
    pub translated_segments: Option<Vec<String>>,
}

impl UpdateTranslation {
    /// The submitted segments, or a validation error if the field is absent.
    pub fn into_segments(self) -> Result<Vec<String>, CoreError> {
        self.translated_segments
            .ok_or_else(|| CoreError::Validation("translatedSegments is required".into()))
    }
}

/// Completion rates after a translation update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionUpdate {
    pub file_completion_rate: u8,
    pub project_completion_rate: u8,
}
