//! Input validation shared by the project and file endpoints.

use crate::error::CoreError;

/// Maximum length of a project name, in characters.
pub const MAX_PROJECT_NAME_CHARS: usize = 200;

/// Validate a project name and return it trimmed.
pub fn validate_project_name(name: &str) -> Result<&str, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Project name is required".into()));
    }
    if trimmed.chars().count() > MAX_PROJECT_NAME_CHARS {
        return Err(CoreError::Validation(format!(
            "Project name must be at most {MAX_PROJECT_NAME_CHARS} characters"
        )));
    }
    Ok(trimmed)
}

/// Validate the name of an uploaded file.
pub fn validate_upload_name(file_name: &str) -> Result<&str, CoreError> {
    let trimmed = file_name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("No file selected".into()));
    }
    Ok(trimmed)
}

/// A translation update must line up index-for-index with the originals.
pub fn validate_segment_count(expected: usize, actual: usize) -> Result<(), CoreError> {
    if expected != actual {
        return Err(CoreError::Validation(format!(
            "translatedSegments has {actual} entries but the file has {expected} segments"
        )));
    }
    Ok(())
}
