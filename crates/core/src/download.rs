//! Rendering of a finished translation into a downloadable text file.

use crate::completion::is_translated;
use crate::error::CoreError;
use crate::naming::translated_file_name;
use crate::types::EntityId;

/// Separator placed between translated segments: one blank line.
pub const SEGMENT_SEPARATOR: &str = "\n\n";

/// A translation ready to be sent as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTranslation {
    /// Suggested download name, e.g. `notes-translated.txt`.
    pub file_name: String,
    pub body: String,
}

/// Join the translated segments of a file, refusing while any is blank.
pub fn render_translation(
    file_id: EntityId,
    file_name: &str,
    translated: &[String],
) -> Result<RenderedTranslation, CoreError> {
    let remaining = translated.iter().filter(|s| !is_translated(s)).count();
    if remaining > 0 {
        return Err(CoreError::IncompleteTranslation { file_id, remaining });
    }

    Ok(RenderedTranslation {
        file_name: translated_file_name(file_name),
        body: translated.join(SEGMENT_SEPARATOR),
    })
}
