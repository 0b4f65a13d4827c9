//! Segment parser: splits uploaded text into translatable paragraphs.
//!
//! A segment boundary is any run of whitespace containing at least one blank
//! line. Nothing else about the file structure is recognised.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// A line break, optional whitespace (including further line breaks), and
/// another line break.
const PARAGRAPH_BREAK_PATTERN: &str = r"\n\s*\n";

static PARAGRAPH_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PARAGRAPH_BREAK_PATTERN).expect("valid regex"));

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Split raw text into ordered, non-empty segments.
///
/// Each segment is trimmed, so CRLF input does not leave a trailing `\r`.
/// Segments that are empty or whitespace-only are dropped.
///
/// ```
/// use verso_core::segments::parse_segments;
///
/// assert_eq!(parse_segments("Hello\n\nWorld"), vec!["Hello", "World"]);
/// assert!(parse_segments("").is_empty());
/// ```
pub fn parse_segments(raw: &str) -> Vec<String> {
    PARAGRAPH_BREAK_RE
        .split(raw)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Decode uploaded bytes as UTF-8 text, stripping a leading byte-order mark.
pub fn decode_upload(bytes: &[u8]) -> Result<String, CoreError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    String::from_utf8(bytes.to_vec()).map_err(|e| {
        CoreError::Validation(format!(
            "Uploaded file must be UTF-8 encoded text (invalid byte at offset {})",
            e.utf8_error().valid_up_to()
        ))
    })
}
