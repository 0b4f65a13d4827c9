//! File naming conventions for stored originals and translated downloads.

use crate::types::EntityId;

/// Suffix inserted before the extension of a downloaded translation.
pub const TRANSLATED_SUFFIX: &str = "-translated";

/// Return the extension of `file_name` (without the dot), if it has one.
///
/// Only the last path component is considered, and dotfiles such as
/// `.bashrc` have no extension.
pub fn extension(file_name: &str) -> Option<&str> {
    let base = base_name(file_name);
    match base.rfind('.') {
        Some(0) | None => None,
        Some(idx) if idx + 1 == base.len() => None,
        Some(idx) => Some(&base[idx + 1..]),
    }
}

/// Name of the stored original: the file id plus the uploaded extension.
///
/// Extensions containing anything but ASCII alphanumerics are dropped so a
/// crafted upload name can never escape the project directory.
///
/// ```
/// use verso_core::naming::artifact_file_name;
///
/// let id = uuid::Uuid::nil();
/// assert_eq!(
///     artifact_file_name(id, "chapter1.txt"),
///     "00000000-0000-0000-0000-000000000000.txt"
/// );
/// ```
pub fn artifact_file_name(file_id: EntityId, original_name: &str) -> String {
    match extension(original_name) {
        Some(ext) if ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
            format!("{file_id}.{}", ext.to_ascii_lowercase())
        }
        _ => file_id.to_string(),
    }
}

/// Suggested name for a downloaded translation.
///
/// The trailing extension is kept and `-translated` goes in front of it;
/// names without an extension get the suffix appended.
///
/// ```
/// use verso_core::naming::translated_file_name;
///
/// assert_eq!(translated_file_name("notes.txt"), "notes-translated.txt");
/// assert_eq!(translated_file_name("README"), "README-translated");
/// ```
pub fn translated_file_name(file_name: &str) -> String {
    let base = base_name(file_name);
    match extension(base) {
        Some(ext) => {
            let stem = &base[..base.len() - ext.len() - 1];
            format!("{stem}{TRANSLATED_SUFFIX}.{ext}")
        }
        None => format!("{base}{TRANSLATED_SUFFIX}"),
    }
}

/// Build a `Content-Disposition: attachment` value for `file_name`.
///
/// Emits a plain ASCII `filename` fallback and an RFC 5987 `filename*`
/// carrying the exact UTF-8 name.
pub fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        percent_encode(file_name)
    )
}

fn base_name(file_name: &str) -> &str {
    file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
}

/// Percent-encode everything outside the RFC 5987 `attr-char` set.
fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'!'
            | b'#'
            | b'$'
            | b'&'
            | b'+'
            | b'-'
            | b'.'
            | b'^'
            | b'_'
            | b'`'
            | b'|'
            | b'~' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
