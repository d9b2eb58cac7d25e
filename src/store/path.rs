//! Store-relative path normalization
//!
//! Paths handed to a `DocumentStore` are root-relative, use `/` separators,
//! carry no leading or trailing separator, and are Unicode NFC so that labels
//! typed on different platforms compare equal.

use crate::error::StoreError;
use unicode_normalization::UnicodeNormalization;

/// Note file extension, without the dot.
pub const NOTE_EXTENSION: &str = "md";

/// Normalize a path string: NFC, `/` separators, no empty segments, no
/// leading or trailing separator.
pub fn normalize_store_path(path: &str) -> String {
    let normalized: String = path.nfc().collect();
    normalized
        .split(['/', '\\'])
        .map(str::trim)
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Join path parts, normalizing the result.
pub fn join_store_path<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = parts
        .into_iter()
        .map(|part| part.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("/");
    normalize_store_path(&joined)
}

/// Append `.md` unless the path already ends with it.
pub fn with_note_extension(path: &str) -> String {
    let suffix = format!(".{}", NOTE_EXTENSION);
    if path.to_lowercase().ends_with(&suffix) {
        path.to_string()
    } else {
        format!("{}{}", path, suffix)
    }
}

/// Whether the last segment of a normalized path carries any extension.
pub fn has_extension(path: &str) -> bool {
    let file_name = split_parent(path).1;
    base_name(file_name) != file_name
}

/// Reject paths that would escape the store root.
pub fn ensure_contained(path: &str) -> Result<(), StoreError> {
    if path.split('/').any(|segment| segment == "..") {
        return Err(StoreError::InvalidPath(format!(
            "{} escapes the vault root",
            path
        )));
    }
    Ok(())
}

/// Split a normalized path into its parent folder (possibly empty) and file name.
pub fn split_parent(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    }
}

/// File name without its extension.
pub fn base_name(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    }
}
