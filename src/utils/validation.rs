// Sanitization helpers for slugs and uploaded file names

use crate::utils::error::{EditorError, Result};

/// Normalize free text into a slug: every character outside `[a-zA-Z0-9-]`
/// becomes `-`, then ASCII letters are lowercased. One output char per input char.
pub fn sanitize_slug(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c.to_ascii_lowercase() } else { '-' })
        .collect()
}

/// Sanitize a slug and reject it when nothing is left
pub fn require_slug(raw: &str) -> Result<String> {
    let slug = sanitize_slug(raw);
    if slug.is_empty() {
        return Err(EditorError::invalid_input("Missing slug"));
    }
    Ok(slug)
}

/// Restrict an uploaded file name to `[a-zA-Z0-9._-]`, replacing others with `_`
pub fn sanitize_file_name(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect()
}

/// Sanitize an upload name, refusing names that would not address a file
/// inside the images directory (empty, `.` or `..`).
pub fn require_file_name(raw: &str) -> Result<String> {
    let name = sanitize_file_name(raw);
    if name.is_empty() || name.chars().all(|c| c == '.') {
        return Err(EditorError::invalid_input("No file uploaded"));
    }
    Ok(name)
}
