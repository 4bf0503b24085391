//! Media types offered by the file picker.
//!
//! The accept filter is a hint for hosts that present a picker. Nothing in the
//! upload path enforces it; the backend decides what it can read.

use std::path::Path;

/// Picker accept string: any image, or a PDF.
pub const ACCEPT: &str = "image/*,application/pdf";

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Whether a picker using [`ACCEPT`] would offer a file of `content_type`.
pub fn is_accepted(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/pdf"
        || essence
            .strip_prefix("image/")
            .is_some_and(|subtype| !subtype.is_empty())
}

/// Declared media type of a file on disk, guessed from its extension.
pub fn guess_content_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .map(|m| m.to_string())
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string())
}
