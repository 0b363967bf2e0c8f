//! Pre-flight validation: extension allow-list and optional JSON fields
//!
//! Everything here runs before any network call; failures are reported as
//! `Error::InvalidInput` and never reach the transport.

use std::path::Path;

use serde_json::Value;

use rqc_core::{Error, Result};

/// File extensions the ingestion endpoint accepts
pub const ACCEPTED_EXTENSIONS: [&str; 5] = ["pdf", "docx", "txt", "csv", "xlsx"];

fn allow_list() -> String {
    ACCEPTED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check a document path against the extension allow-list.
///
/// Only the substring after the final dot of the file name is inspected,
/// case-insensitively. Dotless names, names ending in a dot, and hidden
/// files like `.env` count as having no extension. Returns the normalized
/// extension on success.
pub fn validate_document(path: &Path) -> Result<String> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::InvalidInput(format!("not a file path: {}", path.display())))?;

    let extension = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext.to_lowercase(),
        _ => {
            return Err(Error::InvalidInput(format!(
                "{} has no file extension. Allowed: {}",
                file_name,
                allow_list()
            )));
        }
    };

    if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(Error::InvalidInput(format!(
            "Unsupported file type: .{}. Allowed: {}",
            extension,
            allow_list()
        )));
    }

    Ok(extension)
}

/// Parse an optional JSON text field (query filters, upload metadata).
///
/// Blank input means the field is absent; anything else must parse as JSON.
pub fn parse_optional_json(text: &str, field: &str) -> Result<Option<Value>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|_| Error::InvalidInput(format!("{} must be valid JSON", field)))
}
