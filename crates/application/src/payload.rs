//! Field extraction for raw submission payloads.
//!
//! Submissions are kept as the caller sent them so the stored audit
//! snapshot stays faithful; these helpers pull individual fields out of
//! that raw JSON with consistent trimming rules.

use campusforge_core::{AppError, AppResult};
use serde_json::Value;

/// Extracts a required non-blank text field from a submission payload.
pub(crate) fn required_text(payload: &Value, field: &str) -> AppResult<String> {
    optional_text(payload, field)
        .ok_or_else(|| AppError::Validation(format!("missing required field '{field}'")))
}

/// Extracts an optional text field, treating blank values as absent.
pub(crate) fn optional_text(payload: &Value, field: &str) -> Option<String> {
    let value = payload.get(field)?.as_str()?.trim();
    if value.is_empty() {
        return None;
    }

    Some(value.to_owned())
}
