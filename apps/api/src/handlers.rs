pub mod chat;
pub mod health;
pub mod inquiries;
pub mod profile;
pub mod recruiting;

use campusforge_core::AppError;
use serde_json::Value;

use crate::error::ApiError;

/// Pulls a required non-blank string field out of a JSON body.
fn required_field<'payload>(
    payload: &'payload Value,
    key: &str,
) -> Result<&'payload str, ApiError> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Validation(format!("missing required field '{key}'")).into())
}
