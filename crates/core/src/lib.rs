//! Shared primitives for all Rust crates in Campusforge.

#![forbid(unsafe_code)]

/// Caller identity resolved from verified claims documents.
pub mod auth;

use thiserror::Error;

pub use auth::IdentityClaim;

/// Result type used across Campusforge crates.
pub type AppResult<T> = Result<T, AppError>;

/// Common application error categories.
#[derive(Clone, Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Caller is not authenticated or not allowed to access a resource.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// A dependency behind the API failed; `code` is a sanitized
    /// diagnostic safe to surface to callers.
    #[error("upstream error: {message}")]
    Upstream {
        /// Caller-facing description of the failure.
        message: String,
        /// Stable diagnostic such as a SQLSTATE or an HTTP status.
        code: Option<String>,
    },

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Builds an upstream error carrying a diagnostic code.
    #[must_use]
    pub fn upstream(message: impl Into<String>, code: Option<String>) -> Self {
        Self::Upstream {
            message: message.into(),
            code,
        }
    }
}
