//! Seed loading error types.

use crate::domain::DomainError;

/// Errors that can occur when loading registry seed data.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// Reading the seed file failed
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse seed JSON
    #[error("seed JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Seed data violates a registry invariant
    #[error("invalid seed data: {0}")]
    Invalid(#[from] DomainError),
}
