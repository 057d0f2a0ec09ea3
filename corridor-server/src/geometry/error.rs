//! Geometry provider error types.

use std::fmt;

/// Errors from a road-geometry provider.
///
/// None of these reach a caller of the resolver: every failure is replaced
/// by a straight line between the two endpoints.
#[derive(Debug)]
pub enum GeometryError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// Provider returned an error status code
    ApiError { status: u16, message: String },

    /// Provider has no path between the two points
    NoRoute,

    /// Rate limited by the provider
    RateLimited,

    /// The per-call deadline expired
    Timeout,

    /// Feature not configured or not available
    NotConfigured(String),
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::Http(e) => write!(f, "HTTP error: {e}"),
            GeometryError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            GeometryError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            GeometryError::NoRoute => write!(f, "no route between points"),
            GeometryError::RateLimited => write!(f, "rate limited by geometry provider"),
            GeometryError::Timeout => write!(f, "geometry request timed out"),
            GeometryError::NotConfigured(msg) => write!(f, "not configured: {msg}"),
        }
    }
}

impl std::error::Error for GeometryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeometryError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GeometryError {
    fn from(err: reqwest::Error) -> Self {
        GeometryError::Http(err)
    }
}
