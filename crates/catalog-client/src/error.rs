//! Client error types.

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur while talking to the catalog backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL or a request path is not a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The response could not be understood.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required.
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied.
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend rejected the request.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other backend failure.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A wire value could not become a domain value.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
