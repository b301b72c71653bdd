//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog_client::ClientError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// The backend answered a forwarded request with a failure status.
    Upstream { status: u16, body: String },
    /// The backend could not be reached or understood.
    Client(ClientError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Upstream { status, body } => {
                tracing::warn!(upstream_status = status, "backend rejected request");
                (
                    StatusCode::BAD_GATEWAY,
                    format!("backend responded {status}: {body}"),
                )
            }
            ApiError::Client(err) => client_error_to_response(err),
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn client_error_to_response(err: ClientError) -> (StatusCode, String) {
    match &err {
        ClientError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        ClientError::Validation(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        ClientError::Http(e) if e.is_timeout() => (StatusCode::GATEWAY_TIMEOUT, err.to_string()),
        _ => {
            tracing::error!(error = %err, "catalog backend error");
            (StatusCode::BAD_GATEWAY, err.to_string())
        }
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        ApiError::Client(err)
    }
}
