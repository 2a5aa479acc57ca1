// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::ModelError;
use crate::filter::FilterError;

/// HTTP API error with appropriate status codes and client-friendly messages.
/// Internal detail (SQL, sqlx messages) is logged server-side and never leaks
/// into the response envelope.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::InternalServerError(msg) => msg,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        // Every filter failure, the unsafe sort key included, is malformed
        // client input: surface as 400, never as an unhandled fault.
        ApiError::bad_request(err.to_string())
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::NotFound => {
                ApiError::not_found("the requested resource could not be found")
            }
            ModelError::Filter(e) => e.into(),
            ModelError::Constraint(msg) => {
                tracing::error!("constraint violation: {}", msg);
                ApiError::internal_server_error(
                    "the server encountered a problem and could not process your request",
                )
            }
            ModelError::Timeout => {
                tracing::error!("database operation exceeded its deadline");
                ApiError::internal_server_error("the operation timed out, please try again")
            }
            ModelError::Sqlx(e) => {
                tracing::error!("database error: {}", e);
                ApiError::internal_server_error(
                    "the server encountered a problem and could not process your request",
                )
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
