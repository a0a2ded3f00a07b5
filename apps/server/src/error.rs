use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use spendwise_core::Error as CoreError;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Error type returned by every handler. Write-path failures keep their
/// distinct status codes; anything unexpected collapses to a generic 500 with
/// the detail only logged.
#[derive(Debug)]
pub enum ApiError {
    Core(CoreError),
    /// No usable Authorization header on a protected route
    MissingToken,
    /// A token was presented but did not validate
    InvalidToken,
    /// Login failed; deliberately vague towards the client
    InvalidCredentials,
    Internal(anyhow::Error),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::Core(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Core(CoreError::Validation(e)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Core(CoreError::NotFound(what)) => {
                (StatusCode::NOT_FOUND, format!("{} not found", what))
            }
            ApiError::Core(err @ CoreError::Unauthorized(_)) => {
                (StatusCode::UNAUTHORIZED, err.to_string())
            }
            ApiError::Core(CoreError::Database(e)) => {
                tracing::error!("database failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Authentication required".to_string(),
            ),
            ApiError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token".to_string(),
            ),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
            ),
            ApiError::Internal(e) => {
                tracing::error!("unhandled failure: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
