use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

/// A custom error type for the server application.
///
/// Pipeline failures never reach this type: the library already maps them to
/// "not analyzed" and "not generated" results. Only request validation does.
#[derive(Debug)]
pub enum AppError {
    /// The body could not be read as the expected JSON shape.
    InvalidBody(JsonRejection),
    /// The body was well-formed but not a valid request.
    BadRequest(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::InvalidBody(rejection) => (rejection.status(), rejection.body_text()),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };
        warn!(status = %status_code, "Rejected request: {error_message}");

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
