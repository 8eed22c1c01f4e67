//! An Axum extractor that admits a request only when it carries the
//! configured service key.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::state::AppState;

/// The header clients send the service key in.
pub const API_KEY_HEADER: &str = "x-ai-api-key";

/// Proof that the request presented a valid service key.
///
/// Handlers take this as an argument; the request is rejected with
/// `401 Unauthorized` before the handler body runs otherwise.
#[derive(Debug, Clone, Copy)]
pub struct ApiKey;

/// A custom rejection type for authentication failures.
pub struct AuthError(StatusCode, String);

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.0, Json(json!({ "error": self.1 }))).into_response()
    }
}

impl FromRequestParts<AppState> for ApiKey {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(presented) = parts.headers.get(API_KEY_HEADER) else {
            warn!("Request to {} without an API key header.", parts.uri.path());
            return Err(AuthError(
                StatusCode::UNAUTHORIZED,
                "Missing API key.".to_string(),
            ));
        };

        if keys_match(presented.as_bytes(), state.service_key.as_bytes()) {
            Ok(ApiKey)
        } else {
            warn!("Request to {} with an invalid API key.", parts.uri.path());
            Err(AuthError(
                StatusCode::UNAUTHORIZED,
                "Invalid API key.".to_string(),
            ))
        }
    }
}

/// Compares keys in time independent of where they first differ.
fn keys_match(presented: &[u8], expected: &[u8]) -> bool {
    presented.ct_eq(expected).into()
}
