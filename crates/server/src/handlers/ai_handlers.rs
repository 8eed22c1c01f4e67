//! # AI Route Handlers
//!
//! Both handlers always answer `200 OK` once the request is accepted; whether
//! the model produced something usable is reported in the body.

use super::{
    ai_types::{ImageGenerationRequest, ImageGenerationResponse, TextAnalysisRequest},
    AppError, AppState,
};
use crate::auth::api_key::ApiKey;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use diary_insight::AnalysisResult;
use tracing::info;

/// An empty string is a client error. Whitespace-only text is passed on and
/// resolved by the pipeline.
fn require_text(text: &str) -> Result<(), AppError> {
    if text.is_empty() {
        return Err(AppError::BadRequest("text must not be empty".to_string()));
    }
    Ok(())
}

/// The handler for `POST /ai/analyze_text`.
pub async fn analyze_text_handler(
    _key: ApiKey,
    State(app_state): State<AppState>,
    payload: Result<Json<TextAnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let Json(payload) = payload?;
    require_text(&payload.text)?;
    info!(
        chars = payload.text.chars().count(),
        format = ?app_state.analyzer.format(),
        "Received text analysis request"
    );

    let result = app_state.analyzer.analyze_text(&payload.text).await;
    info!(
        is_analyzed = result.is_analyzed,
        flagged = result.has_inappropriate_content,
        "Text analysis finished"
    );
    Ok(Json(result))
}

/// The handler for `POST /ai/generate_image`.
pub async fn generate_image_handler(
    _key: ApiKey,
    State(app_state): State<AppState>,
    payload: Result<Json<ImageGenerationRequest>, JsonRejection>,
) -> Result<Json<ImageGenerationResponse>, AppError> {
    let Json(payload) = payload?;
    require_text(&payload.text)?;
    info!(style = ?payload.style, "Received image generation request");

    let result = app_state
        .image_generator
        .generate(&payload.text, payload.options())
        .await;
    info!(is_generated = result.is_generated, "Image generation finished");
    Ok(Json(result.into()))
}
