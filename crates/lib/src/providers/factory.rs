//! # AI Provider Factory
//!
//! This module centralizes the logic for creating AI provider instances from a
//! named `ProviderConfig`. Keeping it in the library lets every consumer build
//! providers the same way.

use crate::{
    errors::ProviderError,
    providers::ai::{gemini::GeminiProvider, openai::OpenAiProvider, AiProvider},
    types::ProviderConfig,
};
use tracing::info;

/// The default OpenAI chat completions endpoint.
pub const OPENAI_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Creates a boxed AI provider from its configuration.
///
/// Both provider types require a non-empty API key: an absent key is a startup
/// error, never a per-request one.
pub fn create_ai_provider(
    name: &str,
    config: &ProviderConfig,
) -> Result<Box<dyn AiProvider>, ProviderError> {
    let api_key = config
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| ProviderError::MissingApiKey(name.to_string()))?;

    let provider: Box<dyn AiProvider> = match config.provider.as_str() {
        "openai" => {
            let api_url = config
                .api_url
                .clone()
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| OPENAI_CHAT_COMPLETIONS_URL.to_string());
            info!(provider = %name, %api_url, model = %config.model_name, "Configuring OpenAI provider");
            Box::new(OpenAiProvider::new(
                api_url,
                Some(api_key),
                Some(config.model_name.clone()),
                config.temperature,
            )?)
        }
        "gemini" => {
            let api_url = config
                .api_url
                .clone()
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| GeminiProvider::url_for_model(&config.model_name));
            info!(provider = %name, %api_url, "Configuring Gemini provider");
            Box::new(GeminiProvider::new(api_url, api_key, config.temperature)?)
        }
        other => return Err(ProviderError::UnsupportedProvider(other.to_string())),
    };

    Ok(provider)
}
