use crate::{errors::ProviderError, providers::ai::AiProvider};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

// --- Gemini-specific request and response structures ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize, Debug)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: ContentResponse,
}

#[derive(Deserialize, Debug)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize, Debug)]
struct PartResponse {
    text: String,
}

// --- Gemini Provider implementation ---

/// A provider for interacting with the Google Gemini API.
#[derive(Clone, Debug)]
pub struct GeminiProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
    temperature: f32,
}

impl GeminiProvider {
    /// Creates a new `GeminiProvider`.
    pub fn new(api_url: String, api_key: String, temperature: f32) -> Result<Self, ProviderError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(ProviderError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            temperature,
        })
    }

    /// The `generateContent` endpoint for a model name.
    pub fn url_for_model(model_name: &str) -> String {
        format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{model_name}:generateContent"
        )
    }
}

#[async_trait]
impl AiProvider for GeminiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, ProviderError> {
        let request_body = GeminiRequest {
            system_instruction: Content {
                parts: vec![Part {
                    text: system_prompt.to_string(),
                }],
            },
            contents: vec![Content {
                parts: vec![Part {
                    text: user_prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", &self.api_key)])
            .json(&request_body)
            .send()
            .await
            .map_err(ProviderError::AiRequest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::AiApi {
                status: status.as_u16(),
                body,
            });
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(ProviderError::AiDeserialization)?;

        gemini_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(ProviderError::EmptyResponse)
    }
}
