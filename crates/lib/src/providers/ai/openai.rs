use crate::{errors::ProviderError, providers::ai::AiProvider};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::debug;

// --- OpenAI-compatible request and response structures ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    temperature: f32,
    stream: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatMessage,
}

// --- OpenAI Provider implementation ---

/// A provider for the OpenAI chat completions API or any compatible server.
#[derive(Clone, Debug)]
pub struct OpenAiProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: Option<String>,
    model: Option<String>,
    temperature: f32,
}

impl OpenAiProvider {
    /// Creates a new `OpenAiProvider`.
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        model: Option<String>,
        temperature: f32,
    ) -> Result<Self, ProviderError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(ProviderError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
            temperature,
        })
    }
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, ProviderError> {
        let messages = vec![
            ChatMessage {
                role: "system".to_string(),
                content: system_prompt.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: user_prompt.to_string(),
            },
        ];

        let request_body = ChatRequest {
            messages,
            model: self.model.as_deref(),
            temperature: self.temperature,
            stream: false,
        };

        let mut request_builder = self.client.post(&self.api_url);

        if let Some(key) = &self.api_key {
            request_builder = request_builder.bearer_auth(key);
        }

        debug!(api_url = %self.api_url, model = ?self.model, "--> Sending chat completion request");

        let response = request_builder
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

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(ProviderError::AiDeserialization)?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(ProviderError::EmptyResponse)
    }
}
