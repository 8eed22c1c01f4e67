use crate::{
    errors::ProviderError,
    providers::image::{ImageProvider, ImageRequest, ImageSize, ImageStyle},
};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use tracing::debug;

// --- OpenAI images request and response structures ---

#[derive(Serialize)]
struct ImagesRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: ImageSize,
    quality: &'a str,
    style: ImageStyle,
}

#[derive(Deserialize, Debug)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Deserialize, Debug)]
struct ImageData {
    url: Option<String>,
}

/// A provider for the OpenAI `images/generations` endpoint.
#[derive(Clone, Debug)]
pub struct OpenAiImageProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
    model: String,
    quality: String,
}

impl OpenAiImageProvider {
    /// Creates a new `OpenAiImageProvider`.
    pub fn new(
        api_url: String,
        api_key: String,
        model: String,
        quality: String,
    ) -> Result<Self, ProviderError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(ProviderError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
            quality,
        })
    }
}

#[async_trait]
impl ImageProvider for OpenAiImageProvider {
    async fn generate_image(&self, request: &ImageRequest) -> Result<String, ProviderError> {
        let request_body = ImagesRequest {
            model: &self.model,
            prompt: &request.prompt,
            n: 1,
            size: request.size,
            quality: &self.quality,
            style: request.style,
        };

        debug!(model = %self.model, style = ?request.style, "--> Sending image generation request");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
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

        let images: ImagesResponse = response
            .json()
            .await
            .map_err(ProviderError::AiDeserialization)?;

        images
            .data
            .into_iter()
            .next()
            .and_then(|d| d.url)
            .filter(|url| !url.is_empty())
            .ok_or(ProviderError::EmptyResponse)
    }
}
