//! # Image Generation Pipeline
//!
//! A diary entry is first condensed into a short visual prompt by the language
//! model, and that prompt is then sent to the image model. Any failure along
//! the way produces the same "not generated" result; a prompt without an image
//! is never surfaced.

use crate::{
    errors::{PipelineError, ProviderError},
    prompts::tasks::{IMAGE_PROMPT_SYSTEM_PROMPT, IMAGE_PROMPT_USER_PROMPT},
    providers::{
        ai::AiProvider,
        image::{ImageProvider, ImageRequest, ImageSize, ImageStyle},
    },
    types::TaskPrompts,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

/// Options a caller may send with an entry.
///
/// They are validated on the way in, but every image is rendered with the
/// fixed parameters of [`ImageRequest::new`].
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct GenerationOptions {
    #[serde(default)]
    pub style: ImageStyle,
    #[serde(default)]
    pub size: ImageSize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGenerationResult {
    pub image_url: Option<String>,
    pub is_generated: bool,
}

impl ImageGenerationResult {
    pub fn failed() -> Self {
        Self {
            image_url: None,
            is_generated: false,
        }
    }

    pub fn generated(image_url: String) -> Self {
        Self {
            image_url: Some(image_url),
            is_generated: true,
        }
    }
}

/// Orchestrates the prompt and image model calls.
#[derive(Debug, Clone)]
pub struct ImageGenerator {
    ai_provider: Box<dyn AiProvider>,
    image_provider: Box<dyn ImageProvider>,
    prompts: TaskPrompts,
}

impl ImageGenerator {
    /// Creates a new `ImageGenerator` with the built-in prompt.
    pub fn new(ai_provider: Box<dyn AiProvider>, image_provider: Box<dyn ImageProvider>) -> Self {
        Self::with_prompts(
            ai_provider,
            image_provider,
            TaskPrompts::new(IMAGE_PROMPT_SYSTEM_PROMPT, IMAGE_PROMPT_USER_PROMPT),
        )
    }

    pub fn with_prompts(
        ai_provider: Box<dyn AiProvider>,
        image_provider: Box<dyn ImageProvider>,
        prompts: TaskPrompts,
    ) -> Self {
        Self {
            ai_provider,
            image_provider,
            prompts,
        }
    }

    /// Generates an image for a diary entry.
    pub async fn generate(&self, text: &str, options: GenerationOptions) -> ImageGenerationResult {
        match self.try_generate(text, options).await {
            Ok(image_url) => ImageGenerationResult::generated(image_url),
            Err(PipelineError::EmptyInput) => {
                info!("Image generation skipped: empty input");
                ImageGenerationResult::failed()
            }
            Err(e) => {
                error!("Failed to generate image: {e}");
                ImageGenerationResult::failed()
            }
        }
    }

    async fn try_generate(
        &self,
        text: &str,
        options: GenerationOptions,
    ) -> Result<String, PipelineError> {
        if text.trim().is_empty() {
            return Err(PipelineError::EmptyInput);
        }

        let user_prompt = self.prompts.render_user_prompt(text);
        let image_prompt = self
            .ai_provider
            .generate(&self.prompts.system_prompt, &user_prompt)
            .await?
            .trim()
            .to_string();
        if image_prompt.is_empty() {
            return Err(ProviderError::EmptyResponse.into());
        }
        debug!("<-- Image prompt from AI: {}", image_prompt);

        let request = ImageRequest::new(image_prompt);
        if request.style != options.style || request.size != options.size {
            debug!(
                requested = ?options,
                "Rendering with fixed style {:?} and size {:?}",
                request.style,
                request.size
            );
        }
        Ok(self.image_provider.generate_image(&request).await?)
    }
}
