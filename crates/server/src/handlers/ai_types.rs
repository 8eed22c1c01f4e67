//! # AI Route Payloads
//!
//! Request and response bodies for the `/ai` routes.

use diary_insight::{
    providers::image::{ImageSize, ImageStyle},
    GenerationOptions, ImageGenerationResult,
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug)]
pub struct TextAnalysisRequest {
    pub text: String,
}

#[derive(Deserialize, Debug)]
pub struct ImageGenerationRequest {
    pub text: String,
    #[serde(default)]
    pub style: ImageStyle,
    #[serde(default)]
    pub size: ImageSize,
}

impl ImageGenerationRequest {
    pub fn options(&self) -> GenerationOptions {
        GenerationOptions {
            style: self.style,
            size: self.size,
        }
    }
}

/// The response body for `/ai/generate_image`. `imageUrl` is `null` on failure.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageGenerationResponse {
    pub success: bool,
    pub image_url: Option<String>,
}

impl From<ImageGenerationResult> for ImageGenerationResponse {
    fn from(result: ImageGenerationResult) -> Self {
        Self {
            success: result.is_generated,
            image_url: result.image_url,
        }
    }
}
