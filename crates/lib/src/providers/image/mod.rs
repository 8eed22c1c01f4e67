//! # Image Providers
//!
//! Image generation services take a finished text prompt and return the URL
//! of a rendered image. Rendering itself happens entirely on the remote side.

pub mod openai;

use crate::errors::ProviderError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// The visual style requested from the image model.
#[derive(Default, Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImageStyle {
    #[default]
    Natural,
    Vivid,
}

/// The only image size currently offered.
#[derive(Default, Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    #[default]
    #[serde(rename = "1024x1024")]
    Medium,
}

/// A single image request.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    pub prompt: String,
    pub style: ImageStyle,
    pub size: ImageSize,
}

impl ImageRequest {
    /// A request rendered with the fixed `natural` style at `1024x1024`.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            style: ImageStyle::Natural,
            size: ImageSize::Medium,
        }
    }
}

/// A trait for services that render an image from a text prompt.
#[async_trait]
pub trait ImageProvider: Send + Sync + Debug + DynClone {
    /// Requests one image and returns its URL.
    async fn generate_image(&self, request: &ImageRequest) -> Result<String, ProviderError>;
}

dyn_clone::clone_trait_object!(ImageProvider);
