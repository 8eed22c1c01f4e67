#![allow(dead_code)]
//! # Common Test Utilities
//!
//! This module provides scripted mock providers so the pipelines can be tested
//! without any network access.

use async_trait::async_trait;
use diary_insight::{
    providers::{
        ai::AiProvider,
        image::{ImageProvider, ImageRequest},
    },
    ProviderError,
};
use dotenvy::dotenv;
use std::sync::{Arc, Once, RwLock};

static INIT: Once = Once::new();

/// Initializes the tracing subscriber and loads .env for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

// --- Mock AI Provider for Logic Testing ---

/// Replays scripted responses in order and records every call.
#[derive(Clone, Debug)]
pub struct MockAiProvider {
    pub call_history: Arc<RwLock<Vec<(String, String)>>>,
    pub responses: Arc<RwLock<Vec<Result<String, String>>>>,
}

impl MockAiProvider {
    pub fn new(responses: Vec<String>) -> Self {
        Self::scripted(responses.into_iter().map(Ok).collect())
    }

    /// A provider whose every call fails like a dropped connection.
    pub fn failing(message: &str) -> Self {
        Self::scripted(vec![Err(message.to_string())])
    }

    pub fn scripted(responses: Vec<Result<String, String>>) -> Self {
        Self {
            call_history: Arc::new(RwLock::new(Vec::new())),
            responses: Arc::new(RwLock::new(responses.into_iter().rev().collect())),
        }
    }

    pub fn calls(&self) -> usize {
        self.call_history.read().unwrap().len()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, ProviderError> {
        self.call_history
            .write()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        match self.responses.write().unwrap().pop() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(ProviderError::AiApi {
                status: 503,
                body: message,
            }),
            None => Ok("{}".to_string()),
        }
    }
}

// --- Mock Image Provider ---

#[derive(Clone, Debug)]
pub struct MockImageProvider {
    pub requests: Arc<RwLock<Vec<ImageRequest>>>,
    pub url: Option<String>,
}

impl MockImageProvider {
    pub fn returning(url: &str) -> Self {
        Self {
            requests: Arc::new(RwLock::new(Vec::new())),
            url: Some(url.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self {
            requests: Arc::new(RwLock::new(Vec::new())),
            url: None,
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.read().unwrap().len()
    }
}

#[async_trait]
impl ImageProvider for MockImageProvider {
    async fn generate_image(&self, request: &ImageRequest) -> Result<String, ProviderError> {
        self.requests.write().unwrap().push(request.clone());
        self.url.clone().ok_or(ProviderError::AiApi {
            status: 400,
            body: "content policy violation".to_string(),
        })
    }
}
