//! Scripted providers for exercising the server without network access.

use async_trait::async_trait;
use diary_insight::{
    providers::{
        ai::AiProvider,
        image::{ImageProvider, ImageRequest},
    },
    ProviderError,
};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

// --- Mock AI Provider ---

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    responses: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pre-programs a response for a specific prompt.
    /// The key should be a unique substring of the system prompt.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(key.to_string(), response.to_string());
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        let responses = self.responses.lock().unwrap();
        for (key, response) in responses.iter() {
            if system_prompt.contains(key) {
                return Ok(response.clone());
            }
        }

        Err(ProviderError::AiApi {
            status: 500,
            body: format!(
                "MockAiProvider: No response programmed for system prompt. Got: '{system_prompt}'"
            ),
        })
    }
}

// --- Mock Image Provider ---

/// Returns a fixed URL, or fails when none is set.
#[derive(Clone, Debug, Default)]
pub struct MockImageProvider {
    url: Option<String>,
    requests: Arc<Mutex<Vec<ImageRequest>>>,
}

impl MockImageProvider {
    pub fn returning(url: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn get_requests(&self) -> Vec<ImageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageProvider for MockImageProvider {
    async fn generate_image(&self, request: &ImageRequest) -> Result<String, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        self.url.clone().ok_or(ProviderError::AiApi {
            status: 400,
            body: "MockImageProvider: content policy violation".to_string(),
        })
    }
}
