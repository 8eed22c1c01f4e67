pub mod gemini;
pub mod openai;

use crate::errors::ProviderError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with a generative language model.
///
/// Every pipeline in this crate talks to the model through this trait, so a
/// provider only has to turn a system and user prompt into the model's raw text.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response from a given system and user prompt.
    ///
    /// The result is the model's raw, unprocessed text.
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, ProviderError>;
}

dyn_clone::clone_trait_object!(AiProvider);
