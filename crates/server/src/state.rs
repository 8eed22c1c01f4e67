//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. Every credential is checked here, so a server
//! that starts is a server that can serve requests.

use crate::config::{AppConfig, IMAGE_PROMPT_TASK, TEXT_ANALYSIS_TASK};
use anyhow::{anyhow, Context};
use diary_insight::{
    analysis::default_prompts,
    prompts::tasks::{IMAGE_PROMPT_SYSTEM_PROMPT, IMAGE_PROMPT_USER_PROMPT},
    providers::{
        ai::AiProvider, factory::create_ai_provider, image::openai::OpenAiImageProvider,
    },
    ImageGenerator, TaskPrompts, TextAnalyzer, TextAnalyzerBuilder,
};
use std::{collections::HashMap, sync::Arc};
use tracing::info;

/// A fully resolved task configuration with non-optional fields.
#[derive(Clone, Debug)]
pub struct ResolvedTask {
    pub provider: String,
    pub prompts: TaskPrompts,
}

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The key clients must present. Guaranteed non-empty.
    pub service_key: Arc<String>,
    pub analyzer: Arc<TextAnalyzer>,
    pub image_generator: Arc<ImageGenerator>,
}

/// Builds the shared application state from the configuration.
///
/// Fails when the service key, a provider key or the image key is missing
/// or empty, or when a task refers to an unknown provider.
pub fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let service_key = config
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            anyhow!("api_key is required. Please set AI_SERVICE_API_KEY in your .env file.")
        })?;

    let mut ai_providers: HashMap<String, Box<dyn AiProvider>> = HashMap::new();
    for (name, provider_config) in &config.providers {
        let provider = create_ai_provider(name, provider_config)
            .with_context(|| format!("Failed to configure AI provider '{name}'"))?;
        ai_providers.insert(name.clone(), provider);
    }

    let format = config.analysis.response_format;
    let analysis_task = resolve_task(&config, TEXT_ANALYSIS_TASK, default_prompts(format))?;
    let image_task = resolve_task(
        &config,
        IMAGE_PROMPT_TASK,
        TaskPrompts::new(IMAGE_PROMPT_SYSTEM_PROMPT, IMAGE_PROMPT_USER_PROMPT),
    )?;

    let analyzer = TextAnalyzerBuilder::new()
        .ai_provider(provider_for(&ai_providers, &analysis_task)?)
        .prompts(analysis_task.prompts)
        .response_format(format)
        .build()?;
    info!(provider = %analysis_task.provider, ?format, "Configured text analysis");

    let image_api_key = config
        .image
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| anyhow!("image.api_key is required for image generation"))?;
    let image_provider = OpenAiImageProvider::new(
        config.image.api_url.clone(),
        image_api_key,
        config.image.model_name.clone(),
        config.image.quality.clone(),
    )?;
    let image_generator = ImageGenerator::with_prompts(
        provider_for(&ai_providers, &image_task)?,
        Box::new(image_provider),
        image_task.prompts,
    );
    info!(provider = %image_task.provider, model = %config.image.model_name, "Configured image generation");

    Ok(AppState {
        service_key: Arc::new(service_key),
        analyzer: Arc::new(analyzer),
        image_generator: Arc::new(image_generator),
    })
}

/// Merges a configured task over its built-in prompts.
fn resolve_task(
    config: &AppConfig,
    name: &str,
    defaults: TaskPrompts,
) -> anyhow::Result<ResolvedTask> {
    let task = config.tasks.get(name).cloned().unwrap_or_default();
    let provider = task
        .provider
        .ok_or_else(|| anyhow!("Task '{name}' is missing required 'provider' field"))?;

    Ok(ResolvedTask {
        provider,
        prompts: TaskPrompts {
            system_prompt: task.system_prompt.unwrap_or(defaults.system_prompt),
            user_prompt: task.user_prompt.unwrap_or(defaults.user_prompt),
        },
    })
}

fn provider_for(
    ai_providers: &HashMap<String, Box<dyn AiProvider>>,
    task: &ResolvedTask,
) -> anyhow::Result<Box<dyn AiProvider>> {
    ai_providers.get(&task.provider).cloned().ok_or_else(|| {
        anyhow!(
            "Task refers to provider '{}', which is not defined under 'providers'",
            task.provider
        )
    })
}
