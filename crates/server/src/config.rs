//! # Application Configuration
//!
//! This module defines the configuration structure for the `diary-insight-server`
//! and the logic for loading it from a YAML file and environment variables.
//!
//! Layers, from lowest to highest priority:
//!
//! 1.  Built-in task defaults (prompts shipped with the library).
//! 2.  `config.yml`, or `config.{AI_PROVIDER}.yml` when it does not exist.
//! 3.  An optional `prompt.yml` with prompt overrides.
//! 4.  Plain environment variables for top-level keys such as `PORT`.
//! 5.  `DIARY_`-prefixed variables for nested keys
//!     (e.g. `DIARY_ANALYSIS__RESPONSE_FORMAT=analysis_only`).

use config::{
    Config as ConfigBuilder, Environment, File, FileFormat, Value as ConfigValue,
    ValueKind as ConfigValueKind,
};
use diary_insight::{
    prompts::tasks::{IMAGE_PROMPT_SYSTEM_PROMPT, IMAGE_PROMPT_USER_PROMPT, TEXT_ANALYSIS_USER_PROMPT},
    ProviderConfig, ResponseFormat,
};
use regex::Regex;
use serde::Deserialize;
use std::{collections::HashMap, env, fs, path::Path};
use tracing::info;

/// Task key for diary text analysis.
pub const TEXT_ANALYSIS_TASK: &str = "text_analysis";
/// Task key for turning a diary entry into an image prompt.
pub const IMAGE_PROMPT_TASK: &str = "image_prompt";

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

impl From<regex::Error> for ConfigError {
    fn from(err: regex::Error) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The shared key clients must send in the `x-ai-api-key` header.
    #[serde(default)]
    pub api_key: Option<String>,
    /// A map of named, reusable AI provider configurations.
    pub providers: HashMap<String, ProviderConfig>,
    /// The image model used by `/ai/generate_image`.
    pub image: ImageConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// A map of tasks, each specifying a provider and prompts.
    pub tasks: HashMap<String, TaskConfig>,
}

fn default_port() -> u16 {
    9090
}

/// Configuration for the image generation model.
#[derive(Debug, Deserialize, Clone)]
pub struct ImageConfig {
    #[serde(default = "default_image_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_image_model")]
    pub model_name: String,
    #[serde(default = "default_image_quality")]
    pub quality: String,
}

fn default_image_api_url() -> String {
    "https://api.openai.com/v1/images/generations".to_string()
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

fn default_image_quality() -> String {
    "standard".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AnalysisConfig {
    /// Which model response shape the analysis prompt asks for.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

/// Defines the prompts and provider for a specific application task.
///
/// Unset prompts fall back to the library defaults when the state is built.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TaskConfig {
    /// The key of the provider to use from the `providers` map.
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub user_prompt: Option<String>,
}

/// Constructs a `config::Value` map of the default tasks.
///
/// The analysis system prompt is left unset here because it depends on the
/// configured response format, which is only known after all layers load.
fn build_default_tasks() -> HashMap<String, ConfigValue> {
    let tasks = vec![
        (
            TEXT_ANALYSIS_TASK,
            ("analysis_default", None, TEXT_ANALYSIS_USER_PROMPT),
        ),
        (
            IMAGE_PROMPT_TASK,
            (
                "image_prompt_default",
                Some(IMAGE_PROMPT_SYSTEM_PROMPT),
                IMAGE_PROMPT_USER_PROMPT,
            ),
        ),
    ];

    tasks
        .into_iter()
        .map(|(name, (provider, sys, user))| {
            let mut table = HashMap::new();
            table.insert("provider".to_string(), ConfigValue::from(provider));
            if let Some(sys) = sys {
                table.insert("system_prompt".to_string(), ConfigValue::from(sys));
            }
            table.insert("user_prompt".to_string(), ConfigValue::from(user));
            (
                name.to_string(),
                ConfigValue::new(None, ConfigValueKind::Table(table)),
            )
        })
        .collect()
}

/// Reads a file and substitutes `${VAR}` references from the environment.
/// Returns `Ok(None)` if the file does not exist.
pub(crate) fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// `config_path_override` replaces the main file lookup, which is how tests
/// point the server at a temporary configuration.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder()
        // Layer 1: Programmatic defaults from the library.
        .set_default("tasks", build_default_tasks())?;

    // Layer 2: Main Config (with Fallback)
    let main_config_path = if let Some(override_path) = config_path_override {
        override_path.to_string()
    } else {
        let user_config_path = format!("{base_path}/config.yml");
        if Path::new(&user_config_path).exists() {
            info!("Loading user-defined configuration from '{user_config_path}'.");
            user_config_path
        } else {
            let provider = env::var("AI_PROVIDER").unwrap_or_else(|_| "openai".to_string());
            let fallback_path = format!("{base_path}/config.{provider}.yml");
            info!("'{user_config_path}' not found. Falling back to '{fallback_path}' based on AI_PROVIDER='{provider}'.");
            fallback_path
        }
    };

    let main_content = read_and_substitute(&main_config_path)?
        .ok_or_else(|| ConfigError::NotFound(format!("Main config file not found at '{main_config_path}'. Please ensure 'config.yml' exists or your AI_PROVIDER is set to load a valid template ('openai' or 'gemini').")))?;
    builder = builder.add_source(File::from_str(&main_content, FileFormat::Yaml));

    // Layer 3: User Prompt Overrides (Optional)
    let user_prompt_path = format!("{base_path}/prompt.yml");
    if let Some(user_prompts_content) = read_and_substitute(&user_prompt_path)? {
        info!("Loading user prompt overrides from '{user_prompt_path}'.");
        builder = builder.add_source(File::from_str(&user_prompts_content, FileFormat::Yaml));
    }

    let settings = builder
        // Layer 4: Top-level keys like PORT.
        .add_source(Environment::default())
        // Layer 5: Prefixed variables for nested overrides.
        .add_source(
            Environment::with_prefix("DIARY")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
