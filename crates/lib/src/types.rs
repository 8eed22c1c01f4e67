use serde::Deserialize;

fn default_temperature() -> f32 {
    0.2
}

/// A reusable configuration for a specific AI provider instance.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ProviderConfig {
    /// The type of provider ("openai" or "gemini").
    pub provider: String,
    /// The API URL. Optional for Gemini, where it is derived from the model name.
    #[serde(default)]
    pub api_url: Option<String>,
    /// The API key. Substituted from the environment; an empty value counts as missing.
    #[serde(default)]
    pub api_key: Option<String>,
    pub model_name: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

/// The system and user prompt pair used for one model call.
///
/// The user prompt is a template containing an `{input_text}` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskPrompts {
    pub system_prompt: String,
    pub user_prompt: String,
}

impl TaskPrompts {
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
        }
    }

    /// Renders the user prompt for one input text.
    pub fn render_user_prompt(&self, input_text: &str) -> String {
        self.user_prompt.replace("{input_text}", input_text)
    }
}
