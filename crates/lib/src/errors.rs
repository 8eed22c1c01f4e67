use thiserror::Error;

/// Errors raised while talking to an external language or image model.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error ({status}): {body}")]
    AiApi { status: u16, body: String },
    #[error("AI provider returned an empty response")]
    EmptyResponse,
    #[error("Unsupported AI provider type: {0}")]
    UnsupportedProvider(String),
    #[error("API key is missing for provider '{0}'")]
    MissingApiKey(String),
    #[error("No AI provider was configured")]
    MissingAiProvider,
}

/// Failures of the text analysis pipeline.
///
/// None of these ever reach an HTTP caller: the pipeline boundary logs them and
/// collapses them into the insufficient-data result.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Input text is empty")]
    EmptyInput,
    #[error("Upstream model call failed: {0}")]
    Upstream(#[from] ProviderError),
    #[error("Unable to extract JSON from the model output: {0}")]
    Extraction(String),
    #[error("Model output is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Analysis section is malformed: {0}")]
    MalformedAnalysis(String),
}
