//! # Text Analysis Pipeline
//!
//! This module turns a diary entry into a validated `AnalysisResult`. The model
//! does the language understanding; everything here is post-processing of its
//! raw text:
//!
//! 1.  **Extract**: isolate the JSON object in the model output.
//! 2.  **Split**: separate the analysis and moderation sections.
//! 3.  **Normalize**: coerce list fields and validate the section's shape.
//! 4.  **Gate**: accept or reject the confidence score.
//! 5.  **Assemble & Merge**: build the record and fold in flagged moderation data.
//!
//! Every failure collapses into the single insufficient-data outcome.

pub mod assemble;
pub mod extract;
pub mod gate;
pub mod moderation;
pub mod normalize;
pub mod sections;
pub mod types;

use crate::{
    errors::{PipelineError, ProviderError},
    prompts::tasks::{
        TEXT_ANALYSIS_ONLY_SYSTEM_PROMPT, TEXT_ANALYSIS_SYSTEM_PROMPT, TEXT_ANALYSIS_USER_PROMPT,
    },
    providers::ai::AiProvider,
    types::TaskPrompts,
};
use tracing::{debug, error, info, warn};

pub use gate::{ConfidenceGate, GateDecision};
pub use sections::ResponseFormat;
pub use types::{
    AnalysisOutcome, AnalysisResult, Category, InsufficientReason, ModerationEntry,
};

/// Runs every post-processing stage over one raw model response.
///
/// This is a pure function of its inputs, so running it over an already
/// assembled result (serialized back to JSON) yields the same result.
pub fn process_model_output(raw: &str, format: ResponseFormat) -> AnalysisOutcome {
    match run_stages(raw, format, &ConfidenceGate::default()) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Failed to analyze model output: {e}");
            debug!("Unparseable model output: '{raw}'");
            AnalysisOutcome::Insufficient(InsufficientReason::AnalysisError)
        }
    }
}

fn run_stages(
    raw: &str,
    format: ResponseFormat,
    gate: &ConfidenceGate,
) -> Result<AnalysisOutcome, PipelineError> {
    let object = extract::parse_object(raw)?;
    let sections = sections::split_sections(&object, format)?;
    let section = normalize::AnalysisSection::from_map(sections.analysis)?;

    let score = match gate.evaluate(section.confidence_score.as_ref()) {
        GateDecision::Analyzed(score) => score,
        GateDecision::Insufficient(reason) => {
            info!(confidence = ?section.confidence_score, "Analysis rejected: {reason}");
            return Ok(AnalysisOutcome::Insufficient(reason));
        }
    };

    let result = assemble::assemble(section, score);
    Ok(AnalysisOutcome::Analyzed(moderation::merge_moderation(
        result,
        sections.moderation,
    )))
}

/// Analyzes diary entries with an injected AI provider.
#[derive(Debug, Clone)]
pub struct TextAnalyzer {
    ai_provider: Box<dyn AiProvider>,
    prompts: TaskPrompts,
    format: ResponseFormat,
}

impl TextAnalyzer {
    /// The response shape this analyzer prompts for and parses.
    pub fn format(&self) -> ResponseFormat {
        self.format
    }

    /// Analyzes one entry and reports which terminal state it reached.
    pub async fn analyze(&self, text: &str) -> AnalysisOutcome {
        if text.trim().is_empty() {
            info!("Analysis skipped: {}", PipelineError::EmptyInput);
            return AnalysisOutcome::Insufficient(InsufficientReason::EmptyInput);
        }

        let user_prompt = self.prompts.render_user_prompt(text);
        debug!(system_prompt = %self.prompts.system_prompt, user_prompt = %user_prompt, "--> Sending prompts to AI Provider");

        let raw_response = match self
            .ai_provider
            .generate(&self.prompts.system_prompt, &user_prompt)
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                error!("Failed to analyze text: {}", PipelineError::from(e));
                return AnalysisOutcome::Insufficient(InsufficientReason::AnalysisError);
            }
        };
        debug!("<-- Analysis from AI: {}", &raw_response);

        process_model_output(&raw_response, self.format)
    }

    /// Analyzes one entry and returns the response record.
    pub async fn analyze_text(&self, text: &str) -> AnalysisResult {
        let outcome = self.analyze(text).await;
        if let AnalysisOutcome::Insufficient(reason) = &outcome {
            warn!("Returning insufficient-data result: {reason}");
        }
        outcome.into_result()
    }
}

/// A builder for creating `TextAnalyzer` instances.
#[derive(Default)]
pub struct TextAnalyzerBuilder {
    ai_provider: Option<Box<dyn AiProvider>>,
    prompts: Option<TaskPrompts>,
    format: ResponseFormat,
}

impl TextAnalyzerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the AI provider that produces the raw analysis.
    pub fn ai_provider(mut self, ai_provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(ai_provider);
        self
    }

    /// Overrides the prompts. Defaults follow the response format.
    pub fn prompts(mut self, prompts: TaskPrompts) -> Self {
        self.prompts = Some(prompts);
        self
    }

    pub fn response_format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    /// Builds the `TextAnalyzer`, failing if no AI provider was set.
    pub fn build(self) -> Result<TextAnalyzer, ProviderError> {
        let ai_provider = self.ai_provider.ok_or(ProviderError::MissingAiProvider)?;
        let prompts = self.prompts.unwrap_or_else(|| default_prompts(self.format));
        Ok(TextAnalyzer {
            ai_provider,
            prompts,
            format: self.format,
        })
    }
}

/// The built-in prompts for a response format.
pub fn default_prompts(format: ResponseFormat) -> TaskPrompts {
    let system_prompt = match format {
        ResponseFormat::WithModeration => TEXT_ANALYSIS_SYSTEM_PROMPT,
        ResponseFormat::AnalysisOnly => TEXT_ANALYSIS_ONLY_SYSTEM_PROMPT,
    };
    TaskPrompts::new(system_prompt, TEXT_ANALYSIS_USER_PROMPT)
}
