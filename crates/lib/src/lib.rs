//! # Diary Insight
//!
//! This crate turns free-form diary entries into structured annotations using an
//! external language model, and into illustrations using an external image model.
//!
//! The model only ever returns text. The value of this crate is in what happens
//! after: isolating the JSON the model embedded, validating its shape, gating it
//! on the reported confidence and merging the optional moderation report, so that
//! callers always receive a well-formed `AnalysisResult`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use diary_insight::providers::ai::openai::OpenAiProvider;
//! use diary_insight::TextAnalyzerBuilder;
//!
//! async fn analyze() {
//!     let ai_provider = OpenAiProvider::new(
//!         "https://api.openai.com/v1/chat/completions".to_string(),
//!         Some("sk-...".to_string()),
//!         Some("gpt-4.1-nano".to_string()),
//!         0.2,
//!     )
//!     .unwrap();
//!     let analyzer = TextAnalyzerBuilder::new()
//!         .ai_provider(Box::new(ai_provider))
//!         .build()
//!         .unwrap();
//!
//!     let result = analyzer.analyze_text("Another late night finishing the report.").await;
//!     println!("analyzed: {}, category: {:?}", result.is_analyzed, result.category);
//! }
//! ```

pub mod analysis;
pub mod errors;
pub mod image;
pub mod prompts;
pub mod providers;
pub mod types;

pub use analysis::{
    process_model_output, AnalysisOutcome, AnalysisResult, Category, InsufficientReason,
    ModerationEntry, ResponseFormat, TextAnalyzer, TextAnalyzerBuilder,
};
pub use errors::{PipelineError, ProviderError};
pub use image::{GenerationOptions, ImageGenerationResult, ImageGenerator};
pub use types::{ProviderConfig, TaskPrompts};
