//! Splits a parsed model response into its analysis and moderation sections.

use crate::{analysis::extract::json_type, errors::PipelineError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

pub const ANALYSIS_KEY: &str = "Content Analysis";
pub const MODERATION_KEY: &str = "Content Moderation";
pub const MODERATION_FLAG_KEY: &str = "hasInappropriateContent";

/// The response shape the model is prompted to produce.
#[derive(Default, Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Two keyed sections, `"Content Analysis"` and `"Content Moderation"`. (Default)
    #[default]
    WithModeration,
    /// A single flat analysis object with no moderation support.
    AnalysisOnly,
}

/// Borrowed views of the two sections of a response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sections<'a> {
    pub analysis: &'a Map<String, Value>,
    pub moderation: Option<&'a Map<String, Value>>,
}

/// Looks up the analysis and moderation sections of a parsed response.
///
/// When the analysis key is missing the whole object is the analysis section.
/// The moderation section is always read from its own key; only when that key
/// is absent does a flat object carrying the moderation flag double as it.
pub fn split_sections(
    object: &Map<String, Value>,
    format: ResponseFormat,
) -> Result<Sections<'_>, PipelineError> {
    if format == ResponseFormat::AnalysisOnly {
        return Ok(Sections {
            analysis: object,
            moderation: None,
        });
    }

    let analysis = match object.get(ANALYSIS_KEY) {
        Some(Value::Object(section)) => Some(section),
        None => None,
        Some(other) => {
            return Err(PipelineError::MalformedAnalysis(format!(
                "'{ANALYSIS_KEY}' must be an object, found {}",
                json_type(other)
            )))
        }
    };

    let moderation = match object.get(MODERATION_KEY) {
        Some(Value::Object(section)) => Some(section),
        Some(Value::Null) => None,
        None if analysis.is_none() => {
            object.contains_key(MODERATION_FLAG_KEY).then_some(object)
        }
        None => None,
        Some(other) => {
            warn!(
                "Ignoring '{MODERATION_KEY}' section of type {}",
                json_type(other)
            );
            None
        }
    };

    Ok(Sections {
        analysis: analysis.unwrap_or(object),
        moderation,
    })
}
