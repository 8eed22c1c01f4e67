//! Coerces the loosely typed fields of an analysis section into typed values.

use crate::{
    analysis::{extract::json_type, types::Category},
    errors::PipelineError,
};
use serde_json::{Map, Value};
use tracing::warn;

/// Normalizes a list field that the model may send as an array or as a
/// comma-separated string. Anything else becomes an empty list.
pub fn normalize_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str())
            .map(String::from)
            .collect(),
        Some(Value::String(joined)) => joined
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

/// A well-formed analysis section, before the confidence gate runs.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSection {
    pub category: Option<Category>,
    pub subcategories: Vec<String>,
    pub primary_emotion: Option<String>,
    pub secondary_emotion: Option<String>,
    pub keywords: Vec<String>,
    pub tone: Option<String>,
    pub time_focus: Option<String>,
    /// The score exactly as the model sent it; the gate decides what it means.
    pub confidence_score: Option<Value>,
}

impl AnalysisSection {
    /// Validates the shape of an analysis section.
    ///
    /// Descriptive fields must be strings or null. List fields never fail.
    pub fn from_map(section: &Map<String, Value>) -> Result<Self, PipelineError> {
        let category = match optional_text(section, "category")? {
            Some(label) => {
                let category = Category::from_label(&label);
                if category.is_none() {
                    warn!("Discarding unknown category label '{label}'");
                }
                category
            }
            None => None,
        };

        Ok(Self {
            category,
            subcategories: normalize_list(section.get("subcategories")),
            primary_emotion: optional_text(section, "primaryEmotion")?,
            secondary_emotion: optional_text(section, "secondaryEmotion")?,
            keywords: normalize_list(section.get("keywords")),
            tone: optional_text(section, "tone")?,
            time_focus: optional_text(section, "timeFocus")?,
            confidence_score: section.get("confidenceScore").cloned(),
        })
    }
}

fn optional_text(section: &Map<String, Value>, key: &str) -> Result<Option<String>, PipelineError> {
    match section.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(other) => Err(PipelineError::MalformedAnalysis(format!(
            "'{key}' must be a string, found {}",
            json_type(other)
        ))),
    }
}
