//! Isolates the JSON object a model embedded in its text output.

use crate::errors::PipelineError;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::debug;

static FENCE_MARKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json\n?|\n?```").expect("valid fence pattern"));

static OBJECT_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").expect("valid object span pattern"));

/// Returns the JSON-looking span of a raw model response.
///
/// Every fence marker is removed first. If what remains does not start with
/// `{`, the greedy span from the first `{` to the last `}` is used instead.
pub fn extract_json(raw: &str) -> Result<String, PipelineError> {
    let unfenced = FENCE_MARKERS.replace_all(raw, "");
    let trimmed = unfenced.trim();

    if trimmed.starts_with('{') {
        return Ok(trimmed.to_string());
    }

    match OBJECT_SPAN.find(trimmed) {
        Some(m) => {
            debug!("Model wrapped its JSON in prose; using the embedded object span.");
            Ok(m.as_str().to_string())
        }
        None => Err(PipelineError::Extraction(
            "no JSON object found in the model output".to_string(),
        )),
    }
}

/// Extracts and parses the top-level JSON object of a raw model response.
pub fn parse_object(raw: &str) -> Result<Map<String, Value>, PipelineError> {
    let json = extract_json(raw)?;
    match serde_json::from_str::<Value>(&json)? {
        Value::Object(map) => Ok(map),
        other => Err(PipelineError::MalformedAnalysis(format!(
            "expected a JSON object, found {}",
            json_type(&other)
        ))),
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
