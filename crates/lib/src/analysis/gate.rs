//! The confidence gate: the single accept/reject decision of the pipeline.

use crate::analysis::types::InsufficientReason;
use serde_json::Value;

/// Scores at or below this value are rejected as low confidence.
pub const CONFIDENCE_THRESHOLD: f64 = 50.0;
pub const MIN_CONFIDENCE: f64 = 0.0;
pub const MAX_CONFIDENCE: f64 = 100.0;

/// The result of running the gate over one raw score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateDecision {
    /// Carries the coerced score forward unchanged.
    Analyzed(f64),
    Insufficient(InsufficientReason),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceGate {
    threshold: f64,
}

impl Default for ConfidenceGate {
    fn default() -> Self {
        Self {
            threshold: CONFIDENCE_THRESHOLD,
        }
    }
}

impl ConfidenceGate {
    pub fn evaluate(&self, raw: Option<&Value>) -> GateDecision {
        let score = match coerce_score(raw) {
            Some(score) if score.is_finite() && (MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&score) => {
                score
            }
            _ => return GateDecision::Insufficient(InsufficientReason::InvalidConfidence),
        };

        if score <= self.threshold {
            GateDecision::Insufficient(InsufficientReason::LowConfidence)
        } else {
            GateDecision::Analyzed(score)
        }
    }
}

/// Coerces a raw JSON value into a number the way a numeric cast would.
///
/// Strings are trimmed and parsed (an empty string is zero), booleans are 1/0
/// and null is zero. A missing value, an array or an object is not a number.
pub fn coerce_score(raw: Option<&Value>) -> Option<f64> {
    match raw? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                Some(0.0)
            } else {
                text.parse::<f64>().ok()
            }
        }
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::Array(_) | Value::Object(_) => None,
    }
}
