use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// The placeholder glyph that replaces each character of a masked word.
pub const MASK_GLYPH: char = '🐾';
/// The most subcategories a result may carry.
pub const MAX_SUBCATEGORIES: usize = 3;
/// The most keywords a result may carry.
pub const MAX_KEYWORDS: usize = 5;

/// The closed set of topic categories a diary entry can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Work,
    Personal,
    Family,
    Health,
    Relationships,
    Education,
    Hobbies,
    Travel,
    Finance,
    Spirituality,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Work,
        Category::Personal,
        Category::Family,
        Category::Health,
        Category::Relationships,
        Category::Education,
        Category::Hobbies,
        Category::Travel,
        Category::Finance,
        Category::Spirituality,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::Family => "Family",
            Category::Health => "Health",
            Category::Relationships => "Relationships",
            Category::Education => "Education",
            Category::Hobbies => "Hobbies",
            Category::Travel => "Travel",
            Category::Finance => "Finance",
            Category::Spirituality => "Spirituality",
        }
    }

    /// Matches a model-supplied label, ignoring case and surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One piece of flagged content reported by the moderation section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationEntry {
    pub original_text: String,
    pub category: String,
    pub masked_text: String,
}

/// The validated annotation of one diary entry.
///
/// `masked_content` and `inappropriate_content` are omitted from the JSON
/// entirely (not `null`) unless `has_inappropriate_content` is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub category: Option<Category>,
    pub subcategories: Vec<String>,
    pub primary_emotion: Option<String>,
    pub secondary_emotion: Option<String>,
    pub keywords: Vec<String>,
    pub tone: Option<String>,
    pub time_focus: Option<String>,
    #[serde(serialize_with = "serialize_score")]
    pub confidence_score: f64,
    pub is_analyzed: bool,
    #[serde(default)]
    pub has_inappropriate_content: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masked_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inappropriate_content: Option<Vec<ModerationEntry>>,
}

impl AnalysisResult {
    /// The canonical insufficient-data shape.
    pub fn insufficient() -> Self {
        Self {
            category: None,
            subcategories: Vec::new(),
            primary_emotion: None,
            secondary_emotion: None,
            keywords: Vec::new(),
            tone: None,
            time_focus: None,
            confidence_score: 0.0,
            is_analyzed: false,
            has_inappropriate_content: false,
            masked_content: None,
            inappropriate_content: None,
        }
    }
}

// Whole scores go out as integers (`82`, not `82.0`).
fn serialize_score<S: Serializer>(score: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if score.fract() == 0.0 && score.abs() <= i64::MAX as f64 {
        serializer.serialize_i64(*score as i64)
    } else {
        serializer.serialize_f64(*score)
    }
}

/// Why a request ended in the insufficient-data outcome.
///
/// Only used for diagnostics: callers always receive the same result shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsufficientReason {
    EmptyInput,
    AnalysisError,
    InvalidConfidence,
    LowConfidence,
}

impl fmt::Display for InsufficientReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            InsufficientReason::EmptyInput => "empty input",
            InsufficientReason::AnalysisError => "analysis error",
            InsufficientReason::InvalidConfidence => "invalid confidence score",
            InsufficientReason::LowConfidence => "low confidence",
        };
        f.write_str(reason)
    }
}

/// The two terminal states of the analysis pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Analyzed(AnalysisResult),
    Insufficient(InsufficientReason),
}

impl AnalysisOutcome {
    pub fn is_analyzed(&self) -> bool {
        matches!(self, AnalysisOutcome::Analyzed(_))
    }

    /// Collapses the outcome into the response record.
    pub fn into_result(self) -> AnalysisResult {
        match self {
            AnalysisOutcome::Analyzed(result) => result,
            AnalysisOutcome::Insufficient(_) => AnalysisResult::insufficient(),
        }
    }
}
