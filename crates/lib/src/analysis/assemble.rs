use crate::analysis::{
    normalize::AnalysisSection,
    types::{AnalysisResult, MAX_KEYWORDS, MAX_SUBCATEGORIES},
};

/// Builds the analyzed record from a validated section and its gated score.
///
/// List fields are capped at their maximum length, keeping the model's order.
/// Moderation fields start cleared; the merger fills them in.
pub fn assemble(section: AnalysisSection, confidence_score: f64) -> AnalysisResult {
    let AnalysisSection {
        category,
        mut subcategories,
        primary_emotion,
        secondary_emotion,
        mut keywords,
        tone,
        time_focus,
        confidence_score: _,
    } = section;

    subcategories.truncate(MAX_SUBCATEGORIES);
    keywords.truncate(MAX_KEYWORDS);

    AnalysisResult {
        category,
        subcategories,
        primary_emotion,
        secondary_emotion,
        keywords,
        tone,
        time_focus,
        confidence_score,
        is_analyzed: true,
        has_inappropriate_content: false,
        masked_content: None,
        inappropriate_content: None,
    }
}
