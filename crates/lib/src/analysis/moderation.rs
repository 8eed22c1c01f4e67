//! Folds the moderation sub-report into an analyzed result.

use crate::analysis::{
    sections::MODERATION_FLAG_KEY,
    types::{AnalysisResult, ModerationEntry, MASK_GLYPH},
};
use serde_json::{Map, Value};
use tracing::warn;

/// Reads the moderation flag. Only `true` (or the string `"true"`) raises it.
pub fn is_flagged(section: &Map<String, Value>) -> bool {
    match section.get(MODERATION_FLAG_KEY) {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(flag)) => flag.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Checks that an entry masks by character: the masked text has as many
/// characters as the original and contains at least one placeholder glyph.
pub fn masking_matches(entry: &ModerationEntry) -> bool {
    entry.masked_text.contains(MASK_GLYPH)
        && entry.masked_text.chars().count() == entry.original_text.chars().count()
}

fn read_entries(value: Option<&Value>) -> Vec<ModerationEntry> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<ModerationEntry>(item.clone()) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Dropping malformed moderation entry {item}: {e}");
                None
            }
        })
        .collect()
}

/// Merges a moderation section into an analyzed result.
///
/// Without a flagged section the optional moderation fields are cleared. With
/// one, `maskedContent` is copied verbatim and each `inappropriateContent`
/// entry is read as a [`ModerationEntry`]. Entries are therefore copied
/// verbatim only when well shaped: an entry missing a string field is dropped
/// with a warning, and keys outside the three entry fields are not kept. A
/// flagged section left without masked text or entries is treated as
/// unflagged.
pub fn merge_moderation(
    result: AnalysisResult,
    moderation: Option<&Map<String, Value>>,
) -> AnalysisResult {
    let unflagged = AnalysisResult {
        has_inappropriate_content: false,
        masked_content: None,
        inappropriate_content: None,
        ..result
    };

    let Some(section) = moderation.filter(|section| is_flagged(section)) else {
        return unflagged;
    };

    let masked_content = section
        .get("maskedContent")
        .and_then(Value::as_str)
        .filter(|content| !content.is_empty())
        .map(String::from);
    let entries = read_entries(section.get("inappropriateContent"));

    let Some(masked_content) = masked_content.filter(|_| !entries.is_empty()) else {
        warn!("Moderation flagged content without masked text or entries; treating as clean.");
        return unflagged;
    };

    for entry in entries.iter().filter(|entry| !masking_matches(entry)) {
        warn!(
            category = %entry.category,
            "Masked text length does not match the original text."
        );
    }

    AnalysisResult {
        has_inappropriate_content: true,
        masked_content: Some(masked_content),
        inappropriate_content: Some(entries),
        ..unflagged
    }
}
