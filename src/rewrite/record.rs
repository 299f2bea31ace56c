use crate::constants::MATCHED_TEXT_LIMIT;
use serde::{Deserialize, Serialize};

/// One processed match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeItem {
    pub rule_name: String,
    /// Matched text, truncated to [`MATCHED_TEXT_LIMIT`] characters.
    pub matched_text: String,
    pub replacement_text: String,
}

impl ChangeItem {
    pub fn new(rule_name: &str, matched: &str, replacement: &str) -> Self {
        Self {
            rule_name: rule_name.to_string(),
            matched_text: truncate_matched(matched),
            replacement_text: replacement.to_string(),
        }
    }
}

/// Every change made to one modified file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Path relative to the templates directory.
    pub file: String,
    pub replacement_count: usize,
    pub items: Vec<ChangeItem>,
}

fn truncate_matched(text: &str) -> String {
    match text.char_indices().nth(MATCHED_TEXT_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
