//! Creator profile and completion-text parsing.
//!
//! The completion service returns freeform text; the only structure we
//! rely on is comma separation for subject/style lists and newline
//! separation for prompt lists.

use serde::{Deserialize, Serialize};

/// A finalized creative profile driving prompt generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatorProfile {
    /// Kind of AI creator (e.g. "nature photographer").
    pub ai_type: String,
    pub photo_subject: String,
    pub photo_style: String,
    /// Display name of the persona.
    pub name: String,
}

/// Split a comma-separated completion into trimmed, non-empty items.
pub fn split_comma_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Split a newline-separated completion into non-empty lines.
pub fn split_prompt_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
