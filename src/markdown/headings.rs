//! Heading extraction and anchor identifiers
//!
//! `anchor_id` is the one normalization function shared by the extractor and
//! the renderer. Both sides must produce identical identifiers or the table
//! of contents will point at anchors that do not exist.

/// A heading found in a markdown body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Heading level, 1 through 3
    pub level: u8,
    /// Display text with markers stripped
    pub text: String,
    /// Anchor identifier derived from the text
    pub id: String,
}

/// Characters removed from heading text before hyphenation
const STRIPPED: &str = "`~!@#$%^&*()+=<>?,./:;\"'|[]\\{}";

/// Normalize heading text into an anchor identifier: lowercase, strip
/// punctuation, collapse whitespace runs to single hyphens. Idempotent.
pub fn anchor_id(text: &str) -> String {
    let lowered = text.to_lowercase();
    let cleaned: String = lowered.chars().filter(|c| !STRIPPED.contains(*c)).collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Extract level 1-3 headings from a markdown body.
///
/// Fenced code blocks are skipped: a line whose trimmed content starts with
/// ``` toggles the fence state, and heading-like lines inside a fence are
/// ignored. Headings deeper than level 3 are not extracted.
pub fn extract_headings(markdown: &str) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut in_code_block = false;

    for line in markdown.lines() {
        if line.trim().starts_with("```") {
            in_code_block = !in_code_block;
            continue;
        }
        if in_code_block {
            continue;
        }

        let (level, rest) = if let Some(rest) = line.strip_prefix("### ") {
            (3, rest)
        } else if let Some(rest) = line.strip_prefix("## ") {
            (2, rest)
        } else if let Some(rest) = line.strip_prefix("# ") {
            (1, rest)
        } else {
            continue;
        };

        let text = rest.trim().to_string();
        let id = anchor_id(&text);
        headings.push(Heading { level, text, id });
    }

    headings
}
