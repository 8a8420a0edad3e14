// src/extractors/section.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;

// --- Constants ---
/// Markdown heading marker that opens every section of the issue form.
pub const HEADING_MARKER: &str = "###";

// --- Regex Patterns (Lazy Static) ---
// A checked checkbox line, already trimmed: "- [x] " followed by the item text.
static CHECKED_ITEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^- \[x\] (.+)").expect("Failed to compile CHECKED_ITEM_RE")
});

// --- Main Extractor Structure ---
pub struct SectionExtractor;

impl SectionExtractor {
    pub fn new() -> Self { Self {} }

    /// Returns the trimmed text between the heading `### {title}` (followed by a
    /// blank line) and the next heading or end of input.
    ///
    /// A missing heading is not an error: the section is simply empty.
    pub fn extract(&self, body: &str, title: &str) -> Result<String, ExtractError> {
        let pattern = section_pattern(title)?;

        match pattern.captures(body).and_then(|caps| caps.get(1)) {
            Some(content) => {
                let text = content.as_str().trim();
                tracing::debug!("Found section '{}' ({} bytes)", title, text.len());
                Ok(text.to_string())
            }
            None => {
                tracing::debug!("Section '{}' not present in issue body", title);
                Ok(String::new())
            }
        }
    }

    /// Collects the item text of every checked checkbox line, in source order.
    /// Unchecked boxes, free text and blank lines are skipped. Duplicates are kept.
    pub fn checked_items(&self, section_text: &str) -> Vec<String> {
        let items: Vec<String> = section_text
            .lines()
            .filter_map(|line| CHECKED_ITEM_RE.captures(line.trim()))
            .filter_map(|caps| caps.get(1))
            .map(|item| item.as_str().trim().to_string())
            .collect();

        tracing::debug!("Found {} checked item(s)", items.len());
        items
    }
}

/// Builds the capture pattern for one section. The title is matched literally,
/// so titles such as "Special Observations (Optional)" need no manual escaping.
fn section_pattern(title: &str) -> Result<Regex, ExtractError> {
    let pattern = format!(
        r"(?s){marker} {title}\n\n(.*?)(?:\n{marker}|\z)",
        marker = regex::escape(HEADING_MARKER),
        title = regex::escape(title),
    );

    Regex::new(&pattern).map_err(|source| ExtractError::Pattern {
        title: title.to_string(),
        source,
    })
}
