// src/extractors/record.rs
use crate::extractors::section::SectionExtractor;
use crate::utils::error::ExtractError;
use serde::Serialize;

// --- Constants ---
/// Filler the issue tracker inserts when an optional form field is left blank.
/// Compared case-insensitively.
pub const NO_RESPONSE_PLACEHOLDER: &str = "_no response_";

/// Section titles of the investigation request issue form.
pub mod titles {
    pub const DEPTH: &str = "Investigation Depth";
    pub const TARGET: &str = "Target Repository URL";
    pub const METHODOLOGY: &str = "Methodology (The Wisdom Ladder)";
    pub const INTENT: &str = "Intent / Strategic Context (Optional)";
    pub const CLUES: &str = "Special Observations (Optional)";
}

/// Shell variable names, in output order.
pub mod vars {
    pub const TARGET: &str = "AGENT_TARGET";
    pub const DEPTH: &str = "AGENT_DEPTH";
    pub const TOOLS: &str = "AGENT_TOOLS";
    pub const INTENT: &str = "AGENT_INTENT";
    pub const CLUES: &str = "AGENT_CLUES";
}

// --- Data Structures ---
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IssueRecord {
    pub target: String,
    pub depth: String,
    pub tools: String, // Checked methodology items joined with ", "
    pub intent: String,
    pub clues: String,
}

impl IssueRecord {
    /// The five (variable, value) pairs in the order they are written out.
    pub fn assignments(&self) -> [(&'static str, &str); 5] {
        [
            (vars::TARGET, self.target.as_str()),
            (vars::DEPTH, self.depth.as_str()),
            (vars::TOOLS, self.tools.as_str()),
            (vars::INTENT, self.intent.as_str()),
            (vars::CLUES, self.clues.as_str()),
        ]
    }
}

pub struct RecordAssembler {
    extractor: SectionExtractor,
}

impl RecordAssembler {
    pub fn new() -> Self {
        Self { extractor: SectionExtractor::new() }
    }

    /// Extracts all five fields from a raw issue body.
    pub fn assemble(&self, issue_body: &str) -> Result<IssueRecord, ExtractError> {
        // Headings are matched against "\n\n"; fold Windows line endings first.
        let body = issue_body.replace("\r\n", "\n");

        let target = self.extractor.extract(&body, titles::TARGET)?;
        let depth = self.extractor.extract(&body, titles::DEPTH)?;

        let methodology = self.extractor.extract(&body, titles::METHODOLOGY)?;
        let tools = self.extractor.checked_items(&methodology).join(", ");

        let intent = normalize_placeholder(self.extractor.extract(&body, titles::INTENT)?);
        let clues = normalize_placeholder(self.extractor.extract(&body, titles::CLUES)?);

        let record = IssueRecord { target, depth, tools, intent, clues };
        tracing::debug!("Assembled issue record: {:?}", record);
        Ok(record)
    }
}

/// Maps the "no response" filler to an empty string; any other value passes through.
fn normalize_placeholder(value: String) -> String {
    if value.to_lowercase() == NO_RESPONSE_PLACEHOLDER {
        tracing::debug!("Normalized placeholder '{}' to empty", value);
        String::new()
    } else {
        value
    }
}
