// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::extractors::record::IssueRecord;
use crate::utils::error::StorageError;

/// How values are placed between the double quotes of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteMode {
    /// Value inserted unchanged. Embedded `"`, `$` or backticks reach the shell as-is.
    Verbatim,
    /// Backslash-escape the characters that stay special inside double quotes.
    Escaped,
}

pub struct StorageManager {
    input_path: PathBuf,
    output_path: PathBuf,
}

impl StorageManager {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(input_path: P, output_path: Q) -> Self {
        Self {
            input_path: input_path.as_ref().to_path_buf(),
            output_path: output_path.as_ref().to_path_buf(),
        }
    }

    /// Reads the whole issue body. A missing file is fatal for the run.
    pub fn read_issue_body(&self) -> Result<String, StorageError> {
        let body = fs::read_to_string(&self.input_path).map_err(|source| StorageError::Read {
            path: self.input_path.clone(),
            source,
        })?;

        tracing::info!("Read issue body from {} ({} bytes)", self.input_path.display(), body.len());
        Ok(body)
    }

    /// Renders the record and writes it in a single call, replacing any previous file.
    pub fn save_shell_vars(&self, record: &IssueRecord, mode: QuoteMode) -> Result<PathBuf, StorageError> {
        let contents = render_shell_vars(record, mode);

        fs::write(&self.output_path, contents).map_err(|source| StorageError::Write {
            path: self.output_path.clone(),
            source,
        })?;

        tracing::info!("Saved shell variables to {}", self.output_path.display());
        Ok(self.output_path.clone())
    }
}

/// One `NAME="value"` line per field, each terminated by a newline.
pub fn render_shell_vars(record: &IssueRecord, mode: QuoteMode) -> String {
    let mut out = String::new();
    for (name, value) in record.assignments() {
        let value = match mode {
            QuoteMode::Verbatim => value.to_string(),
            QuoteMode::Escaped => escape_double_quoted(value),
        };
        out.push_str(&format!("{}=\"{}\"\n", name, value));
    }
    out
}

/// Pretty JSON view of the record, for `--json`.
pub fn render_json(record: &IssueRecord) -> Result<String, StorageError> {
    serde_json::to_string_pretty(record)
        .map_err(|e| StorageError::SerializationError(e.to_string()))
}

fn escape_double_quoted(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::record::RecordAssembler;
    use tempfile::TempDir;

    const SAMPLE_BODY: &str = "### Target Repository URL

https://example.com/repo

### Investigation Depth

deep

### Methodology (The Wisdom Ladder)

- [x] Reading source
- [ ] Interviewing author

### Intent / Strategic Context (Optional)

_no response_

### Special Observations (Optional)

Uses unusual build flags
";

    const SAMPLE_VARS: &str = "AGENT_TARGET=\"https://example.com/repo\"
AGENT_DEPTH=\"deep\"
AGENT_TOOLS=\"Reading source\"
AGENT_INTENT=\"\"
AGENT_CLUES=\"Uses unusual build flags\"
";

    #[test]
    fn test_end_to_end_file_transform() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("issue_body.txt");
        let output = dir.path().join("issue_vars.sh");
        fs::write(&input, SAMPLE_BODY).unwrap();

        let storage = StorageManager::new(&input, &output);
        let body = storage.read_issue_body().unwrap();
        let record = RecordAssembler::new().assemble(&body).unwrap();
        let path = storage.save_shell_vars(&record, QuoteMode::Verbatim).unwrap();

        assert_eq!(path, output);
        assert_eq!(fs::read_to_string(&output).unwrap(), SAMPLE_VARS);
    }

    #[test]
    fn test_repeated_runs_are_byte_identical() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("issue_body.txt");
        let output = dir.path().join("issue_vars.sh");
        fs::write(&input, SAMPLE_BODY).unwrap();

        let storage = StorageManager::new(&input, &output);
        let assembler = RecordAssembler::new();

        let record = assembler.assemble(&storage.read_issue_body().unwrap()).unwrap();
        storage.save_shell_vars(&record, QuoteMode::Verbatim).unwrap();
        let first = fs::read(&output).unwrap();

        let record = assembler.assemble(&storage.read_issue_body().unwrap()).unwrap();
        storage.save_shell_vars(&record, QuoteMode::Verbatim).unwrap();
        let second = fs::read(&output).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_input_fails_without_output() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("issue_vars.sh");
        let storage = StorageManager::new(dir.path().join("absent.txt"), &output);

        let result = storage.read_issue_body();
        assert!(matches!(result, Err(StorageError::Read { .. })), "expected read error, got {:?}", result);
        assert!(!output.exists());
    }

    #[test]
    fn test_verbatim_keeps_shell_characters() {
        let record = IssueRecord {
            clues: r#"say "hi" to $HOME"#.to_string(),
            ..IssueRecord::default()
        };

        let rendered = render_shell_vars(&record, QuoteMode::Verbatim);
        assert!(rendered.contains("AGENT_CLUES=\"say \"hi\" to $HOME\"\n"));
    }

    #[test]
    fn test_escaped_mode() {
        let record = IssueRecord {
            target: "https://example.com/repo".to_string(),
            clues: r#"say "hi" to $HOME via `id` \ done"#.to_string(),
            ..IssueRecord::default()
        };

        let rendered = render_shell_vars(&record, QuoteMode::Escaped);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "AGENT_TARGET=\"https://example.com/repo\"");
        assert_eq!(lines[4], r#"AGENT_CLUES="say \"hi\" to \$HOME via \`id\` \\ done""#);
    }

    #[test]
    fn test_render_json() {
        let record = IssueRecord {
            depth: "deep".to_string(),
            ..IssueRecord::default()
        };

        let json: serde_json::Value = serde_json::from_str(&render_json(&record).unwrap()).unwrap();
        assert_eq!(json["depth"], "deep");
        assert_eq!(json["tools"], "");
    }
}
