//! JSON Lines (JSONL) output writer.
//!
//! JSONL format is ideal for:
//! - Search and RAG ingestion
//! - Line-oriented tools (`grep`, `jq -c`)
//! - Appending several exports into one dataset

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::JsonMessage;
use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::Result;

/// Writes messages to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"name":"Alice","content":"Hello"}
/// {"name":"Bob","content":"Hi"}
/// ```
pub fn write_jsonl(
    messages: &[Message],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(messages, &mut writer, config)?;
    writer.flush()?;
    Ok(())
}

/// Converts messages to a JSONL string.
pub fn to_jsonl(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_lines(messages, &mut buffer, config)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn write_lines<W: Write>(messages: &[Message], writer: &mut W, config: &OutputConfig) -> Result<()> {
    for msg in messages {
        let line = serde_json::to_string(&JsonMessage::new(msg, config))?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader};
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_jsonl_basic() {
        let messages = vec![Message::new("Alice", "Hello"), Message::new("Bob", "Hi")];

        let temp_file = NamedTempFile::new().unwrap();
        write_jsonl(&messages, temp_file.path(), &OutputConfig::new()).unwrap();

        let file = std::fs::File::open(temp_file.path()).unwrap();
        let lines: Vec<String> = BufReader::new(file).lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), 2);

        let msg1: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(msg1["name"], "Alice");
        assert_eq!(msg1["content"], "Hello");

        let msg2: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(msg2["name"], "Bob");
    }

    #[test]
    fn test_multiline_content_stays_on_one_line() {
        let msg = Message::new("Alice", "one\ntwo").with_line_count(2);
        let jsonl = to_jsonl(&[msg], &OutputConfig::new().with_line_count()).unwrap();

        assert_eq!(jsonl.lines().count(), 1);
        let parsed: serde_json::Value = serde_json::from_str(jsonl.trim()).unwrap();
        assert_eq!(parsed["content"], "one\ntwo");
        assert_eq!(parsed["line_count"], 2);
    }

    #[test]
    fn test_jsonl_no_array_brackets() {
        let jsonl = to_jsonl(&[Message::new("Alice", "Hello")], &OutputConfig::new()).unwrap();
        assert!(!jsonl.contains('['));
        assert!(!jsonl.contains(']'));
    }
}
