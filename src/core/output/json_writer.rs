//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::JsonMessage;
use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::Result;

/// Writes messages to JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"name": "Alice", "content": "Hello"},
///   {"name": "Bob", "content": "Hi"}
/// ]
/// ```
pub fn write_json(
    messages: &[Message],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let json = to_json(messages, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts messages to JSON string as an array.
///
/// Same format as `write_json`, but returns a String instead of writing to file.
pub fn to_json(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let json_messages: Vec<JsonMessage<'_>> = messages
        .iter()
        .map(|m| JsonMessage::new(m, config))
        .collect();

    Ok(serde_json::to_string_pretty(&json_messages)?)
}
