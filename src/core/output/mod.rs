//! Output format writers.
//!
//! This module provides writers for different output formats:
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of messages - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one message per line - requires `json-output` feature
//!
//! # Choosing a Format
//!
//! | Format | Use Case |
//! |--------|----------|
//! | CSV | Spreadsheets, LLM context |
//! | JSON | Structured data, APIs |
//! | JSONL | Search indexes, RAG ingestion |
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> linepack::Result<()> {
//! use linepack::core::output::{write_csv, write_json, write_jsonl, to_csv};
//! use linepack::core::models::OutputConfig;
//! use linepack::Message;
//!
//! let messages = vec![
//!     Message::new("Alice", "Hello!").with_date("2024/05/01").with_time("10:00"),
//!     Message::new("Bob", "Hi there!").with_date("2024/05/01").with_time("10:01"),
//! ];
//!
//! let config = OutputConfig::new().with_timestamps();
//!
//! // Write to files
//! write_csv(&messages, "output.csv", &config)?;
//! write_json(&messages, "output.json", &config)?;
//! write_jsonl(&messages, "output.jsonl", &config)?;
//!
//! // Or get as strings
//! let csv_string = to_csv(&messages, &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};

#[cfg(feature = "json-output")]
use serde::Serialize;

#[cfg(feature = "json-output")]
use crate::Message;
#[cfg(feature = "json-output")]
use crate::core::models::OutputConfig;
#[cfg(feature = "json-output")]
use crate::message::MessageKind;

/// Message as written by the JSON writers.
/// Only includes fields enabled in `OutputConfig`.
#[cfg(feature = "json-output")]
#[derive(Serialize)]
struct JsonMessage<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<&'a str>,
    name: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<MessageKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_count: Option<usize>,
}

#[cfg(feature = "json-output")]
impl<'a> JsonMessage<'a> {
    fn new(msg: &'a Message, config: &OutputConfig) -> Self {
        let timestamps = config.include_timestamps;
        Self {
            date: timestamps.then_some(msg.date.as_str()),
            time: timestamps.then_some(msg.time.as_str()),
            name: &msg.name,
            content: &msg.content,
            kind: config.include_kind.then_some(msg.kind),
            line_count: config.include_line_count.then_some(msg.line_count),
        }
    }
}
