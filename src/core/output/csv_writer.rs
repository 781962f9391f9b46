//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::{LinepackError, Result};

/// Writes messages to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: Depends on OutputConfig
///   - Basic: `Sender`, `Content`
///   - With timestamps: `Date`, `Time`, `Sender`, `Content`
///   - With kind: `Sender`, `Content`, `Kind`
///   - With line count: `Sender`, `Content`, `Lines`
/// - Encoding: UTF-8
pub fn write_csv(
    messages: &[Message],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(messages, file, config)
}

/// Converts messages to a CSV string.
///
/// Same format as [`write_csv`], but returns a String instead of writing to file.
pub fn to_csv(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(messages, &mut buffer, config)?;
    String::from_utf8(buffer)
        .map_err(|e| LinepackError::invalid_format("CSV", e.to_string()))
}

fn write_records<W: Write>(messages: &[Message], out: W, config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    writer.write_record(build_header(config))?;
    for msg in messages {
        writer.write_record(build_record(msg, config))?;
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV header based on output configuration.
fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = Vec::new();

    if config.include_timestamps {
        header.push("Date");
        header.push("Time");
    }

    header.push("Sender");
    header.push("Content");

    if config.include_kind {
        header.push("Kind");
    }
    if config.include_line_count {
        header.push("Lines");
    }

    header
}

/// Build CSV record for a single message.
fn build_record(msg: &Message, config: &OutputConfig) -> Vec<String> {
    let mut record = Vec::new();

    if config.include_timestamps {
        record.push(msg.date.clone());
        record.push(msg.time.clone());
    }

    record.push(msg.name.clone());
    record.push(msg.content.clone());

    if config.include_kind {
        record.push(msg.kind.to_string());
    }
    if config.include_line_count {
        record.push(msg.line_count.to_string());
    }

    record
}
