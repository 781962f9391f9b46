//! Classification of raw export lines.
//!
//! A LINE export marks message boundaries only with a leading timestamp:
//!
//! ```text
//! 2024/05/01（三）
//! 22:05 Alice Chen  see you tomorrow
//! 下午 3:05	Bob	ok
//! and a second line
//! ```
//!
//! [`classify_line`] decides which of the four shapes a line has. It never
//! fails; anything unrecognized is a continuation.

use std::sync::LazyLock;

use regex::Regex;

/// `HH:MM` (one or two hour digits) or the 12-hour `上午`/`下午` forms.
static TIME_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{1,2}:\d{2}|上午 \d{1,2}:\d{2}|下午 \d{1,2}:\d{2})")
        .expect("time prefix pattern is valid")
});

/// `YYYY/MM/DD` or `YYYY.MM.DD` at the start of the line.
static DATE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}[/.]\d{2}[/.]\d{2}").expect("date prefix pattern is valid")
});

/// The shape of one line of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty or whitespace-only.
    Blank,
    /// A date divider; the payload is the line without trailing whitespace.
    DateDivider(&'a str),
    /// A timestamped message header.
    Header {
        /// Time token exactly as matched, e.g. `22:05` or `上午 9:15`
        time: &'a str,
        /// Rest of the line, trimmed on both ends
        remainder: &'a str,
    },
    /// Any other line, kept verbatim.
    Continuation(&'a str),
}

/// Classifies a line whose newline has already been stripped.
///
/// Precedence is blank, date divider, header, continuation.
///
/// # Example
///
/// ```rust
/// use linepack::parsing::{LineKind, classify_line};
///
/// assert_eq!(
///     classify_line("10:00 Alice  hi"),
///     LineKind::Header { time: "10:00", remainder: "Alice  hi" }
/// );
/// assert_eq!(classify_line("2024/05/01"), LineKind::DateDivider("2024/05/01"));
/// assert_eq!(classify_line("   "), LineKind::Blank);
/// ```
pub fn classify_line(line: &str) -> LineKind<'_> {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    if DATE_PREFIX.is_match(line) {
        return LineKind::DateDivider(line.trim_end());
    }
    if let Some(m) = TIME_PREFIX.find(line) {
        return LineKind::Header {
            time: m.as_str(),
            remainder: line[m.end()..].trim(),
        };
    }
    LineKind::Continuation(line)
}

/// Returns the remainder of a header line, or `None` for any other shape.
pub fn header_remainder(line: &str) -> Option<&str> {
    match classify_line(line) {
        LineKind::Header { remainder, .. } => Some(remainder),
        _ => None,
    }
}

/// Splits export text into lines.
///
/// Handles `\n` and `\r\n` endings and ignores a leading byte order mark.
pub fn split_lines(content: &str) -> std::str::Lines<'_> {
    content.strip_prefix('\u{feff}').unwrap_or(content).lines()
}
