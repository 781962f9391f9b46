//! Message record produced by the parser.
//!
//! This module provides [`Message`], one reassembled entry of a LINE export,
//! and [`MessageKind`], which separates user messages from inline system
//! notifications (joins, leaves, invites, removals).
//!
//! # Examples
//!
//! ```
//! use linepack::{Message, MessageKind};
//!
//! let msg = Message::new("Alice", "Hello, world!")
//!     .with_date("2024/05/01")
//!     .with_time("10:30");
//!
//! assert_eq!(msg.name(), "Alice");
//! assert_eq!(msg.kind(), MessageKind::User);
//! assert_eq!(msg.line_count(), 1);
//! ```
//!
//! ## Serialization
//!
//! ```
//! use linepack::Message;
//!
//! let msg = Message::new("Alice", "Hello!");
//! let json = serde_json::to_string(&msg)?;
//! let parsed: Message = serde_json::from_str(&json)?;
//!
//! assert_eq!(msg, parsed);
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Localized morning marker used in 12-hour LINE timestamps.
pub const MORNING_MARKER: &str = "上午";

/// Localized afternoon marker used in 12-hour LINE timestamps.
pub const AFTERNOON_MARKER: &str = "下午";

/// Whether a message was written by a user or generated by LINE itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Regular message with a sender.
    #[default]
    User,
    /// Join/leave/invite/remove notice. Never carries a name.
    System,
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageKind::User => write!(f, "user"),
            MessageKind::System => write!(f, "system"),
        }
    }
}

/// One message reassembled from a LINE export.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `date` | `String` | Text of the date divider in effect, empty before the first one |
/// | `time` | `String` | Time token as written, e.g. `22:05` or `下午 3:05` |
/// | `name` | `String` | Sender, empty for system messages or unsplittable lines |
/// | `content` | `String` | Content lines joined with `\n` |
/// | `line_count` | `usize` | Physical lines that made up the message (at least 1) |
/// | `kind` | [`MessageKind`] | `user` or `system` |
///
/// Messages have no identifier; their position in the output is their identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Date divider text in effect when the header line was seen.
    #[serde(default)]
    pub date: String,

    /// Time token captured from the header line.
    #[serde(default)]
    pub time: String,

    /// Sender name.
    pub name: String,

    /// Message text. May contain newlines for multiline messages.
    pub content: String,

    /// Number of physical lines contributing to this message.
    #[serde(default = "default_line_count")]
    pub line_count: usize,

    /// User message or system notice.
    #[serde(default)]
    pub kind: MessageKind,
}

fn default_line_count() -> usize {
    1
}

impl Message {
    /// Creates a single-line user message with empty date and time.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            date: String::new(),
            time: String::new(),
            name: name.into(),
            content: content.into(),
            line_count: 1,
            kind: MessageKind::User,
        }
    }

    /// Creates a system notice. System messages never carry a name.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::System,
            ..Self::new("", content)
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Builder method to set the date divider text.
    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Builder method to set the time token.
    #[must_use]
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }

    /// Builder method to set the line count. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_line_count(mut self, line_count: usize) -> Self {
        self.line_count = line_count.max(1);
        self
    }

    /// Builder method to set the kind.
    #[must_use]
    pub fn with_kind(mut self, kind: MessageKind) -> Self {
        self.kind = kind;
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the date divider text.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns the time token.
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Returns the sender name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the number of physical lines.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Returns the message kind.
    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    // =========================================================================
    // Utility methods
    // =========================================================================

    /// Returns `true` for join/leave/invite/remove notices.
    pub fn is_system(&self) -> bool {
        self.kind == MessageKind::System
    }

    /// Returns `true` if this message's content is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Parses the leading `YYYY/MM/DD` or `YYYY.MM.DD` of the date divider.
    ///
    /// Divider lines often carry a weekday suffix (`2024/05/01（三）`), which
    /// is ignored.
    ///
    /// ```
    /// use linepack::Message;
    /// use chrono::NaiveDate;
    ///
    /// let msg = Message::new("Alice", "Hi").with_date("2024.05.01 星期三");
    /// assert_eq!(msg.naive_date(), NaiveDate::from_ymd_opt(2024, 5, 1));
    /// ```
    pub fn naive_date(&self) -> Option<NaiveDate> {
        let head = self.date.get(..10)?;
        NaiveDate::parse_from_str(head, "%Y/%m/%d")
            .or_else(|_| NaiveDate::parse_from_str(head, "%Y.%m.%d"))
            .ok()
    }

    /// Parses the time token into a 24-hour time.
    ///
    /// `上午 12:15` is a quarter past midnight and `下午 3:05` is 15:05.
    ///
    /// ```
    /// use linepack::Message;
    /// use chrono::NaiveTime;
    ///
    /// let msg = Message::new("Alice", "Hi").with_time("下午 3:05");
    /// assert_eq!(msg.naive_time(), NaiveTime::from_hms_opt(15, 5, 0));
    /// ```
    pub fn naive_time(&self) -> Option<NaiveTime> {
        let time = self.time.trim();
        let (clock, offset) = if let Some(rest) = time.strip_prefix(MORNING_MARKER) {
            (rest.trim_start(), Some(0))
        } else if let Some(rest) = time.strip_prefix(AFTERNOON_MARKER) {
            (rest.trim_start(), Some(12))
        } else {
            (time, None)
        };

        let (hour, minute) = clock.split_once(':')?;
        let hour: u32 = hour.parse().ok()?;
        let minute: u32 = minute.parse().ok()?;

        let hour = match offset {
            Some(base) if hour <= 12 => hour % 12 + base,
            Some(_) => return None,
            None => hour,
        };
        NaiveTime::from_hms_opt(hour, minute, 0)
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::new("", "")
    }
}
