//! Filter messages by sender, date, size and content.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for filtering message collections.
//!
//! # Filter Types
//!
//! | Filter | Method | Drops |
//! |--------|--------|-------|
//! | Sender | [`with_sender`](FilterConfig::with_sender) | Messages from anyone else |
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Messages before the date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Messages after the date |
//! | Max lines | [`with_max_lines`](FilterConfig::with_max_lines) | Messages longer than N lines |
//! | Placeholder | [`with_placeholder`](FilterConfig::with_placeholder) | Media and sticker stand-ins |
//! | Containing | [`with_drop_containing`](FilterConfig::with_drop_containing) | Content containing a phrase |
//! | Excluded sender | [`with_excluded_sender`](FilterConfig::with_excluded_sender) | Names containing a phrase |
//! | System | [`with_skip_system`](FilterConfig::with_skip_system) | Join/leave notices |
//!
//! # Examples
//!
//! ## Filter by Sender
//!
//! ```
//! use linepack::core::filter::{FilterConfig, apply_filters};
//! use linepack::Message;
//!
//! let messages = vec![
//!     Message::new("Alice", "Hello"),
//!     Message::new("Bob", "Hi there"),
//!     Message::new("alice", "How are you?"),
//! ];
//!
//! // Case-insensitive sender matching
//! let config = FilterConfig::new().with_sender("ALICE");
//! let filtered = apply_filters(messages, &config);
//!
//! assert_eq!(filtered.len(), 2);
//! ```
//!
//! ## Filter by Date Range
//!
//! ```
//! use linepack::core::filter::{FilterConfig, apply_filters};
//! use linepack::Message;
//!
//! # fn main() -> linepack::Result<()> {
//! let messages = vec![
//!     Message::new("Alice", "Old").with_date("2024/01/01（一）"),
//!     Message::new("Alice", "New").with_date("2024/06/15（六）"),
//! ];
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2024-06-01")?
//!     .with_date_to("2024-12-31")?;
//!
//! let filtered = apply_filters(messages, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].content(), "New");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Messages without a parsable date are **excluded** when date filters are active
//! - Sender matching is case-insensitive for ASCII characters
//! - Multiple filters are combined with AND logic

use chrono::NaiveDate;

use crate::Message;
use crate::error::{LinepackError, Result};

/// Media and notice placeholders LINE writes in place of content.
pub const VIEWER_PLACEHOLDERS: &[&str] = &[
    "圖片",
    "影片",
    "貼圖",
    "聯絡資訊",
    "已新增新的記事本。",
    "已分享記事本。",
];

/// Sender fragments of chat bots in LINE groups.
pub const VIEWER_BOT_SENDERS: &[&str] = &["AI小幫手", "gpt-4o-mini", "麥肯錫AI"];

/// Marker of an unsent message.
pub const UNSENT_MARKER: &str = "已收回訊息";

/// Longest message kept by [`FilterConfig::viewer_defaults`].
pub const VIEWER_MAX_LINES: usize = 7;

/// Configuration for filtering messages.
///
/// Filters are combined with AND logic: a message must match all active
/// filters to be included in the result.
///
/// # Examples
///
/// ```
/// use linepack::core::filter::FilterConfig;
///
/// # fn main() -> linepack::Result<()> {
/// // Filter by sender only
/// let by_sender = FilterConfig::new().with_sender("Alice");
///
/// // Filter by date range
/// let by_date = FilterConfig::new()
///     .with_date_from("2024-01-01")?
///     .with_date_to("2024-12-31")?;
///
/// // Placeholder cleanup plus a custom bot
/// let cleaned = FilterConfig::viewer_defaults().with_excluded_sender("Bot");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Include only messages on or after this date.
    pub after: Option<NaiveDate>,

    /// Include only messages on or before this date.
    pub before: Option<NaiveDate>,

    /// Include only messages from this sender (case-insensitive).
    pub from: Option<String>,

    /// Drop messages with more physical lines than this.
    pub max_lines: Option<usize>,

    /// Drop messages that are one of these placeholders.
    pub placeholders: Vec<String>,

    /// Drop messages whose content contains any of these.
    pub drop_containing: Vec<String>,

    /// Drop messages whose sender contains any of these.
    pub excluded_senders: Vec<String>,

    /// Drop system notices.
    pub skip_system: bool,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all messages pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cleanup a reader of a LINE history usually wants.
    ///
    /// Drops media and sticker placeholders, unsent-message notices, bot
    /// senders and messages longer than seven lines.
    pub fn viewer_defaults() -> Self {
        let mut config = Self::new().with_max_lines(VIEWER_MAX_LINES);
        for placeholder in VIEWER_PLACEHOLDERS {
            config = config.with_placeholder(*placeholder);
        }
        for bot in VIEWER_BOT_SENDERS {
            config = config.with_excluded_sender(*bot);
        }
        config.with_drop_containing(UNSENT_MARKER)
    }

    /// Sets the start date filter (inclusive).
    ///
    /// Only messages on or after this date will be included.
    /// Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`LinepackError::InvalidDate`] if the format is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use linepack::core::filter::FilterConfig;
    ///
    /// # fn main() -> linepack::Result<()> {
    /// let config = FilterConfig::new()
    ///     .with_date_from("2024-01-01")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self> {
        self.after = Some(parse_filter_date(date_str)?);
        Ok(self)
    }

    /// Sets the end date filter (inclusive).
    ///
    /// Only messages on or before this date will be included.
    /// Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`LinepackError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self> {
        self.before = Some(parse_filter_date(date_str)?);
        Ok(self)
    }

    /// Sets both date bounds from already parsed dates.
    #[must_use]
    pub fn with_dates(mut self, after: Option<NaiveDate>, before: Option<NaiveDate>) -> Self {
        self.after = after;
        self.before = before;
        self
    }

    /// Sets the sender filter.
    ///
    /// Only messages from this sender will be included.
    /// Matching is case-insensitive for ASCII characters.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.from = Some(sender.into());
        self
    }

    /// Drops messages made of more than `max_lines` physical lines.
    #[must_use]
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = Some(max_lines);
        self
    }

    /// Drops messages whose trimmed content is `keyword` or ends with
    /// `" " + keyword`.
    ///
    /// The second form catches placeholders whose sender could not be split
    /// off, such as `Bruce Lin 貼圖`.
    #[must_use]
    pub fn with_placeholder(mut self, keyword: impl Into<String>) -> Self {
        self.placeholders.push(keyword.into());
        self
    }

    /// Drops messages whose content contains `text`.
    #[must_use]
    pub fn with_drop_containing(mut self, text: impl Into<String>) -> Self {
        self.drop_containing.push(text.into());
        self
    }

    /// Drops messages whose sender name contains `text`.
    #[must_use]
    pub fn with_excluded_sender(mut self, text: impl Into<String>) -> Self {
        self.excluded_senders.push(text.into());
        self
    }

    /// Drops system notices when `skip` is `true`.
    #[must_use]
    pub fn with_skip_system(mut self, skip: bool) -> Self {
        self.skip_system = skip;
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_date_filter()
            || self.has_user_filter()
            || self.max_lines.is_some()
            || !self.placeholders.is_empty()
            || !self.drop_containing.is_empty()
            || !self.excluded_senders.is_empty()
            || self.skip_system
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if sender filter is active.
    pub fn has_user_filter(&self) -> bool {
        self.from.is_some()
    }

    /// Returns `true` if the message passes every active filter.
    pub fn matches(&self, msg: &Message) -> bool {
        if let Some(ref from) = self.from {
            if !msg.name.eq_ignore_ascii_case(from) {
                return false;
            }
        }

        if self.has_date_filter() {
            let Some(date) = msg.naive_date() else {
                return false;
            };
            if self.after.is_some_and(|after| date < after) {
                return false;
            }
            if self.before.is_some_and(|before| date > before) {
                return false;
            }
        }

        if self.max_lines.is_some_and(|max| msg.line_count > max) {
            return false;
        }

        if self.skip_system && msg.is_system() {
            return false;
        }

        let content = msg.content.trim();
        if self.placeholders.iter().any(|kw| is_placeholder(content, kw)) {
            return false;
        }
        if self
            .drop_containing
            .iter()
            .any(|text| msg.content.contains(text.as_str()))
        {
            return false;
        }
        if self
            .excluded_senders
            .iter()
            .any(|text| msg.name.contains(text.as_str()))
        {
            return false;
        }

        true
    }
}

fn is_placeholder(content: &str, keyword: &str) -> bool {
    content == keyword
        || content
            .strip_suffix(keyword)
            .is_some_and(|head| head.ends_with(' '))
}

/// Parse a date string in YYYY-MM-DD format.
fn parse_filter_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| LinepackError::invalid_date(date_str))
}

/// Filters a collection of messages based on the provided configuration.
///
/// Returns a new vector containing only messages that match all active filters.
/// If no filters are active, returns the original messages unchanged.
///
/// # Examples
///
/// ```
/// use linepack::core::filter::{FilterConfig, apply_filters};
/// use linepack::Message;
///
/// let messages = vec![
///     Message::new("Alice", "Hello"),
///     Message::new("Bob", "貼圖"),
///     Message::new("", "Carol 圖片"),
/// ];
///
/// let filtered = apply_filters(messages, &FilterConfig::viewer_defaults());
///
/// assert_eq!(filtered.len(), 1);
/// assert_eq!(filtered[0].name(), "Alice");
/// ```
pub fn apply_filters(messages: Vec<Message>, config: &FilterConfig) -> Vec<Message> {
    if !config.is_active() {
        return messages;
    }

    messages
        .into_iter()
        .filter(|msg| config.matches(msg))
        .collect()
}
