//! Ordering and statistics for parsed messages.

use crate::Message;

/// Reverses messages to newest first and keeps at most `limit`.
///
/// Exports are written oldest first; a reader usually wants the latest
/// conversation on top.
///
/// # Example
///
/// ```
/// use linepack::Message;
/// use linepack::core::processor::latest_first;
///
/// let messages = vec![
///     Message::new("Alice", "first"),
///     Message::new("Bob", "second"),
///     Message::new("Alice", "third"),
/// ];
///
/// let latest = latest_first(messages, Some(2));
/// assert_eq!(latest[0].content(), "third");
/// assert_eq!(latest[1].content(), "second");
/// assert_eq!(latest.len(), 2);
/// ```
pub fn latest_first(mut messages: Vec<Message>, limit: Option<usize>) -> Vec<Message> {
    messages.reverse();
    if let Some(limit) = limit {
        messages.truncate(limit);
    }
    messages
}

/// Keeps the newest `limit` messages, in file order.
pub fn keep_latest(mut messages: Vec<Message>, limit: usize) -> Vec<Message> {
    let excess = messages.len().saturating_sub(limit);
    messages.drain(..excess);
    messages
}

/// Statistics about the processing result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    /// Messages produced by the parser
    pub parsed: usize,
    /// Messages left after filtering and limiting
    pub kept: usize,
}

impl ProcessingStats {
    /// Creates stats from message counts.
    pub fn new(parsed: usize, kept: usize) -> Self {
        Self { parsed, kept }
    }

    /// Percentage of parsed messages that were dropped.
    pub fn dropped_ratio(&self) -> f64 {
        if self.parsed == 0 {
            return 0.0;
        }
        (1.0 - (self.kept as f64 / self.parsed as f64)) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_first_without_limit() {
        let messages = vec![Message::new("A", "1"), Message::new("B", "2")];
        let latest = latest_first(messages, None);
        assert_eq!(latest[0].content(), "2");
        assert_eq!(latest.len(), 2);
    }

    #[test]
    fn test_latest_first_limit_larger_than_input() {
        let latest = latest_first(vec![Message::new("A", "1")], Some(5000));
        assert_eq!(latest.len(), 1);
    }

    #[test]
    fn test_keep_latest() {
        let messages = vec![
            Message::new("A", "1"),
            Message::new("B", "2"),
            Message::new("C", "3"),
        ];
        let kept = keep_latest(messages, 2);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].content(), "2");
        assert_eq!(kept[1].content(), "3");

        assert_eq!(keep_latest(vec![Message::new("A", "1")], 10).len(), 1);
    }

    #[test]
    fn test_dropped_ratio() {
        assert!((ProcessingStats::new(10, 5).dropped_ratio() - 50.0).abs() < f64::EPSILON);
        assert!(ProcessingStats::new(0, 0).dropped_ratio().abs() < f64::EPSILON);
        assert!(ProcessingStats::new(4, 4).dropped_ratio().abs() < f64::EPSILON);
    }
}
