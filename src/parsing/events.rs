//! Recognition of LINE system notices.
//!
//! Joins, leaves, invites and removals appear in the export as ordinary
//! timestamped lines without a sender. They are useful twice: pass 1 learns
//! the party names from them, and pass 2 marks them as system messages.

use regex::Regex;

use crate::config::EventPhrases;
use crate::error::Result;

/// A recognized system notice with its party names.
///
/// Party names are trimmed and may be empty (`已加入群組。` on its own parses
/// as a join with an empty member).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemEvent<'a> {
    /// `X已加入群組。`
    Joined {
        /// Member who joined
        member: &'a str,
    },
    /// `X已退出群組。`
    Left {
        /// Member who left
        member: &'a str,
    },
    /// `X邀請Y加入群組。`
    Invited {
        /// Member who sent the invite
        inviter: &'a str,
        /// Member who was invited
        invitee: &'a str,
    },
    /// `X已將Y退出群組。`
    Removed {
        /// Member who removed someone
        remover: &'a str,
        /// Member who was removed
        member: &'a str,
    },
}

impl<'a> SystemEvent<'a> {
    /// Returns the party names in the order they appear in the notice.
    pub fn parties(&self) -> Vec<&'a str> {
        match *self {
            SystemEvent::Joined { member } | SystemEvent::Left { member } => vec![member],
            SystemEvent::Invited { inviter, invitee } => vec![inviter, invitee],
            SystemEvent::Removed { remover, member } => vec![remover, member],
        }
    }
}

/// Compiled matchers for the four notice shapes.
///
/// Each pattern is anchored at both ends with greedy captures, so a
/// remainder must consist of exactly one notice.
#[derive(Debug, Clone)]
pub struct SystemEvents {
    joined: Regex,
    left: Regex,
    invited: Regex,
    removed: Regex,
}

impl SystemEvents {
    /// Compiles matchers for the given phrases. Phrases are matched literally.
    pub fn new(phrases: &EventPhrases) -> Result<Self> {
        let one_party =
            |suffix: &str| Regex::new(&format!("^(.*){}$", regex::escape(suffix)));
        let two_party = |verb: &str, suffix: &str| {
            Regex::new(&format!(
                "^(.*){}(.*){}$",
                regex::escape(verb),
                regex::escape(suffix)
            ))
        };

        Ok(Self {
            joined: one_party(&phrases.joined)?,
            left: one_party(&phrases.left)?,
            invited: two_party(&phrases.invite_verb, &phrases.invite_suffix)?,
            removed: two_party(&phrases.remove_verb, &phrases.remove_suffix)?,
        })
    }

    /// Matches a header remainder against the notice shapes.
    ///
    /// Shapes are tried in the order joined, left, invited, removed; the
    /// first match wins.
    ///
    /// ```rust
    /// use linepack::parsing::{SystemEvent, SystemEvents};
    ///
    /// let events = SystemEvents::default();
    /// assert_eq!(
    ///     events.parse("Alice邀請Bob加入群組。"),
    ///     Some(SystemEvent::Invited { inviter: "Alice", invitee: "Bob" })
    /// );
    /// assert_eq!(events.parse("Alice hello"), None);
    /// ```
    pub fn parse<'a>(&self, remainder: &'a str) -> Option<SystemEvent<'a>> {
        if let Some(caps) = self.joined.captures(remainder) {
            return Some(SystemEvent::Joined {
                member: party(&caps, 1),
            });
        }
        if let Some(caps) = self.left.captures(remainder) {
            return Some(SystemEvent::Left {
                member: party(&caps, 1),
            });
        }
        if let Some(caps) = self.invited.captures(remainder) {
            return Some(SystemEvent::Invited {
                inviter: party(&caps, 1),
                invitee: party(&caps, 2),
            });
        }
        if let Some(caps) = self.removed.captures(remainder) {
            return Some(SystemEvent::Removed {
                remover: party(&caps, 1),
                member: party(&caps, 2),
            });
        }
        None
    }

    /// Returns `true` if the remainder is a system notice.
    pub fn is_event(&self, remainder: &str) -> bool {
        self.parse(remainder).is_some()
    }
}

fn party<'a>(caps: &regex::Captures<'a>, index: usize) -> &'a str {
    caps.get(index).map_or("", |m| m.as_str()).trim()
}

impl Default for SystemEvents {
    fn default() -> Self {
        // Escaped literal phrases always compile.
        Self::new(&EventPhrases::default()).expect("default event phrases compile")
    }
}
