//! Reassembly of lines into messages (pass 2).
//!
//! The assembler is a two-state machine. It is `Idle` until the first
//! header, then `Open` with one pending message that collects continuation
//! lines until the next header or the end of input finalizes it.
//!
//! | Line | `Idle` | `Open` |
//! |------|--------|--------|
//! | blank | ignored | ignored |
//! | date divider | sets date | sets date |
//! | header | opens | emits, then opens |
//! | continuation | dropped | appended |

use std::sync::LazyLock;

use regex::Regex;

use super::events::SystemEvents;
use super::line::{LineKind, classify_line};
use crate::message::{Message, MessageKind};
use crate::registry::NameRegistry;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("whitespace run pattern is valid"));

/// A header remainder split into sender and text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderSplit<'a> {
    /// Sender, empty for system notices and unsplittable remainders
    pub name: &'a str,
    /// First content line
    pub content: &'a str,
    /// User message or system notice
    pub kind: MessageKind,
}

/// Splits a header remainder into sender and content.
///
/// 1. A system notice has no sender; the whole remainder is the content.
/// 2. The longest registered name that prefixes the remainder is the
///    sender; the rest, trimmed, is the content.
/// 3. Otherwise the remainder is cut at the first tab, else at the first run
///    of two or more whitespace characters, else at the first space. A
///    remainder with none of these is all content.
///
/// # Example
///
/// ```rust
/// use linepack::NameRegistry;
/// use linepack::parsing::{SystemEvents, split_header};
///
/// let registry = NameRegistry::from_names(["Bruce Lin"]);
/// let events = SystemEvents::default();
///
/// let split = split_header("Bruce Lin 早安", &registry, &events);
/// assert_eq!((split.name, split.content), ("Bruce Lin", "早安"));
///
/// let split = split_header("Unknown Hello there", &registry, &events);
/// assert_eq!((split.name, split.content), ("Unknown", "Hello there"));
/// ```
pub fn split_header<'a>(
    remainder: &'a str,
    registry: &NameRegistry,
    events: &SystemEvents,
) -> HeaderSplit<'a> {
    if events.is_event(remainder) {
        return HeaderSplit {
            name: "",
            content: remainder,
            kind: MessageKind::System,
        };
    }

    let (name, content) = match registry.longest_prefix_match(remainder) {
        Some(name) => {
            let (name, rest) = remainder.split_at(name.len());
            (name, rest.trim())
        }
        None => fallback_split(remainder),
    };

    HeaderSplit {
        name,
        content,
        kind: MessageKind::User,
    }
}

fn fallback_split(remainder: &str) -> (&str, &str) {
    if let Some(split) = remainder.split_once('\t') {
        return split;
    }
    if remainder.contains("  ") {
        if let Some(m) = WHITESPACE_RUN.find(remainder) {
            return (&remainder[..m.start()], &remainder[m.end()..]);
        }
    }
    remainder.split_once(' ').unwrap_or(("", remainder))
}

#[derive(Debug)]
struct PendingMessage {
    date: String,
    time: String,
    name: String,
    kind: MessageKind,
    lines: Vec<String>,
    line_count: usize,
}

impl PendingMessage {
    fn into_message(self) -> Message {
        Message {
            date: self.date,
            time: self.time,
            name: self.name,
            content: self.lines.join("\n"),
            line_count: self.line_count,
            kind: self.kind,
        }
    }
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Open(PendingMessage),
}

/// Line-by-line message assembler.
///
/// The registry is borrowed immutably, so names cannot change while a file
/// is being split.
///
/// # Example
///
/// ```rust
/// use linepack::NameRegistry;
/// use linepack::parsing::{Assembler, SystemEvents};
///
/// let registry = NameRegistry::from_names(["Alice"]);
/// let events = SystemEvents::default();
/// let mut assembler = Assembler::new(&registry, &events);
///
/// assembler.push_line("2024/05/01");
/// assembler.push_line("10:00 Alice first");
/// assembler.push_line("second");
/// let messages = assembler.finish();
///
/// assert_eq!(messages.len(), 1);
/// assert_eq!(messages[0].content(), "first\nsecond");
/// assert_eq!(messages[0].line_count(), 2);
/// ```
#[derive(Debug)]
pub struct Assembler<'r> {
    registry: &'r NameRegistry,
    events: &'r SystemEvents,
    date: String,
    state: State,
    messages: Vec<Message>,
}

impl<'r> Assembler<'r> {
    /// Creates an idle assembler with an empty date context.
    pub fn new(registry: &'r NameRegistry, events: &'r SystemEvents) -> Self {
        Self {
            registry,
            events,
            date: String::new(),
            state: State::Idle,
            messages: Vec::new(),
        }
    }

    /// Feeds one line, newline already stripped.
    pub fn push_line(&mut self, line: &str) {
        match classify_line(line) {
            LineKind::Blank => {}
            LineKind::DateDivider(date) => date.clone_into(&mut self.date),
            LineKind::Header { time, remainder } => {
                self.emit();
                let split = split_header(remainder, self.registry, self.events);
                let lines = if split.content.is_empty() {
                    Vec::new()
                } else {
                    vec![split.content.to_string()]
                };
                self.state = State::Open(PendingMessage {
                    date: self.date.clone(),
                    time: time.to_string(),
                    name: split.name.to_string(),
                    kind: split.kind,
                    lines,
                    line_count: 1,
                });
            }
            LineKind::Continuation(text) => {
                if let State::Open(pending) = &mut self.state {
                    pending.lines.push(text.to_string());
                    pending.line_count += 1;
                }
            }
        }
    }

    /// Returns `true` while a message is being collected.
    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Open(_))
    }

    /// Number of messages finalized so far.
    pub fn emitted(&self) -> usize {
        self.messages.len()
    }

    /// Finalizes the open message and returns all messages in file order.
    pub fn finish(mut self) -> Vec<Message> {
        self.emit();
        self.messages
    }

    fn emit(&mut self) {
        if let State::Open(pending) = std::mem::take(&mut self.state) {
            self.messages.push(pending.into_message());
        }
    }
}

/// Runs pass 2 over a file.
pub fn assemble<'a, I>(lines: I, registry: &NameRegistry, events: &SystemEvents) -> Vec<Message>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut assembler = Assembler::new(registry, events);
    for line in lines {
        assembler.push_line(line);
    }
    assembler.finish()
}
