//! The two-pass LINE export parser.
//!
//! Parsing a file is a pipeline of two passes over the same lines:
//!
//! 1. [`infer_names`](crate::inference::infer_names) learns sender names and
//!    adds them to a [`NameRegistry`]. It takes the registry mutably.
//! 2. [`assemble`](crate::parsing::assemble) splits and groups lines using
//!    that registry. It takes the registry immutably.
//!
//! [`LineChatParser`] runs both with one configuration and a seed list.
//!
//! # Example
//!
//! ```rust
//! use linepack::parser::LineChatParser;
//!
//! let export = "\
//! 2024/05/01（三）
//! 10:00 Alice\tgood morning
//! 10:01 Bob\thello
//! how are you
//! 10:02 Alice已退出群組。
//! ";
//!
//! let parsed = LineChatParser::new().parse_str(export);
//! assert_eq!(parsed.messages.len(), 3);
//! assert_eq!(parsed.messages[1].name(), "Bob");
//! assert_eq!(parsed.messages[1].line_count(), 2);
//! assert!(parsed.messages[2].is_system());
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::Message;
use crate::config::ParserConfig;
use crate::error::{LinepackError, Result};
use crate::inference::{InferenceReport, infer_names};
use crate::parsing::{SystemEvents, assemble, split_lines};
use crate::registry::NameRegistry;

/// Result of parsing one export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedExport {
    /// Messages in file order
    pub messages: Vec<Message>,
    /// What name inference learned from this file
    pub inference: InferenceReport,
}

/// Parser for LINE `.txt` chat exports.
///
/// The parser holds no mutable state. [`parse_str`](Self::parse_str) starts
/// every file from a fresh copy of the seed names;
/// [`parse_str_with`](Self::parse_str_with) lets the caller keep a registry
/// across files.
#[derive(Debug, Clone)]
pub struct LineChatParser {
    config: ParserConfig,
    events: SystemEvents,
    seed: NameRegistry,
}

impl LineChatParser {
    /// Creates a parser with the default configuration and no seed names.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
            events: SystemEvents::default(),
            seed: NameRegistry::new(),
        }
    }

    /// Creates a parser with a validated configuration.
    pub fn with_config(config: ParserConfig) -> Result<Self> {
        config.validate()?;
        let events = SystemEvents::new(&config.events)?;
        Ok(Self {
            config,
            events,
            seed: NameRegistry::new(),
        })
    }

    /// Sets the names known before any file is read.
    #[must_use]
    pub fn with_seed(mut self, seed: NameRegistry) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Returns the seed names.
    pub fn seed(&self) -> &NameRegistry {
        &self.seed
    }

    /// Returns the compiled system notice matchers.
    pub fn events(&self) -> &SystemEvents {
        &self.events
    }

    /// Reads and parses an export file, starting from the seed names.
    pub fn parse(&self, path: impl AsRef<Path>) -> Result<ParsedExport> {
        let mut registry = self.seed.clone();
        self.parse_with(path, &mut registry)
    }

    /// Reads and parses an export file with a caller-owned registry.
    pub fn parse_with(
        &self,
        path: impl AsRef<Path>,
        registry: &mut NameRegistry,
    ) -> Result<ParsedExport> {
        let path = path.as_ref();
        let content = read_export(path)?;
        let parsed = self.parse_str_with(&content, registry);
        info!(
            path = %path.display(),
            messages = parsed.messages.len(),
            inferred = parsed.inference.promoted.len(),
            "Parsed export"
        );
        Ok(parsed)
    }

    /// Parses export text, starting from the seed names.
    pub fn parse_str(&self, content: &str) -> ParsedExport {
        let mut registry = self.seed.clone();
        self.parse_str_with(content, &mut registry)
    }

    /// Parses export text, growing `registry` with the inferred names.
    pub fn parse_str_with(&self, content: &str, registry: &mut NameRegistry) -> ParsedExport {
        let lines: Vec<&str> = split_lines(content).collect();

        let inference = if self.config.infer_names {
            infer_names(
                lines.iter().copied(),
                registry,
                &self.config.inference,
                &self.events,
            )
        } else {
            InferenceReport::default()
        };

        let messages = assemble(lines.iter().copied(), registry, &self.events);
        ParsedExport {
            messages,
            inference,
        }
    }
}

impl Default for LineChatParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads an export as UTF-8, keeping the path in any error.
fn read_export(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| LinepackError::file_read(path, e))?;
    String::from_utf8(bytes).map_err(|e| LinepackError::utf8(path, e))
}
