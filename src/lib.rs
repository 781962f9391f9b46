//! # Linepack
//!
//! A Rust library for turning LINE chat history exports (`.txt`) into
//! structured messages, ready for CSV, JSON or JSONL.
//!
//! ## Overview
//!
//! A LINE export is plain text: date dividers, `HH:MM` header lines and
//! continuation lines. The hard part is the header. The sender name and the
//! message text are separated by a tab, by runs of spaces, by a single
//! space, or by nothing at all, and names often contain spaces themselves.
//!
//! Linepack parses every file in two passes:
//!
//! 1. **Name inference** ([`inference`]) scores candidate names across the
//!    whole file and adds the ones that behave like senders to a
//!    [`NameRegistry`].
//! 2. **Assembly** ([`parsing`]) splits each header with the longest known
//!    name and groups continuation lines into multi-line messages.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use linepack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let parser = LineChatParser::new();
//!     let parsed = parser.parse("chat.txt")?;
//!
//!     let messages = apply_filters(parsed.messages, &FilterConfig::viewer_defaults());
//!     write_json(&messages, "chat.json", &OutputConfig::new().with_timestamps())?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Seed Names and Batches
//!
//! ```rust,no_run
//! use linepack::prelude::*;
//! use linepack::batch::parse_batch;
//!
//! # fn main() -> Result<()> {
//! let seed = NameRegistry::from_file("names.txt")?;
//! let parser = LineChatParser::new().with_seed(seed);
//!
//! let report = parse_batch(&parser, &["a.txt", "b.txt"], RegistryPolicy::Shared);
//! println!("{} messages, {} names", report.total_messages(), report.registry.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`LineChatParser`], the two-pass pipeline
//! - [`registry`] - [`NameRegistry`], longest-first sender names
//! - [`inference`] - pass 1, candidate scoring and promotion
//! - [`parsing`] - pass 2, line classification, system notices, the assembler
//! - [`batch`] - many files, with per-file or shared registries
//! - [`config`] - [`ParserConfig`](config::ParserConfig) and friends
//! - [`core`] - filtering, ordering and the output writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat) dispatch
//! - [`message`] - [`Message`] and [`MessageKind`]
//! - [`error`] - [`LinepackError`] and [`Result`]
//! - [`prelude`] - Convenient re-exports

pub mod batch;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod inference;
pub mod message;
pub mod parser;
pub mod parsing;
pub mod registry;

// Re-export the main types at the crate root for convenience
pub use error::{LinepackError, Result};
pub use message::{Message, MessageKind};
pub use parser::LineChatParser;
pub use registry::NameRegistry;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use linepack::prelude::*;
/// ```
pub mod prelude {
    // Core message type
    pub use crate::{Message, MessageKind};

    // Error types
    pub use crate::error::{LinepackError, Result};

    // Parser and names
    pub use crate::parser::{LineChatParser, ParsedExport};
    pub use crate::registry::NameRegistry;

    // Configuration
    pub use crate::config::{EventPhrases, InferenceConfig, ParserConfig, RegistryPolicy};

    // Models
    pub use crate::core::models::OutputConfig;

    // Filtering
    pub use crate::core::filter::{FilterConfig, apply_filters};

    // Ordering
    pub use crate::core::processor::{ProcessingStats, keep_latest, latest_first};

    // Output (file writers and string converters)
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    // Format dispatch
    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
}
