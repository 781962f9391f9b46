//! Statistical discovery of sender names (pass 1).
//!
//! LINE exports separate the sender from the text with a tab, a double
//! space, a single space, or nothing at all, and names themselves contain
//! spaces. This pass reads every header line of a file, proposes candidate
//! names with weighted votes, and promotes the ones that behave like names:
//!
//! - [`extract_candidates`] - votes from one line
//! - [`CandidateTable`] - scores and diversity samples for the whole file
//! - [`resolve`] - strong binding, then the promotion rule
//! - [`infer_names`] - the full pass, updating a [`NameRegistry`]
//!
//! # Example
//!
//! ```rust
//! use linepack::NameRegistry;
//! use linepack::config::InferenceConfig;
//! use linepack::inference::infer_names;
//! use linepack::parsing::SystemEvents;
//!
//! let lines = ["10:00 Alice已加入群組。", "10:01 Alice hello"];
//! let mut registry = NameRegistry::new();
//! let report = infer_names(
//!     lines,
//!     &mut registry,
//!     &InferenceConfig::default(),
//!     &SystemEvents::default(),
//! );
//!
//! assert_eq!(report.promoted, vec!["Alice".to_string()]);
//! assert!(registry.contains("Alice"));
//! ```

mod binding;
mod candidates;
mod stats;

pub use binding::{Resolution, resolve, strong_extension};
pub use candidates::{Candidate, extract_candidates};
pub use stats::{CandidateStats, CandidateTable};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::InferenceConfig;
use crate::parsing::{SystemEvents, header_remainder};
use crate::registry::NameRegistry;

/// What pass 1 learned from one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceReport {
    /// Names added to the registry, lexically sorted
    pub promoted: Vec<String>,
    /// `(base, extension)` pairs where the extension absorbed the base
    pub absorbed: Vec<(String, String)>,
    /// Number of distinct candidates seen
    pub candidates: usize,
}

impl InferenceReport {
    /// Returns `true` if no new name was found.
    pub fn is_empty(&self) -> bool {
        self.promoted.is_empty()
    }
}

/// Scores every header line of a file.
pub fn analyze<'a, I>(lines: I, config: &InferenceConfig, events: &SystemEvents) -> CandidateTable
where
    I: IntoIterator<Item = &'a str>,
{
    let mut table = CandidateTable::new(config.diversity_sample_cap);
    for remainder in lines.into_iter().filter_map(header_remainder) {
        for candidate in extract_candidates(remainder, config, events) {
            table.record(&candidate);
        }
    }
    table
}

/// Runs pass 1 over a file and adds the promoted names to `registry`.
///
/// Candidates already in the registry are not re-evaluated, so running the
/// pass twice with the same input adds nothing the second time.
pub fn infer_names<'a, I>(
    lines: I,
    registry: &mut NameRegistry,
    config: &InferenceConfig,
    events: &SystemEvents,
) -> InferenceReport
where
    I: IntoIterator<Item = &'a str>,
{
    let table = analyze(lines, config, events);
    let Resolution { promoted, absorbed } = resolve(&table, registry, config);

    let promoted: Vec<String> = promoted.into_iter().collect();
    registry.extend(promoted.iter().cloned());

    debug!(
        candidates = table.len(),
        promoted = promoted.len(),
        absorbed = absorbed.len(),
        registry = registry.len(),
        "Name inference finished"
    );

    InferenceReport {
        promoted,
        absorbed,
        candidates: table.len(),
    }
}
