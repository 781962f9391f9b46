//! Per-file aggregation of name candidates.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

use super::candidates::Candidate;

/// Accumulated evidence for one candidate name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateStats {
    /// Sum of the weights of every occurrence
    pub score: u64,
    /// Distinct texts that followed the candidate, bounded by the sample cap
    pub samples: BTreeSet<String>,
}

impl CandidateStats {
    /// Number of distinct samples seen.
    pub fn diversity(&self) -> usize {
        self.samples.len()
    }
}

/// All candidates of a file, keyed by name in lexical order.
#[derive(Debug, Clone, Default)]
pub struct CandidateTable {
    entries: BTreeMap<String, CandidateStats>,
    sample_cap: usize,
}

impl CandidateTable {
    /// Creates an empty table keeping at most `sample_cap` samples per candidate.
    pub fn new(sample_cap: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            sample_cap,
        }
    }

    /// Adds one occurrence.
    pub fn record(&mut self, candidate: &Candidate<'_>) {
        if candidate.name.is_empty() {
            return;
        }
        let stats = self.entries.entry(candidate.name.to_string()).or_default();
        stats.score = stats.score.saturating_add(candidate.weight);
        if let Some(sample) = candidate.sample {
            if stats.samples.len() < self.sample_cap && !stats.samples.contains(sample) {
                stats.samples.insert(sample.to_string());
            }
        }
    }

    /// Returns the stats of a candidate.
    pub fn get(&self, name: &str) -> Option<&CandidateStats> {
        self.entries.get(name)
    }

    /// Number of distinct candidates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates candidates in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CandidateStats)> {
        self.entries.iter().map(|(name, stats)| (name.as_str(), stats))
    }

    /// Iterates candidates that extend `base` with a space, in lexical order.
    ///
    /// ```rust
    /// use linepack::inference::{Candidate, CandidateTable};
    ///
    /// let mut table = CandidateTable::new(10);
    /// for name in ["Dave", "Dave Lee", "Dave Lee Jr", "Daveed"] {
    ///     table.record(&Candidate { name, weight: 1, sample: None });
    /// }
    /// let extensions: Vec<&str> = table.extensions_of("Dave").map(|(n, _)| n).collect();
    /// assert_eq!(extensions, vec!["Dave Lee", "Dave Lee Jr"]);
    /// ```
    pub fn extensions_of(&self, base: &str) -> impl Iterator<Item = (&str, &CandidateStats)> {
        let prefix = format!("{base} ");
        self.entries
            .range::<str, _>((Bound::Included(prefix.as_str()), Bound::Unbounded))
            .map(|(name, stats)| (name.as_str(), stats))
            .take_while(move |(name, _)| name.starts_with(&prefix))
    }
}
