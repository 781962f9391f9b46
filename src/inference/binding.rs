//! Turning candidate statistics into names.
//!
//! A short candidate that is almost always followed by the same word is the
//! first half of a longer name (`林立皋` is nearly always `林立皋 Eric`). Such
//! a base is absorbed by its extension. Everything else is promoted on raw
//! score or on the variety of text that follows it.

use std::collections::BTreeSet;

use tracing::debug;

use super::stats::CandidateTable;
use crate::config::InferenceConfig;
use crate::registry::NameRegistry;

/// Outcome of the binding and promotion rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Names to add to the registry, lexically sorted
    pub promoted: BTreeSet<String>,
    /// `(base, extension)` pairs where the extension absorbed the base
    pub absorbed: Vec<(String, String)>,
}

/// Finds the extension that absorbs `base`, if any.
///
/// Only bases scoring above `min_frequency` are considered. The best
/// extension is the highest-scoring candidate of the form `base + " " + ...`;
/// ties go to the lexically smallest. It absorbs the base when its score is
/// above `min_binding_score` and above `binding_ratio` times the base score.
pub fn strong_extension<'t>(
    table: &'t CandidateTable,
    base: &str,
    config: &InferenceConfig,
) -> Option<&'t str> {
    let base_score = table.get(base)?.score;
    if base_score <= config.min_frequency {
        return None;
    }

    let mut best: Option<(&str, u64)> = None;
    for (name, stats) in table.extensions_of(base) {
        if best.is_none_or(|(_, score)| stats.score > score) {
            best = Some((name, stats.score));
        }
    }

    let (extension, score) = best?;
    let ratio = score as f64 / base_score as f64;
    (score > config.min_binding_score && ratio > config.binding_ratio).then_some(extension)
}

/// Applies absorption then promotion to every candidate.
///
/// Candidates already in `registry` are skipped: they need no inference and
/// never act as a base. An absorbed base is never promoted itself; its
/// extension is promoted instead, even if that extension is absorbed by a
/// longer one in turn.
pub fn resolve(
    table: &CandidateTable,
    registry: &NameRegistry,
    config: &InferenceConfig,
) -> Resolution {
    let mut resolution = Resolution::default();

    for (name, stats) in table.iter() {
        if registry.contains(name) {
            continue;
        }

        if let Some(extension) = strong_extension(table, name, config) {
            debug!(base = name, extension, "Extension absorbs base");
            resolution
                .absorbed
                .push((name.to_string(), extension.to_string()));
            if !registry.contains(extension) {
                resolution.promoted.insert(extension.to_string());
            }
            continue;
        }

        let frequent = stats.score > config.high_confidence_score;
        let diverse =
            stats.score > config.min_frequency && stats.diversity() >= config.min_diversity;
        if frequent || diverse {
            debug!(
                name,
                score = stats.score,
                diversity = stats.diversity(),
                "Promoting candidate"
            );
            resolution.promoted.insert(name.to_string());
        }
    }

    resolution
}
