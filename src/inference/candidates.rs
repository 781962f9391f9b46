//! Name candidates proposed by a single header line.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::InferenceConfig;
use crate::parsing::SystemEvents;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("whitespace run pattern is valid"));

/// One weighted vote for a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// Proposed name, never empty
    pub name: &'a str,
    /// Score added for this occurrence
    pub weight: u64,
    /// Text that followed the name, recorded for single-space token prefixes only
    pub sample: Option<&'a str>,
}

impl<'a> Candidate<'a> {
    fn new(name: &'a str, weight: u64) -> Self {
        Self {
            name,
            weight,
            sample: None,
        }
    }
}

/// Proposes name candidates from a header remainder.
///
/// The first applicable rule wins:
///
/// 1. text before the first tab;
/// 2. every party of a system notice;
/// 3. text before the first run of two or more whitespace characters, when
///    the remainder contains a double space;
/// 4. the first one to `max_name_tokens` single-space token prefixes, each
///    with the rest of the line as a diversity sample. Prefixes longer than
///    `max_candidate_chars` characters are skipped.
///
/// Empty names are never returned.
///
/// # Example
///
/// ```rust
/// use linepack::config::InferenceConfig;
/// use linepack::inference::extract_candidates;
/// use linepack::parsing::SystemEvents;
///
/// let config = InferenceConfig::default();
/// let events = SystemEvents::default();
///
/// let names: Vec<&str> = extract_candidates("Bruce Lin 早安", &config, &events)
///     .iter()
///     .map(|c| c.name)
///     .collect();
/// assert_eq!(names, vec!["Bruce", "Bruce Lin", "Bruce Lin 早安"]);
/// ```
pub fn extract_candidates<'a>(
    remainder: &'a str,
    config: &InferenceConfig,
    events: &SystemEvents,
) -> Vec<Candidate<'a>> {
    if let Some((name, _)) = remainder.split_once('\t') {
        return non_empty(name)
            .map(|name| vec![Candidate::new(name, config.tab_weight)])
            .unwrap_or_default();
    }

    if let Some(event) = events.parse(remainder) {
        return event
            .parties()
            .into_iter()
            .filter_map(non_empty)
            .map(|name| Candidate::new(name, config.system_event_weight))
            .collect();
    }

    if remainder.contains("  ") {
        let name = WHITESPACE_RUN
            .find(remainder)
            .map_or(remainder, |m| &remainder[..m.start()]);
        return non_empty(name)
            .map(|name| vec![Candidate::new(name, config.double_space_weight)])
            .unwrap_or_default();
    }

    token_prefixes(remainder, config)
}

fn token_prefixes<'a>(remainder: &'a str, config: &InferenceConfig) -> Vec<Candidate<'a>> {
    let spaces: Vec<usize> = remainder.match_indices(' ').map(|(i, _)| i).collect();
    let tokens = spaces.len() + 1;

    (1..=tokens.min(config.max_name_tokens))
        .filter_map(|i| {
            let (name, sample) = match spaces.get(i - 1) {
                Some(&cut) => (&remainder[..cut], &remainder[cut + 1..]),
                None => (remainder, ""),
            };
            if name.is_empty() || name.chars().count() > config.max_candidate_chars {
                return None;
            }
            Some(Candidate {
                name,
                weight: config.token_weight,
                sample: Some(sample),
            })
        })
        .collect()
}

fn non_empty(name: &str) -> Option<&str> {
    let name = name.trim();
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(remainder: &str) -> Vec<Candidate<'_>> {
        extract_candidates(remainder, &InferenceConfig::default(), &SystemEvents::default())
    }

    #[test]
    fn test_tab_separator() {
        let candidates = extract("Alice Wu\thello  there");
        assert_eq!(candidates, vec![Candidate::new("Alice Wu", 100)]);
    }

    #[test]
    fn test_system_event_parties() {
        let candidates = extract("Alice邀請Bob Chen加入群組。");
        assert_eq!(
            candidates,
            vec![Candidate::new("Alice", 200), Candidate::new("Bob Chen", 200)]
        );
    }

    #[test]
    fn test_system_event_skips_empty_party() {
        assert!(extract("已加入群組。").is_empty());
        assert_eq!(extract("邀請Bob加入群組。"), vec![Candidate::new("Bob", 200)]);
    }

    #[test]
    fn test_double_space() {
        let candidates = extract("Bruce Lin  早安 大家");
        assert_eq!(candidates, vec![Candidate::new("Bruce Lin", 50)]);
    }

    #[test]
    fn test_token_prefixes_with_samples() {
        let candidates = extract("Dave Lee hi");
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].name, "Dave");
        assert_eq!(candidates[0].sample, Some("Lee hi"));
        assert_eq!(candidates[1].name, "Dave Lee");
        assert_eq!(candidates[1].sample, Some("hi"));
        assert_eq!(candidates[2].name, "Dave Lee hi");
        assert_eq!(candidates[2].sample, Some(""));
        assert!(candidates.iter().all(|c| c.weight == 1));
    }

    #[test]
    fn test_token_prefixes_capped_at_four() {
        let candidates = extract("a b c d e f");
        let names: Vec<&str> = candidates.iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["a", "a b", "a b c", "a b c d"]);
    }

    #[test]
    fn test_long_prefix_skipped() {
        let long = "x".repeat(31);
        let remainder = format!("{long} tail");
        let candidates = extract(&remainder);
        assert!(candidates.is_empty());

        let ok = format!("{} tail", "x".repeat(30));
        assert_eq!(extract(&ok)[0].name.chars().count(), 30);
    }

    #[test]
    fn test_long_prefix_counts_chars() {
        // 20 CJK characters are 60 bytes but only 20 chars
        let name = "王".repeat(20);
        let remainder = format!("{name} 好");
        assert_eq!(extract(&remainder)[0].name, name);
    }

    #[test]
    fn test_empty_remainder_yields_nothing() {
        assert!(extract("").is_empty());
    }
}
