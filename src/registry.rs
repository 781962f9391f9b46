//! Registry of known sender names.
//!
//! [`NameRegistry`] is the shared input of both parser passes: pass 1 grows
//! it with inferred names and pass 2 uses it to split header lines. Entries
//! are kept in descending length order so that the longest (most specific)
//! name wins a prefix match.

use std::cmp::Reverse;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LinepackError, Result};

/// A deduplicated set of sender names, ordered longest first.
///
/// Length is measured in Unicode scalar values. Names of equal length are
/// ordered lexically. Empty and whitespace-only names are never stored.
///
/// # Example
///
/// ```rust
/// use linepack::NameRegistry;
///
/// let registry = NameRegistry::from_names(["A", "A B"]);
/// assert_eq!(registry.longest_prefix_match("A B hello"), Some("A B"));
/// assert_eq!(registry.longest_prefix_match("A hello"), Some("A"));
/// assert_eq!(registry.longest_prefix_match("B hello"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct NameRegistry {
    names: Vec<String>,
}

fn sort_key(name: &str) -> (Reverse<usize>, &str) {
    (Reverse(name.chars().count()), name)
}

impl NameRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry from a seed list. Blank names and duplicates are dropped.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        registry.extend(names);
        registry
    }

    /// Reads a seed list from a file, one name per line.
    ///
    /// Blank lines and lines starting with `#` are skipped. Leading and
    /// trailing whitespace of each line is not part of the name.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| LinepackError::file_read(path, e))?;
        let text = String::from_utf8(bytes).map_err(|e| LinepackError::utf8(path, e))?;

        Ok(Self::from_names(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        ))
    }

    /// Inserts a name, keeping the order. Returns `false` if the name was
    /// blank or already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if name.trim().is_empty() {
            return false;
        }
        match self
            .names
            .binary_search_by(|probe| sort_key(probe).cmp(&sort_key(&name)))
        {
            Ok(_) => false,
            Err(pos) => {
                self.names.insert(pos, name);
                true
            }
        }
    }

    /// Inserts every name of an iterator.
    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.insert(name);
        }
    }

    /// Returns `true` if the name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.names
            .binary_search_by(|probe| sort_key(probe).cmp(&sort_key(name)))
            .is_ok()
    }

    /// Returns the first name, in descending length order, that is a prefix
    /// of `text`.
    ///
    /// The match is a raw prefix: `"Ann"` matches `"Anna hi"`. The fallback
    /// split of the assembler only runs when no registered name matches.
    pub fn longest_prefix_match(&self, text: &str) -> Option<&str> {
        self.names
            .iter()
            .find(|name| text.starts_with(name.as_str()))
            .map(String::as_str)
    }

    /// Returns the number of names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no names are registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates names longest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Consumes the registry, returning names longest first.
    pub fn into_vec(self) -> Vec<String> {
        self.names
    }
}

impl From<Vec<String>> for NameRegistry {
    fn from(names: Vec<String>) -> Self {
        Self::from_names(names)
    }
}

impl From<NameRegistry> for Vec<String> {
    fn from(registry: NameRegistry) -> Self {
        registry.names
    }
}

impl<S: Into<String>> FromIterator<S> for NameRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_names(iter)
    }
}
