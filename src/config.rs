//! Configuration types for the parser.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`InferenceConfig`] - weights and thresholds of the name-inference pass
//! - [`EventPhrases`] - locale phrases of LINE system notices
//! - [`ParserConfig`] - everything the two-pass parser needs
//! - [`RegistryPolicy`] - whether inferred names are shared across a batch
//!
//! All structs deserialize with `#[serde(default)]`, so a config file only
//! needs the keys it changes.
//!
//! # Example
//!
//! ```rust
//! use linepack::config::{InferenceConfig, ParserConfig};
//!
//! let config = ParserConfig::new().with_inference(
//!     InferenceConfig::new()
//!         .with_high_confidence_score(40)
//!         .with_min_diversity(4),
//! );
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{LinepackError, Result};

/// Largest accepted per-occurrence weight.
pub const MAX_WEIGHT: u64 = 1_000_000;

/// Weights and thresholds of the name-inference pass.
///
/// Each header line contributes a weighted vote for one or more name
/// candidates. The weight reflects how reliable the separator that produced
/// the candidate is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Weight of the text before a tab (default: 100)
    pub tab_weight: u64,

    /// Weight of each party named in a system notice (default: 200)
    pub system_event_weight: u64,

    /// Weight of the text before a double space (default: 50)
    pub double_space_weight: u64,

    /// Weight of each single-space token prefix (default: 1)
    pub token_weight: u64,

    /// Longest token prefix tried as a name (default: 4)
    pub max_name_tokens: usize,

    /// Token prefixes longer than this many characters are ignored (default: 30)
    pub max_candidate_chars: usize,

    /// Distinct remainders kept per candidate (default: 10)
    pub diversity_sample_cap: usize,

    /// Score above which a candidate is promoted outright (default: 20)
    pub high_confidence_score: u64,

    /// Score a candidate must exceed to be promoted on diversity (default: 5)
    pub min_frequency: u64,

    /// Distinct remainders needed for diversity promotion (default: 3)
    pub min_diversity: usize,

    /// Share of a base's score an extension must exceed to absorb it (default: 0.7)
    pub binding_ratio: f64,

    /// Score an extension must exceed to absorb its base (default: 2)
    pub min_binding_score: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            tab_weight: 100,
            system_event_weight: 200,
            double_space_weight: 50,
            token_weight: 1,
            max_name_tokens: 4,
            max_candidate_chars: 30,
            diversity_sample_cap: 10,
            high_confidence_score: 20,
            min_frequency: 5,
            min_diversity: 3,
            binding_ratio: 0.7,
            min_binding_score: 2,
        }
    }
}

impl InferenceConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the score above which a candidate is promoted outright.
    #[must_use]
    pub fn with_high_confidence_score(mut self, score: u64) -> Self {
        self.high_confidence_score = score;
        self
    }

    /// Sets the minimum frequency for diversity promotion.
    #[must_use]
    pub fn with_min_frequency(mut self, score: u64) -> Self {
        self.min_frequency = score;
        self
    }

    /// Sets the number of distinct remainders needed for diversity promotion.
    #[must_use]
    pub fn with_min_diversity(mut self, count: usize) -> Self {
        self.min_diversity = count;
        self
    }

    /// Sets the strong-binding ratio.
    #[must_use]
    pub fn with_binding_ratio(mut self, ratio: f64) -> Self {
        self.binding_ratio = ratio;
        self
    }

    /// Sets the longest token prefix tried as a name.
    #[must_use]
    pub fn with_max_name_tokens(mut self, tokens: usize) -> Self {
        self.max_name_tokens = tokens;
        self
    }

    /// Sets the weight of the text before a tab.
    #[must_use]
    pub fn with_tab_weight(mut self, weight: u64) -> Self {
        self.tab_weight = weight;
        self
    }

    /// Checks that caps are positive, weights are at most [`MAX_WEIGHT`] and
    /// the binding ratio is in (0, 1].
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("tab_weight", self.tab_weight),
            ("system_event_weight", self.system_event_weight),
            ("double_space_weight", self.double_space_weight),
            ("token_weight", self.token_weight),
        ];
        for (key, weight) in weights {
            if weight > MAX_WEIGHT {
                return Err(LinepackError::invalid_config(format!(
                    "{key} must be at most {MAX_WEIGHT}, got {weight}"
                )));
            }
        }
        if self.max_name_tokens == 0 {
            return Err(LinepackError::invalid_config(
                "max_name_tokens must be at least 1",
            ));
        }
        if self.max_candidate_chars == 0 {
            return Err(LinepackError::invalid_config(
                "max_candidate_chars must be at least 1",
            ));
        }
        if self.diversity_sample_cap == 0 {
            return Err(LinepackError::invalid_config(
                "diversity_sample_cap must be at least 1",
            ));
        }
        if !(self.binding_ratio > 0.0 && self.binding_ratio <= 1.0) {
            return Err(LinepackError::invalid_config(format!(
                "binding_ratio must be in (0, 1], got {}",
                self.binding_ratio
            )));
        }
        Ok(())
    }
}

/// Locale phrases of LINE system notices.
///
/// The defaults are the Traditional Chinese phrasings:
///
/// | Event | Shape |
/// |-------|-------|
/// | joined | `X已加入群組。` |
/// | left | `X已退出群組。` |
/// | invited | `X邀請Y加入群組。` |
/// | removed | `X已將Y退出群組。` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventPhrases {
    /// Suffix of a join notice
    pub joined: String,

    /// Suffix of a leave notice
    pub left: String,

    /// Word between inviter and invitee
    pub invite_verb: String,

    /// Suffix of an invite notice
    pub invite_suffix: String,

    /// Word between remover and removed member
    pub remove_verb: String,

    /// Suffix of a removal notice
    pub remove_suffix: String,
}

impl Default for EventPhrases {
    fn default() -> Self {
        Self {
            joined: "已加入群組。".to_string(),
            left: "已退出群組。".to_string(),
            invite_verb: "邀請".to_string(),
            invite_suffix: "加入群組。".to_string(),
            remove_verb: "已將".to_string(),
            remove_suffix: "退出群組。".to_string(),
        }
    }
}

impl EventPhrases {
    /// Creates the default phrase set.
    pub fn new() -> Self {
        Self::default()
    }

    fn validate(&self) -> Result<()> {
        let phrases = [
            ("joined", &self.joined),
            ("left", &self.left),
            ("invite_verb", &self.invite_verb),
            ("invite_suffix", &self.invite_suffix),
            ("remove_verb", &self.remove_verb),
            ("remove_suffix", &self.remove_suffix),
        ];
        for (key, phrase) in phrases {
            if phrase.trim().is_empty() {
                return Err(LinepackError::invalid_config(format!(
                    "event phrase '{key}' must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// Configuration of the two-pass parser.
///
/// # Example
///
/// ```rust
/// use linepack::config::ParserConfig;
///
/// // Skip inference and rely on the seed names only
/// let config = ParserConfig::new().with_infer_names(false);
/// assert!(!config.infer_names);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Run the name-inference pass before splitting (default: true)
    pub infer_names: bool,

    /// Inference weights and thresholds
    pub inference: InferenceConfig,

    /// System notice phrases
    pub events: EventPhrases,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            infer_names: true,
            inference: InferenceConfig::default(),
            events: EventPhrases::default(),
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the name-inference pass.
    #[must_use]
    pub fn with_infer_names(mut self, enabled: bool) -> Self {
        self.infer_names = enabled;
        self
    }

    /// Replaces the inference settings.
    #[must_use]
    pub fn with_inference(mut self, inference: InferenceConfig) -> Self {
        self.inference = inference;
        self
    }

    /// Replaces the system notice phrases.
    #[must_use]
    pub fn with_events(mut self, events: EventPhrases) -> Self {
        self.events = events;
        self
    }

    /// Checks the whole configuration.
    pub fn validate(&self) -> Result<()> {
        self.inference.validate()?;
        self.events.validate()
    }

    /// Parses and validates a JSON configuration.
    ///
    /// ```rust
    /// use linepack::config::ParserConfig;
    ///
    /// let config = ParserConfig::from_json_str(r#"{"inference": {"min_diversity": 4}}"#)?;
    /// assert_eq!(config.inference.min_diversity, 4);
    /// assert_eq!(config.inference.tab_weight, 100);
    /// # Ok::<(), linepack::LinepackError>(())
    /// ```
    #[cfg(feature = "json-output")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    #[cfg(feature = "json-output")]
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let json =
            std::fs::read_to_string(path).map_err(|e| LinepackError::file_read(path, e))?;
        Self::from_json_str(&json)
    }
}

/// How the name registry is handled across the files of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryPolicy {
    /// Every file starts from the seed names; files are independent.
    #[default]
    PerFile,
    /// Names inferred from one file are kept for the next, in input order.
    Shared,
}
