//! Output configuration shared by the format writers.

/// Configuration for output format.
/// Controls which metadata fields are included in the output.
///
/// Sender name and content are always written.
///
/// ```
/// use linepack::core::models::OutputConfig;
///
/// let config = OutputConfig::new().with_timestamps().with_kind();
/// assert!(config.include_timestamps);
/// assert!(!config.include_line_count);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Include the date divider text and the time token
    pub include_timestamps: bool,
    /// Include `user` / `system`
    pub include_kind: bool,
    /// Include the number of physical lines
    pub include_line_count: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every optional field.
    pub fn all() -> Self {
        Self {
            include_timestamps: true,
            include_kind: true,
            include_line_count: true,
        }
    }

    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.include_timestamps = true;
        self
    }

    #[must_use]
    pub fn with_kind(mut self) -> Self {
        self.include_kind = true;
        self
    }

    #[must_use]
    pub fn with_line_count(mut self) -> Self {
        self.include_line_count = true;
        self
    }
}
