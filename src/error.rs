//! Unified error types for linepack.
//!
//! This module provides a single [`LinepackError`] enum that covers all error
//! cases in the library.
//!
//! # Error Handling Philosophy
//!
//! - **Malformed lines are not errors.** The parser always falls back to a
//!   best-effort split, so parsing text never fails.
//! - **File errors are per file.** Reading a file can fail; the error carries
//!   the path so batch drivers can report it and move on.
//! - **Configuration errors** surface early, before any file is touched.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A specialized [`Result`] type for linepack operations.
///
/// # Example
///
/// ```rust
/// use linepack::error::Result;
/// use linepack::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, LinepackError>;

/// The error type for all linepack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LinepackError {
    /// An I/O error without file context (writing output, reading stdin).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// An export file could not be read.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - The path is a directory
    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        /// The file that failed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// File content is not valid UTF-8.
    #[error("UTF-8 encoding error in {}: {source}", path.display())]
    Utf8 {
        /// The file that failed
        path: PathBuf,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Parser or filter configuration is invalid.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong
        message: String,
    },

    /// A system-event pattern could not be compiled.
    #[error("Invalid event pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Invalid date format in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// An unknown or disabled output format was requested.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing/serialization error.
    ///
    /// This can occur when loading a JSON config or writing JSON output.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl LinepackError {
    /// Creates a file read error for the given path.
    pub fn file_read(path: impl AsRef<Path>, source: io::Error) -> Self {
        LinepackError::FileRead {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a UTF-8 error for the given path.
    pub fn utf8(path: impl AsRef<Path>, source: std::string::FromUtf8Error) -> Self {
        LinepackError::Utf8 {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        LinepackError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        LinepackError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        LinepackError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Returns the file this error is about, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            LinepackError::FileRead { path, .. } | LinepackError::Utf8 { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Returns `true` if this is an IO error (with or without file context).
    pub fn is_io(&self) -> bool {
        matches!(self, LinepackError::Io(_) | LinepackError::FileRead { .. })
    }

    /// Returns `true` if the file was not valid UTF-8.
    pub fn is_encoding(&self) -> bool {
        matches!(self, LinepackError::Utf8 { .. })
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(
            self,
            LinepackError::InvalidConfig { .. } | LinepackError::Pattern(_)
        )
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, LinepackError::InvalidDate { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, LinepackError::InvalidFormat { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
