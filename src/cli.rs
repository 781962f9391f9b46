//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`FormatArg`] - Output format options
//! - [`collect_inputs`] / [`output_path_for`] - input discovery and output naming
//!
//! The argument struct converts itself into the library's configuration
//! types, so `main.rs` only wires them together.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use tracing::warn;

use crate::config::RegistryPolicy;
use crate::core::{FilterConfig, OutputConfig};
use crate::error::{LinepackError, Result};
use crate::format::OutputFormat;

/// Turn LINE chat history exports into structured CSV, JSON or JSONL.
///
/// Sender names are learned from each file before it is split into
/// messages; a seed list can be supplied with --names.
#[derive(Parser, Debug, Clone)]
#[command(name = "linepack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    linepack
    linepack chat.txt -f jsonl
    linepack exports/ -o out/ --names names.txt --shared-names
    linepack chat.txt --viewer-filters --latest-first --limit 5000
    linepack chat.txt --after 2024-01-01 --from Alice -t")]
pub struct Args {
    /// Export files or directories of `.txt` exports
    #[arg(default_value = ".")]
    pub inputs: Vec<PathBuf>,

    /// Directory for output files (default: next to each input)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: FormatArg,

    /// Seed names, one per line (`#` starts a comment)
    #[arg(long, value_name = "FILE")]
    pub names: Option<PathBuf>,

    /// Parser configuration as JSON
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Carry names inferred from one file into the next
    #[arg(long)]
    pub shared_names: bool,

    /// Skip name inference and use the seed names only
    #[arg(long)]
    pub no_infer: bool,

    /// Drop media placeholders, unsent notices and messages over 7 lines
    #[arg(long)]
    pub viewer_filters: bool,

    /// Drop messages longer than N lines
    #[arg(long, value_name = "N")]
    pub max_lines: Option<usize>,

    /// Drop messages whose sender contains TEXT (repeatable)
    #[arg(long, value_name = "TEXT")]
    pub exclude_sender: Vec<String>,

    /// Drop join/leave/invite/remove notices
    #[arg(long)]
    pub skip_system: bool,

    /// Only messages from this sender
    #[arg(long, value_name = "USER")]
    pub from: Option<String>,

    /// Only messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Only messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Write newest messages first
    #[arg(long)]
    pub latest_first: bool,

    /// Keep only the newest N messages
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Include date and time in output
    #[arg(short = 't', long)]
    pub timestamps: bool,

    /// Include message kind (user/system) in output
    #[arg(long)]
    pub kind: bool,

    /// Include physical line count in output
    #[arg(long)]
    pub line_count: bool,

    /// Print the names inferred for each file
    #[arg(long)]
    pub dump_names: bool,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Builds the message filter from the filter flags.
    pub fn filter_config(&self) -> Result<FilterConfig> {
        let mut config = if self.viewer_filters {
            FilterConfig::viewer_defaults()
        } else {
            FilterConfig::new()
        };

        if let Some(ref after) = self.after {
            config = config.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            config = config.with_date_to(before)?;
        }
        if let Some(ref from) = self.from {
            config = config.with_sender(from.clone());
        }
        if let Some(max_lines) = self.max_lines {
            config = config.with_max_lines(max_lines);
        }
        for sender in &self.exclude_sender {
            config = config.with_excluded_sender(sender.clone());
        }
        Ok(config.with_skip_system(self.skip_system))
    }

    /// Builds the output column selection.
    pub fn output_config(&self) -> OutputConfig {
        let mut config = OutputConfig::new();
        if self.timestamps {
            config = config.with_timestamps();
        }
        if self.kind {
            config = config.with_kind();
        }
        if self.line_count {
            config = config.with_line_count();
        }
        config
    }

    /// Registry handling across the inputs.
    pub fn registry_policy(&self) -> RegistryPolicy {
        if self.shared_names {
            RegistryPolicy::Shared
        } else {
            RegistryPolicy::PerFile
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default)]
pub enum FormatArg {
    /// CSV with semicolon delimiter
    #[default]
    Csv,

    /// JSON array of messages
    Json,

    /// JSON Lines - one JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> OutputFormat {
        match format {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Jsonl => OutputFormat::Jsonl,
        }
    }
}

/// Inputs expanded into export files.
#[derive(Debug, Default)]
pub struct CollectedInputs {
    /// Files to parse, in input order
    pub files: Vec<PathBuf>,
    /// Directories that could not be scanned
    pub errors: Vec<LinepackError>,
}

/// Expands directories into their `.txt` files.
///
/// Directories are scanned non-recursively and their exports sorted by
/// path. Plain paths are kept as given, even if they do not exist, so the
/// parser can report them. A directory that cannot be read is reported in
/// [`CollectedInputs::errors`] and the remaining inputs are still expanded.
pub fn collect_inputs(inputs: &[PathBuf]) -> CollectedInputs {
    let mut collected = CollectedInputs::default();

    for input in inputs {
        if !input.is_dir() {
            collected.files.push(input.clone());
            continue;
        }

        match scan_dir(input) {
            Ok(found) => collected.files.extend(found),
            Err(e) => {
                warn!(path = %input.display(), error = %e, "Skipping input directory");
                collected.errors.push(e);
            }
        }
    }

    collected
}

fn scan_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| LinepackError::file_read(dir, e))?;
    let mut found = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| LinepackError::file_read(dir, e))?.path();
        if path.is_file() && is_txt(&path) {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

fn is_txt(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
}

/// Output path for an input: same stem, format extension, placed in
/// `output_dir` or next to the input.
///
/// ```rust
/// use linepack::cli::output_path_for;
/// use linepack::format::OutputFormat;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(
///     output_path_for(Path::new("logs/chat.txt"), None, OutputFormat::Jsonl),
///     PathBuf::from("logs/chat.jsonl")
/// );
/// assert_eq!(
///     output_path_for(Path::new("logs/chat.txt"), Some(Path::new("out")), OutputFormat::Csv),
///     PathBuf::from("out/chat.csv")
/// );
/// ```
pub fn output_path_for(input: &Path, output_dir: Option<&Path>, format: OutputFormat) -> PathBuf {
    let renamed = input.with_extension(format.extension());
    match (output_dir, renamed.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => renamed,
    }
}
