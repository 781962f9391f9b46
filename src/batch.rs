//! Parsing many exports in one run.
//!
//! Files are independent unless the [`RegistryPolicy`] says otherwise. A
//! failing file is reported in its [`FileOutcome`] and never stops the
//! batch.
//!
//! # Example
//!
//! ```rust,no_run
//! use linepack::batch::parse_batch;
//! use linepack::config::RegistryPolicy;
//! use linepack::parser::LineChatParser;
//!
//! let parser = LineChatParser::new();
//! let report = parse_batch(&parser, &["a.txt", "b.txt"], RegistryPolicy::Shared);
//!
//! for outcome in &report.outcomes {
//!     match &outcome.result {
//!         Ok(parsed) => println!("{}: {} messages", outcome.path.display(), parsed.messages.len()),
//!         Err(e) => eprintln!("{e}"),
//!     }
//! }
//! println!("{} names known", report.registry.len());
//! ```

use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{info, warn};

use crate::config::RegistryPolicy;
use crate::error::Result;
use crate::parser::{LineChatParser, ParsedExport};
use crate::registry::NameRegistry;

/// Result of one file of a batch.
#[derive(Debug)]
pub struct FileOutcome {
    /// The input path
    pub path: PathBuf,
    /// Parsed export, or the error that made the file unusable
    pub result: Result<ParsedExport>,
}

impl FileOutcome {
    /// Returns `true` if the file was parsed.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Result of a whole batch.
#[derive(Debug)]
pub struct BatchReport {
    /// One outcome per input, in input order
    pub outcomes: Vec<FileOutcome>,
    /// Registry after the last file. With [`RegistryPolicy::PerFile`] this
    /// is the seed list.
    pub registry: NameRegistry,
}

impl BatchReport {
    /// Number of files that failed.
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_ok()).count()
    }

    /// Total messages across all parsed files.
    pub fn total_messages(&self) -> usize {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .map(|parsed| parsed.messages.len())
            .sum()
    }
}

/// Parses every path with the given registry policy.
///
/// With [`RegistryPolicy::PerFile`] each file starts from the parser's seed
/// names and, with the `parallel` feature, files run on the rayon thread
/// pool. With [`RegistryPolicy::Shared`] files run in input order and names
/// inferred from one file are known to the next.
pub fn parse_batch<P>(parser: &LineChatParser, paths: &[P], policy: RegistryPolicy) -> BatchReport
where
    P: AsRef<Path> + Sync,
{
    let report = match policy {
        RegistryPolicy::PerFile => parse_independent(parser, paths),
        RegistryPolicy::Shared => parse_shared(parser, paths),
    };

    info!(
        files = report.outcomes.len(),
        failed = report.failures(),
        messages = report.total_messages(),
        names = report.registry.len(),
        "Batch finished"
    );
    report
}

fn parse_one(parser: &LineChatParser, path: &Path, registry: &mut NameRegistry) -> FileOutcome {
    let result = parser.parse_with(path, registry);
    if let Err(e) = &result {
        warn!(path = %path.display(), error = %e, "Skipping export");
    }
    FileOutcome {
        path: path.to_path_buf(),
        result,
    }
}

fn parse_independent<P>(parser: &LineChatParser, paths: &[P]) -> BatchReport
where
    P: AsRef<Path> + Sync,
{
    let run = |path: &P| {
        let mut registry = parser.seed().clone();
        parse_one(parser, path.as_ref(), &mut registry)
    };

    #[cfg(feature = "parallel")]
    let outcomes: Vec<FileOutcome> = paths.par_iter().map(run).collect();
    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<FileOutcome> = paths.iter().map(run).collect();

    BatchReport {
        outcomes,
        registry: parser.seed().clone(),
    }
}

fn parse_shared<P: AsRef<Path>>(parser: &LineChatParser, paths: &[P]) -> BatchReport {
    let mut registry = parser.seed().clone();
    let outcomes = paths
        .iter()
        .map(|path| parse_one(parser, path.as_ref(), &mut registry))
        .collect();

    BatchReport {
        outcomes,
        registry,
    }
}
