//! # linepack CLI
//!
//! Command-line interface for the linepack library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use linepack::batch::{FileOutcome, parse_batch};
use linepack::cli::{Args, collect_inputs, output_path_for};
use linepack::config::{ParserConfig, RegistryPolicy};
use linepack::core::{
    FilterConfig, OutputConfig, ProcessingStats, apply_filters, keep_latest, latest_first,
};
use linepack::format::{OutputFormat, write_to_format};
use linepack::parser::ParsedExport;
use linepack::{LineChatParser, LinepackError, NameRegistry};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(0) => {}
        Ok(failed) => {
            eprintln!("❌ {failed} file(s) failed");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the conversion and returns the number of files that failed.
fn run(args: &Args) -> Result<usize, LinepackError> {
    let total_start = Instant::now();

    let config = match args.config {
        Some(ref path) => ParserConfig::from_json_file(path)?,
        None => ParserConfig::new(),
    };
    let infer_names = config.infer_names && !args.no_infer;
    let config = config.with_infer_names(infer_names);

    let mut parser = LineChatParser::with_config(config)?;
    if let Some(ref names) = args.names {
        parser = parser.with_seed(NameRegistry::from_file(names)?);
    }

    let filter_config = args.filter_config()?;
    let output_config = args.output_config();
    let format: OutputFormat = args.format.into();
    let collected = collect_inputs(&args.inputs);
    let inputs = collected.files;

    if let Some(ref dir) = args.output_dir {
        std::fs::create_dir_all(dir)?;
    }

    println!("📦 linepack v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Inputs:  {} file(s)", inputs.len());
    println!("📄 Format:  {}", format);
    println!("🏷️  Seed:    {} name(s)", parser.seed().len());
    if !parser.config().infer_names {
        println!("⏭️  Name inference disabled (--no-infer)");
    }
    if args.shared_names {
        println!("🔗 Names shared across files");
    }
    println!();

    let mut failed = collected.errors.len();
    for e in &collected.errors {
        println!("❌ {e}");
    }

    if inputs.is_empty() {
        println!("⚠️  No .txt exports found");
        return Ok(failed);
    }

    println!("⏳ Parsing...");
    let parse_start = Instant::now();
    let report = parse_batch(&parser, &inputs, args.registry_policy());
    println!(
        "   {} messages from {} file(s) ({:.2}s)",
        report.total_messages(),
        report.outcomes.len(),
        parse_start.elapsed().as_secs_f64()
    );
    println!();

    let mut total = ProcessingStats::default();

    for FileOutcome { path, result } in report.outcomes {
        let export = match result {
            Ok(export) => export,
            Err(e) => {
                failed += 1;
                println!("❌ {}: {}", path.display(), e);
                continue;
            }
        };

        if args.dump_names {
            print_inferred(&export);
        }

        let output_path = output_path_for(&path, args.output_dir.as_deref(), format);
        match write_export(export, &output_path, format, &filter_config, &output_config, args) {
            Ok(stats) => {
                println!(
                    "✅ {} → {} ({} of {} messages kept)",
                    path.display(),
                    output_path.display(),
                    stats.kept,
                    stats.parsed
                );
                total.parsed += stats.parsed;
                total.kept += stats.kept;
            }
            Err(e) => {
                failed += 1;
                println!("❌ {}: {}", output_path.display(), e);
            }
        }
    }

    if args.dump_names {
        println!();
        match args.registry_policy() {
            RegistryPolicy::Shared => {
                println!("🏷️  Registry ({} names):", report.registry.len());
            }
            RegistryPolicy::PerFile => {
                println!("🏷️  Seed names ({} names):", report.registry.len());
            }
        }
        for name in report.registry.iter() {
            println!("   {name}");
        }
    }

    let total_time = total_start.elapsed();

    println!();
    println!("📊 Summary:");
    println!("   Parsed:    {} messages", total.parsed);
    if filter_config.is_active() || args.limit.is_some() {
        println!(
            "   Kept:      {} messages ({:.1}% dropped)",
            total.kept,
            total.dropped_ratio()
        );
    }
    if failed > 0 {
        println!("   Failed:    {} file(s)", failed);
    }

    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());
    let msgs_per_sec = total.parsed as f64 / total_time.as_secs_f64();
    println!("   Throughput:  {:.0} messages/sec", msgs_per_sec);

    Ok(failed)
}

/// Filters, orders and writes one parsed export.
fn write_export(
    export: ParsedExport,
    output_path: &std::path::Path,
    format: OutputFormat,
    filter_config: &FilterConfig,
    output_config: &OutputConfig,
    args: &Args,
) -> Result<ProcessingStats, LinepackError> {
    let parsed = export.messages.len();

    let messages = if filter_config.is_active() {
        apply_filters(export.messages, filter_config)
    } else {
        export.messages
    };

    let messages = match (args.latest_first, args.limit) {
        (true, limit) => latest_first(messages, limit),
        (false, Some(limit)) => keep_latest(messages, limit),
        (false, None) => messages,
    };

    write_to_format(&messages, output_path, format, output_config)?;
    Ok(ProcessingStats::new(parsed, messages.len()))
}

fn print_inferred(export: &ParsedExport) {
    let report = &export.inference;
    println!(
        "   🔎 {} candidate(s), {} name(s) promoted",
        report.candidates,
        report.promoted.len()
    );
    for name in &report.promoted {
        println!("      + {name}");
    }
    for (base, extension) in &report.absorbed {
        println!("      {base} → {extension}");
    }
}
