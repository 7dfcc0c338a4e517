//! Compare legacy and modern configuration metadata and write the legacy
//! properties that disappeared as deprecation entries.
//!
//! Usage:
//!   collect-deprecations --legacy-root target/legacy-jars --modern-root target/classes
//!   collect-deprecations --keyword azure,cosmos --output out/additional.json --quiet
//!
//! The report goes to stdout; logs go to stderr (`RUST_LOG` overrides
//! `--log-level`).

use anyhow::{Context, Result};
use clap::Parser;
use metadata_collector::config::{
    DEFAULT_LEGACY_PATTERN, DEFAULT_MODERN_PATTERN, DEFAULT_OUTPUT, keywords_from_env,
    resolve_keywords,
};
use metadata_collector::{CollectorConfig, SourceSpec, run as run_collector};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "collect-deprecations")]
#[command(about = "Emit deprecation metadata for legacy properties missing from the modern catalog")]
struct Cli {
    /// Directory or file searched for legacy metadata (repeatable).
    #[arg(long = "legacy-root", default_value = ".")]
    legacy_roots: Vec<PathBuf>,
    /// Relative path identifying legacy metadata files under each root.
    #[arg(long, default_value = DEFAULT_LEGACY_PATTERN)]
    legacy_pattern: String,
    /// Directory or file searched for modern metadata (repeatable).
    #[arg(long = "modern-root", default_value = ".")]
    modern_roots: Vec<PathBuf>,
    /// Relative path identifying modern metadata files under each root.
    #[arg(long, default_value = DEFAULT_MODERN_PATTERN)]
    modern_pattern: String,
    /// Group-name keyword; comma lists allowed (repeatable).
    #[arg(long = "keyword")]
    keywords: Vec<String>,
    /// Destination of the generated metadata document.
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Suppress the progress report on stdout.
    #[arg(long)]
    quiet: bool,
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let config = CollectorConfig {
        keywords: resolve_keywords(&cli.keywords, keywords_from_env().as_deref()),
        legacy: SourceSpec::new(cli.legacy_roots, cli.legacy_pattern),
        modern: SourceSpec::new(cli.modern_roots, cli.modern_pattern),
        output: cli.output,
    };
    let keywords: Vec<&str> = config.keywords.iter().collect();
    info!(?keywords, "collecting deprecations");

    let stdout = io::stdout();
    let mut lock = stdout.lock();
    let report: Option<&mut dyn Write> = if cli.quiet { None } else { Some(&mut lock) };
    let summary = run_collector(&config, report)
        .with_context(|| format!("collecting deprecations into {}", config.output.display()))?;
    lock.flush().context("flushing report")?;

    info!(
        output = %summary.output.display(),
        unchanged = summary.unchanged,
        deprecated = summary.deprecated,
        warnings = summary.warnings.len(),
        "done"
    );
    Ok(())
}

fn init_logging(fallback: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
}
