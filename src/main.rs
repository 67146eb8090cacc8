//! Sumi-Harvest main entry point
//!
//! This is the command-line interface for the Sumi-Harvest token harvester.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use sumi_harvest::config::{load_config_with_hash, validate, Config};
use sumi_harvest::crawler::Coordinator;
use sumi_harvest::output::{format_report, print_report};
use tracing_subscriber::EnvFilter;

/// Sumi-Harvest: a repository token harvester
///
/// Sumi-Harvest collects the source files linked from a repository page,
/// ranks their most frequent tokens, and writes a script templated on them.
#[derive(Parser, Debug)]
#[command(name = "sumi-harvest")]
#[command(version)]
#[command(about = "A repository token harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Override the root page URL
    #[arg(long, value_name = "URL")]
    root: Option<String>,

    /// Override the link suffix filter
    #[arg(long, value_name = "SUFFIX")]
    suffix: Option<String>,

    /// Override the script output path
    #[arg(short, long, value_name = "PATH", conflicts_with = "stdout")]
    output: Option<String>,

    /// Validate config and show what would be harvested without fetching anything
    #[arg(long, conflicts_with = "stdout")]
    dry_run: bool,

    /// Print the generated script to stdout instead of writing it
    #[arg(long)]
    stdout: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))
        .inspect_err(|e| tracing::error!("{:#}", e))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    apply_overrides(&mut config, &cli);
    validate(&config)
        .context("invalid command-line override")
        .inspect_err(|e| tracing::error!("{:#}", e))?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_harvest(config, cli.stdout, cli.quiet)
        .await
        .inspect_err(|e| tracing::error!("Harvest failed: {:#}", e))
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_harvest=info,warn"),
            1 => EnvFilter::new("sumi_harvest=debug,info"),
            2 => EnvFilter::new("sumi_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so `--stdout` output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies command-line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(root) = &cli.root {
        config.source.root_url = root.clone();
    }
    if let Some(suffix) = &cli.suffix {
        config.source.suffix = suffix.clone();
    }
    if let Some(output) = &cli.output {
        config.output.script_path = output.clone();
    }
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Sumi-Harvest Dry Run ===\n");

    println!("Source:");
    println!("  Root URL: {}", config.source.root_url);
    println!("  Base origin: {}", config.source.base_origin);
    println!("  Suffix: {}", config.source.suffix);

    println!("\nFetcher:");
    println!("  User agent: {}", config.fetcher.user_agent());
    match config.fetcher.timeout_secs {
        Some(secs) => println!("  Timeout: {}s", secs),
        None => println!("  Timeout: transport default"),
    }
    println!("  Max retries: {}", config.fetcher.max_retries);
    println!("  Retry delay: {}ms", config.fetcher.retry_delay_ms);
    println!(
        "  Max concurrent fetches: {}",
        config.fetcher.max_concurrent_fetches
    );

    println!("\nAnalysis:");
    println!("  Top features: {}", config.analysis.top_k);

    println!("\nOutput:");
    println!("  Script: {}", config.output.script_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main harvest operation
async fn handle_harvest(config: Config, to_stdout: bool, quiet: bool) -> anyhow::Result<()> {
    tracing::info!(
        "Harvesting '{}' files from {}",
        config.source.suffix,
        config.source.root_url
    );

    let coordinator = Coordinator::new(config)?;

    if to_stdout {
        let harvest = coordinator.harvest().await?;
        tracing::debug!("{}", format_report(&harvest.report));
        print!("{}", harvest.script);
        return Ok(());
    }

    let report = coordinator.run().await?;
    tracing::info!(
        "Harvest completed: {} of {} files retrieved, {} features",
        report.files_retrieved,
        report.files_discovered,
        report.features.len()
    );

    if !quiet {
        print_report(&report);
        if let Some(path) = &report.output_path {
            println!("\nNew script generated and saved as '{}'", path);
        }
    }

    Ok(())
}
