//! Sumi-Audit main entry point
//!
//! This is the command-line interface for the Sumi-Audit SEO site auditor.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use sumi_audit::config::{load_config_with_hash, validate, Config};
use sumi_audit::report::print_summary;
use sumi_audit::CrawlProgress;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Number of rules listed in the console summary
const SUMMARY_RULES: usize = 15;

/// Sumi-Audit: an on-page SEO site auditor
///
/// Sumi-Audit crawls one site breadth-first, evaluates every page against a
/// fixed set of SEO rules, and reports the issues together with a 0-100 score.
#[derive(Parser, Debug)]
#[command(name = "sumi-audit")]
#[command(version)]
#[command(about = "An on-page SEO site auditor", long_about = None)]
struct Cli {
    /// Base URL of the site to audit
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of pages to visit
    #[arg(long)]
    max_pages: Option<usize>,

    /// Timeout for one page fetch in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Pause between two page fetches in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Skip URLs disallowed by robots.txt
    #[arg(long)]
    respect_robots: bool,

    /// Enqueue sitemap.xml URLs right after the base URL
    #[arg(long)]
    seed_sitemap: bool,

    /// Write the JSON report to this path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = load_configuration(&cli)?;
    validate(&config).context("Invalid configuration")?;

    let (tx, rx) = mpsc::unbounded_channel();
    let progress_task = tokio::spawn(log_progress(rx));

    let result = sumi_audit::audit(&cli.url, &config, Some(tx)).await;
    // The sender was moved into the crawl and is dropped with it
    let _ = progress_task.await;

    let mut report = match result {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Audit failed: {}", e);
            return Err(e).with_context(|| format!("Failed to audit {}", cli.url));
        }
    };

    if let Some(hash) = config_hash {
        report = report.with_config_hash(hash);
    }

    if !cli.quiet {
        print_summary(&report, SUMMARY_RULES);
    }

    let output = cli
        .output
        .clone()
        .or_else(|| config.output.report_path.as_ref().map(PathBuf::from));
    if let Some(path) = output {
        report
            .write_json(&path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        if !cli.quiet {
            println!("✓ Report written to: {}", path.display());
        }
    }

    Ok(())
}

/// Loads the config file if one was given, then applies command-line overrides
fn load_configuration(cli: &Cli) -> anyhow::Result<(Config, Option<String>)> {
    let (mut config, hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.crawler.page_timeout_ms = timeout_ms;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.crawler.request_delay_ms = delay_ms;
    }
    if cli.respect_robots {
        config.crawler.respect_robots = true;
    }
    if cli.seed_sitemap {
        config.crawler.seed_from_sitemap = true;
    }

    Ok((config, hash))
}

/// Drains progress notifications until the crawl drops its sender
async fn log_progress(mut rx: mpsc::UnboundedReceiver<CrawlProgress>) {
    while let Some(progress) = rx.recv().await {
        tracing::debug!(
            "[{}/{}] {}",
            progress.current,
            progress.total,
            progress.url
        );
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_audit=info,warn"),
            1 => EnvFilter::new("sumi_audit=debug,info"),
            2 => EnvFilter::new("sumi_audit=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
