//! Ripple-Crawl main entry point
//!
//! This is the command-line interface for the Ripple-Crawl link crawler.

use anyhow::Context;
use clap::Parser;
use ripple_crawl::config::{load_config_with_hash, validate, Config};
use ripple_crawl::crawler::{crawl, DedupPolicy};
use ripple_crawl::output::{print_statistics, write_results};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Ripple-Crawl: a depth-bounded concurrent link crawler
///
/// Crawls from a seed identifier, fetching every reachable identifier at
/// most once up to the depth limit, and prints the fetched pages sorted by
/// identifier. Without a configuration file it crawls a built-in four-page
/// graph rooted at https://golang.org/.
#[derive(Parser, Debug)]
#[command(name = "ripple-crawl")]
#[command(version)]
#[command(about = "A depth-bounded concurrent link crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Identifier to start from (overrides the config file)
    #[arg(long)]
    seed: Option<String>,

    /// Maximum crawl depth (overrides the config file)
    #[arg(long, allow_negative_numbers = true)]
    depth: Option<i32>,

    /// Dedup policy: atomic or check-then-claim (overrides the config file)
    #[arg(long)]
    dedup: Option<DedupPolicy>,

    /// Write results to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Print crawl statistics after the results
    #[arg(long)]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(&config, cli.stats).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the results.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ripple_crawl=info,warn"),
            1 => EnvFilter::new("ripple_crawl=debug,info"),
            2 => EnvFilter::new("ripple_crawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any) and applies command-line overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using the built-in reference graph");
            Config::default()
        }
    };

    if let Some(seed) = &cli.seed {
        config.crawler.seed = seed.clone();
    }
    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }
    if let Some(dedup) = cli.dedup {
        config.crawler.dedup = dedup;
    }
    if let Some(output) = &cli.output {
        config.output.results_path = Some(output.display().to_string());
    }

    validate(&config).context("invalid command-line overrides")?;
    Ok(config)
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Ripple-Crawl Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed: {}", config.crawler.seed);
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Dedup policy: {}", config.crawler.dedup);

    println!("\nFetcher:");
    println!("  Kind: {:?}", config.fetcher.kind);
    println!("  User agent: {}", config.fetcher.user_agent);
    if config.fetcher.pages.is_empty() {
        println!("  Pages: built-in reference graph");
    } else {
        println!("  Pages ({}):", config.fetcher.pages.len());
        for page in &config.fetcher.pages {
            println!("    - {} ({} links)", page.url, page.links.len());
        }
    }

    println!("\nOutput:");
    match &config.output.results_path {
        Some(path) => println!("  Results: {}", path),
        None => println!("  Results: stdout"),
    }

    println!("\n✓ Configuration is valid");
}

/// Runs the crawl and writes the results
async fn handle_crawl(config: &Config, show_stats: bool) -> anyhow::Result<()> {
    let report = crawl(config).await.context("crawl setup failed")?;

    match &config.output.results_path {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("failed to create {}", path))?;
            write_results(&mut BufWriter::new(file), &report.results)
                .with_context(|| format!("failed to write {}", path))?;
            tracing::info!("Wrote {} results to {}", report.results.len(), path);
        }
        None => write_results(&mut io::stdout().lock(), &report.results)?,
    }

    if show_stats {
        print_statistics(&report.stats)?;
    }

    Ok(())
}
