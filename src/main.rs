//! toscrape-quotes main entry point
//!
//! Command-line interface for the quote crawler. With no arguments it crawls
//! https://quotes.toscrape.com/ and writes `quotes.csv` and `authors.csv` to
//! the working directory.

use clap::Parser;
use std::path::PathBuf;
use toscrape_quotes::config::{load_config_with_hash, validate, Config};
use toscrape_quotes::crawler::crawl;
use toscrape_quotes::output::print_statistics;
use tracing_subscriber::EnvFilter;

/// toscrape-quotes: a paginated quote harvester
///
/// Follows the site's "next" links from the first page, collects every
/// quote with its tags, fetches each author's biography once, and writes
/// both tables as CSV.
#[derive(Parser, Debug)]
#[command(name = "toscrape-quotes")]
#[command(version)]
#[command(about = "A paginated quote harvester", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// First listing page (overrides the config file)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Quotes CSV path (overrides the config file)
    #[arg(long, value_name = "FILE")]
    quotes_out: Option<PathBuf>,

    /// Authors CSV path (overrides the config file)
    #[arg(long, value_name = "FILE")]
    authors_out: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate configuration and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(&config, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("toscrape_quotes=info,warn"),
            1 => EnvFilter::new("toscrape_quotes=debug,info"),
            2 => EnvFilter::new("toscrape_quotes=trace,debug"),
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

/// Loads the config file (if any), then applies command-line overrides
fn resolve_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(base_url) = &cli.base_url {
        config.crawler.base_url = base_url.clone();
    }
    if let Some(path) = &cli.quotes_out {
        config.output.quotes_path = path.to_string_lossy().into_owned();
    }
    if let Some(path) = &cli.authors_out {
        config.output.authors_path = path.to_string_lossy().into_owned();
    }

    // Overrides bypass the file validation, so check the merged result
    validate(&config)?;
    Ok(config)
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== toscrape-quotes Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Base URL: {}", config.crawler.base_url);
    println!(
        "  Max concurrent author fetches: {}",
        config.crawler.max_concurrent_authors
    );
    match config.crawler.request_timeout_secs {
        Some(secs) => println!("  Request timeout: {}s", secs),
        None => println!("  Request timeout: client default"),
    }

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Quotes: {}", config.output.quotes_path);
    println!("  Authors: {}", config.output.authors_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    match crawl(config).await {
        Ok(outcome) => {
            tracing::info!("Crawl completed successfully");
            if !quiet {
                print_statistics(&outcome.stats);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
