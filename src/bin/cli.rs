//! Exhibition feed CLI
//!
//! Fetches the exhibitions listing once and writes the RSS feed. Every flag
//! is optional; with none, built-in defaults are used.

use std::path::PathBuf;

use clap::Parser;
use exhibition_feed::{
    error::Result,
    models::Config,
    pipeline,
    storage::LocalFeedStorage,
    utils::http::HttpFetcher,
};

/// Museo Reina Sofía exhibitions RSS generator
#[derive(Parser, Debug)]
#[command(name = "exhibition-feed", version, about = "Exhibitions listing to RSS 2.0")]
struct Cli {
    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the feed file is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the processed records as JSON to stdout
    #[arg(long)]
    json: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, configured: &str) {
    let level = if verbose { "debug" } else { configured };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    init_logging(cli.verbose, &config.logging.level);
    config.validate()?;

    log::info!("Starting RSS feed generation...");

    let fetcher = HttpFetcher::new(&config.site)?;
    let storage = LocalFeedStorage::new(&cli.output_dir);
    let report = pipeline::run_generator(&config, &fetcher, &storage).await?;

    if let Some(error) = &report.fetch_error {
        log::warn!("Listing fetch failed, fallback published: {}", error);
    }
    log::info!(
        "Done. {} exhibitions processed{}.",
        report.records.len(),
        if report.used_fallback { " (fallback)" } else { "" }
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report.records)?);
    }

    Ok(())
}
