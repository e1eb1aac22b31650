// src/pipeline/generate.rs

//! Feed generation pipeline.

use chrono::Utc;

use crate::error::Result;
use crate::models::{Config, ExhibitionRecord};
use crate::services::{FeedAssembler, ListingScraper, fallback_records};
use crate::storage::FeedSink;
use crate::utils::http::PageFetcher;

/// What a generation run produced.
#[derive(Debug)]
pub struct GenerationReport {
    /// Records published in the feed, in feed order
    pub records: Vec<ExhibitionRecord>,
    /// Candidate containers considered
    pub candidate_total: usize,
    /// Whether the synthetic fallback record was published
    pub used_fallback: bool,
    /// Fetch failure, if the listing could not be retrieved
    pub fetch_error: Option<String>,
    /// Location reported by the feed sink
    pub feed_location: String,
}

/// Fetch the listing, scrape it, and write the feed.
///
/// Fetch failures and empty scrapes publish the fallback record instead.
/// Only configuration and feed write errors are returned.
pub async fn run_generator(
    config: &Config,
    fetcher: &dyn PageFetcher,
    sink: &dyn FeedSink,
) -> Result<GenerationReport> {
    let scraper = ListingScraper::new(config)?;
    let assembler = FeedAssembler::new(config.feed.clone());
    let generated_at = Utc::now();

    let listing_url = &config.site.listing_url;
    log::info!("Fetching exhibitions listing from {}", listing_url);

    let mut candidate_total = 0;
    let mut fetch_error = None;
    let mut records = match fetcher.fetch(listing_url).await {
        Ok(html) => {
            let outcome = scraper.scrape(&html, generated_at);
            candidate_total = outcome.candidate_total;
            log::info!(
                "Found {} exhibitions in {} candidates ({:?}; {} unreadable, {} rejected)",
                outcome.records.len(),
                outcome.candidate_total,
                outcome.source,
                outcome.extraction_failures,
                outcome.rejected
            );
            outcome.records
        }
        Err(error) => {
            log::error!("Failed to fetch listing: {}", error);
            fetch_error = Some(error.to_string());
            Vec::new()
        }
    };

    let used_fallback = records.is_empty();
    if used_fallback {
        log::warn!("No publishable exhibitions; publishing fallback record");
        records = fallback_records(config, generated_at);
    }

    let document = assembler.assemble(&records, generated_at)?;
    let feed_location = sink.write_feed(&config.feed.output_file, &document).await?;
    log::info!("RSS feed written to {}", feed_location);

    Ok(GenerationReport {
        records,
        candidate_total,
        used_fallback,
        fetch_error,
        feed_location,
    })
}
