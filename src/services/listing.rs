// src/services/listing.rs

//! Listing page scraper.
//!
//! Runs locate -> extract -> validate over one listing document.

use chrono::{DateTime, Utc};
use scraper::Html;

use crate::error::Result;
use crate::models::{Config, ExhibitionRecord};
use crate::services::extractor::RecordExtractor;
use crate::services::locator::{CandidateLocator, CandidateSource};
use crate::services::validator::RecordValidator;

/// Summary of one scrape pass.
#[derive(Debug)]
pub struct ScrapeOutcome {
    pub records: Vec<ExhibitionRecord>,
    pub candidate_total: usize,
    pub extraction_failures: usize,
    pub rejected: usize,
    pub source: CandidateSource,
}

/// Scrapes exhibition records out of a listing page.
pub struct ListingScraper {
    locator: CandidateLocator,
    extractor: RecordExtractor,
    validator: RecordValidator,
}

impl ListingScraper {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            locator: CandidateLocator::new(&config.locator)?,
            extractor: RecordExtractor::new(&config.site, &config.extraction)?,
            validator: RecordValidator::new(&config.extraction),
        })
    }

    /// Scrape `html`. Records keep the document order of their containers.
    pub fn scrape(&self, html: &str, published_at: DateTime<Utc>) -> ScrapeOutcome {
        let document = Html::parse_document(html);
        let candidates = self.locator.locate(&document);
        let candidate_total = candidates.elements.len();

        let mut extraction_failures = 0;
        let extracted: Vec<ExhibitionRecord> = candidates
            .elements
            .into_iter()
            .filter_map(|container| match self.extractor.extract(container, published_at) {
                Ok(record) => Some(record),
                Err(error) => {
                    extraction_failures += 1;
                    log::debug!("Dropped candidate: {}", error);
                    None
                }
            })
            .collect();

        let extracted_total = extracted.len();
        let records = self.validator.accept(extracted);

        ScrapeOutcome {
            rejected: extracted_total - records.len(),
            records,
            candidate_total,
            extraction_failures,
            source: candidates.source,
        }
    }
}
