//! Service layer for the feed generator.
//!
//! This module contains the business logic for:
//! - Candidate container discovery (`CandidateLocator`)
//! - Field extraction (`RecordExtractor`)
//! - Identity and acceptance (`RecordValidator`, `content_id`)
//! - Listing scraping (`ListingScraper`)
//! - Fallback output (`fallback_record`)
//! - RSS serialization (`FeedAssembler`)

mod extractor;
mod fallback;
mod feed;
mod listing;
mod locator;
mod validator;

pub use extractor::RecordExtractor;
pub use fallback::{fallback_record, fallback_records};
pub use feed::{FeedAssembler, render_item_body};
pub use listing::{ListingScraper, ScrapeOutcome};
pub use locator::{CandidateLocator, CandidateSource, Candidates, locate_candidates};
pub use validator::{RecordValidator, content_id};
