//! Record extractor.
//!
//! Turns one candidate container into an exhibition record using ordered
//! field heuristics. Nothing about the listing markup is guaranteed, so each
//! field degrades to a default rather than failing.

use chrono::{DateTime, Utc};
use regex::Regex;
use scraper::{ElementRef, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{ExhibitionRecord, ExtractionConfig, SiteConfig};
use crate::services::locator::parse_selector;
use crate::services::validator::content_id;
use crate::utils::{element_text, resolve_link, truncate_chars, truncate_with_marker};

/// Title sources, highest priority first.
const TITLE_TIERS: [&str; 3] = ["h1, h2, h3, h4", "a", "strong, b"];
const DESCRIPTION_SELECTOR: &str = "p, span, div";
const LINK_SELECTOR: &str = "a[href]";

/// Extracts records from candidate containers.
pub struct RecordExtractor {
    title_tiers: Vec<Selector>,
    description: Selector,
    link: Selector,
    listing_url: Url,
    year: Regex,
    date_keywords: Vec<String>,
    config: ExtractionConfig,
}

impl RecordExtractor {
    pub fn new(site: &SiteConfig, config: &ExtractionConfig) -> Result<Self> {
        let title_tiers = TITLE_TIERS
            .iter()
            .map(|s| parse_selector(s))
            .collect::<Result<Vec<_>>>()?;
        let year = Regex::new(&config.year_pattern)
            .map_err(|e| AppError::config(format!("extraction.year_pattern: {e}")))?;

        Ok(Self {
            title_tiers,
            description: parse_selector(DESCRIPTION_SELECTOR)?,
            link: parse_selector(LINK_SELECTOR)?,
            listing_url: Url::parse(&site.listing_url)?,
            year,
            date_keywords: config
                .date_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
            config: config.clone(),
        })
    }

    /// Extract a record from one container.
    ///
    /// Errors only when the container is unusable as a whole; the caller drops
    /// the candidate and carries on with its siblings.
    pub fn extract(
        &self,
        container: ElementRef<'_>,
        published_at: DateTime<Utc>,
    ) -> Result<ExhibitionRecord> {
        let text = element_text(container);
        if text.is_empty() {
            return Err(AppError::extract(
                describe(container),
                "container has no text content",
            ));
        }

        let title = self.extract_title(container);
        let description = self.extract_description(container);
        let link = self.extract_link(container);
        let date_hint = self.extract_date_hint(&text);

        Ok(ExhibitionRecord {
            id: content_id(&title, &description),
            title,
            description,
            link,
            date_hint,
            published_at,
        })
    }

    fn extract_title(&self, container: ElementRef<'_>) -> String {
        let title = self
            .title_tiers
            .iter()
            .filter_map(|sel| container.select(sel).next())
            .map(element_text)
            .find(|t| !t.is_empty())
            .unwrap_or_else(|| self.config.placeholder_title.clone());

        truncate_with_marker(
            &title,
            self.config.title_max_chars,
            &self.config.title_ellipsis,
        )
    }

    fn extract_description(&self, container: ElementRef<'_>) -> String {
        match container.select(&self.description).next() {
            Some(el) => truncate_chars(&element_text(el), self.config.description_max_chars),
            None => self.config.default_description.clone(),
        }
    }

    fn extract_link(&self, container: ElementRef<'_>) -> String {
        container
            .select(&self.link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| resolve_link(&self.listing_url, href))
            .unwrap_or_else(|| self.listing_url.to_string())
    }

    /// Opaque display text; never parsed as a date.
    fn extract_date_hint(&self, text: &str) -> String {
        let lower = text.to_lowercase();
        let mentions_date = self.year.is_match(&lower)
            || self.date_keywords.iter().any(|k| lower.contains(k.as_str()));

        if mentions_date {
            truncate_chars(text, self.config.date_hint_max_chars)
        } else {
            String::new()
        }
    }
}

fn describe(element: ElementRef<'_>) -> String {
    let value = element.value();
    match value.attr("class") {
        Some(class) => format!("<{} class=\"{}\">", value.name(), class),
        None => format!("<{}>", value.name()),
    }
}
