//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Listing page and HTTP behavior
    #[serde(default)]
    pub site: SiteConfig,

    /// Candidate container heuristics
    #[serde(default)]
    pub locator: LocatorConfig,

    /// Per-field extraction heuristics
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Channel-level feed metadata
    #[serde(default)]
    pub feed: FeedMetadata,

    /// Synthetic record used when nothing publishable was scraped
    #[serde(default)]
    pub fallback: FallbackConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        let listing = url::Url::parse(&self.site.listing_url)?;
        if !matches!(listing.scheme(), "http" | "https") {
            return Err(AppError::validation(
                "site.listing_url must be an http(s) URL",
            ));
        }
        if self.site.user_agent.trim().is_empty() {
            return Err(AppError::validation("site.user_agent is empty"));
        }
        if self.site.timeout_secs == 0 {
            return Err(AppError::validation("site.timeout_secs must be > 0"));
        }
        if self.locator.max_candidates == 0 {
            return Err(AppError::validation("locator.max_candidates must be > 0"));
        }
        if self.locator.fallback_tags.is_empty() {
            return Err(AppError::validation("locator.fallback_tags is empty"));
        }
        if self.extraction.title_max_chars == 0 {
            return Err(AppError::validation(
                "extraction.title_max_chars must be > 0",
            ));
        }
        if self.feed.title.trim().is_empty() {
            return Err(AppError::validation("feed.title is empty"));
        }
        if self.feed.output_file.trim().is_empty() {
            return Err(AppError::validation("feed.output_file is empty"));
        }
        url::Url::parse(&self.feed.link)?;
        url::Url::parse(&self.feed.feed_url)?;
        regex::Regex::new(&self.extraction.year_pattern)
            .map_err(|e| AppError::config(format!("extraction.year_pattern: {e}")))?;
        Ok(())
    }
}

/// Listing page location and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Exhibitions listing page; also the default item link
    #[serde(default = "defaults::listing_url")]
    pub listing_url: String,

    /// User-Agent header for the listing request
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            listing_url: defaults::listing_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Heuristics for finding exhibition card containers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocatorConfig {
    /// Case-insensitive substrings searched for in class attributes
    #[serde(default = "defaults::class_keywords")]
    pub class_keywords: Vec<String>,

    /// Tag names used when no class keyword matches
    #[serde(default = "defaults::fallback_tags")]
    pub fallback_tags: Vec<String>,

    /// Number of structural fallback elements considered
    #[serde(default = "defaults::fallback_limit")]
    pub fallback_limit: usize,

    /// Hard cap on candidates handed to extraction
    #[serde(default = "defaults::max_candidates")]
    pub max_candidates: usize,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            class_keywords: defaults::class_keywords(),
            fallback_tags: defaults::fallback_tags(),
            fallback_limit: defaults::fallback_limit(),
            max_candidates: defaults::max_candidates(),
        }
    }
}

/// Field extraction and validation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Title used when a container has no title-like element
    #[serde(default = "defaults::placeholder_title")]
    pub placeholder_title: String,

    /// Description used when a container has no text block
    #[serde(default = "defaults::default_description")]
    pub default_description: String,

    #[serde(default = "defaults::title_max_chars")]
    pub title_max_chars: usize,

    /// Marker appended to truncated titles
    #[serde(default = "defaults::title_ellipsis")]
    pub title_ellipsis: String,

    #[serde(default = "defaults::description_max_chars")]
    pub description_max_chars: usize,

    #[serde(default = "defaults::date_hint_max_chars")]
    pub date_hint_max_chars: usize,

    /// Tokens suggesting the container text mentions dates
    #[serde(default = "defaults::date_keywords")]
    pub date_keywords: Vec<String>,

    /// Regex matching a year token
    #[serde(default = "defaults::year_pattern")]
    pub year_pattern: String,

    /// Titles must be strictly longer than this many characters
    #[serde(default = "defaults::min_title_chars")]
    pub min_title_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            placeholder_title: defaults::placeholder_title(),
            default_description: defaults::default_description(),
            title_max_chars: defaults::title_max_chars(),
            title_ellipsis: defaults::title_ellipsis(),
            description_max_chars: defaults::description_max_chars(),
            date_hint_max_chars: defaults::date_hint_max_chars(),
            date_keywords: defaults::date_keywords(),
            year_pattern: defaults::year_pattern(),
            min_title_chars: defaults::min_title_chars(),
        }
    }
}

/// Fixed channel metadata for the generated feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedMetadata {
    #[serde(default = "defaults::feed_title")]
    pub title: String,

    #[serde(default = "defaults::listing_url")]
    pub link: String,

    #[serde(default = "defaults::feed_description")]
    pub description: String,

    #[serde(default = "defaults::language")]
    pub language: String,

    /// Canonical public URL of the feed document
    #[serde(default = "defaults::feed_url")]
    pub feed_url: String,

    /// Categories attached to every item
    #[serde(default = "defaults::categories")]
    pub categories: Vec<String>,

    /// File name written by the feed sink
    #[serde(default = "defaults::output_file")]
    pub output_file: String,
}

impl Default for FeedMetadata {
    fn default() -> Self {
        Self {
            title: defaults::feed_title(),
            link: defaults::listing_url(),
            description: defaults::feed_description(),
            language: defaults::language(),
            feed_url: defaults::feed_url(),
            categories: defaults::categories(),
            output_file: defaults::output_file(),
        }
    }
}

/// Content of the synthetic fallback record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    #[serde(default = "defaults::fallback_id")]
    pub id: String,

    #[serde(default = "defaults::fallback_title")]
    pub title: String,

    #[serde(default = "defaults::fallback_description")]
    pub description: String,

    #[serde(default = "defaults::fallback_date_hint")]
    pub date_hint: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            id: defaults::fallback_id(),
            title: defaults::fallback_title(),
            description: defaults::fallback_description(),
            date_hint: defaults::fallback_date_hint(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    // Site defaults
    pub fn listing_url() -> String {
        "https://www.museoreinasofia.es/exposiciones".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Locator defaults
    pub fn class_keywords() -> Vec<String> {
        ["card", "item", "expo", "grid", "col"]
            .into_iter()
            .map(String::from)
            .collect()
    }
    pub fn fallback_tags() -> Vec<String> {
        ["article", "div", "section"]
            .into_iter()
            .map(String::from)
            .collect()
    }
    pub fn fallback_limit() -> usize {
        20
    }
    pub fn max_candidates() -> usize {
        12
    }

    // Extraction defaults
    pub fn placeholder_title() -> String {
        "Exposición Temporal".into()
    }
    pub fn default_description() -> String {
        "Exposición temporal en el Museo Reina Sofía".into()
    }
    pub fn title_max_chars() -> usize {
        100
    }
    pub fn title_ellipsis() -> String {
        "...".into()
    }
    pub fn description_max_chars() -> usize {
        200
    }
    pub fn date_hint_max_chars() -> usize {
        100
    }
    pub fn date_keywords() -> Vec<String> {
        [
            "hasta",
            "del",
            "desde",
            "enero",
            "febrero",
            "marzo",
            "abril",
            "mayo",
            "junio",
            "julio",
            "agosto",
            "septiembre",
            "octubre",
            "noviembre",
            "diciembre",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
    pub fn year_pattern() -> String {
        r"\b(19|20)\d{2}\b".into()
    }
    pub fn min_title_chars() -> usize {
        3
    }

    // Feed defaults
    pub fn feed_title() -> String {
        "Exposiciones Temporales - Museo Reina Sofía".into()
    }
    pub fn feed_description() -> String {
        "Feed semanal con las exposiciones temporales actuales del Museo Nacional Centro de Arte Reina Sofía".into()
    }
    pub fn language() -> String {
        "es".into()
    }
    pub fn feed_url() -> String {
        "https://feeds.brunovegadeseoane.com/exposiciones-reina-sofia.xml".into()
    }
    pub fn categories() -> Vec<String> {
        ["Arte", "Exposiciones", "Museo Reina Sofía"]
            .into_iter()
            .map(String::from)
            .collect()
    }
    pub fn output_file() -> String {
        "exposiciones-reina-sofia.xml".into()
    }

    // Fallback defaults
    pub fn fallback_id() -> String {
        "fallback1".into()
    }
    pub fn fallback_title() -> String {
        "Exposiciones del Museo Reina Sofía".into()
    }
    pub fn fallback_description() -> String {
        "Consulta la web oficial para las exposiciones actuales".into()
    }
    pub fn fallback_date_hint() -> String {
        "Actualizado semanalmente".into()
    }

    pub fn log_level() -> String {
        "info".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.site.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_relative_listing_url() {
        let mut config = Config::default();
        config.site.listing_url = "/exposiciones".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_candidates() {
        let mut config = Config::default();
        config.locator.max_candidates = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_year_pattern() {
        let mut config = Config::default();
        config.extraction.year_pattern = "(".to_string();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [site]
            listing_url = "http://localhost:8080/list"

            [locator]
            max_candidates = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.site.listing_url, "http://localhost:8080/list");
        assert_eq!(config.site.timeout_secs, 30);
        assert_eq!(config.locator.max_candidates, 3);
        assert_eq!(config.locator.fallback_limit, 20);
        assert_eq!(config.feed.language, "es");
    }

    #[test]
    fn load_or_default_on_missing_file() {
        let config = Config::load_or_default("definitely/not/here.toml");
        assert_eq!(config.feed.output_file, "exposiciones-reina-sofia.xml");
    }
}
