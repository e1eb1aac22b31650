//! Fallback record provider.

use chrono::{DateTime, Utc};

use crate::models::{Config, ExhibitionRecord};

/// The single synthetic record published when nothing real is available.
pub fn fallback_record(config: &Config, published_at: DateTime<Utc>) -> ExhibitionRecord {
    ExhibitionRecord {
        id: config.fallback.id.clone(),
        title: config.fallback.title.clone(),
        description: config.fallback.description.clone(),
        link: config.site.listing_url.clone(),
        date_hint: config.fallback.date_hint.clone(),
        published_at,
    }
}

/// Fallback output as a record list.
pub fn fallback_records(config: &Config, published_at: DateTime<Utc>) -> Vec<ExhibitionRecord> {
    vec![fallback_record(config, published_at)]
}
