//! Exhibition record data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One exhibition scraped from the listing page (or synthesized as fallback).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExhibitionRecord {
    /// Content-derived identifier, stable across runs
    pub id: String,

    /// Exhibition title
    pub title: String,

    /// Short description
    pub description: String,

    /// Absolute URL of the exhibition page
    pub link: String,

    /// Free-text snippet that may mention dates; display only
    pub date_hint: String,

    /// Generation time of the run that produced this record
    pub published_at: DateTime<Utc>,
}

impl ExhibitionRecord {
    /// Whether the record carries a non-empty date hint.
    pub fn has_date_hint(&self) -> bool {
        !self.date_hint.trim().is_empty()
    }
}
