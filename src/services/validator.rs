//! Record identity and acceptance rules.

use std::collections::HashSet;

use sha2::{Digest, Sha256};

use crate::models::{ExhibitionRecord, ExtractionConfig};

/// Hex-encoded 128-bit content identifier for a `(title, description)` pair.
///
/// Deterministic across runs; any change to either field changes the ID.
pub fn content_id(title: &str, description: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update(description.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..16])
}

/// Filters scraped records down to the publishable ones.
#[derive(Debug, Clone)]
pub struct RecordValidator {
    placeholder_title: String,
    min_title_chars: usize,
}

impl RecordValidator {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            placeholder_title: config.placeholder_title.clone(),
            min_title_chars: config.min_title_chars,
        }
    }

    /// Only the title is checked; other field defects are tolerated.
    pub fn is_valid(&self, record: &ExhibitionRecord) -> bool {
        let title = record.title.trim();
        !title.is_empty()
            && title != self.placeholder_title
            && title.chars().count() > self.min_title_chars
    }

    /// Keep valid records, dropping repeated IDs. Order is preserved.
    pub fn accept(&self, records: Vec<ExhibitionRecord>) -> Vec<ExhibitionRecord> {
        let mut seen = HashSet::new();
        records
            .into_iter()
            .filter(|record| {
                if !self.is_valid(record) {
                    log::debug!("Rejected record with title {:?}", record.title);
                    return false;
                }
                if !seen.insert(record.id.clone()) {
                    log::debug!("Dropped duplicate record {}", record.id);
                    return false;
                }
                true
            })
            .collect()
    }
}

impl Default for RecordValidator {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(title: &str, description: &str) -> ExhibitionRecord {
        ExhibitionRecord {
            id: content_id(title, description),
            title: title.to_string(),
            description: description.to_string(),
            link: "https://www.museoreinasofia.es/exposiciones".to_string(),
            date_hint: String::new(),
            published_at: Utc::now(),
        }
    }

    #[test]
    fn test_content_id_is_stable() {
        let a = content_id("Art Now", "Una muestra");
        let b = content_id("Art Now", "Una muestra");
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_content_id_changes_with_either_field() {
        let base = content_id("Art Now", "Una muestra");
        assert_ne!(base, content_id("Art Now!", "Una muestra"));
        assert_ne!(base, content_id("Art Now", "Otra muestra"));
    }

    #[test]
    fn test_rejects_placeholder_title() {
        let validator = RecordValidator::default();
        assert!(!validator.is_valid(&record("Exposición Temporal", "lo que sea")));
    }

    #[test]
    fn test_rejects_short_titles() {
        let validator = RecordValidator::default();
        assert!(!validator.is_valid(&record("Ab", "")));
        assert!(!validator.is_valid(&record("   Abc  ", "")));
        assert!(!validator.is_valid(&record("", "descripción")));
    }

    #[test]
    fn test_accepts_regardless_of_description() {
        let validator = RecordValidator::default();
        assert!(validator.is_valid(&record("Art Now", "")));
        assert!(validator.is_valid(&record("Art Now", &"x".repeat(500))));
        assert!(validator.is_valid(&record("Abcd", "")));
    }

    #[test]
    fn test_accept_dedups_and_keeps_order() {
        let validator = RecordValidator::default();
        let records = vec![
            record("Primera", "a"),
            record("Ab", "b"),
            record("Segunda", "b"),
            record("Primera", "a"),
            record("Tercera", "c"),
        ];
        let titles: Vec<_> = validator
            .accept(records)
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["Primera", "Segunda", "Tercera"]);
    }
}
