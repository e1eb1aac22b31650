//! Candidate container locator.
//!
//! Finds the elements most likely to hold one exhibition each. The listing
//! markup is undocumented, so matching is keyword-based on class names with
//! a structural fallback.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::LocatorConfig;

/// Document-level elements; a class on these describes the page, not a card.
const PAGE_ELEMENTS: [&str; 2] = ["html", "body"];

/// Which heuristic produced the candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    /// At least one class attribute contained a keyword
    ClassKeyword,
    /// No class matched; first elements of the fallback tag kinds
    Structural,
}

/// Candidates found in a document, in document order.
#[derive(Debug)]
pub struct Candidates<'a> {
    pub elements: Vec<ElementRef<'a>>,
    pub source: CandidateSource,
}

/// Locates exhibition card containers in a parsed listing page.
pub struct CandidateLocator {
    keywords: Vec<String>,
    classed: Selector,
    fallback: Selector,
    fallback_limit: usize,
    max_candidates: usize,
}

impl CandidateLocator {
    /// Build a locator, compiling the fallback tag selector.
    pub fn new(config: &LocatorConfig) -> Result<Self> {
        let fallback_css = config.fallback_tags.join(", ");
        Ok(Self {
            keywords: config
                .class_keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            classed: parse_selector("[class]")?,
            fallback: parse_selector(&fallback_css)?,
            fallback_limit: config.fallback_limit,
            max_candidates: config.max_candidates,
        })
    }

    /// Find candidate containers. Never fails; an empty result is valid.
    pub fn locate<'a>(&self, document: &'a Html) -> Candidates<'a> {
        let matched: Vec<ElementRef<'a>> = document
            .select(&self.classed)
            .filter(|el| !PAGE_ELEMENTS.contains(&el.value().name()))
            .filter(|el| el.value().attr("class").is_some_and(|c| self.class_matches(c)))
            .take(self.max_candidates)
            .collect();

        if !matched.is_empty() {
            log::debug!("Located {} candidates by class keyword", matched.len());
            return Candidates {
                elements: matched,
                source: CandidateSource::ClassKeyword,
            };
        }

        let elements: Vec<ElementRef<'a>> = document
            .select(&self.fallback)
            .take(self.fallback_limit)
            .take(self.max_candidates)
            .collect();
        log::debug!(
            "No class keyword matched; using {} structural candidates",
            elements.len()
        );
        Candidates {
            elements,
            source: CandidateSource::Structural,
        }
    }

    fn class_matches(&self, class_attr: &str) -> bool {
        let lower = class_attr.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k.as_str()))
    }
}

/// Locate candidates with a one-off locator built from `config`.
pub fn locate_candidates<'a>(document: &'a Html, config: &LocatorConfig) -> Result<Vec<ElementRef<'a>>> {
    Ok(CandidateLocator::new(config)?.locate(document).elements)
}

pub(crate) fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locator() -> CandidateLocator {
        CandidateLocator::new(&LocatorConfig::default()).unwrap()
    }

    #[test]
    fn test_class_substring_match_is_case_insensitive() {
        let html = Html::parse_document(
            r#"<main>
                <div class="Grid-Item-Expo"><h3>Uno</h3></div>
                <article class="CardWrapper"><h3>Dos</h3></article>
                <div class="header">nada</div>
            </main>"#,
        );
        let found = locator().locate(&html);
        assert_eq!(found.source, CandidateSource::ClassKeyword);
        assert_eq!(found.elements.len(), 2);
        assert_eq!(found.elements[1].value().name(), "article");
    }

    #[test]
    fn test_page_level_class_is_not_a_candidate() {
        let html = Html::parse_document(
            r#"<html class="grid-layout"><body class="page-collection">
                <div class="card"><h3>Picasso azul</h3><p>Texto uno</p></div>
                <li class="item">Lista</li>
            </body></html>"#,
        );
        let found = locator().locate(&html);
        let names: Vec<_> = found.elements.iter().map(|e| e.value().name()).collect();
        assert_eq!(names, vec!["div", "li"]);
    }

    #[test]
    fn test_structural_fallback_in_document_order() {
        let html = Html::parse_document(
            r#"<body>
                <section id="s1"><p>a</p></section>
                <div id="d1"><article id="a1">b</article></div>
            </body>"#,
        );
        let found = locator().locate(&html);
        assert_eq!(found.source, CandidateSource::Structural);
        let ids: Vec<_> = found
            .elements
            .iter()
            .filter_map(|e| e.value().attr("id"))
            .collect();
        assert_eq!(ids, vec!["s1", "d1", "a1"]);
    }

    #[test]
    fn test_candidate_cap() {
        let cards: String = (0..50)
            .map(|i| format!(r#"<div class="card"><h3>Expo {i}</h3></div>"#))
            .collect();
        let html = Html::parse_document(&format!("<body>{cards}</body>"));
        assert_eq!(locator().locate(&html).elements.len(), 12);
    }

    #[test]
    fn test_fallback_limit_applies_before_cap() {
        let config = LocatorConfig {
            fallback_limit: 5,
            ..LocatorConfig::default()
        };
        let divs = "<div>x</div>".repeat(30);
        let html = Html::parse_document(&format!("<body>{divs}</body>"));
        let found = CandidateLocator::new(&config).unwrap().locate(&html);
        assert_eq!(found.elements.len(), 5);
    }

    #[test]
    fn test_empty_document_yields_nothing() {
        let html = Html::parse_document("");
        assert!(locator().locate(&html).elements.is_empty());
    }

    #[test]
    fn test_invalid_fallback_tag_is_selector_error() {
        let config = LocatorConfig {
            fallback_tags: vec!["[[bad".to_string()],
            ..LocatorConfig::default()
        };
        assert!(matches!(
            CandidateLocator::new(&config),
            Err(AppError::Selector { .. })
        ));
    }

    #[test]
    fn test_locate_candidates_helper() {
        let html = Html::parse_document(r#"<div class="expo">x</div>"#);
        let found = locate_candidates(&html, &LocatorConfig::default()).unwrap();
        assert_eq!(found.len(), 1);
    }
}
