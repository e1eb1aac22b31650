//! Utility functions and helpers.

pub mod http;

use scraper::ElementRef;
use url::Url;

/// Resolve an href against the listing page URL.
///
/// Absolute `http(s)` links are returned untouched; root-relative and
/// relative links are joined onto `base`. Returns `None` for empty hrefs,
/// unresolvable input, and non-web schemes such as `javascript:`.
pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    if let Ok(absolute) = Url::parse(href) {
        return is_web_url(&absolute).then(|| href.to_string());
    }

    base.join(href)
        .ok()
        .filter(is_web_url)
        .map(|u| u.to_string())
}

fn is_web_url(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https") && url.host_str().is_some()
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// All text beneath an element, whitespace-normalized.
///
/// Text nodes are joined with a space so adjacent blocks do not run together.
pub fn element_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// Keep at most `max` Unicode scalar values of `s`.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Truncate to `max` characters and append `marker` when anything was cut.
pub fn truncate_with_marker(s: &str, max: usize, marker: &str) -> String {
    if s.chars().count() > max {
        let mut out = truncate_chars(s, max);
        out.push_str(marker);
        out
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn listing() -> Url {
        Url::parse("https://www.museoreinasofia.es/exposiciones").unwrap()
    }

    #[test]
    fn test_resolve_root_relative() {
        assert_eq!(
            resolve_link(&listing(), "/expo/123"),
            Some("https://www.museoreinasofia.es/expo/123".to_string())
        );
    }

    #[test]
    fn test_resolve_absolute_unchanged() {
        assert_eq!(
            resolve_link(&listing(), "https://other.site/x"),
            Some("https://other.site/x".to_string())
        );
        assert_eq!(
            resolve_link(&listing(), "https://other.site"),
            Some("https://other.site".to_string())
        );
    }

    #[test]
    fn test_resolve_relative_path() {
        assert_eq!(
            resolve_link(&listing(), "exposicion/picasso"),
            Some("https://www.museoreinasofia.es/exposicion/picasso".to_string())
        );
    }

    #[test]
    fn test_resolve_rejects_non_web() {
        assert_eq!(resolve_link(&listing(), "javascript:void(0)"), None);
        assert_eq!(resolve_link(&listing(), "mailto:info@museo.es"), None);
        assert_eq!(resolve_link(&listing(), "   "), None);
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \n\t b  c "), "a b c");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_element_text_separates_blocks() {
        let html = Html::parse_fragment("<div><h3>Hola</h3><p>mundo\n  cruel</p></div>");
        let sel = Selector::parse("div").unwrap();
        let div = html.select(&sel).next().unwrap();
        assert_eq!(element_text(div), "Hola mundo cruel");
    }

    #[test]
    fn test_truncate_counts_code_points() {
        let text = "ñ".repeat(10);
        let out = truncate_chars(&text, 4);
        assert_eq!(out, "ññññ");
        assert_eq!(out.len(), 8);
    }

    #[test]
    fn test_truncate_with_marker() {
        let long = "x".repeat(150);
        let out = truncate_with_marker(&long, 100, "...");
        assert_eq!(out.chars().count(), 103);
        assert!(out.ends_with("..."));
        assert_eq!(truncate_with_marker("short", 100, "..."), "short");
        assert_eq!(truncate_with_marker(&"y".repeat(100), 100, "..."), "y".repeat(100));
    }
}
