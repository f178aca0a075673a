//! HTML-to-prose normalization
//!
//! Flattens a fetched page into whitespace-collapsed prose for the extractor
//! and harvests every link it can find. Script, style, and noscript subtrees
//! are dropped entirely. Each anchor's href is inlined, parenthesized, right
//! after its visible text (`About Us (/about-us)`) so the model can reason
//! about where a label leads. A separate raw scan over the payload picks up
//! URL literals embedded in scripts or JSON that never appear as anchors;
//! those contribute to the link set but not to the prose.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

use crate::fetch::Page;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^\s"'<>]+"#).expect("URL pattern is valid")
});

/// Elements whose entire subtree is noise for the extractor
const SKIPPED_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Prose text plus discovered link targets, derived from one [`Page`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    /// Flattened, whitespace-collapsed prose with hrefs inlined
    pub text: String,
    /// Every link target harvested from anchors and the raw URL scan.
    /// Deduplicated and deterministically ordered.
    pub links: BTreeSet<String>,
}

/// Flatten a page into prose and harvest its links. Pure; no I/O.
pub fn normalize(page: &Page) -> NormalizedText {
    let document = Html::parse_document(&page.body);

    let mut prose = String::new();
    let mut links = BTreeSet::new();
    flatten(document.root_element(), &mut prose, &mut links);

    // Links expressed only inside scripts or JSON blobs
    for found in URL_PATTERN.find_iter(&page.body) {
        links.insert(found.as_str().to_string());
    }

    NormalizedText {
        text: collapse_whitespace(&prose),
        links,
    }
}

fn flatten(element: ElementRef<'_>, prose: &mut String, links: &mut BTreeSet<String>) {
    for node in element.children() {
        if let Some(text) = node.value().as_text() {
            prose.push_str(text);
            continue;
        }
        let Some(child) = ElementRef::wrap(node) else {
            continue;
        };
        let name = child.value().name();
        if SKIPPED_ELEMENTS.contains(&name) {
            continue;
        }
        flatten(child, prose, links);
        if name == "a" {
            if let Some(href) = child.value().attr("href") {
                prose.push_str(&format!(" ({href})"));
                links.insert(href.to_string());
            }
        }
        // Element boundaries never glue adjacent words together
        prose.push(' ');
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn page(body: &str) -> Page {
        Page {
            url: Url::parse("https://example.com").unwrap(),
            body: body.to_string(),
        }
    }

    #[test]
    fn strips_script_and_style_content() {
        let html = r#"<html><head>
            <style>body { color: red; }</style>
            <script>var secret = "tracking";</script>
        </head><body>
            <p>Visible  prose.</p>
            <noscript>Enable JS</noscript>
        </body></html>"#;

        let normalized = normalize(&page(html));
        assert_eq!(normalized.text, "Visible prose.");
        assert!(!normalized.text.contains("color"));
        assert!(!normalized.text.contains("tracking"));
        assert!(!normalized.text.contains("Enable JS"));
    }

    #[test]
    fn inlines_anchor_hrefs_after_their_text() {
        let html = r#"<body><a href="/about-us">About Us</a> and more</body>"#;
        let normalized = normalize(&page(html));

        assert_eq!(normalized.text, "About Us (/about-us) and more");
        assert!(normalized.links.contains("/about-us"));
    }

    #[test]
    fn raw_scan_finds_links_outside_anchors() {
        let html = r#"<body>
            <script>fetch("https://example.com/company/history?tab=1");</script>
            <p>text</p>
        </body>"#;
        let normalized = normalize(&page(html));

        assert!(
            normalized
                .links
                .contains("https://example.com/company/history?tab=1")
        );
        // Script-origin links never reach the prose
        assert_eq!(normalized.text, "text");
    }

    #[test]
    fn links_are_deduplicated() {
        let html = r#"<body>
            <a href="https://example.com/about">About</a>
            <a href="https://example.com/about">About again</a>
            <script>go("https://example.com/about")</script>
        </body>"#;
        let normalized = normalize(&page(html));

        let about_count = normalized
            .links
            .iter()
            .filter(|l| *l == "https://example.com/about")
            .count();
        assert_eq!(about_count, 1);
    }

    #[test]
    fn collapses_whitespace_across_elements() {
        let html = "<body><div>one</div>\n\t<div>two\n three</div></body>";
        let normalized = normalize(&page(html));
        assert_eq!(normalized.text, "one two three");
    }
}
