//! Candidate-link selection
//!
//! When the questionnaire is incomplete after the seed page, the seed's
//! discovered links are filtered down to the ones likely to carry the missing
//! facts: a link is relevant iff its lowercased resolved form contains at
//! least one keyword from the topical vocabulary. Binary include/exclude,
//! no scoring. Relative links resolve against the base URL per RFC 3986 and
//! candidates stay on the seed's host. Output is deduplicated by canonical
//! form and stably ordered, so a run is reproducible.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use tracing::trace;
use url::Url;

/// Canonical string form of a URL used for deduplication and visited-set
/// membership: fragment dropped, trailing slash ignored. Scheme and host
/// casing are already normalized by the url crate.
pub fn canonicalize(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    let s = url.to_string();
    match s.strip_suffix('/') {
        Some(stripped) => stripped.to_string(),
        None => s,
    }
}

/// Resolve a discovered link against the page it was found on. Anything that
/// is not http(s) after resolution is discarded.
fn resolve(base: &Url, raw: &str) -> Option<Url> {
    let url = base.join(raw).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

/// Select the follow-up candidates from a page's discovered links.
///
/// Deterministic: the result is sorted by canonical URL string regardless of
/// input order, and running it twice over the same set yields the same list.
pub fn filter_relevant(links: &BTreeSet<String>, base: &Url, keywords: &[String]) -> Vec<Url> {
    let base_canonical = canonicalize(base);
    let mut candidates: BTreeMap<String, Url> = BTreeMap::new();

    for raw in links {
        let Some(url) = resolve(base, raw) else {
            trace!(link = %raw, "discarding unresolvable link");
            continue;
        };
        if url.host_str() != base.host_str() {
            continue;
        }
        let lowered = url.as_str().to_lowercase();
        if !keywords
            .iter()
            .any(|k| lowered.contains(&k.to_lowercase()))
        {
            continue;
        }
        let canonical = canonicalize(&url);
        if canonical == base_canonical {
            continue;
        }
        candidates.entry(canonical).or_insert(url);
    }

    candidates.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords() -> Vec<String> {
        crate::config::default_keywords()
    }

    fn base() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    fn link_set(links: &[&str]) -> BTreeSet<String> {
        links.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn keyword_match_is_binary_and_case_insensitive() {
        let links = link_set(&[
            "https://example.com/About-Us",
            "https://example.com/products/chairs",
        ]);
        let candidates = filter_relevant(&links, &base(), &keywords());

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].path(), "/About-Us");
    }

    #[test]
    fn relative_links_resolve_against_base() {
        let links = link_set(&["/company/leadership", "contact", "../awards"]);
        let candidates = filter_relevant(&links, &base(), &keywords());

        let paths: Vec<&str> = candidates.iter().map(|u| u.path()).collect();
        assert!(paths.contains(&"/company/leadership"));
        assert!(paths.contains(&"/contact"));
        assert!(paths.contains(&"/awards"));
    }

    #[test]
    fn other_hosts_are_excluded() {
        let links = link_set(&[
            "https://other.example.org/about",
            "https://example.com/about",
        ]);
        let candidates = filter_relevant(&links, &base(), &keywords());

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].host_str(), Some("example.com"));
    }

    #[test]
    fn non_http_schemes_are_discarded() {
        let links = link_set(&["mailto:team@example.com", "javascript:void(0)"]);
        let candidates = filter_relevant(&links, &base(), &keywords());
        assert!(candidates.is_empty());
    }

    #[test]
    fn canonical_duplicates_collapse() {
        // Same page reached with and without trailing slash, and via fragment
        let links = link_set(&[
            "https://example.com/about",
            "https://example.com/about/",
            "https://example.com/about#team",
        ]);
        let candidates = filter_relevant(&links, &base(), &keywords());
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn base_url_itself_is_never_a_candidate() {
        // "company" is in the vocabulary, so a seed like company.example.com
        // would otherwise select itself
        let base = Url::parse("https://company.example.com/").unwrap();
        let links = link_set(&["https://company.example.com/", "/story-of-the-company"]);
        let candidates = filter_relevant(&links, &base, &keywords());

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].path(), "/story-of-the-company");
    }

    #[test]
    fn output_is_deterministic_and_idempotent() {
        let links = link_set(&["/contact", "/about", "/team", "/leadership"]);
        let first = filter_relevant(&links, &base(), &keywords());
        let second = filter_relevant(&links, &base(), &keywords());

        assert_eq!(first, second);
        let mut sorted = first.clone();
        sorted.sort_by(|a, b| canonicalize(a).cmp(&canonicalize(b)));
        assert_eq!(first, sorted);
    }

    #[test]
    fn canonicalize_ignores_fragment_and_trailing_slash() {
        let a = Url::parse("https://example.com/about/").unwrap();
        let b = Url::parse("https://example.com/about#x").unwrap();
        assert_eq!(canonicalize(&a), canonicalize(&b));
    }
}
