//! Address bar input normalization
//!
//! Turns free-form input into something a frame can load:
//! 1. Already-absolute URL → returned unchanged
//! 2. Looks like a hostname (`example.com/path`) → `http://` prefixed
//! 3. Everything else → search query via the `%s` template

use url::Url;

use crate::percent;

pub const DEFAULT_SEARCH_TEMPLATE: &str = "https://search.brave.com/search?q=%s";

pub struct AddressNormalizer {
    /// Search engine URL template (%s replaced with the encoded query)
    search_template: String,
}

impl AddressNormalizer {
    pub fn new() -> Self {
        Self {
            search_template: DEFAULT_SEARCH_TEMPLATE.to_string(),
        }
    }

    pub fn with_search_template(template: String) -> Self {
        Self {
            search_template: template,
        }
    }

    pub fn set_search_template(&mut self, template: String) {
        self.search_template = template;
    }

    pub fn search_template(&self) -> &str {
        &self.search_template
    }

    /// Resolve raw input into a fully-qualified URL.
    ///
    /// Never fails: parse errors simply fall through to the next step,
    /// and the search template accepts anything.
    pub fn normalize(&self, input: &str) -> String {
        let input = input.trim();

        // Absolute URL as typed
        if let Ok(url) = Url::parse(input) {
            return url.to_string();
        }

        // Scheme-prefixed: a dot in the host is taken as evidence of a
        // real hostname rather than a search phrase.
        if let Ok(url) = Url::parse(&format!("http://{}", input)) {
            if url.host_str().is_some_and(|host| host.contains('.')) {
                return url.to_string();
            }
        }

        self.search_template
            .replace("%s", &percent::encode(input))
    }
}

impl Default for AddressNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_url_unchanged() {
        let normalizer = AddressNormalizer::new();
        assert_eq!(
            normalizer.normalize("https://example.com/path?x=1"),
            "https://example.com/path?x=1"
        );
    }

    #[test]
    fn test_hostname_gets_scheme() {
        let normalizer = AddressNormalizer::new();
        assert_eq!(normalizer.normalize("example.com"), "http://example.com/");
        assert_eq!(
            normalizer.normalize("docs.rs/url/latest"),
            "http://docs.rs/url/latest"
        );
    }

    #[test]
    fn test_host_matches_scheme_prefixed_parse() {
        let normalizer = AddressNormalizer::new();
        for input in ["example.com", "sub.domain.org/a/b", "news.ycombinator.com/item"] {
            let normalized = normalizer.normalize(input);
            let expected = Url::parse(&format!("http://{}", input)).unwrap();
            let parsed = Url::parse(&normalized).unwrap();
            assert_eq!(parsed.host_str(), expected.host_str());
        }
    }

    #[test]
    fn test_search_fallback() {
        let normalizer = AddressNormalizer::new();
        assert_eq!(
            normalizer.normalize("rust programming"),
            "https://search.brave.com/search?q=rust%20programming"
        );
        // No dot in host → search, even though it parses with a scheme
        assert_eq!(
            normalizer.normalize("justaword"),
            "https://search.brave.com/search?q=justaword"
        );
    }

    #[test]
    fn test_custom_template() {
        let normalizer = AddressNormalizer::with_search_template(
            "https://duckduckgo.com/?q=%s".to_string(),
        );
        assert_eq!(
            normalizer.normalize("hello world"),
            "https://duckduckgo.com/?q=hello%20world"
        );
    }

    #[test]
    fn test_idempotent_for_absolute_urls() {
        let normalizer = AddressNormalizer::new();
        for input in ["https://example.com/", "http://a.b/c?d=e#f", "example.com"] {
            let once = normalizer.normalize(input);
            let twice = normalizer.normalize(&once);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_never_panics_on_garbage() {
        let normalizer = AddressNormalizer::new();
        for input in ["", "   ", "::::", "%%%", "http://", "a b c d"] {
            let _ = normalizer.normalize(input);
        }
    }
}
