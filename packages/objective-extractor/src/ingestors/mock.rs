//! Mock site for testing.
//!
//! Provides a configurable implementation of both [`SiteMapper`] and
//! [`PageScraper`].

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{ExtractorError, Result};
use crate::traits::site::{PageScraper, SiteMap, SiteMapper};

#[derive(Debug, Clone)]
enum MockPage {
    Markdown(String),
    Failure(String),
    Panic,
}

/// Mock site for testing.
///
/// Allows configuring a canned map response and per-URL scrape responses.
/// Scraping a URL that was never configured fails.
///
/// # Example
///
/// ```rust
/// use objective_extractor::ingestors::MockSite;
/// use objective_extractor::SiteMap;
///
/// let site = MockSite::new()
///     .with_map(SiteMap::from_urls(["https://example.com/contact"]))
///     .with_page("https://example.com/contact", "# Contact\n\nhello@example.com");
/// ```
#[derive(Default)]
pub struct MockSite {
    /// Canned map response; `None` maps to an empty site
    map: Arc<RwLock<Option<std::result::Result<SiteMap, String>>>>,
    /// Canned pages indexed by URL
    pages: Arc<RwLock<HashMap<String, MockPage>>>,
    /// Track calls for verification
    map_calls: Arc<RwLock<Vec<(String, String)>>>,
    scrape_calls: Arc<RwLock<Vec<String>>>,
}

impl MockSite {
    /// Create a new empty mock site.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer mapping requests with `map` (builder pattern).
    pub fn with_map(self, map: SiteMap) -> Self {
        *self.map.write().unwrap() = Some(Ok(map));
        self
    }

    /// Fail mapping requests with `message` (builder pattern).
    pub fn with_map_failure(self, message: impl Into<String>) -> Self {
        *self.map.write().unwrap() = Some(Err(message.into()));
        self
    }

    /// Add a page that scrapes to `markdown`.
    pub fn add_page(&self, url: impl Into<String>, markdown: impl Into<String>) {
        self.insert(url.into(), MockPage::Markdown(markdown.into()));
    }

    /// Add a page (builder pattern).
    pub fn with_page(self, url: impl Into<String>, markdown: impl Into<String>) -> Self {
        self.add_page(url, markdown);
        self
    }

    /// Make scraping `url` fail with `message` (builder pattern).
    pub fn with_page_failure(self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.insert(url.into(), MockPage::Failure(message.into()));
        self
    }

    /// Make scraping `url` panic (builder pattern).
    pub fn with_scrape_panic(self, url: impl Into<String>) -> Self {
        self.insert(url.into(), MockPage::Panic);
        self
    }

    /// Get the (base_url, search) pairs passed to `map_site`.
    pub fn map_calls(&self) -> Vec<(String, String)> {
        self.map_calls.read().unwrap().clone()
    }

    /// Get the URLs that were scraped, in order.
    pub fn scrape_calls(&self) -> Vec<String> {
        self.scrape_calls.read().unwrap().clone()
    }

    /// Clear all recorded calls.
    pub fn reset_calls(&self) {
        self.map_calls.write().unwrap().clear();
        self.scrape_calls.write().unwrap().clear();
    }

    fn insert(&self, url: String, page: MockPage) {
        self.pages.write().unwrap().insert(url, page);
    }
}

impl Clone for MockSite {
    fn clone(&self) -> Self {
        Self {
            map: Arc::clone(&self.map),
            pages: Arc::clone(&self.pages),
            map_calls: Arc::clone(&self.map_calls),
            scrape_calls: Arc::clone(&self.scrape_calls),
        }
    }
}

#[async_trait]
impl SiteMapper for MockSite {
    async fn map_site(&self, base_url: &str, search: &str) -> Result<SiteMap> {
        self.map_calls
            .write()
            .unwrap()
            .push((base_url.to_string(), search.to_string()));

        match self.map.read().unwrap().clone() {
            Some(Ok(map)) => Ok(map),
            Some(Err(message)) => Err(ExtractorError::Mapping(message.into())),
            None => Ok(SiteMap::default()),
        }
    }
}

#[async_trait]
impl PageScraper for MockSite {
    async fn scrape_markdown(&self, url: &str) -> Result<String> {
        self.scrape_calls.write().unwrap().push(url.to_string());

        let page = self.pages.read().unwrap().get(url).cloned();
        match page {
            Some(MockPage::Markdown(markdown)) => Ok(markdown),
            Some(MockPage::Failure(message)) => Err(ExtractorError::Scrape {
                url: url.to_string(),
                source: message.into(),
            }),
            Some(MockPage::Panic) => panic!("mock scrape panic for {}", url),
            None => Err(ExtractorError::Scrape {
                url: url.to_string(),
                source: "page not configured".into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[tokio::test]
    async fn test_unconfigured_map_is_empty() {
        let site = MockSite::new();
        let map = site.map_site("https://a.com", "x").await.unwrap();
        assert_eq!(map, SiteMap::default());
        assert_eq!(site.map_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_scrape_configured_and_unknown_pages() {
        let site = MockSite::new().with_page("https://a.com/1", "# One");

        assert_eq!(site.scrape_markdown("https://a.com/1").await.unwrap(), "# One");
        let err = site.scrape_markdown("https://a.com/2").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(site.scrape_calls(), vec!["https://a.com/1", "https://a.com/2"]);

        site.reset_calls();
        assert!(site.scrape_calls().is_empty());
    }
}
