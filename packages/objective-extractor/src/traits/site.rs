//! Site mapping and page scraping traits.

use async_trait::async_trait;

use crate::error::Result;

/// Raw answer from a mapping service.
///
/// Services disagree on the field name, so both are kept;
/// [`crate::pipeline::mapper::normalize_candidates`] decides precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteMap {
    pub urls: Option<Vec<String>>,
    pub links: Option<Vec<String>>,
}

impl SiteMap {
    /// A map that reports its candidates under `urls`.
    pub fn from_urls(urls: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            urls: Some(urls.into_iter().map(Into::into).collect()),
            links: None,
        }
    }

    /// A map that reports its candidates under `links`.
    pub fn from_links(links: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            urls: None,
            links: Some(links.into_iter().map(Into::into).collect()),
        }
    }
}

/// Lists candidate pages of a site, ranked by a search term.
#[async_trait]
pub trait SiteMapper: Send + Sync {
    async fn map_site(&self, base_url: &str, search: &str) -> Result<SiteMap>;
}

/// Fetches a page as markdown-like text.
#[async_trait]
pub trait PageScraper: Send + Sync {
    async fn scrape_markdown(&self, url: &str) -> Result<String>;
}
