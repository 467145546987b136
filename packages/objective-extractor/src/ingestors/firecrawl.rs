//! Firecrawl-backed [`SiteMapper`] and [`PageScraper`].
//!
//! Requires the `firecrawl` feature to be enabled.

use async_trait::async_trait;
use firecrawl_client::{FirecrawlClient, FirecrawlError, MapResponse};

use crate::error::{ExtractorError, Result};
use crate::traits::site::{PageScraper, SiteMap, SiteMapper};

/// Build a Firecrawl client, mapping construction failures to config errors.
pub fn firecrawl_client(api_key: &str) -> Result<FirecrawlClient> {
    FirecrawlClient::new(api_key).map_err(|e| ExtractorError::Config(e.to_string()))
}

impl From<MapResponse> for SiteMap {
    fn from(resp: MapResponse) -> Self {
        Self {
            urls: resp.urls,
            links: resp.links,
        }
    }
}

#[async_trait]
impl SiteMapper for FirecrawlClient {
    async fn map_site(&self, base_url: &str, search: &str) -> Result<SiteMap> {
        let resp = self
            .map_url(base_url, Some(search))
            .await
            .map_err(|e| ExtractorError::Mapping(Box::new(e)))?;
        Ok(resp.into())
    }
}

#[async_trait]
impl PageScraper for FirecrawlClient {
    async fn scrape_markdown(&self, url: &str) -> Result<String> {
        FirecrawlClient::scrape_markdown(self, url)
            .await
            .map_err(|e| match e {
                FirecrawlError::MissingContent { .. } => ExtractorError::response_shape(e.to_string()),
                other => ExtractorError::Scrape {
                    url: url.to_string(),
                    source: Box::new(other),
                },
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::pipeline::mapper::normalize_candidates;

    #[test]
    fn test_map_response_keeps_both_fields() {
        let resp: MapResponse = serde_json::from_value(serde_json::json!({
            "success": true,
            "links": ["https://a.com/contact", "https://a.com/about"]
        }))
        .unwrap();

        let map = SiteMap::from(resp);
        assert!(map.urls.is_none());
        assert_eq!(
            normalize_candidates(map),
            vec!["https://a.com/contact", "https://a.com/about"]
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_errors() {
        let client = firecrawl_client("key")
            .unwrap()
            .with_base_url("http://127.0.0.1:9");

        let err = client.map_site("https://a.com", "contact").await.unwrap_err();
        assert!(matches!(err, ExtractorError::Mapping(_)));

        let err = PageScraper::scrape_markdown(&client, "https://a.com").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
