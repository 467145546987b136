//! Pure Firecrawl REST API client.
//!
//! Covers the two endpoints needed for targeted extraction: `/map` (list a
//! site's URLs, optionally ranked by a search term) and `/scrape` (fetch one
//! page in a given format).
//!
//! # Example
//!
//! ```rust,ignore
//! use firecrawl_client::FirecrawlClient;
//!
//! let client = FirecrawlClient::new(api_key)?;
//!
//! let map = client.map_url("https://example.com", Some("contact")).await?;
//! let markdown = client.scrape_markdown("https://example.com/contact").await?;
//! ```

pub mod error;
pub mod types;

pub use error::{FirecrawlError, Result};
pub use types::{MapRequest, MapResponse, PageMetadata, ScrapeData, ScrapeFormat, ScrapeRequest};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use types::ScrapeResponse;

const BASE_URL: &str = "https://api.firecrawl.dev/v1";

pub struct FirecrawlClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl FirecrawlClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        })
    }

    /// Point the client at a self-hosted Firecrawl instance.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<T: Serialize, R: DeserializeOwned>(&self, endpoint: &str, body: &T) -> Result<R> {
        let url = format!("{}{}", self.base_url, endpoint);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FirecrawlError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.json().await?)
    }

    /// List the URLs of a site, filtered and ranked by `search` when given.
    pub async fn map_url(&self, url: &str, search: Option<&str>) -> Result<MapResponse> {
        let request = MapRequest {
            url: url.to_string(),
            search: search.map(str::to_string),
            limit: None,
        };

        tracing::debug!(url, search, "Mapping site");
        let resp: MapResponse = self.post("/map", &request).await?;

        if !resp.success {
            return Err(FirecrawlError::Unsuccessful {
                endpoint: "map".into(),
                message: resp.error.unwrap_or_default(),
            });
        }

        Ok(resp)
    }

    /// Scrape a single page in the requested formats.
    pub async fn scrape_url(&self, url: &str, formats: &[ScrapeFormat]) -> Result<ScrapeData> {
        let request = ScrapeRequest {
            url: url.to_string(),
            formats: formats.to_vec(),
        };

        tracing::debug!(url, "Scraping page");
        let resp: ScrapeResponse = self.post("/scrape", &request).await?;

        if !resp.success {
            return Err(FirecrawlError::Unsuccessful {
                endpoint: "scrape".into(),
                message: resp.error.unwrap_or_default(),
            });
        }

        resp.data.ok_or_else(|| FirecrawlError::MissingContent {
            url: url.to_string(),
            format: "data".into(),
        })
    }

    /// Scrape a single page and return only its markdown.
    pub async fn scrape_markdown(&self, url: &str) -> Result<String> {
        let data = self.scrape_url(url, &[ScrapeFormat::Markdown]).await?;
        data.markdown.ok_or_else(|| FirecrawlError::MissingContent {
            url: url.to_string(),
            format: ScrapeFormat::Markdown.as_str().into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        let client = FirecrawlClient::new("fc-test").unwrap();
        assert_eq!(client.base_url(), BASE_URL);
    }

    #[test]
    fn test_self_hosted_base_url() {
        let client = FirecrawlClient::new("fc-test")
            .unwrap()
            .with_base_url("http://localhost:3002/v1/");
        assert_eq!(client.base_url(), "http://localhost:3002/v1");
    }

    #[test]
    fn test_unreachable_host_is_http_error() {
        let client = FirecrawlClient::new("fc-test")
            .unwrap()
            .with_base_url("http://127.0.0.1:9");
        let result = tokio_test::block_on(client.map_url("https://example.com", Some("contact")));

        assert!(matches!(result, Err(FirecrawlError::Http(_))));
    }
}
