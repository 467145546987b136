use thiserror::Error;

pub type Result<T> = std::result::Result<T, FirecrawlError>;

/// Firecrawl client errors.
#[derive(Debug, Error)]
pub enum FirecrawlError {
    /// Transport failure (connection, timeout, body decoding)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("Firecrawl API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// 2xx response with `"success": false`
    #[error("Firecrawl {endpoint} reported failure: {message}")]
    Unsuccessful { endpoint: String, message: String },

    /// Scrape succeeded but the requested format was not returned
    #[error("no {format} content returned for {url}")]
    MissingContent { url: String, format: String },
}
