//! Site mapper and page scraper implementations.
//!
//! # Available Ingestors
//!
//! - `FirecrawlClient` - Firecrawl `/map` and `/scrape` (requires `firecrawl` feature)
//! - `MockSite` - For testing

mod mock;

#[cfg(feature = "firecrawl")]
mod firecrawl;

pub use mock::MockSite;

#[cfg(feature = "firecrawl")]
pub use firecrawl::firecrawl_client;

// Re-export from traits for convenience
pub use crate::traits::site::{PageScraper, SiteMap, SiteMapper};
