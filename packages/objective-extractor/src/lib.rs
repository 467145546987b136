//! Objective-Driven Web Extraction Library
//!
//! Given a website and a plain-language objective ("find the contact
//! email"), derive a search term, map the site for candidate pages, and scan
//! them one at a time until a language model reports the objective met.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use objective_extractor::{Pipeline, RunRequest};
//! use objective_extractor::ingestors::MockSite;
//! use objective_extractor::testing::MockLanguageModel;
//!
//! let site = Arc::new(MockSite::new());
//! let model = Arc::new(MockLanguageModel::new());
//! let pipeline = Pipeline::new(site.clone(), site, model);
//!
//! let report = pipeline
//!     .run(&RunRequest::new("https://example.com", "Find the contact email"))
//!     .await;
//! println!("{}", report.outcome);
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Collaborator abstractions (LanguageModel, SiteMapper, PageScraper, RunObserver)
//! - [`types`] - Run requests, state and outcomes
//! - [`pipeline`] - Search term, mapping, scanning and the coordinator
//! - [`ingestors`] - Site mapper / scraper implementations
//! - [`export`] - JSON and CSV export of extracted data
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod export;
pub mod ingestors;
pub mod pipeline;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "openai")]
pub mod ai;

// Re-export core types at crate root
pub use error::{ErrorKind, ExtractorError, Result};
pub use export::{to_csv, to_pretty_json, RunSummary};
pub use pipeline::{parse_classification, Pipeline, RunTracker};
pub use security::{ApiKey, ServiceCredentials, SAMBANOVA_BASE_URL};
pub use traits::{
    llm::{CompletionRequest, LanguageModel},
    observer::RunObserver,
    site::{PageScraper, SiteMap, SiteMapper},
};
pub use types::{
    config::{Model, ModelConfig, RunRequest, DEFAULT_MAX_PAGES, MAX_PAGES_LIMIT},
    run::{ExtractionResult, Outcome, RunFailure, RunFailureKind, RunReport, RunState},
};

#[cfg(all(feature = "openai", feature = "firecrawl"))]
pub use pipeline::run_objective;
