//! Extraction pipeline - the core of the library.
//!
//! The pipeline orchestrates:
//! - Search-term derivation (objective → one word)
//! - Site mapping (search term → candidate pages)
//! - Sequential scanning (scrape → classify, stop at first hit)
//! - Progress and log bookkeeping for observers

pub mod classifier;
pub mod coordinator;
pub mod mapper;
pub mod prompts;
pub mod scanner;
pub mod search_term;
pub mod tracker;

pub use classifier::{classify, parse_classification, strip_think_spans, NOT_MET_SENTINEL};
pub use coordinator::Pipeline;
pub use mapper::{map_site, normalize_candidates};
pub use prompts::{
    format_classify_prompt, format_search_term_prompt, CLASSIFY_PROMPT, CLASSIFY_SYSTEM_PROMPT,
    SEARCH_TERM_PROMPT,
};
pub use scanner::{truncate_content, PageScanner, MAX_CONTENT_CHARS};
pub use search_term::{derive_search_term, request_search_term};
pub use tracker::RunTracker;

#[cfg(all(feature = "openai", feature = "firecrawl"))]
pub use coordinator::run_objective;
