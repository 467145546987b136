//! Run coordinator: search term, site map, scan, outcome.
//!
//! Every stage below the coordinator degrades to "nothing found" on failure,
//! so the only ways a run can end in [`Outcome::Failed`] are a rejected
//! request and a panic escaping a collaborator.

use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::pipeline::mapper::map_site;
use crate::pipeline::scanner::PageScanner;
use crate::pipeline::search_term::derive_search_term;
use crate::pipeline::tracker::RunTracker;
use crate::traits::llm::LanguageModel;
use crate::traits::observer::RunObserver;
use crate::traits::site::{PageScraper, SiteMapper};
use crate::types::config::RunRequest;
use crate::types::run::{ExtractionResult, Outcome, RunFailure, RunReport};

/// Log entry when every scanned page was rejected.
const NOT_FULFILLED_ENTRY: &str = "Could not fulfill the objective on scanned pages.";

/// The objective extraction pipeline.
///
/// Holds its collaborators behind trait objects so the same pipeline runs
/// against live services or test doubles.
#[derive(Clone)]
pub struct Pipeline {
    mapper: Arc<dyn SiteMapper>,
    scraper: Arc<dyn PageScraper>,
    model: Arc<dyn LanguageModel>,
    observers: Vec<Arc<dyn RunObserver>>,
}

impl Pipeline {
    pub fn new(
        mapper: Arc<dyn SiteMapper>,
        scraper: Arc<dyn PageScraper>,
        model: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            mapper,
            scraper,
            model,
            observers: Vec::new(),
        }
    }

    /// Register an observer that receives a snapshot after every state change.
    pub fn with_observer(mut self, observer: Arc<dyn RunObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run the pipeline for `request`.
    ///
    /// Never returns an error: every failure is folded into the outcome.
    #[instrument(skip(self, request), fields(url = %request.url, max_pages = request.max_pages))]
    pub async fn run(&self, request: &RunRequest) -> RunReport {
        let mut tracker = RunTracker::new(&self.observers);

        if let Err(e) = request.validate() {
            tracker.fatal(format!("Cannot start run: {}", e));
            return RunReport {
                outcome: Outcome::Failed(RunFailure::from(&e)),
                state: tracker.into_state(),
            };
        }

        let result = AssertUnwindSafe(self.execute(request, &mut tracker))
            .catch_unwind()
            .await;

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                tracker.fatal(format!("Fatal error: {}", message));
                tracker.finish(ExtractionResult::NotFound);
                Outcome::Failed(RunFailure::fatal(message))
            }
        };

        info!(outcome = %outcome, pages_scanned = tracker.state().pages_scanned, "Run finished");

        RunReport {
            outcome,
            state: tracker.into_state(),
        }
    }

    async fn execute(&self, request: &RunRequest, tracker: &mut RunTracker<'_>) -> Outcome {
        let url = request.url.trim();
        let objective = request.objective.trim();
        let config = &request.model;

        let search_term = derive_search_term(self.model.as_ref(), config, objective, tracker).await;
        let candidates = match search_term {
            Some(term) => map_site(self.mapper.as_ref(), url, &term, tracker).await,
            None => Vec::new(),
        };

        if candidates.is_empty() {
            tracker.finish(ExtractionResult::NotFound);
            return Outcome::NoCandidates;
        }

        let result = PageScanner::new(self.scraper.as_ref(), self.model.as_ref(), config)
            .scan(&candidates, objective, request.max_pages, tracker)
            .await;

        let outcome = match &result {
            ExtractionResult::Found(data) => Outcome::Success { data: data.clone() },
            ExtractionResult::NotFound => {
                tracker.log(NOT_FULFILLED_ENTRY);
                Outcome::NotFulfilled
            }
        };

        tracker.finish(result);
        outcome
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Run against the live services: Firecrawl for mapping and scraping, an
/// OpenAI-compatible endpoint for the model.
///
/// Missing credentials and request fields are reported together before any
/// client is built.
#[cfg(all(feature = "openai", feature = "firecrawl"))]
pub async fn run_objective(
    credentials: &crate::security::ServiceCredentials,
    request: &RunRequest,
    observers: Vec<Arc<dyn RunObserver>>,
) -> RunReport {
    use crate::ai::sambanova_client;
    use crate::error::ExtractorError;
    use crate::ingestors::firecrawl_client;

    let report_failure = |e: ExtractorError, prefix: &str| {
        let mut tracker = RunTracker::new(&observers);
        tracker.fatal(format!("{}: {}", prefix, e));
        RunReport {
            outcome: Outcome::Failed(RunFailure::from(&e)),
            state: tracker.into_state(),
        }
    };

    let mut missing = request.missing_fields();
    missing.extend(credentials.missing_fields());
    if !missing.is_empty() {
        return report_failure(ExtractorError::MissingFields { fields: missing }, "Cannot start run");
    }

    // Both keys are present and non-blank past this point.
    let (Some(firecrawl_key), Some(model_key)) =
        (&credentials.firecrawl_api_key, &credentials.model_api_key)
    else {
        return report_failure(
            ExtractorError::Config("credentials missing".into()),
            "Cannot start run",
        );
    };

    let clients = firecrawl_client(firecrawl_key.expose()).and_then(|firecrawl| {
        sambanova_client(model_key.expose(), &credentials.model_base_url)
            .map(|model| (firecrawl, model))
    });

    let (firecrawl, model) = match clients {
        Ok(clients) => clients,
        Err(e) => return report_failure(e, "Fatal error"),
    };

    let firecrawl = Arc::new(firecrawl);
    let pipeline = observers.iter().cloned().fold(
        Pipeline::new(firecrawl.clone(), firecrawl, Arc::new(model)),
        Pipeline::with_observer,
    );

    pipeline.run(request).await
}
