//! Search-term derivation: objective text to a short site-map query.

use crate::error::{ExtractorError, Result};
use crate::pipeline::prompts::format_search_term_prompt;
use crate::pipeline::tracker::RunTracker;
use crate::traits::llm::{CompletionRequest, LanguageModel};
use crate::types::config::ModelConfig;

/// First whitespace-delimited token of a model reply.
///
/// Only one word is kept even when the model answers with two.
pub fn first_token(reply: &str) -> Option<&str> {
    reply.split_whitespace().next()
}

/// Ask the model for a search term. One completion call.
pub async fn request_search_term<L: LanguageModel + ?Sized>(
    model: &L,
    config: &ModelConfig,
    objective: &str,
) -> Result<String> {
    let request = CompletionRequest::new(config, format_search_term_prompt(objective));
    let reply = model.complete(&request).await?;

    first_token(&reply)
        .map(str::to_string)
        .ok_or_else(|| ExtractorError::response_shape("model returned an empty search term"))
}

/// Derive a search term, logging progress. Failures yield `None`.
pub async fn derive_search_term<L: LanguageModel + ?Sized>(
    model: &L,
    config: &ModelConfig,
    objective: &str,
    tracker: &mut RunTracker<'_>,
) -> Option<String> {
    tracker.log(format!("Generating search parameter for: {}", objective));

    match request_search_term(model, config, objective).await {
        Ok(term) => {
            tracker.log(format!("Using search term: '{}'", term));
            Some(term)
        }
        Err(e) => {
            tracker.warn(format!("Error deriving search term: {}", e));
            None
        }
    }
}
