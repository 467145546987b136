//! [`LanguageModel`] for the OpenAI-compatible chat client.
//!
//! Requires the `openai` feature to be enabled.

use async_trait::async_trait;
use openai_client::{ChatRequest, OpenAIClient, OpenAIError};
use std::time::Duration;
use tracing::debug;

use crate::error::{ExtractorError, Result};
use crate::traits::llm::{CompletionRequest, LanguageModel};

/// Per-request timeout for model calls.
const MODEL_TIMEOUT: Duration = Duration::from_secs(120);

/// Build a client for an OpenAI-compatible endpoint such as SambaNova.
pub fn sambanova_client(api_key: &str, base_url: &str) -> Result<OpenAIClient> {
    OpenAIClient::new(api_key)
        .with_base_url(base_url)
        .with_timeout(MODEL_TIMEOUT)
        .map_err(|e| ExtractorError::Config(e.to_string()))
}

fn chat_request(request: &CompletionRequest) -> ChatRequest {
    let mut chat = ChatRequest::new(&request.model);
    if let Some(system) = &request.system {
        chat = chat.system(system);
    }
    chat.user(&request.user)
        .sampling(request.temperature, request.top_p)
}

#[async_trait]
impl LanguageModel for OpenAIClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        debug!(
            model = %request.model,
            has_system = request.system.is_some(),
            prompt_chars = request.user.len(),
            "Sending chat completion"
        );

        let completion = self
            .chat_completion(&chat_request(request))
            .await
            .map_err(|e| match e {
                OpenAIError::Parse(reason) => ExtractorError::response_shape(reason),
                other => ExtractorError::Model(Box::new(other)),
            })?;

        if let Some(usage) = completion.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion usage"
            );
        }

        completion
            .into_text()
            .ok_or_else(|| ExtractorError::response_shape("chat completion had no choices"))
    }
}
