//! Language model trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::config::ModelConfig;

/// A single chat completion: optional system instruction plus one user turn.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Provider model identifier
    pub model: String,

    /// System-level instruction, if any
    pub system: Option<String>,

    /// The user prompt
    pub user: String,

    pub temperature: f32,
    pub top_p: f32,
}

impl CompletionRequest {
    /// Build a user-only request with the sampling settings from `config`.
    pub fn new(config: &ModelConfig, user: impl Into<String>) -> Self {
        Self {
            model: config.model.id().to_string(),
            system: None,
            user: user.into(),
            temperature: config.temperature,
            top_p: config.top_p,
        }
    }

    /// Attach a system instruction.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// Chat-completion style language model.
///
/// Implementations return the raw text of the first choice. Transport and
/// API failures surface as [`crate::ExtractorError::Model`].
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}
