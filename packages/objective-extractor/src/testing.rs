//! Testing utilities including mock implementations.
//!
//! These are useful for testing code built on the extractor without making
//! real model calls.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::error::{ExtractorError, Result};
use crate::pipeline::classifier::NOT_MET_SENTINEL;
use crate::traits::llm::{CompletionRequest, LanguageModel};

/// A scripted reply.
#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Failure(String),
}

/// A mock language model for testing.
///
/// Replies are consumed in the order they were scripted. Once the script is
/// exhausted every call answers "Objective not met".
#[derive(Default)]
pub struct MockLanguageModel {
    /// Scripted replies, front first
    replies: Arc<RwLock<VecDeque<MockReply>>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<MockModelCall>>>,
}

/// Record of a call made to the mock model.
#[derive(Debug, Clone, PartialEq)]
pub struct MockModelCall {
    pub model: String,
    pub system: Option<String>,
    pub user: String,
    pub temperature: f32,
    pub top_p: f32,
}

impl MockLanguageModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.push(MockReply::Text(reply.into()));
        self
    }

    /// Queue a transport failure.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.push(MockReply::Failure(message.into()));
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockModelCall> {
        self.calls.read().unwrap().clone()
    }

    /// Calls that carried a system prompt, i.e. classification calls.
    pub fn classification_count(&self) -> usize {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter(|call| call.system.is_some())
            .count()
    }

    /// Clear call history.
    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }

    fn push(&self, reply: MockReply) {
        self.replies.write().unwrap().push_back(reply);
    }
}

impl Clone for MockLanguageModel {
    fn clone(&self) -> Self {
        Self {
            replies: Arc::clone(&self.replies),
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        self.calls.write().unwrap().push(MockModelCall {
            model: request.model.clone(),
            system: request.system.clone(),
            user: request.user.clone(),
            temperature: request.temperature,
            top_p: request.top_p,
        });

        let next = self.replies.write().unwrap().pop_front();
        match next {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Failure(message)) => Err(ExtractorError::Model(message.into())),
            None => Ok(NOT_MET_SENTINEL.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::ModelConfig;

    #[tokio::test]
    async fn test_replies_in_order_then_default() {
        let model = MockLanguageModel::new()
            .with_reply("first")
            .with_failure("down");
        let request = CompletionRequest::new(&ModelConfig::default(), "hi");

        assert_eq!(model.complete(&request).await.unwrap(), "first");
        assert!(model.complete(&request).await.is_err());
        assert_eq!(model.complete(&request).await.unwrap(), NOT_MET_SENTINEL);
        assert_eq!(model.calls().len(), 3);
        assert_eq!(model.classification_count(), 0);
    }

    #[tokio::test]
    async fn test_clones_share_history() {
        let model = MockLanguageModel::new();
        let handle = model.clone();
        let request = CompletionRequest::new(&ModelConfig::default(), "hi").with_system("sys");

        model.complete(&request).await.unwrap();
        assert_eq!(handle.classification_count(), 1);

        handle.clear_calls();
        assert!(model.calls().is_empty());
    }
}
