//! Minimal client for OpenAI-compatible `/chat/completions` endpoints.
//!
//! Any provider speaking the OpenAI wire format works; point the client at it
//! with [`OpenAIClient::with_base_url`].
//!
//! ```rust,ignore
//! use openai_client::{ChatRequest, OpenAIClient};
//!
//! let client = OpenAIClient::new(api_key)
//!     .with_base_url("https://api.sambanova.ai/v1")
//!     .with_timeout(Duration::from_secs(120))?;
//!
//! let request = ChatRequest::new("Llama-4-Scout-17B-16E-Instruct")
//!     .user("Hello!")
//!     .sampling(0.1, 0.1);
//! let text = client.chat_completion(&request).await?.into_text();
//! ```

pub mod error;
pub mod types;

pub use error::{OpenAIError, Result};
pub use types::{ChatCompletion, ChatRequest, Choice, Message, ReplyMessage, Role, Usage};

use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Clone)]
pub struct OpenAIClient {
    http: Client,
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl OpenAIClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            base_url: OPENAI_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Use another compatible provider. A trailing `/` is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Bound every request by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(OpenAIError::Client)?;
        self.timeout = Some(timeout);
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Send one chat completion request.
    pub async fn chat_completion(&self, request: &ChatRequest) -> Result<ChatCompletion> {
        let started = Instant::now();

        let resp = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "Chat completion rejected");
            return Err(OpenAIError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletion = resp
            .json()
            .await
            .map_err(|e| OpenAIError::Parse(e.to_string()))?;

        debug!(
            model = %request.model,
            choices = completion.choices.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Chat completion received"
        );

        Ok(completion)
    }

    fn transport_error(&self, e: reqwest::Error) -> OpenAIError {
        match self.timeout {
            Some(timeout) if e.is_timeout() => OpenAIError::Timeout(timeout),
            _ => {
                warn!(error = %e, base_url = %self.base_url, "Chat completion transport failure");
                OpenAIError::Network(e)
            }
        }
    }
}

impl std::fmt::Debug for OpenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let client = OpenAIClient::new("sk-test").with_base_url("https://api.sambanova.ai/v1/");
        assert_eq!(client.base_url(), "https://api.sambanova.ai/v1");
        assert!(client.timeout().is_none());
    }

    #[test]
    fn test_debug_hides_key() {
        let client = OpenAIClient::new("sk-very-secret");
        assert!(!format!("{:?}", client).contains("sk-very-secret"));
    }

    #[test]
    fn test_refused_connection_is_network_error() {
        let client = OpenAIClient::new("sk-test").with_base_url("http://127.0.0.1:9");
        let request = ChatRequest::new("m").user("hi");

        let result = tokio_test::block_on(client.chat_completion(&request));
        assert!(matches!(result, Err(OpenAIError::Network(_))));
    }
}
