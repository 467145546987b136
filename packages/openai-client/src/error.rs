use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OpenAIError>;

/// Chat completion client errors.
#[derive(Debug, Error)]
pub enum OpenAIError {
    /// The HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connection, DNS or TLS failure
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Non-2xx response
    #[error("chat completion endpoint returned {status}: {body}")]
    Api { status: u16, body: String },

    /// 2xx response whose body is not a chat completion
    #[error("could not decode chat completion: {0}")]
    Parse(String),
}
