//! Typed errors for the objective extractor.
//!
//! Every error carries an [`ErrorKind`] so the pipeline can decide whether a
//! failure degrades a single step (transport, response shape) or ends the run.

use std::fmt;
use thiserror::Error;

/// Broad classification of a failure, used for recovery decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required input was missing or malformed; the run never starts.
    InputValidation,

    /// A mapping, scraping or model call failed.
    Transport,

    /// A collaborator answered, but not in a usable shape.
    ResponseShape,

    /// Anything that escaped the per-stage recovery boundaries.
    Fatal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InputValidation => "input validation",
            Self::Transport => "transport",
            Self::ResponseShape => "response shape",
            Self::Fatal => "fatal",
        };
        f.write_str(label)
    }
}

/// Errors that can occur while running the extraction pipeline.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// One or more required fields are empty
    #[error("missing required fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<String> },

    /// A field is present but unusable
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// Language model call failed
    #[error("language model error: {0}")]
    Model(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Mapping service call failed
    #[error("site mapping error: {0}")]
    Mapping(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Scraping service call failed for one page
    #[error("scrape failed for {url}: {source}")]
    Scrape {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A collaborator replied with something we cannot use
    #[error("unexpected response: {reason}")]
    ResponseShape { reason: String },

    /// Classifier output was not valid JSON
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Client construction or other setup failure
    #[error("config error: {0}")]
    Config(String),
}

impl ExtractorError {
    /// Classify this error for recovery decisions.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingFields { .. } | Self::InvalidInput { .. } => ErrorKind::InputValidation,
            Self::Model(_) | Self::Mapping(_) | Self::Scrape { .. } => ErrorKind::Transport,
            Self::ResponseShape { .. } | Self::JsonParse(_) => ErrorKind::ResponseShape,
            Self::Config(_) => ErrorKind::Fatal,
        }
    }

    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn response_shape(reason: impl Into<String>) -> Self {
        Self::ResponseShape {
            reason: reason.into(),
        }
    }
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message() {
        let err = ExtractorError::MissingFields {
            fields: vec!["url".into(), "objective".into()],
        };
        assert_eq!(err.to_string(), "missing required fields: url, objective");
        assert_eq!(err.kind(), ErrorKind::InputValidation);
    }

    #[test]
    fn test_kinds() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(ExtractorError::from(parse).kind(), ErrorKind::ResponseShape);
        assert_eq!(
            ExtractorError::Model("boom".into()).kind(),
            ErrorKind::Transport
        );
        assert_eq!(
            ExtractorError::Config("bad client".into()).kind(),
            ErrorKind::Fatal
        );
    }
}
