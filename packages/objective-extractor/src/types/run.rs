//! Per-run state and terminal outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::{ErrorKind, ExtractorError};

/// Result of classifying one page (or of a whole scan).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum ExtractionResult {
    /// The objective is not satisfied
    NotFound,

    /// The objective is satisfied; carries the extracted payload unchanged
    Found(Value),
}

impl ExtractionResult {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The payload, if found.
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Found(data) => Some(data),
            Self::NotFound => None,
        }
    }
}

/// Mutable state of a single run.
///
/// Owned by one pipeline invocation. Observers only ever see snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    /// Index of the page currently being scanned
    pub current_index: usize,

    /// URL of the page currently being scanned
    pub current_url: Option<String>,

    /// Progress percentage, 0 to 100, never decreasing
    pub progress: f64,

    /// Pages attempted so far (scrape started)
    pub pages_scanned: usize,

    /// Human-readable step descriptions, append-only
    pub log: Vec<String>,

    /// Terminal result, set once the run ends
    pub result: Option<ExtractionResult>,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

impl RunState {
    /// Fresh state for a new run.
    pub fn new() -> Self {
        Self {
            current_index: 0,
            current_url: None,
            progress: 0.0,
            pages_scanned: 0,
            log: Vec::new(),
            result: None,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Append a log entry.
    pub fn push_log(&mut self, entry: impl Into<String>) {
        self.log.push(entry.into());
    }

    /// Raise progress; lower values are ignored.
    pub fn advance_progress(&mut self, progress: f64) {
        let progress = progress.clamp(0.0, 100.0);
        if progress > self.progress {
            self.progress = progress;
        }
    }

    /// Record the page about to be scanned.
    pub fn begin_page(&mut self, index: usize, url: &str, scan_count: usize) {
        self.current_index = index;
        self.current_url = Some(url.to_string());
        self.pages_scanned += 1;
        if scan_count > 0 {
            self.advance_progress(index as f64 / scan_count as f64 * 100.0);
        }
    }

    /// Mark the run terminated. Progress becomes 100.
    pub fn finish(&mut self, result: ExtractionResult) {
        self.progress = 100.0;
        self.result = Some(result);
        self.finished_at = Some(Utc::now());
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Progress rounded down for display.
    pub fn percent(&self) -> u8 {
        self.progress as u8
    }
}

/// Why a run ended without a usable result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunFailure {
    pub kind: RunFailureKind,
    pub message: String,

    /// Required fields that were left empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<String>,
}

/// Subset of [`ErrorKind`] that can terminate a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunFailureKind {
    InputValidation,
    Fatal,
}

impl RunFailure {
    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            kind: RunFailureKind::Fatal,
            message: message.into(),
            missing_fields: Vec::new(),
        }
    }
}

impl From<&ExtractorError> for RunFailure {
    fn from(err: &ExtractorError) -> Self {
        let kind = match err.kind() {
            ErrorKind::InputValidation => RunFailureKind::InputValidation,
            _ => RunFailureKind::Fatal,
        };
        let missing_fields = match err {
            ExtractorError::MissingFields { fields } => fields.clone(),
            _ => Vec::new(),
        };
        Self {
            kind,
            message: err.to_string(),
            missing_fields,
        }
    }
}

/// Terminal outcome of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// A page satisfied the objective
    Success { data: Value },

    /// Mapping produced no candidate pages
    NoCandidates,

    /// Every scanned page was rejected or failed
    NotFulfilled,

    /// Validation failed or something unexpected escaped the pipeline
    Failed(RunFailure),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Success { data } => Some(data),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { .. } => f.write_str("Objective fulfilled!"),
            Self::NoCandidates => f.write_str("No relevant pages found."),
            Self::NotFulfilled => f.write_str("Could not fulfill the objective on scanned pages."),
            Self::Failed(failure) => match failure.kind {
                RunFailureKind::InputValidation if !failure.missing_fields.is_empty() => {
                    write!(f, "Please fill in all required fields ({})", failure.message)
                }
                RunFailureKind::InputValidation => write!(f, "Invalid input: {}", failure.message),
                RunFailureKind::Fatal => write!(f, "An error occurred: {}", failure.message),
            },
        }
    }
}

/// What a run hands back: the outcome and the state that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub outcome: Outcome,
    pub state: RunState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_progress_never_decreases() {
        let mut state = RunState::new();
        state.advance_progress(40.0);
        state.advance_progress(20.0);
        assert_eq!(state.progress, 40.0);

        state.advance_progress(250.0);
        assert_eq!(state.progress, 100.0);
    }

    #[test]
    fn test_begin_page_progress() {
        let mut state = RunState::new();
        state.begin_page(0, "https://a.com/1", 4);
        assert_eq!(state.progress, 0.0);
        state.begin_page(3, "https://a.com/4", 4);
        assert_eq!(state.progress, 75.0);
        assert_eq!(state.pages_scanned, 2);
        assert_eq!(state.current_url.as_deref(), Some("https://a.com/4"));
    }

    #[test]
    fn test_finish_reaches_one_hundred() {
        let mut state = RunState::new();
        assert!(!state.is_finished());
        state.finish(ExtractionResult::NotFound);
        assert_eq!(state.percent(), 100);
        assert!(state.is_finished());
        assert_eq!(state.result, Some(ExtractionResult::NotFound));
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(
            Outcome::Success { data: json!({}) }.to_string(),
            "Objective fulfilled!"
        );
        assert_eq!(Outcome::NoCandidates.to_string(), "No relevant pages found.");
        assert_eq!(
            Outcome::Failed(RunFailure::fatal("boom")).to_string(),
            "An error occurred: boom"
        );
    }

    #[test]
    fn test_failure_from_validation_error() {
        let err = ExtractorError::MissingFields {
            fields: vec!["url".into()],
        };
        let failure = RunFailure::from(&err);
        assert_eq!(failure.kind, RunFailureKind::InputValidation);
        assert!(failure.message.contains("url"));
        assert_eq!(failure.missing_fields, vec!["url"]);
        assert!(Outcome::Failed(failure)
            .to_string()
            .starts_with("Please fill in all required fields"));
    }

    #[test]
    fn test_invalid_input_message() {
        let err = ExtractorError::InvalidInput {
            field: "url".into(),
            reason: "relative URL without a base".into(),
        };
        let failure = RunFailure::from(&err);
        assert_eq!(failure.kind, RunFailureKind::InputValidation);
        assert!(failure.missing_fields.is_empty());
        assert_eq!(
            Outcome::Failed(failure).to_string(),
            "Invalid input: invalid url: relative URL without a base"
        );
    }

    #[test]
    fn test_extraction_result_serialization() {
        let found = ExtractionResult::Found(json!({"email": "a@b.com"}));
        let value = serde_json::to_value(&found).unwrap();
        assert_eq!(value, json!({"status": "found", "data": {"email": "a@b.com"}}));
        assert_eq!(found.data(), Some(&json!({"email": "a@b.com"})));
    }
}
