//! Result export: pretty JSON, flat CSV and a one-screen summary.

use serde_json::Value;
use std::fmt;

use crate::error::Result;
use crate::types::config::RunRequest;
use crate::types::run::{RunReport, RunState};

/// Pretty-printed JSON with two-space indentation.
pub fn to_pretty_json(data: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// `key,value` lines for a JSON object, in key order.
///
/// Only objects export; anything else returns `None`. Strings are written
/// raw, other values as compact JSON. Nothing is quoted or escaped.
pub fn to_csv(data: &Value) -> Option<String> {
    let object = data.as_object()?;
    let lines: Vec<String> = object
        .iter()
        .map(|(key, value)| match value {
            Value::String(s) => format!("{},{}", key, s),
            other => format!("{},{}", key, other),
        })
        .collect();
    Some(lines.join("\n"))
}

/// Headline numbers for a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub objective: String,
    pub website: String,

    /// Pages whose scrape was attempted
    pub pages_scanned: usize,

    /// Keys in the extracted object, or 1 for any other payload
    pub data_points: usize,

    /// Wall time in milliseconds, when the run finished
    pub duration_ms: Option<i64>,
}

impl RunSummary {
    pub fn from_state(request: &RunRequest, state: &RunState, data: &Value) -> Self {
        let data_points = data.as_object().map_or(1, |o| o.len());
        let duration_ms = state
            .finished_at
            .map(|end| (end - state.started_at).num_milliseconds());

        Self {
            objective: request.objective.trim().to_string(),
            website: request.url.trim().to_string(),
            pages_scanned: state.pages_scanned,
            data_points,
            duration_ms,
        }
    }

    /// Summary of a successful run; `None` otherwise.
    pub fn from_report(report: &RunReport, request: &RunRequest) -> Option<Self> {
        report
            .outcome
            .data()
            .map(|data| Self::from_state(request, &report.state, data))
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Objective: {}", self.objective)?;
        writeln!(f, "Website: {}", self.website)?;
        write!(
            f,
            "Pages scanned: {} | Data points: {}",
            self.pages_scanned, self.data_points
        )?;
        if let Some(ms) = self.duration_ms {
            write!(f, " | Time: {:.1}s", ms as f64 / 1000.0)?;
        }
        Ok(())
    }
}
