//! Configuration types for a pipeline run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ExtractorError, Result};

/// Default number of candidate pages to scan.
pub const DEFAULT_MAX_PAGES: usize = 3;

/// Upper bound for `max_pages` accepted by front ends.
pub const MAX_PAGES_LIMIT: usize = 10;

/// Default sampling temperature (low, for consistent extraction).
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Default nucleus sampling mass (top 10%).
pub const DEFAULT_TOP_P: f32 = 0.1;

/// Supported language models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Model {
    #[serde(rename = "Llama-4-Maverick-17B-128E-Instruct")]
    Maverick,

    #[default]
    #[serde(rename = "Llama-4-Scout-17B-16E-Instruct")]
    Scout,
}

impl Model {
    /// Every supported model, in display order.
    pub const ALL: [Model; 2] = [Model::Maverick, Model::Scout];

    /// The provider's model identifier.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Maverick => "Llama-4-Maverick-17B-128E-Instruct",
            Self::Scout => "Llama-4-Scout-17B-16E-Instruct",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Model {
    type Err = ExtractorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(Model::id).collect();
                ExtractorError::invalid(
                    "model",
                    format!("unknown model '{}' (expected one of: {})", s, known.join(", ")),
                )
            })
    }
}

/// Sampling configuration shared by both language-model call sites.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model to call
    pub model: Model,

    /// Sampling temperature, 0.0 to 1.0
    pub temperature: f32,

    /// Nucleus sampling mass, (0.0, 1.0]
    pub top_p: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: Model::default(),
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
        }
    }
}

impl ModelConfig {
    pub fn new(model: Model) -> Self {
        Self {
            model,
            ..Default::default()
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    /// Check sampling bounds.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(ExtractorError::invalid(
                "temperature",
                format!("{} is outside 0.0..=1.0", self.temperature),
            ));
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            return Err(ExtractorError::invalid(
                "top_p",
                format!("{} is outside (0.0, 1.0]", self.top_p),
            ));
        }
        Ok(())
    }
}

/// Inputs for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    /// Site to map and scan
    pub url: String,

    /// What to look for, in plain language
    pub objective: String,

    /// Maximum candidate pages to scan (0 scans nothing)
    pub max_pages: usize,

    /// Language model settings
    #[serde(default)]
    pub model: ModelConfig,
}

impl RunRequest {
    pub fn new(url: impl Into<String>, objective: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            objective: objective.into(),
            max_pages: DEFAULT_MAX_PAGES,
            model: ModelConfig::default(),
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_model_config(mut self, model: ModelConfig) -> Self {
        self.model = model;
        self
    }

    /// Names of required fields that are empty.
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.url.trim().is_empty() {
            missing.push("url".to_string());
        }
        if self.objective.trim().is_empty() {
            missing.push("objective".to_string());
        }
        missing
    }

    /// Validate presence, URL syntax and sampling bounds.
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ExtractorError::MissingFields { fields: missing });
        }

        let parsed = url::Url::parse(self.url.trim())
            .map_err(|e| ExtractorError::invalid("url", e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ExtractorError::invalid(
                "url",
                format!("unsupported scheme '{}'", parsed.scheme()),
            ));
        }

        self.model.validate()
    }
}
