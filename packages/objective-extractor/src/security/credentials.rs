//! API keys for the mapping service and the language model.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// SambaNova Cloud's OpenAI-compatible endpoint.
pub const SAMBANOVA_BASE_URL: &str = "https://api.sambanova.ai/v1";

const REDACTED: &str = "[REDACTED]";

/// An API key held in zeroize-on-drop memory.
///
/// Formatting never reveals the key; call [`ApiKey::expose`] at the point
/// where a client needs it.
pub struct ApiKey(SecretBox<str>);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        let key: Box<str> = key.into().into_boxed_str();
        Self(SecretBox::new(key))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Empty or whitespace-only keys count as missing.
    pub fn is_blank(&self) -> bool {
        self.expose().trim().is_empty()
    }
}

impl Clone for ApiKey {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&REDACTED).finish()
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Keys and endpoint for the two external services a run talks to.
#[derive(Clone, Debug)]
pub struct ServiceCredentials {
    /// Firecrawl API key
    pub firecrawl_api_key: Option<ApiKey>,

    /// SambaNova (OpenAI-compatible) API key
    pub model_api_key: Option<ApiKey>,

    pub model_base_url: String,
}

impl Default for ServiceCredentials {
    fn default() -> Self {
        Self::empty()
    }
}

impl ServiceCredentials {
    pub fn new(firecrawl_api_key: impl Into<String>, model_api_key: impl Into<String>) -> Self {
        Self {
            firecrawl_api_key: Some(ApiKey::new(firecrawl_api_key)),
            model_api_key: Some(ApiKey::new(model_api_key)),
            ..Self::empty()
        }
    }

    /// Neither key set; base URL defaults to SambaNova.
    pub fn empty() -> Self {
        Self {
            firecrawl_api_key: None,
            model_api_key: None,
            model_base_url: SAMBANOVA_BASE_URL.to_string(),
        }
    }

    pub fn with_model_base_url(mut self, url: impl Into<String>) -> Self {
        self.model_base_url = url.into();
        self
    }

    /// Names of the keys that are absent or blank, in a fixed order.
    pub fn missing_fields(&self) -> Vec<String> {
        [
            ("firecrawl_api_key", &self.firecrawl_api_key),
            ("model_api_key", &self.model_api_key),
        ]
        .into_iter()
        .filter(|&(_, key)| key.as_ref().map_or(true, ApiKey::is_blank))
        .map(|(name, _)| name.to_string())
        .collect()
    }
}
