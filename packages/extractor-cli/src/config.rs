use anyhow::{Context, Result};
use dotenvy::dotenv;
use objective_extractor::{ApiKey, ServiceCredentials, SAMBANOVA_BASE_URL};
use std::env;

/// Service configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub firecrawl_api_key: Option<ApiKey>,
    pub sambanova_api_key: Option<ApiKey>,
    pub sambanova_base_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let sambanova_base_url =
            env::var("SAMBANOVA_BASE_URL").unwrap_or_else(|_| SAMBANOVA_BASE_URL.to_string());
        if sambanova_base_url.trim().is_empty() {
            anyhow::bail!("SAMBANOVA_BASE_URL is set but empty");
        }

        Ok(Self {
            firecrawl_api_key: optional_secret("FIRECRAWL_API_KEY")?,
            sambanova_api_key: optional_secret("SAMBANOVA_API_KEY")?,
            sambanova_base_url,
        })
    }

    /// Apply command-line overrides and produce pipeline credentials.
    ///
    /// Missing keys are left as `None`; the pipeline reports them.
    pub fn into_credentials(
        self,
        firecrawl_api_key: Option<String>,
        sambanova_api_key: Option<String>,
        base_url: Option<String>,
    ) -> ServiceCredentials {
        ServiceCredentials {
            firecrawl_api_key: firecrawl_api_key.map(ApiKey::from).or(self.firecrawl_api_key),
            model_api_key: sambanova_api_key.map(ApiKey::from).or(self.sambanova_api_key),
            model_base_url: base_url.unwrap_or(self.sambanova_base_url),
        }
    }
}

fn optional_secret(name: &str) -> Result<Option<ApiKey>> {
    match env::var(name) {
        Ok(value) => Ok(Some(ApiKey::from(value))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("{} is not valid unicode", name)),
    }
}
