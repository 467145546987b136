//! Credential handling.

pub mod credentials;

pub use credentials::{ApiKey, ServiceCredentials, SAMBANOVA_BASE_URL};
