//! Language model implementations.
//!
//! Any OpenAI-compatible chat endpoint works; the default base URL points at
//! SambaNova.

#[cfg(feature = "openai")]
mod openai;

#[cfg(feature = "openai")]
pub use openai::sambanova_client;
