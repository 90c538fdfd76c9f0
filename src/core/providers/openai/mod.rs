//! OpenAI Provider Implementation
//!
//! Chat completion, streaming, and embeddings against the OpenAI API, following the
//! unified provider architecture (`LLMProvider`).

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod streaming;

// Re-exports for easy access
pub use client::OpenAIProvider;
pub use config::OpenAIConfig;
pub use error::OpenAIError;
pub use models::{OpenAIModelRegistry, get_openai_registry};

use crate::config::models::provider::ProviderConfig as GatewayProviderConfig;

impl OpenAIProvider {
    /// Build a provider instance from the gateway's `Providers.OpenAI` config entry.
    pub fn from_config(config: &GatewayProviderConfig) -> Result<Self, super::ProviderError> {
        let mut oai_config = OpenAIConfig::default();
        oai_config.base.api_key = Some(config.api_key.clone());
        if let Some(base_url) = &config.base_url {
            oai_config.base.base_url = Some(base_url.clone());
        }
        if let Some(org) = &config.organization {
            oai_config.organization = Some(org.clone());
        }

        // OpenAIClient::new performs network-free construction only; safe to block on.
        futures::executor::block_on(OpenAIProvider::new(oai_config)).map_err(|e| {
            super::ProviderError::invalid_request("openai", format!("failed to build provider: {e}"))
        })
    }
}
