//! Cohere Provider Implementation
//!
//! Chat completion (with streaming) and embeddings against the Cohere v1 API,
//! following the unified provider architecture (`LLMProvider`).

pub mod client;
pub mod config;
pub mod error;
pub mod streaming;

pub use client::CohereProvider;
pub use config::CohereConfig;
pub use error::CohereError;

impl CohereProvider {
    /// Build a provider instance from the gateway's `Providers.Cohere` config entry.
    pub fn from_config(
        config: &crate::config::models::provider::ProviderConfig,
    ) -> Result<Self, CohereError> {
        let mut cohere_config = CohereConfig::default();
        cohere_config.base.api_key = Some(config.api_key.clone());
        if let Some(base_url) = &config.base_url {
            cohere_config.base.api_base = Some(base_url.clone());
        }
        cohere_config.base.timeout = config.timeout;
        cohere_config.base.max_retries = config.max_retries;

        futures::executor::block_on(CohereProvider::new(cohere_config))
    }
}
