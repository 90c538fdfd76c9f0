//! Hugging Face Inference API Provider Implementation
//!
//! Text generation and feature-extraction embeddings against the hosted
//! Inference API, following the unified provider architecture (`LLMProvider`).
//! Streaming is not supported by this adapter; the trait's default
//! `chat_completion_stream` (which returns `not_supported`) is left unoverridden.

pub mod client;
pub mod config;
pub mod error;

pub use client::HuggingFaceProvider;
pub use config::HuggingFaceConfig;
pub use error::HuggingFaceError;

impl HuggingFaceProvider {
    /// Build a provider instance from the gateway's `Providers.HuggingFace` config entry.
    pub fn from_config(
        config: &crate::config::models::provider::ProviderConfig,
    ) -> Result<Self, HuggingFaceError> {
        let mut hf_config = HuggingFaceConfig::default();
        hf_config.base.api_key = Some(config.api_key.clone());
        if let Some(base_url) = &config.base_url {
            hf_config.base.api_base = Some(base_url.clone());
        }
        hf_config.base.timeout = config.timeout;
        hf_config.base.max_retries = config.max_retries;

        futures::executor::block_on(HuggingFaceProvider::new(hf_config))
    }
}
