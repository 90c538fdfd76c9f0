//! Hugging Face Inference API Provider Configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::core::providers::base::BaseConfig;
use crate::core::traits::provider::ProviderConfig;

/// Hugging Face provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuggingFaceConfig {
    /// Base configuration shared across all providers
    #[serde(flatten)]
    pub base: BaseConfig,

    /// Custom model mappings (logical model id -> HF repo id)
    pub model_mappings: HashMap<String, String>,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            base: BaseConfig {
                api_key: None,
                api_base: Some("https://api-inference.huggingface.co".to_string()),
                timeout: 60,
                max_retries: 3,
                headers: HashMap::new(),
                organization: None,
                api_version: None,
            },
            model_mappings: HashMap::new(),
        }
    }
}

impl HuggingFaceConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(api_key) = std::env::var("HUGGINGFACE_API_KEY") {
            config.base.api_key = Some(api_key);
        }
        if let Ok(base_url) = std::env::var("HUGGINGFACE_API_BASE") {
            config.base.api_base = Some(base_url);
        }
        config
    }

    pub fn validate(&self) -> Result<(), String> {
        self.base.validate("huggingface")
    }

    pub fn get_api_base(&self) -> String {
        self.base
            .api_base
            .clone()
            .unwrap_or_else(|| "https://api-inference.huggingface.co".to_string())
    }

    pub fn get_model_mapping(&self, model: &str) -> String {
        self.model_mappings
            .get(model)
            .cloned()
            .unwrap_or_else(|| model.to_string())
    }
}

impl ProviderConfig for HuggingFaceConfig {
    fn validate(&self) -> Result<(), String> {
        self.validate()
    }

    fn api_key(&self) -> Option<&str> {
        self.base.api_key.as_deref()
    }

    fn api_base(&self) -> Option<&str> {
        self.base.api_base.as_deref()
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.base.timeout)
    }

    fn max_retries(&self) -> u32 {
        self.base.max_retries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_url() {
        let config = HuggingFaceConfig::default();
        assert_eq!(config.get_api_base(), "https://api-inference.huggingface.co");
    }

    #[test]
    fn validation_requires_api_key() {
        let config = HuggingFaceConfig::default();
        assert!(config.validate().is_err());
    }
}
