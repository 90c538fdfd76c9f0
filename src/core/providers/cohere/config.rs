//! Cohere Provider Configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::core::providers::base::BaseConfig;
use crate::core::traits::provider::ProviderConfig;

/// Cohere provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohereConfig {
    /// Base configuration shared across all providers
    #[serde(flatten)]
    pub base: BaseConfig,

    /// Custom model mappings (logical model id -> Cohere model id)
    pub model_mappings: HashMap<String, String>,
}

impl Default for CohereConfig {
    fn default() -> Self {
        Self {
            base: BaseConfig {
                api_key: None,
                api_base: Some("https://api.cohere.com/v1".to_string()),
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

impl CohereConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(api_key) = std::env::var("COHERE_API_KEY") {
            config.base.api_key = Some(api_key);
        }
        if let Ok(base_url) = std::env::var("COHERE_API_BASE") {
            config.base.api_base = Some(base_url);
        }
        config
    }

    pub fn validate(&self) -> Result<(), String> {
        self.base.validate("cohere")
    }

    pub fn get_api_base(&self) -> String {
        self.base
            .api_base
            .clone()
            .unwrap_or_else(|| "https://api.cohere.com/v1".to_string())
    }

    pub fn get_model_mapping(&self, model: &str) -> String {
        self.model_mappings
            .get(model)
            .cloned()
            .unwrap_or_else(|| model.to_string())
    }
}

impl ProviderConfig for CohereConfig {
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
        let config = CohereConfig::default();
        assert_eq!(config.get_api_base(), "https://api.cohere.com/v1");
    }

    #[test]
    fn validation_requires_api_key() {
        let config = CohereConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn model_mapping_falls_back_to_input() {
        let config = CohereConfig::default();
        assert_eq!(config.get_model_mapping("command-r"), "command-r");
    }
}
