//! Cohere Provider Error Handling
//!
//! Cohere uses the unified `ProviderError`, same as OpenAI and Anthropic — no
//! vendor-specific variants are needed beyond the constructors already provided
//! there (`authentication`, `network`, `configuration`, `response_parsing`, ...).

pub use crate::core::providers::unified_provider::ProviderError as CohereError;
