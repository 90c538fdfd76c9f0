//! Hugging Face Provider Error Handling
//!
//! Hugging Face uses the unified `ProviderError`, same as the other adapters.

pub use crate::core::providers::unified_provider::ProviderError as HuggingFaceError;
