//! AI Provider implementations using Rust-idiomatic enum-based design
//!
//! This module contains the unified Provider enum and all provider implementations.
//! Each vendor adapter implements [`LLMProvider`]; [`Provider`] wraps them in a closed
//! enum so dispatch is a match, not a vtable call.

// Base infrastructure
pub mod base;

// Provider modules
pub mod anthropic;
pub mod cohere;
pub mod huggingface;
pub mod openai;

// Registry and unified provider
pub mod provider_registry;
pub mod unified_provider;

// Export main types
pub use crate::core::traits::LLMProvider;
use crate::core::types::common::{ProviderCapability, RequestContext};
use crate::core::types::requests::{ChatRequest, EmbeddingRequest};
use crate::core::types::responses::{ChatChunk, ChatResponse, EmbeddingResponse};
pub use provider_registry::ProviderRegistry;
pub use unified_provider::{ProviderError, UnifiedProviderError};

/// Provider type enumeration
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ProviderType {
    OpenAI,
    Anthropic,
    Cohere,
    HuggingFace,
    Custom(String),
}

impl From<&str> for ProviderType {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "openai" => ProviderType::OpenAI,
            "anthropic" => ProviderType::Anthropic,
            "cohere" => ProviderType::Cohere,
            "huggingface" | "hugging_face" | "hf" => ProviderType::HuggingFace,
            _ => ProviderType::Custom(s.to_string()),
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderType::OpenAI => write!(f, "openai"),
            ProviderType::Anthropic => write!(f, "anthropic"),
            ProviderType::Cohere => write!(f, "cohere"),
            ProviderType::HuggingFace => write!(f, "huggingface"),
            ProviderType::Custom(name) => write!(f, "{}", name),
        }
    }
}

// ==================== Provider Dispatch Macros ====================
// These macros eliminate repetitive match patterns across all provider methods

macro_rules! dispatch_provider {
    ($self:expr, $method:ident) => {
        match $self {
            Provider::OpenAI(p) => p.$method(),
            Provider::Anthropic(p) => p.$method(),
            Provider::Cohere(p) => p.$method(),
            Provider::HuggingFace(p) => p.$method(),
        }
    };
}

macro_rules! dispatch_provider_async {
    ($self:expr, $method:ident, $($arg:expr),*) => {
        match $self {
            Provider::OpenAI(p) => LLMProvider::$method(p, $($arg),*).await.map_err(UnifiedProviderError::from),
            Provider::Anthropic(p) => LLMProvider::$method(p, $($arg),*).await.map_err(UnifiedProviderError::from),
            Provider::Cohere(p) => LLMProvider::$method(p, $($arg),*).await.map_err(UnifiedProviderError::from),
            Provider::HuggingFace(p) => LLMProvider::$method(p, $($arg),*).await.map_err(UnifiedProviderError::from),
        }
    };
}

macro_rules! dispatch_provider_value {
    ($self:expr, $method:ident) => {
        match $self {
            Provider::OpenAI(p) => LLMProvider::$method(p),
            Provider::Anthropic(p) => LLMProvider::$method(p),
            Provider::Cohere(p) => LLMProvider::$method(p),
            Provider::HuggingFace(p) => LLMProvider::$method(p),
        }
    };

    ($self:expr, $method:ident, $($arg:expr),+) => {
        match $self {
            Provider::OpenAI(p) => LLMProvider::$method(p, $($arg),+),
            Provider::Anthropic(p) => LLMProvider::$method(p, $($arg),+),
            Provider::Cohere(p) => LLMProvider::$method(p, $($arg),+),
            Provider::HuggingFace(p) => LLMProvider::$method(p, $($arg),+),
        }
    };
}

macro_rules! dispatch_provider_async_direct {
    ($self:expr, $method:ident) => {
        match $self {
            Provider::OpenAI(p) => LLMProvider::$method(p).await,
            Provider::Anthropic(p) => LLMProvider::$method(p).await,
            Provider::Cohere(p) => LLMProvider::$method(p).await,
            Provider::HuggingFace(p) => LLMProvider::$method(p).await,
        }
    };
}

/// Unified Provider Enum (Rust-idiomatic design)
///
/// Zero-cost, closed-set dispatch over the vendor adapters the gateway speaks to.
/// Adding a vendor means adding a variant here and an `LLMProvider` impl, not a trait object.
#[derive(Debug, Clone)]
pub enum Provider {
    OpenAI(openai::OpenAIProvider),
    Anthropic(anthropic::AnthropicProvider),
    Cohere(cohere::CohereProvider),
    HuggingFace(huggingface::HuggingFaceProvider),
}

impl Provider {
    /// Get provider name
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAI(_) => "openai",
            Provider::Anthropic(_) => "anthropic",
            Provider::Cohere(_) => "cohere",
            Provider::HuggingFace(_) => "huggingface",
        }
    }

    /// Get provider type
    pub fn provider_type(&self) -> ProviderType {
        match self {
            Provider::OpenAI(_) => ProviderType::OpenAI,
            Provider::Anthropic(_) => ProviderType::Anthropic,
            Provider::Cohere(_) => ProviderType::Cohere,
            Provider::HuggingFace(_) => ProviderType::HuggingFace,
        }
    }

    /// Check if provider supports a specific model
    pub fn supports_model(&self, model: &str) -> bool {
        use crate::core::traits::LLMProvider;
        dispatch_provider_value!(self, supports_model, model)
    }

    /// Get provider capabilities
    pub fn capabilities(&self) -> &'static [ProviderCapability] {
        dispatch_provider!(self, capabilities)
    }

    /// List available models
    pub fn list_models(&self) -> &[crate::core::types::common::ModelInfo] {
        use crate::core::traits::LLMProvider;
        dispatch_provider_value!(self, models)
    }

    /// Execute chat completion
    pub async fn chat_completion(
        &self,
        request: ChatRequest,
        context: RequestContext,
    ) -> Result<ChatResponse, UnifiedProviderError> {
        use crate::core::traits::LLMProvider;
        dispatch_provider_async!(self, chat_completion, request, context)
    }

    /// Execute streaming chat completion
    pub async fn chat_completion_stream(
        &self,
        request: ChatRequest,
        context: RequestContext,
    ) -> Result<
        std::pin::Pin<
            Box<dyn futures::Stream<Item = Result<ChatChunk, UnifiedProviderError>> + Send + 'static>,
        >,
        UnifiedProviderError,
    > {
        use crate::core::traits::LLMProvider;
        use futures::StreamExt;

        match self {
            Provider::OpenAI(p) => {
                let stream = LLMProvider::chat_completion_stream(p, request, context)
                    .await
                    .map_err(UnifiedProviderError::from)?;
                Ok(Box::pin(stream.map(|r| r.map_err(UnifiedProviderError::from))))
            }
            Provider::Anthropic(p) => {
                let stream = LLMProvider::chat_completion_stream(p, request, context)
                    .await
                    .map_err(UnifiedProviderError::from)?;
                Ok(Box::pin(stream.map(|r| r.map_err(UnifiedProviderError::from))))
            }
            Provider::Cohere(p) => {
                let stream = LLMProvider::chat_completion_stream(p, request, context)
                    .await
                    .map_err(UnifiedProviderError::from)?;
                Ok(Box::pin(stream.map(|r| r.map_err(UnifiedProviderError::from))))
            }
            Provider::HuggingFace(_) => Err(UnifiedProviderError::not_implemented(
                "huggingface",
                "streaming is not supported by the inference-api adapter",
            )),
        }
    }

    /// Create embeddings
    pub async fn create_embeddings(
        &self,
        request: EmbeddingRequest,
        context: RequestContext,
    ) -> Result<EmbeddingResponse, UnifiedProviderError> {
        use crate::core::traits::LLMProvider;
        match self {
            Provider::OpenAI(p) => LLMProvider::embeddings(p, request, context)
                .await
                .map_err(UnifiedProviderError::from),
            Provider::Cohere(p) => LLMProvider::embeddings(p, request, context)
                .await
                .map_err(UnifiedProviderError::from),
            Provider::HuggingFace(p) => LLMProvider::embeddings(p, request, context)
                .await
                .map_err(UnifiedProviderError::from),
            Provider::Anthropic(_) => Err(UnifiedProviderError::not_implemented(
                "anthropic",
                "embeddings are not offered by this vendor",
            )),
        }
    }

    /// Execute a liveness health check against the vendor
    pub async fn health_check(&self) -> crate::core::types::common::HealthStatus {
        use crate::core::traits::LLMProvider;
        dispatch_provider_async_direct!(self, health_check)
    }
}

/// Build a [`Provider`] from a gateway provider configuration entry.
///
/// This is the single place that knows how to turn `Providers.<name>` config into a
/// live adapter; the registry calls this once per configured provider at startup.
pub fn create_provider(
    config: &crate::config::models::provider::ProviderConfig,
) -> Result<Provider, ProviderError> {
    match ProviderType::from(config.provider_type.as_str()) {
        ProviderType::OpenAI => Ok(Provider::OpenAI(openai::OpenAIProvider::from_config(config)?)),
        ProviderType::Anthropic => Ok(Provider::Anthropic(anthropic::AnthropicProvider::from_gateway_config(config)?)),
        ProviderType::Cohere => Ok(Provider::Cohere(cohere::CohereProvider::from_config(config)?)),
        ProviderType::HuggingFace => Ok(Provider::HuggingFace(huggingface::HuggingFaceProvider::from_config(config)?)),
        ProviderType::Custom(name) => Err(ProviderError::not_implemented(
            "unknown",
            format!("unknown provider type: {}", name),
        )),
    }
}
