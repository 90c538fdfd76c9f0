//! The pluggable boundary between the Python-LiteLLM-style free functions
//! (`completion`, `acompletion`, `completion_stream`) and whatever actually
//! dispatches the request to a provider.

use super::stream::CompletionStream;
use super::types::{CompletionOptions, CompletionResponse};
use crate::core::types::MessageRole;
use crate::utils::error::Result;
use async_trait::async_trait;

/// A single chat message in the Python-LiteLLM-style calling convention
/// (`vec![system_message(...), user_message(...)]`).
#[derive(Debug, Clone)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

/// Dispatches a completion request to a provider and returns its response.
///
/// `DefaultRouter` (defined alongside this module) is the production
/// implementation, resolving `model` through the provider registry; tests
/// substitute fakes that implement this trait directly.
#[async_trait]
pub trait Router: Send + Sync {
    async fn completion(
        &self,
        model: &str,
        messages: Vec<Message>,
        options: Option<CompletionOptions>,
    ) -> Result<CompletionResponse>;

    async fn completion_stream(
        &self,
        model: &str,
        messages: Vec<Message>,
        options: Option<CompletionOptions>,
    ) -> Result<CompletionStream>;
}
