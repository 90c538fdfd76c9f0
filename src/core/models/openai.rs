//! Compatibility aliases for the canonical chat/completion types.
//!
//! The gateway's wire types live under `core::types`; this module exists so
//! older call sites that were written against the original OpenAI-shaped
//! model names keep compiling without duplicating the structs.

pub use crate::core::types::requests::{ChatMessage, ContentPart, MessageContent, MessageRole};
pub use crate::core::types::responses::Usage;

/// Chat completion request (alias of the gateway's unified [`ChatRequest`]).
pub type ChatCompletionRequest = crate::core::types::requests::ChatRequest;

/// Chat completion response (alias of the gateway's unified [`ChatResponse`]).
pub type ChatCompletionResponse = crate::core::types::responses::ChatResponse;
