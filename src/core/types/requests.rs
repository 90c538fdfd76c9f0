//! Request types, grouped under one path for provider adapters and response types
//! to import from.

pub use super::chat::{ChatMessage, ChatRequest};
pub use super::content::ContentPart;
pub use super::embedding::{EmbeddingInput, EmbeddingRequest};
pub use super::message::{MessageContent, MessageRole};
pub use super::tools::ToolCall;
