//! Conversions between the Python-LiteLLM-style completion types and the
//! wire-level OpenAI-compatible request/response types the provider
//! adapters speak.

use super::helpers::convert_messages_to_chat_messages;
use super::router_trait::Message;
use super::stream::{CompletionChunk, StreamChoice, StreamDelta};
use super::types::{Choice, CompletionOptions, CompletionResponse};
use crate::core::models::openai::{ChatCompletionRequest, ChatCompletionResponse};
use crate::core::types::responses::ChatChunk;

/// Build a wire-level chat request from the simplified calling convention.
pub fn convert_to_chat_completion_request(
    model: &str,
    messages: Vec<Message>,
    options: Option<CompletionOptions>,
) -> ChatCompletionRequest {
    let options = options.unwrap_or_default();

    ChatCompletionRequest {
        model: model.to_string(),
        messages: convert_messages_to_chat_messages(messages),
        temperature: options.temperature,
        max_tokens: options.max_tokens,
        top_p: options.top_p,
        frequency_penalty: options.frequency_penalty,
        presence_penalty: options.presence_penalty,
        stop: options.stop,
        stream: options.stream,
        tools: options.tools,
        tool_choice: options.tool_choice,
        user: options.user,
        seed: options.seed,
        n: options.n,
        logprobs: options.logprobs,
        top_logprobs: options.top_logprobs,
        ..Default::default()
    }
}

/// Flatten a wire-level chat response down into the simplified
/// `CompletionResponse` the Python-LiteLLM-style API returns.
pub fn convert_from_chat_completion_response(response: ChatCompletionResponse) -> CompletionResponse {
    CompletionResponse {
        id: response.id,
        object: response.object,
        created: response.created,
        model: response.model,
        choices: response
            .choices
            .into_iter()
            .map(|c| Choice {
                index: c.index,
                message: c.message,
                finish_reason: c.finish_reason,
            })
            .collect(),
        usage: response.usage,
    }
}

/// Flatten a wire-level streaming chunk into the simplified `CompletionChunk`.
pub fn convert_from_chat_chunk(chunk: ChatChunk) -> CompletionChunk {
    CompletionChunk {
        id: chunk.id,
        object: chunk.object,
        created: chunk.created,
        model: chunk.model,
        choices: chunk
            .choices
            .into_iter()
            .map(|c| StreamChoice {
                index: c.index,
                delta: StreamDelta {
                    role: c.delta.role.map(|r| r.to_string()),
                    content: c.delta.content,
                    tool_calls: None,
                },
                finish_reason: c.finish_reason,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::completion::helpers::user_message;

    #[test]
    fn converts_simple_request() {
        let request = convert_to_chat_completion_request(
            "gpt-4",
            vec![user_message("hi")],
            Some(CompletionOptions {
                temperature: Some(0.5),
                ..Default::default()
            }),
        );
        assert_eq!(request.model, "gpt-4");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.temperature, Some(0.5));
    }
}
