//! Cohere Streaming Response Handler
//!
//! Cohere's chat streaming protocol is newline-delimited JSON (one event object
//! per line), not SSE — each line carries an `event_type` discriminator
//! (`stream-start`, `text-generation`, `stream-end`).

use futures::Stream;
use serde_json::Value;
use std::pin::Pin;
use std::task::{Context, Poll};

use super::error::CohereError;
use crate::core::types::responses::{ChatChunk, ChatDelta, ChatStreamChoice, FinishReason};
use crate::core::types::requests::MessageRole;

pub fn create_cohere_stream(
    stream: impl Stream<Item = Result<bytes::Bytes, reqwest::Error>> + Send + 'static,
    model: String,
) -> CohereStream {
    CohereStream::new(Box::pin(stream), model)
}

pub struct CohereStream {
    inner: Pin<Box<dyn Stream<Item = Result<bytes::Bytes, reqwest::Error>> + Send>>,
    buffer: String,
    finished: bool,
    model: String,
}

impl CohereStream {
    fn new(
        stream: Pin<Box<dyn Stream<Item = Result<bytes::Bytes, reqwest::Error>> + Send>>,
        model: String,
    ) -> Self {
        Self {
            inner: stream,
            buffer: String::new(),
            finished: false,
            model,
        }
    }

    fn parse_line(&self, line: &str) -> Option<Result<ChatChunk, CohereError>> {
        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => return Some(Err(CohereError::response_parsing("cohere", e.to_string()))),
        };

        let event_type = value.get("event_type").and_then(|v| v.as_str()).unwrap_or("");

        let (delta_text, finish_reason) = match event_type {
            "text-generation" => (
                value.get("text").and_then(|t| t.as_str()).map(str::to_string),
                None,
            ),
            "stream-end" => (
                None,
                Some(match value
                    .get("finish_reason")
                    .and_then(|f| f.as_str())
                    .unwrap_or("COMPLETE")
                {
                    "MAX_TOKENS" => FinishReason::Length,
                    _ => FinishReason::Stop,
                }),
            ),
            _ => return None,
        };

        Some(Ok(ChatChunk {
            id: uuid::Uuid::new_v4().to_string(),
            object: "chat.completion.chunk".to_string(),
            created: chrono::Utc::now().timestamp(),
            model: self.model.clone(),
            choices: vec![ChatStreamChoice {
                index: 0,
                delta: ChatDelta {
                    role: if delta_text.is_some() { Some(MessageRole::Assistant) } else { None },
                    content: delta_text,
                    tool_calls: None,
                    function_call: None,
                },
                finish_reason,
                logprobs: None,
            }],
            usage: None,
            system_fingerprint: None,
        }))
    }
}

impl Stream for CohereStream {
    type Item = Result<ChatChunk, CohereError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some(pos) = self.buffer.find('\n') {
                let line = self.buffer[..pos].trim().to_string();
                self.buffer.drain(..=pos);
                if line.is_empty() {
                    continue;
                }
                if let Some(result) = self.parse_line(&line) {
                    return Poll::Ready(Some(result));
                }
                continue;
            }

            match self.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => match std::str::from_utf8(&bytes) {
                    Ok(s) => self.buffer.push_str(s),
                    Err(e) => {
                        return Poll::Ready(Some(Err(CohereError::response_parsing(
                            "cohere",
                            e.to_string(),
                        ))))
                    }
                },
                Poll::Ready(Some(Err(e))) => {
                    return Poll::Ready(Some(Err(CohereError::network("cohere", e.to_string()))))
                }
                Poll::Ready(None) => {
                    if self.finished {
                        return Poll::Ready(None);
                    }
                    self.finished = true;
                    if self.buffer.trim().is_empty() {
                        return Poll::Ready(None);
                    }
                    let line = std::mem::take(&mut self.buffer);
                    return match self.parse_line(line.trim()) {
                        Some(result) => Poll::Ready(Some(result)),
                        None => Poll::Ready(None),
                    };
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
