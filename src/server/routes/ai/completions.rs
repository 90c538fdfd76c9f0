//! `POST /completions` and `POST /completions/stream`.

use super::context::{get_authenticated_user, get_request_context, log_api_usage};
use crate::core::completion::{
    convert_messages_to_chat_messages, CompletionOptions, CompletionResponse, Message,
};
use crate::core::types::{MessageRole, Tool, ToolChoice};
use crate::server::state::AppState;
use crate::utils::data::validation::request_validator::RequestValidator;
use crate::utils::error::{GatewayError, Result as GatewayResult};
use actix_web::{web, HttpRequest, HttpResponse};
use futures::StreamExt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    role: MessageRole,
    content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompletionRequestBody {
    model_id: String,
    messages: Vec<CompletionMessage>,
    #[serde(default)]
    max_tokens: Option<u32>,
    #[serde(default)]
    temperature: Option<f32>,
    #[serde(default)]
    top_p: Option<f32>,
    #[serde(default)]
    stop: Option<Vec<String>>,
    #[serde(default)]
    stream: bool,
    #[serde(default)]
    tools: Option<Vec<Tool>>,
    #[serde(default)]
    tool_choice: Option<ToolChoice>,
    #[serde(default)]
    user: Option<String>,
}

impl CompletionRequestBody {
    fn into_messages(self) -> (String, Vec<Message>, CompletionOptions) {
        let messages = self
            .messages
            .into_iter()
            .map(|m| Message {
                role: m.role,
                content: m.content,
            })
            .collect();

        let options = CompletionOptions {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
            stop: self.stop,
            stream: self.stream,
            tools: self.tools,
            tool_choice: self.tool_choice,
            user: self.user,
            ..Default::default()
        };

        (self.model_id, messages, options)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompletionResponseBody {
    id: String,
    created: i64,
    model_id: String,
    choices: Vec<crate::core::completion::Choice>,
    usage: Option<crate::core::completion::Usage>,
}

impl From<CompletionResponse> for CompletionResponseBody {
    fn from(response: CompletionResponse) -> Self {
        Self {
            id: response.id,
            created: response.created,
            model_id: response.model,
            choices: response.choices,
            usage: response.usage,
        }
    }
}

/// `POST /completions` — unary chat completion.
pub async fn completions(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<CompletionRequestBody>,
) -> GatewayResult<HttpResponse> {
    require_identity(&req)?;
    let context = get_request_context(&req);

    let (model_id, messages, mut options) = body.into_inner().into_messages();
    options.stream = false;
    validate_request(&model_id, &messages, &options)?;

    let response = crate::core::completion::completion(&model_id, messages, Some(options)).await;

    match response {
        Ok(response) => {
            log_api_usage(&context, &model_id, "ok");
            Ok(HttpResponse::Ok().json(CompletionResponseBody::from(response)))
        }
        Err(e) => {
            log_api_usage(&context, &model_id, "error");
            Err(e)
        }
    }
}

/// `POST /completions/stream` — Server-Sent Events framed streaming completion.
///
/// Each chunk is emitted as `data: {json}\n\n`; the stream is terminated with
/// `data: [DONE]\n\n`. A mid-stream error is surfaced as a terminal
/// `data: {"error": {...}}` event followed by `[DONE]`, per the framing the
/// client-facing contract requires.
pub async fn completions_stream(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<CompletionRequestBody>,
) -> GatewayResult<HttpResponse> {
    require_identity(&req)?;
    let context = get_request_context(&req);

    let (model_id, messages, mut options) = body.into_inner().into_messages();
    options.stream = true;
    validate_request(&model_id, &messages, &options)?;

    let stream = crate::core::completion::completion_stream(&model_id, messages, Some(options))
        .await?;

    log_api_usage(&context, &model_id, "stream_started");

    let body_stream = stream.map(|item| {
        let line = match item {
            Ok(chunk) => match serde_json::to_string(&chunk_to_json(chunk)) {
                Ok(json) => format!("data: {json}\n\n"),
                Err(e) => sse_error_line(&e.to_string()),
            },
            Err(e) => sse_error_line(&e.to_string()),
        };
        Ok::<_, GatewayError>(web::Bytes::from(line))
    });

    let terminator = futures::stream::once(async { Ok(web::Bytes::from("data: [DONE]\n\n")) });

    Ok(HttpResponse::Ok()
        .content_type("text/event-stream")
        .append_header(("cache-control", "no-cache"))
        .streaming(body_stream.chain(terminator)))
}

/// `AuthMiddleware` already rejects unauthenticated requests before a handler
/// runs; this just fails closed if that invariant is ever relaxed.
fn require_identity(req: &HttpRequest) -> GatewayResult<()> {
    get_authenticated_user(req)
        .map(|_| ())
        .ok_or_else(|| GatewayError::Auth("missing credentials".to_string()))
}

/// Validates `modelId`/`messages`/`maxTokens`/`temperature` via the shared
/// `RequestValidator`, plus the `topP`/`stop` bounds it doesn't cover (spec
/// invariants: `topP ∈ [0, 1]`, at most 4 `stop` sequences).
fn validate_request(model_id: &str, messages: &[Message], options: &CompletionOptions) -> GatewayResult<()> {
    let chat_messages = convert_messages_to_chat_messages(messages.to_vec());
    RequestValidator::validate_chat_completion_request(
        model_id,
        &chat_messages,
        options.max_tokens,
        options.temperature,
    )?;

    if let Some(top_p) = options.top_p {
        if !(0.0..=1.0).contains(&top_p) {
            return Err(GatewayError::Validation(
                "top_p must be between 0.0 and 1.0".to_string(),
            ));
        }
    }

    if let Some(stop) = &options.stop {
        if stop.len() > 4 {
            return Err(GatewayError::Validation(
                "stop supports at most 4 sequences".to_string(),
            ));
        }
    }

    Ok(())
}

fn sse_error_line(message: &str) -> String {
    let payload = serde_json::json!({ "error": { "message": message } });
    format!("data: {payload}\n\n")
}

fn chunk_to_json(chunk: crate::core::completion::CompletionChunk) -> serde_json::Value {
    serde_json::json!({
        "id": chunk.id,
        "created": chunk.created,
        "modelId": chunk.model,
        "choices": chunk.choices.iter().map(|c| serde_json::json!({
            "index": c.index,
            "delta": {
                "role": c.delta.role,
                "content": c.delta.content,
            },
            "finishReason": c.finish_reason,
        })).collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_minimal_completion_request() {
        let body: CompletionRequestBody = serde_json::from_str(
            r#"{"modelId":"gpt-4","messages":[{"role":"user","content":"hi"}]}"#,
        )
        .unwrap();
        assert_eq!(body.model_id, "gpt-4");
        assert_eq!(body.messages.len(), 1);
    }

    #[test]
    fn rejects_empty_message_list() {
        let options = CompletionOptions::default();
        assert!(validate_request("gpt-4", &[], &options).is_err());
    }

    #[test]
    fn rejects_top_p_out_of_range() {
        let messages = vec![Message {
            role: MessageRole::User,
            content: "hi".to_string(),
        }];
        let options = CompletionOptions {
            top_p: Some(1.5),
            ..Default::default()
        };
        assert!(validate_request("gpt-4", &messages, &options).is_err());
    }

    #[test]
    fn rejects_more_than_four_stop_sequences() {
        let messages = vec![Message {
            role: MessageRole::User,
            content: "hi".to_string(),
        }];
        let options = CompletionOptions {
            stop: Some(vec!["a".into(), "b".into(), "c".into(), "d".into(), "e".into()]),
            ..Default::default()
        };
        assert!(validate_request("gpt-4", &messages, &options).is_err());
    }

    #[test]
    fn accepts_well_formed_request() {
        let messages = vec![Message {
            role: MessageRole::User,
            content: "hi".to_string(),
        }];
        let options = CompletionOptions {
            top_p: Some(0.9),
            temperature: Some(0.7),
            ..Default::default()
        };
        assert!(validate_request("gpt-4", &messages, &options).is_ok());
    }
}
