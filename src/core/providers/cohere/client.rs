//! Cohere Provider Client Implementation
//!
//! Talks to the Cohere v1 chat and embed APIs, following the unified provider
//! architecture (`LLMProvider`).

use async_trait::async_trait;
use futures::Stream;
use serde_json::Value;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;

use crate::core::providers::base::{header, GlobalPoolManager, HeaderPair, HttpMethod};
use crate::core::traits::provider::LLMProvider;
use crate::core::types::{
    common::{HealthStatus, ModelInfo, ProviderCapability, RequestContext},
    requests::{ChatMessage, ChatRequest, EmbeddingRequest, MessageContent, MessageRole},
    responses::{
        ChatChoice, ChatChunk, ChatResponse, EmbeddingData, EmbeddingResponse, FinishReason, Usage,
    },
};

use super::{
    config::CohereConfig,
    error::CohereError,
    streaming::create_cohere_stream,
};

fn default_models() -> Vec<ModelInfo> {
    vec![
        ModelInfo {
            id: "command-r-plus".to_string(),
            name: "Command R+".to_string(),
            provider: "cohere".to_string(),
            max_context_length: 128_000,
            max_output_length: Some(4096),
            supports_streaming: true,
            supports_tools: true,
            supports_multimodal: false,
            input_cost_per_1k_tokens: Some(0.003),
            output_cost_per_1k_tokens: Some(0.015),
            currency: "USD".to_string(),
            capabilities: vec![
                ProviderCapability::ChatCompletion,
                ProviderCapability::ChatCompletionStream,
                ProviderCapability::ToolCalling,
            ],
            created_at: None,
            updated_at: None,
            metadata: HashMap::new(),
        },
        ModelInfo {
            id: "command-r".to_string(),
            name: "Command R".to_string(),
            provider: "cohere".to_string(),
            max_context_length: 128_000,
            max_output_length: Some(4096),
            supports_streaming: true,
            supports_tools: true,
            supports_multimodal: false,
            input_cost_per_1k_tokens: Some(0.0005),
            output_cost_per_1k_tokens: Some(0.0015),
            currency: "USD".to_string(),
            capabilities: vec![
                ProviderCapability::ChatCompletion,
                ProviderCapability::ChatCompletionStream,
                ProviderCapability::ToolCalling,
            ],
            created_at: None,
            updated_at: None,
            metadata: HashMap::new(),
        },
        ModelInfo {
            id: "embed-english-v3.0".to_string(),
            name: "Embed English v3".to_string(),
            provider: "cohere".to_string(),
            max_context_length: 512,
            max_output_length: None,
            supports_streaming: false,
            supports_tools: false,
            supports_multimodal: false,
            input_cost_per_1k_tokens: Some(0.0001),
            output_cost_per_1k_tokens: None,
            currency: "USD".to_string(),
            capabilities: vec![ProviderCapability::Embeddings],
            created_at: None,
            updated_at: None,
            metadata: HashMap::new(),
        },
    ]
}

/// Cohere provider implementation
#[derive(Debug, Clone)]
pub struct CohereProvider {
    pool_manager: Arc<GlobalPoolManager>,
    config: CohereConfig,
    models: Arc<Vec<ModelInfo>>,
}

impl CohereProvider {
    pub async fn new(config: CohereConfig) -> Result<Self, CohereError> {
        config.validate().map_err(|e| CohereError::configuration("cohere", e))?;

        let pool_manager = Arc::new(
            GlobalPoolManager::new().map_err(|e| CohereError::network("cohere", e.to_string()))?,
        );

        Ok(Self {
            pool_manager,
            config,
            models: Arc::new(default_models()),
        })
    }

    fn get_request_headers(&self) -> Vec<HeaderPair> {
        let mut headers = Vec::with_capacity(2);
        if let Some(api_key) = &self.config.base.api_key {
            headers.push(header("Authorization", format!("Bearer {}", api_key)));
        }
        headers
    }

    /// Cohere's chat API takes the current turn's message separately from the
    /// preceding conversation (`chat_history`); split the gateway's flat message
    /// list accordingly.
    fn transform_chat_request(&self, request: &ChatRequest) -> Value {
        let mut chat_history = Vec::new();
        let mut preamble: Option<String> = None;
        let mut message = String::new();

        for (i, msg) in request.messages.iter().enumerate() {
            let text = msg
                .content
                .as_ref()
                .map(|c| c.to_string())
                .unwrap_or_default();
            let is_last = i == request.messages.len() - 1;

            match msg.role {
                MessageRole::System => preamble = Some(text),
                MessageRole::User if is_last => message = text,
                MessageRole::User => chat_history.push(serde_json::json!({
                    "role": "USER",
                    "message": text,
                })),
                MessageRole::Assistant => chat_history.push(serde_json::json!({
                    "role": "CHATBOT",
                    "message": text,
                })),
                MessageRole::Tool | MessageRole::Function => chat_history.push(serde_json::json!({
                    "role": "TOOL",
                    "message": text,
                })),
            }
        }

        let mut body = serde_json::json!({
            "model": self.config.get_model_mapping(&request.model),
            "message": message,
            "chat_history": chat_history,
        });

        if let Some(preamble) = preamble {
            body["preamble"] = Value::String(preamble);
        }
        if let Some(temp) = request.temperature {
            body["temperature"] = serde_json::json!(temp);
        }
        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }
        if let Some(top_p) = request.top_p {
            body["p"] = serde_json::json!(top_p);
        }
        if let Some(stop) = &request.stop {
            body["stop_sequences"] = serde_json::to_value(stop).unwrap_or(Value::Null);
        }

        body
    }

    fn transform_chat_response(&self, response: Value, model: &str) -> Result<ChatResponse, CohereError> {
        let text = response
            .get("text")
            .and_then(|t| t.as_str())
            .unwrap_or_default()
            .to_string();

        let finish_reason = match response.get("finish_reason").and_then(|f| f.as_str()) {
            Some("COMPLETE") => Some(FinishReason::Stop),
            Some("MAX_TOKENS") => Some(FinishReason::Length),
            _ => Some(FinishReason::Stop),
        };

        let usage = response.get("meta").and_then(|m| m.get("tokens")).map(|t| {
            let input = t.get("input_tokens").and_then(|v| v.as_u64()).unwrap_or(0) as u32;
            let output = t.get("output_tokens").and_then(|v| v.as_u64()).unwrap_or(0) as u32;
            Usage::new(input, output)
        });

        Ok(ChatResponse {
            id: response
                .get("response_id")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            object: "chat.completion".to_string(),
            created: chrono::Utc::now().timestamp(),
            model: model.to_string(),
            choices: vec![ChatChoice {
                index: 0,
                message: ChatMessage {
                    role: MessageRole::Assistant,
                    content: Some(MessageContent::Text(text)),
                    name: None,
                    tool_calls: None,
                    tool_call_id: None,
                    function_call: None,
                },
                finish_reason,
                logprobs: None,
            }],
            usage,
            system_fingerprint: None,
        })
    }
}

#[async_trait]
impl LLMProvider for CohereProvider {
    type Config = CohereConfig;
    type Error = CohereError;
    type ErrorMapper = crate::core::traits::error_mapper::implementations::CohereErrorMapper;

    fn name(&self) -> &'static str {
        "cohere"
    }

    fn capabilities(&self) -> &'static [ProviderCapability] {
        static CAPABILITIES: &[ProviderCapability] = &[
            ProviderCapability::ChatCompletion,
            ProviderCapability::ChatCompletionStream,
            ProviderCapability::Embeddings,
            ProviderCapability::ToolCalling,
        ];
        CAPABILITIES
    }

    fn models(&self) -> &[ModelInfo] {
        &self.models
    }

    async fn chat_completion(
        &self,
        request: ChatRequest,
        _context: RequestContext,
    ) -> Result<ChatResponse, Self::Error> {
        let model = request.model.clone();
        let body = self.transform_chat_request(&request);

        let url = format!("{}/chat", self.config.get_api_base());
        let response = self
            .pool_manager
            .execute_request(&url, HttpMethod::POST, self.get_request_headers(), Some(body))
            .await
            .map_err(|e| CohereError::network("cohere", e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| CohereError::network("cohere", e.to_string()))?;

        if !status.is_success() {
            let body_str = String::from_utf8_lossy(&bytes).to_string();
            return Err(crate::core::traits::error_mapper::implementations::CohereErrorMapper
                .map_http_error(status.as_u16(), &body_str));
        }

        let json: Value = serde_json::from_slice(&bytes)
            .map_err(|e| CohereError::response_parsing("cohere", e.to_string()))?;

        self.transform_chat_response(json, &model)
    }

    async fn chat_completion_stream(
        &self,
        request: ChatRequest,
        _context: RequestContext,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<ChatChunk, Self::Error>> + Send>>, Self::Error>
    {
        let model = request.model.clone();
        let mut body = self.transform_chat_request(&request);
        body["stream"] = Value::Bool(true);

        let api_key = self
            .config
            .base
            .api_key
            .as_ref()
            .ok_or_else(|| CohereError::authentication("cohere", "API key is required"))?;

        let url = format!("{}/chat", self.config.get_api_base());
        let client = reqwest::Client::new();
        let response = client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| CohereError::network("cohere", e.to_string()))?;

        let stream = response.bytes_stream();
        Ok(Box::pin(create_cohere_stream(stream, model)))
    }

    async fn embeddings(
        &self,
        request: EmbeddingRequest,
        _context: RequestContext,
    ) -> Result<EmbeddingResponse, Self::Error> {
        let texts = request.input.to_vec();
        let body = serde_json::json!({
            "model": self.config.get_model_mapping(&request.model),
            "texts": texts,
            "input_type": "search_document",
        });

        let url = format!("{}/embed", self.config.get_api_base());
        let response = self
            .pool_manager
            .execute_request(&url, HttpMethod::POST, self.get_request_headers(), Some(body))
            .await
            .map_err(|e| CohereError::network("cohere", e.to_string()))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CohereError::network("cohere", e.to_string()))?;
        let json: Value = serde_json::from_slice(&bytes)
            .map_err(|e| CohereError::response_parsing("cohere", e.to_string()))?;

        let embeddings: Vec<Vec<f32>> = serde_json::from_value(
            json.get("embeddings").cloned().unwrap_or(Value::Array(vec![])),
        )
        .map_err(|e| CohereError::response_parsing("cohere", e.to_string()))?;

        let data: Vec<EmbeddingData> = embeddings
            .into_iter()
            .enumerate()
            .map(|(index, embedding)| EmbeddingData {
                object: "embedding".to_string(),
                index: index as u32,
                embedding,
            })
            .collect();

        let prompt_tokens = texts.iter().map(|t| (t.len() as f64 / 4.0).ceil() as u32).sum();

        Ok(EmbeddingResponse {
            object: "list".to_string(),
            data,
            model: request.model,
            usage: Some(Usage::new(prompt_tokens, 0)),
            embeddings: None,
        })
    }

    async fn health_check(&self) -> HealthStatus {
        let url = format!("{}/models?page_size=1", self.config.get_api_base());
        let client = reqwest::Client::new();
        let mut req = client.get(&url);
        if let Some(api_key) = &self.config.base.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        match req.send().await {
            Ok(response) if response.status().is_success() => HealthStatus::Healthy,
            _ => HealthStatus::Unhealthy,
        }
    }

    async fn calculate_cost(
        &self,
        model: &str,
        input_tokens: u32,
        output_tokens: u32,
    ) -> Result<f64, Self::Error> {
        let info = self.models.iter().find(|m| m.id == model);
        let input_cost = info
            .and_then(|m| m.input_cost_per_1k_tokens)
            .map(|cost| (input_tokens as f64 / 1000.0) * cost)
            .unwrap_or(0.0);
        let output_cost = info
            .and_then(|m| m.output_cost_per_1k_tokens)
            .map(|cost| (output_tokens as f64 / 1000.0) * cost)
            .unwrap_or(0.0);
        Ok(input_cost + output_cost)
    }

    fn get_supported_openai_params(&self, _model: &str) -> &'static [&'static str] {
        &["messages", "model", "temperature", "max_tokens", "top_p", "stop", "stream"]
    }

    async fn map_openai_params(
        &self,
        params: HashMap<String, Value>,
        _model: &str,
    ) -> Result<HashMap<String, Value>, Self::Error> {
        let mut mapped = HashMap::new();
        for (key, value) in params {
            let mapped_key = match key.as_str() {
                "max_tokens" => "max_tokens",
                "top_p" => "p",
                "stop" => "stop_sequences",
                other => other,
            };
            mapped.insert(mapped_key.to_string(), value);
        }
        Ok(mapped)
    }

    async fn transform_request(
        &self,
        request: ChatRequest,
        _context: RequestContext,
    ) -> Result<Value, Self::Error> {
        Ok(self.transform_chat_request(&request))
    }

    async fn transform_response(
        &self,
        raw_response: &[u8],
        model: &str,
        _request_id: &str,
    ) -> Result<ChatResponse, Self::Error> {
        let value: Value = serde_json::from_slice(raw_response)
            .map_err(|e| CohereError::response_parsing("cohere", e.to_string()))?;
        self.transform_chat_response(value, model)
    }

    fn get_error_mapper(&self) -> Self::ErrorMapper {
        crate::core::traits::error_mapper::implementations::CohereErrorMapper
    }
}

use crate::core::traits::error_mapper::trait_def::ErrorMapper as _;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_provider_creation() {
        let mut config = CohereConfig::default();
        config.base.api_key = Some("co-test123".to_string());
        let provider = CohereProvider::new(config).await;
        assert!(provider.is_ok());
    }

    #[test]
    fn splits_history_from_current_message() {
        let mut config = CohereConfig::default();
        config.base.api_key = Some("co-test".to_string());
        let provider = futures::executor::block_on(CohereProvider::new(config)).unwrap();

        let request = ChatRequest {
            model: "command-r".to_string(),
            messages: vec![
                ChatMessage {
                    role: MessageRole::User,
                    content: Some(MessageContent::Text("hi".to_string())),
                    ..Default::default()
                },
                ChatMessage {
                    role: MessageRole::Assistant,
                    content: Some(MessageContent::Text("hello".to_string())),
                    ..Default::default()
                },
                ChatMessage {
                    role: MessageRole::User,
                    content: Some(MessageContent::Text("how are you?".to_string())),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let body = provider.transform_chat_request(&request);
        assert_eq!(body["message"], "how are you?");
        assert_eq!(body["chat_history"].as_array().unwrap().len(), 2);
    }
}
