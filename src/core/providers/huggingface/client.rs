//! Hugging Face Inference API Provider Client
//!
//! Talks to the hosted Inference API's `text-generation` and `feature-extraction`
//! pipelines. The Inference API has no chat/message concept of its own, so chat
//! messages are flattened into a single prompt using a simple role-prefixed
//! template before being posted to `/models/{model}`.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::providers::base::{header, GlobalPoolManager, HeaderPair, HttpMethod};
use crate::core::traits::provider::LLMProvider;
use crate::core::types::{
    common::{HealthStatus, ModelInfo, ProviderCapability, RequestContext},
    requests::{ChatMessage, ChatRequest, EmbeddingRequest, MessageContent, MessageRole},
    responses::{ChatChoice, ChatResponse, EmbeddingData, EmbeddingResponse, FinishReason, Usage},
};

use super::{config::HuggingFaceConfig, error::HuggingFaceError};

fn default_models() -> Vec<ModelInfo> {
    vec![
        ModelInfo {
            id: "meta-llama/Meta-Llama-3-8B-Instruct".to_string(),
            name: "Llama 3 8B Instruct".to_string(),
            provider: "huggingface".to_string(),
            max_context_length: 8192,
            max_output_length: Some(2048),
            supports_streaming: false,
            supports_tools: false,
            supports_multimodal: false,
            input_cost_per_1k_tokens: None,
            output_cost_per_1k_tokens: None,
            currency: "USD".to_string(),
            capabilities: vec![ProviderCapability::ChatCompletion],
            created_at: None,
            updated_at: None,
            metadata: HashMap::new(),
        },
        ModelInfo {
            id: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
            name: "All MiniLM L6 v2".to_string(),
            provider: "huggingface".to_string(),
            max_context_length: 256,
            max_output_length: None,
            supports_streaming: false,
            supports_tools: false,
            supports_multimodal: false,
            input_cost_per_1k_tokens: None,
            output_cost_per_1k_tokens: None,
            currency: "USD".to_string(),
            capabilities: vec![ProviderCapability::Embeddings],
            created_at: None,
            updated_at: None,
            metadata: HashMap::new(),
        },
    ]
}

/// Hugging Face Inference API provider implementation
#[derive(Debug, Clone)]
pub struct HuggingFaceProvider {
    pool_manager: Arc<GlobalPoolManager>,
    config: HuggingFaceConfig,
    models: Arc<Vec<ModelInfo>>,
}

impl HuggingFaceProvider {
    pub async fn new(config: HuggingFaceConfig) -> Result<Self, HuggingFaceError> {
        config
            .validate()
            .map_err(|e| HuggingFaceError::configuration("huggingface", e))?;

        let pool_manager = Arc::new(
            GlobalPoolManager::new()
                .map_err(|e| HuggingFaceError::network("huggingface", e.to_string()))?,
        );

        Ok(Self {
            pool_manager,
            config,
            models: Arc::new(default_models()),
        })
    }

    fn get_request_headers(&self) -> Vec<HeaderPair> {
        let mut headers = Vec::with_capacity(1);
        if let Some(api_key) = &self.config.base.api_key {
            headers.push(header("Authorization", format!("Bearer {}", api_key)));
        }
        headers
    }

    /// Flatten the gateway's message list into a single role-prefixed prompt;
    /// the Inference API's `text-generation` task has no structured chat input.
    fn build_prompt(&self, request: &ChatRequest) -> String {
        let mut prompt = String::new();
        for msg in &request.messages {
            let text = msg.content.as_ref().map(|c| c.to_string()).unwrap_or_default();
            let prefix = match msg.role {
                MessageRole::System => "System",
                MessageRole::User => "User",
                MessageRole::Assistant => "Assistant",
                MessageRole::Tool | MessageRole::Function => "Tool",
            };
            prompt.push_str(&format!("{}: {}\n", prefix, text));
        }
        prompt.push_str("Assistant:");
        prompt
    }

    fn transform_generation_response(
        &self,
        response: Value,
        model: &str,
        prompt_tokens: u32,
    ) -> Result<ChatResponse, HuggingFaceError> {
        let text = response
            .as_array()
            .and_then(|arr| arr.first())
            .and_then(|item| item.get("generated_text"))
            .and_then(|t| t.as_str())
            .or_else(|| response.get("generated_text").and_then(|t| t.as_str()))
            .unwrap_or_default()
            .to_string();

        let completion_tokens = (text.len() as f64 / 4.0).ceil() as u32;

        Ok(ChatResponse {
            id: uuid::Uuid::new_v4().to_string(),
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
                finish_reason: Some(FinishReason::Stop),
                logprobs: None,
            }],
            usage: Some(Usage::new(prompt_tokens, completion_tokens)),
            system_fingerprint: None,
        })
    }
}

#[async_trait]
impl LLMProvider for HuggingFaceProvider {
    type Config = HuggingFaceConfig;
    type Error = HuggingFaceError;
    type ErrorMapper = crate::core::traits::error_mapper::implementations::HuggingFaceErrorMapper;

    fn name(&self) -> &'static str {
        "huggingface"
    }

    fn capabilities(&self) -> &'static [ProviderCapability] {
        static CAPABILITIES: &[ProviderCapability] =
            &[ProviderCapability::ChatCompletion, ProviderCapability::Embeddings];
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
        let model_id = self.config.get_model_mapping(&request.model);
        let prompt = self.build_prompt(&request);
        let prompt_tokens = (prompt.len() as f64 / 4.0).ceil() as u32;

        let mut parameters = serde_json::json!({});
        if let Some(max_tokens) = request.max_tokens {
            parameters["max_new_tokens"] = serde_json::json!(max_tokens);
        }
        if let Some(temp) = request.temperature {
            parameters["temperature"] = serde_json::json!(temp.max(0.01));
        }
        if let Some(top_p) = request.top_p {
            parameters["top_p"] = serde_json::json!(top_p);
        }

        let body = serde_json::json!({
            "inputs": prompt,
            "parameters": parameters,
        });

        let url = format!("{}/models/{}", self.config.get_api_base(), model_id);
        let response = self
            .pool_manager
            .execute_request(&url, HttpMethod::POST, self.get_request_headers(), Some(body))
            .await
            .map_err(|e| HuggingFaceError::network("huggingface", e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| HuggingFaceError::network("huggingface", e.to_string()))?;

        if !status.is_success() {
            let body_str = String::from_utf8_lossy(&bytes).to_string();
            return Err(
                crate::core::traits::error_mapper::implementations::HuggingFaceErrorMapper
                    .map_http_error(status.as_u16(), &body_str),
            );
        }

        let json: Value = serde_json::from_slice(&bytes)
            .map_err(|e| HuggingFaceError::response_parsing("huggingface", e.to_string()))?;

        self.transform_generation_response(json, &request.model, prompt_tokens)
    }

    async fn embeddings(
        &self,
        request: EmbeddingRequest,
        _context: RequestContext,
    ) -> Result<EmbeddingResponse, Self::Error> {
        let model_id = self.config.get_model_mapping(&request.model);
        let texts = request.input.to_vec();

        let body = serde_json::json!({
            "inputs": texts,
            "options": { "wait_for_model": true },
        });

        let url = format!("{}/pipeline/feature-extraction/{}", self.config.get_api_base(), model_id);
        let response = self
            .pool_manager
            .execute_request(&url, HttpMethod::POST, self.get_request_headers(), Some(body))
            .await
            .map_err(|e| HuggingFaceError::network("huggingface", e.to_string()))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| HuggingFaceError::network("huggingface", e.to_string()))?;
        let json: Value = serde_json::from_slice(&bytes)
            .map_err(|e| HuggingFaceError::response_parsing("huggingface", e.to_string()))?;

        // Sentence-embedding models return one flat vector per input; token-level
        // models return a vector per token. Average token vectors down to one
        // per input when the response is nested one level deeper than expected.
        let vectors: Vec<Vec<f32>> = match json {
            Value::Array(items) => items
                .into_iter()
                .map(|item| flatten_embedding(item))
                .collect(),
            other => vec![flatten_embedding(other)],
        };

        let data: Vec<EmbeddingData> = vectors
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
        let Some(model) = self.models.first() else {
            return HealthStatus::Unknown;
        };
        let url = format!("{}/models/{}", self.config.get_api_base(), model.id);
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
        _model: &str,
        _input_tokens: u32,
        _output_tokens: u32,
    ) -> Result<f64, Self::Error> {
        // The hosted Inference API is billed per compute-second, not per token;
        // the gateway has no visibility into that here.
        Ok(0.0)
    }

    fn get_supported_openai_params(&self, _model: &str) -> &'static [&'static str] {
        &["messages", "model", "temperature", "max_tokens", "top_p"]
    }

    async fn map_openai_params(
        &self,
        params: HashMap<String, Value>,
        _model: &str,
    ) -> Result<HashMap<String, Value>, Self::Error> {
        let mut mapped = HashMap::new();
        for (key, value) in params {
            let mapped_key = match key.as_str() {
                "max_tokens" => "max_new_tokens",
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
        Ok(serde_json::json!({ "inputs": self.build_prompt(&request) }))
    }

    async fn transform_response(
        &self,
        raw_response: &[u8],
        model: &str,
        _request_id: &str,
    ) -> Result<ChatResponse, Self::Error> {
        let value: Value = serde_json::from_slice(raw_response)
            .map_err(|e| HuggingFaceError::response_parsing("huggingface", e.to_string()))?;
        self.transform_generation_response(value, model, 0)
    }

    fn get_error_mapper(&self) -> Self::ErrorMapper {
        crate::core::traits::error_mapper::implementations::HuggingFaceErrorMapper
    }
}

fn flatten_embedding(value: Value) -> Vec<f32> {
    match value {
        Value::Array(items) => {
            if items.first().map(|v| v.is_array()).unwrap_or(false) {
                // Token-level vectors: average across tokens into one sentence vector.
                let rows: Vec<Vec<f32>> = items.into_iter().map(flatten_embedding).collect();
                if rows.is_empty() {
                    return Vec::new();
                }
                let len = rows[0].len();
                let mut avg = vec![0.0f32; len];
                for row in &rows {
                    for (i, v) in row.iter().enumerate().take(len) {
                        avg[i] += v;
                    }
                }
                let n = rows.len() as f32;
                avg.iter_mut().for_each(|v| *v /= n);
                avg
            } else {
                items
                    .into_iter()
                    .filter_map(|v| v.as_f64().map(|f| f as f32))
                    .collect()
            }
        }
        _ => Vec::new(),
    }
}

use crate::core::traits::error_mapper::trait_def::ErrorMapper as _;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_provider_creation() {
        let mut config = HuggingFaceConfig::default();
        config.base.api_key = Some("hf_test123".to_string());
        let provider = HuggingFaceProvider::new(config).await;
        assert!(provider.is_ok());
    }

    #[test]
    fn builds_role_prefixed_prompt() {
        let mut config = HuggingFaceConfig::default();
        config.base.api_key = Some("hf_test".to_string());
        let provider = futures::executor::block_on(HuggingFaceProvider::new(config)).unwrap();

        let request = ChatRequest {
            model: "meta-llama/Meta-Llama-3-8B-Instruct".to_string(),
            messages: vec![ChatMessage {
                role: MessageRole::User,
                content: Some(MessageContent::Text("hi".to_string())),
                ..Default::default()
            }],
            ..Default::default()
        };

        let prompt = provider.build_prompt(&request);
        assert!(prompt.starts_with("User: hi"));
        assert!(prompt.ends_with("Assistant:"));
    }

    #[test]
    fn flattens_token_level_vectors_by_averaging() {
        let value = serde_json::json!([[1.0, 1.0], [3.0, 3.0]]);
        let flat = flatten_embedding(value);
        assert_eq!(flat, vec![2.0, 2.0]);
    }
}
