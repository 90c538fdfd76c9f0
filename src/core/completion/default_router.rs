// Included directly into `core::completion` (see the `include!` at the
// bottom of mod.rs): the `DefaultRouter` is tightly coupled to provider
// initialization and isn't useful split into its own module path.

use crate::core::providers::{create_provider, Provider, ProviderRegistry};
use crate::core::response_cache::{self, ResponseCache};
use crate::core::router::{
    FallbackConfig, FallbackController, ModelCandidate, ModelRouter, RoutingPolicy, RoutingRequest,
};
use crate::core::types::common::{ProviderCapability, RequestContext as ProviderRequestContext};
use crate::core::usage_metrics::{RequestType, UsageMetricsSink};
use crate::utils::ai::tokens::TokenUtils;
use crate::utils::data::validation::request_validator::RequestValidator;
use crate::utils::error::GatewayError;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Default fallback chain depth (spec `maxFallbackAttempts`). No fallback
/// rule table ships by default — `config/` has no surface for one yet — so
/// this only takes effect once rules are registered on the controller.
const DEFAULT_MAX_FALLBACK_ATTEMPTS: u32 = 3;

/// `DataRetentionPeriod` default (90 days) the usage sink sweeps against.
const DEFAULT_USAGE_RETENTION: Duration = Duration::from_secs(90 * 24 * 3600);

/// Routes a completion request through the Model Router (C5), the Fallback
/// Controller (C8), the Response Cache (C9), and the Usage & Metrics Sink
/// (C3) before dispatching to a [`Provider`].
///
/// This is the production implementation of [`Router`]; the free functions
/// below (`completion`, `acompletion`, `completion_stream`) use a
/// lazily-initialized shared instance built from `Config::from_env()`.
pub struct DefaultRouter {
    registry: Arc<RwLock<ProviderRegistry>>,
    router: Arc<ModelRouter>,
    fallback: Arc<FallbackController>,
    metrics: Arc<UsageMetricsSink>,
    health: Arc<crate::core::health::monitor::HealthMonitor>,
    cache: Arc<ResponseCache>,
}

impl DefaultRouter {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self::with_policy(registry, RoutingPolicy::default())
    }

    fn with_policy(registry: ProviderRegistry, policy: RoutingPolicy) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
            router: Arc::new(ModelRouter::new(policy, HashMap::new())),
            fallback: Arc::new(FallbackController::new(
                FallbackConfig::new(),
                DEFAULT_MAX_FALLBACK_ATTEMPTS,
            )),
            metrics: Arc::new(UsageMetricsSink::new(DEFAULT_USAGE_RETENTION)),
            health: Arc::new(crate::core::health::monitor::HealthMonitor::new(
                crate::core::health::monitor::HealthMonitorConfig::default(),
            )),
            cache: Arc::new(ResponseCache::new()),
        }
    }

    /// Build a router from every provider entry in `config`, skipping (and
    /// logging) any entry that fails to initialize rather than failing the
    /// whole router.
    pub fn from_config(config: &crate::config::Config) -> Self {
        let mut registry = ProviderRegistry::new();
        for provider_config in config.providers() {
            match create_provider(provider_config) {
                Ok(provider) => registry.register(provider),
                Err(e) => {
                    tracing::warn!(provider = %provider_config.name, error = %e, "skipping provider that failed to initialize");
                }
            }
        }
        let policy = routing_policy_from_config(config.router());
        Self::with_policy(registry, policy)
    }

    /// Split `"<provider>/<model>"` into its provider-name and bare-model
    /// parts; models with no explicit provider route by candidate search.
    fn split_model(model: &str) -> (Option<&str>, &str) {
        match model.split_once('/') {
            Some((provider, rest)) => (Some(provider), rest),
            None => (None, model),
        }
    }

    /// The full pipeline's shared setup: validate, build the candidate list,
    /// and run the Model Router. Returns the selected model id plus the full
    /// (unscoped) candidate list, so callers can still walk the Fallback
    /// Controller's suggestions against any provider.
    async fn route(
        &self,
        model: &str,
        messages: &[Message],
        options: &CompletionOptions,
        required_capability: ProviderCapability,
    ) -> crate::utils::error::Result<(String, Vec<ModelCandidate>)> {
        let chat_messages = convert_messages_to_chat_messages(messages.to_vec());
        RequestValidator::validate_chat_completion_request(
            model,
            &chat_messages,
            options.max_tokens,
            options.temperature,
        )?;
        validate_sampling_bounds(options)?;

        let registry = self.registry.read().await;
        let candidates = build_candidates(&registry);
        drop(registry);

        let (provider_hint, bare_model) = Self::split_model(model);
        let scoped: Vec<ModelCandidate> = match provider_hint {
            Some(hint) => candidates.iter().filter(|c| c.provider == hint).cloned().collect(),
            None => candidates.clone(),
        };

        let routing_request = RoutingRequest {
            requested_model_id: bare_model.to_string(),
            user_id: None,
            required_capability,
            prompt_tokens: estimate_prompt_tokens(bare_model, messages),
            max_tokens: options.max_tokens,
            last_user_message: last_user_message(messages),
        };

        let decision = self
            .router
            .select(
                &routing_request,
                &scoped,
                None,
                self.metrics.as_ref(),
                self.health.as_ref(),
            )
            .map_err(|e| GatewayError::NoProvidersAvailable(e.to_string()))?;

        Ok((decision.selected_model_id, candidates))
    }

    async fn provider_for(&self, candidates: &[ModelCandidate], model_id: &str) -> Option<Provider> {
        let provider_name = candidates.iter().find(|c| c.model_id == model_id)?.provider.clone();
        let registry = self.registry.read().await;
        registry.get(&provider_name).cloned()
    }
}

#[async_trait::async_trait]
impl Router for DefaultRouter {
    async fn completion(
        &self,
        model: &str,
        messages: Vec<Message>,
        options: Option<CompletionOptions>,
    ) -> crate::utils::error::Result<CompletionResponse> {
        let options = options.unwrap_or_default();
        let (mut attempt_model, candidates) = self
            .route(model, &messages, &options, ProviderCapability::ChatCompletion)
            .await?;

        let prompt_tokens = estimate_prompt_tokens(&attempt_model, &messages);
        let max_attempts = self.fallback.max_attempts().max(1);
        let mut last_error: Option<GatewayError> = None;

        for _ in 0..max_attempts {
            let Some(provider) = self.provider_for(&candidates, &attempt_model).await else {
                break;
            };
            let provider_name = provider.name().to_string();
            let request =
                conversion::convert_to_chat_completion_request(&attempt_model, messages.clone(), Some(options.clone()));
            let context = ProviderRequestContext::default();
            let cache_key = response_cache::fingerprint(&provider_name, &attempt_model, &messages, &options);
            let cacheable = response_cache::is_cacheable(&options);
            let started = Instant::now();

            let result = self
                .cache
                .get_or_build(cache_key, cacheable, || async move {
                    provider
                        .chat_completion(request, context)
                        .await
                        .map_err(GatewayError::Provider)
                        .map(conversion::convert_from_chat_completion_response)
                })
                .await;

            match result {
                Ok(response) => {
                    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
                    let (prompt, completion, cost) = usage_and_cost(&response, &candidates, &attempt_model);
                    self.metrics.record_success(
                        &attempt_model,
                        &provider_name,
                        RequestType::Completion,
                        prompt,
                        completion,
                        cost,
                        latency_ms,
                    );
                    return Ok(response);
                }
                Err(GatewayError::Provider(provider_error)) => {
                    self.metrics.record_failure(
                        &attempt_model,
                        &provider_name,
                        RequestType::Completion,
                        prompt_tokens,
                        0,
                    );
                    let next = self
                        .fallback
                        .candidates(&attempt_model, &provider_error)
                        .into_iter()
                        .find(|c| candidates.iter().any(|m| &m.model_id == c));
                    last_error = Some(GatewayError::Provider(provider_error));
                    match next {
                        Some(next_model) => {
                            attempt_model = next_model;
                            continue;
                        }
                        None => break,
                    }
                }
                Err(other) => return Err(other),
            }
        }

        Err(last_error.unwrap_or_else(|| GatewayError::NoProvidersAvailable(model.to_string())))
    }

    async fn completion_stream(
        &self,
        model: &str,
        messages: Vec<Message>,
        options: Option<CompletionOptions>,
    ) -> crate::utils::error::Result<CompletionStream> {
        use futures::StreamExt;

        let mut options = options.unwrap_or_default();
        options.stream = true;
        let (mut attempt_model, candidates) = self
            .route(model, &messages, &options, ProviderCapability::ChatCompletionStream)
            .await?;

        let prompt_tokens = estimate_prompt_tokens(&attempt_model, &messages);
        let max_attempts = self.fallback.max_attempts().max(1);
        let mut last_error: Option<GatewayError> = None;

        for _ in 0..max_attempts {
            let Some(provider) = self.provider_for(&candidates, &attempt_model).await else {
                break;
            };
            let provider_name = provider.name().to_string();
            let request =
                conversion::convert_to_chat_completion_request(&attempt_model, messages.clone(), Some(options.clone()));
            let context = ProviderRequestContext::default();

            match provider.chat_completion_stream(request, context).await {
                Ok(mut upstream) => {
                    let metrics = self.metrics.clone();
                    let model_for_metrics = attempt_model.clone();
                    let provider_for_metrics = provider_name;
                    let started = Instant::now();

                    let stream = async_stream::stream! {
                        let mut completion_tokens: u32 = 0;
                        let mut failed = false;

                        while let Some(item) = upstream.next().await {
                            match item {
                                Ok(chunk) => {
                                    if let Some(content) = chunk
                                        .choices
                                        .first()
                                        .and_then(|c| c.delta.content.as_deref())
                                    {
                                        completion_tokens += rough_token_estimate(content);
                                    }
                                    yield Ok(conversion::convert_from_chat_chunk(chunk));
                                }
                                Err(e) => {
                                    failed = true;
                                    yield Err(GatewayError::Provider(e));
                                    break;
                                }
                            }
                        }

                        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
                        if failed {
                            metrics.record_failure(
                                &model_for_metrics,
                                &provider_for_metrics,
                                RequestType::StreamingCompletion,
                                prompt_tokens,
                                completion_tokens,
                            );
                        } else {
                            metrics.record_success(
                                &model_for_metrics,
                                &provider_for_metrics,
                                RequestType::StreamingCompletion,
                                prompt_tokens,
                                completion_tokens,
                                0.0,
                                latency_ms,
                            );
                        }
                    };

                    return Ok(Box::pin(stream));
                }
                Err(provider_error) => {
                    self.metrics.record_failure(
                        &attempt_model,
                        &provider_name,
                        RequestType::StreamingCompletion,
                        prompt_tokens,
                        0,
                    );
                    let next = self
                        .fallback
                        .candidates(&attempt_model, &provider_error)
                        .into_iter()
                        .find(|c| candidates.iter().any(|m| &m.model_id == c));
                    last_error = Some(GatewayError::Provider(provider_error));
                    match next {
                        Some(next_model) => {
                            attempt_model = next_model;
                            continue;
                        }
                        None => break,
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| GatewayError::NoProvidersAvailable(model.to_string())))
    }
}

/// Build the router's candidate list from every model every registered
/// provider advertises. `quality_rank` has no dedicated source field on
/// `ModelInfo`; context window is used as a rough proxy (bigger context
/// models tend to be the vendor's higher tier), same idea as ordering by
/// price the `QualityOptimized` strategy falls back on when ranks tie.
fn build_candidates(registry: &ProviderRegistry) -> Vec<ModelCandidate> {
    registry
        .all()
        .into_iter()
        .flat_map(|provider| {
            // Per-model `ModelInfo::capabilities` is left empty by some adapters
            // (e.g. OpenAI's model list), so candidates use the provider-level
            // capability set `LLMProvider::capabilities()` always populates.
            let capabilities = provider.capabilities().to_vec();
            provider.list_models().iter().map(move |model| ModelCandidate {
                model_id: model.id.clone(),
                provider: provider.name().to_string(),
                context_window: model.max_context_length,
                price_input: model.input_cost_per_1k_tokens.unwrap_or(0.0) / 1000.0,
                price_output: model.output_cost_per_1k_tokens.unwrap_or(0.0) / 1000.0,
                quality_rank: model.max_context_length / 1000,
                capabilities: capabilities.clone(),
            })
        })
        .collect()
}

/// Map the teacher's `RouterConfig` (round-robin/least-cost/least-latency/...)
/// onto the Model Router's `RoutingPolicy` switches. There's no 1:1 mapping
/// for every `RoutingStrategyConfig` variant (`Weighted`, `Priority`,
/// `Custom` have no router-side equivalent), so those leave the policy at
/// its smart-routing default.
fn routing_policy_from_config(config: &crate::config::models::router::RouterConfig) -> RoutingPolicy {
    use crate::config::models::router::RoutingStrategyConfig;

    let mut policy = RoutingPolicy::default();
    match &config.strategy {
        RoutingStrategyConfig::LeastCost => policy.enable_cost_optimized_routing = true,
        RoutingStrategyConfig::LeastLatency => policy.enable_latency_optimized_routing = true,
        RoutingStrategyConfig::RoundRobin => policy.enable_load_balancing = true,
        RoutingStrategyConfig::ABTest { split_ratio } => {
            policy.enable_experimental_routing = true;
            policy.experimental_sampling_rate = *split_ratio;
        }
        RoutingStrategyConfig::Random | RoutingStrategyConfig::Weighted { .. } | RoutingStrategyConfig::Priority { .. } | RoutingStrategyConfig::Custom { .. } => {}
    }
    policy
}

fn last_user_message(messages: &[Message]) -> Option<String> {
    messages
        .iter()
        .rev()
        .find(|m| m.role == crate::core::types::MessageRole::User)
        .map(|m| m.content.clone())
}

fn estimate_prompt_tokens(model: &str, messages: &[Message]) -> u32 {
    let maps: Vec<HashMap<String, String>> = messages
        .iter()
        .map(|m| {
            let mut map = HashMap::new();
            map.insert("role".to_string(), m.role.to_string());
            map.insert("content".to_string(), m.content.clone());
            map
        })
        .collect();

    TokenUtils::token_counter(model, None, Some(&maps)).unwrap_or(0) as u32
}

/// Cheap, tokenizer-free estimate for streaming deltas (~4 chars/token),
/// used only to keep the Usage & Metrics Sink populated mid-stream; the
/// unary path uses the real tokenizer via [`estimate_prompt_tokens`].
fn rough_token_estimate(text: &str) -> u32 {
    ((text.chars().count() as f64 / 4.0).ceil() as u32).max(1)
}

fn usage_and_cost(
    response: &CompletionResponse,
    candidates: &[ModelCandidate],
    model_id: &str,
) -> (u32, u32, f64) {
    let usage = response.usage.clone().unwrap_or_default();
    let cost = candidates
        .iter()
        .find(|c| c.model_id == model_id)
        .map(|c| c.price_input * usage.prompt_tokens as f64 + c.price_output * usage.completion_tokens as f64)
        .unwrap_or(0.0);
    (usage.prompt_tokens, usage.completion_tokens, cost)
}

/// `RequestValidator` covers model/messages/`maxTokens`/`temperature`; the
/// remaining bounds the spec names (`topP`, `stop` list length) are checked
/// here since they're completion-options-only, not shared with embeddings.
fn validate_sampling_bounds(options: &CompletionOptions) -> crate::utils::error::Result<()> {
    if let Some(top_p) = options.top_p {
        if !(0.0..=1.0).contains(&top_p) {
            return Err(GatewayError::Validation("top_p must be between 0.0 and 1.0".to_string()));
        }
    }
    if let Some(stop) = &options.stop {
        if stop.len() > 4 {
            return Err(GatewayError::Validation("stop supports at most 4 sequences".to_string()));
        }
    }
    Ok(())
}

static DEFAULT_ROUTER: OnceLock<Arc<DefaultRouter>> = OnceLock::new();

fn default_router() -> Arc<DefaultRouter> {
    DEFAULT_ROUTER
        .get_or_init(|| {
            let config = crate::config::Config::from_env().unwrap_or_default();
            Arc::new(DefaultRouter::from_config(&config))
        })
        .clone()
}

/// Call a completion model, Python-LiteLLM style.
pub async fn completion(
    model: &str,
    messages: Vec<Message>,
    options: Option<CompletionOptions>,
) -> crate::utils::error::Result<CompletionResponse> {
    default_router().completion(model, messages, options).await
}

/// Async alias for [`completion`], kept for parity with Python LiteLLM's
/// `acompletion`/`completion` split.
pub async fn acompletion(
    model: &str,
    messages: Vec<Message>,
    options: Option<CompletionOptions>,
) -> crate::utils::error::Result<CompletionResponse> {
    completion(model, messages, options).await
}

/// Call a completion model with a streamed response.
pub async fn completion_stream(
    model: &str,
    messages: Vec<Message>,
    options: Option<CompletionOptions>,
) -> crate::utils::error::Result<CompletionStream> {
    default_router()
        .completion_stream(model, messages, options)
        .await
}
