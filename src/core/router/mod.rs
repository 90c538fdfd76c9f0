//! Model Router (spec component C5)
//!
//! Given a requested model id, a request, and an optional user id, picks a
//! concrete model id under the active routing strategy and records a
//! [`RoutingDecision`]. See [`fallback`] for the companion Fallback
//! Controller (C8) that decides what to do when the chosen model's call
//! fails.

pub mod classifier;
pub mod error;
pub mod fallback;
pub mod strategy;
pub mod types;

use std::collections::HashMap;
use std::time::Instant;

use rand::Rng;

use crate::core::types::model::ProviderCapability;

pub use classifier::{ContentCategory, ContentClassification};
pub use error::RouterError;
pub use fallback::{ExecutionResult, FallbackConfig, FallbackController, FallbackType};
pub use strategy::{RoutingPolicy, RoutingStrategy};
pub use types::{ModelCandidate, RoutingDecision, RoutingRequest, UserPreference};

/// Read-only metrics the router consumes (backed by the Usage & Metrics Sink, C3).
pub trait MetricsSource: Send + Sync {
    /// EWMA latency in milliseconds for a model, if any samples exist yet.
    fn avg_latency_ms(&self, model_id: &str) -> Option<f64>;
    /// Requests served for a model in the last 60s.
    fn throughput_per_minute(&self, model_id: &str) -> u64;
}

/// Read-only health the router consumes (backed by the Health Monitor, C4).
pub trait HealthSource: Send + Sync {
    /// Whether the given provider is currently considered healthy.
    fn is_provider_healthy(&self, provider: &str) -> bool;
}

/// The Model Router. Holds no mutable selection state itself; all
/// per-selection data comes from the candidate list and the injected
/// metrics/health snapshots, so concurrent `select` calls never block one
/// another (spec §4.5 "Determinism").
pub struct ModelRouter {
    policy: RoutingPolicy,
    alias_map: HashMap<String, String>,
}

impl ModelRouter {
    /// Build a router from its routing policy and alias table
    /// (`LLMRouting.ModelMappings` aliasing, resolved ahead of time).
    pub fn new(policy: RoutingPolicy, alias_map: HashMap<String, String>) -> Self {
        Self { policy, alias_map }
    }

    /// Resolve a requested id to its canonical id (spec §4.5 step 1).
    fn resolve_alias(&self, requested_model_id: &str) -> String {
        self.alias_map
            .get(requested_model_id)
            .cloned()
            .unwrap_or_else(|| requested_model_id.to_string())
    }

    /// Run the full selection pipeline (spec §4.5 steps 1-6).
    #[allow(clippy::too_many_arguments)]
    pub fn select(
        &self,
        request: &RoutingRequest,
        all_models: &[ModelCandidate],
        user_preference: Option<&UserPreference>,
        metrics: &dyn MetricsSource,
        health: &dyn HealthSource,
    ) -> Result<RoutingDecision, RouterError> {
        let start = Instant::now();

        // Step 1: alias resolution.
        let canonical_id = self.resolve_alias(&request.requested_model_id);

        // Step 2: capability filter.
        let candidates: Vec<&ModelCandidate> = all_models
            .iter()
            .filter(|m| m.supports(&request.required_capability))
            .filter(|m| health.is_provider_healthy(&m.provider))
            .collect();

        if candidates.is_empty() {
            return Err(RouterError::NoEligibleModel {
                requested_model_id: canonical_id,
            });
        }

        // Step 3: strategy selection (first match wins).
        let strategy = self.choose_strategy(&canonical_id, request, user_preference);

        // Step 4: resolution per strategy.
        let resolved = self.resolve(
            strategy,
            &canonical_id,
            request,
            &candidates,
            user_preference,
            metrics,
            health,
        );

        // Step 5: guard — selection must be a real candidate, else Direct on the requested id.
        let (selected_model_id, final_strategy) = match resolved {
            Some(id) if candidates.iter().any(|c| c.model_id == id) => (id, strategy),
            _ => (canonical_id.clone(), RoutingStrategy::Direct),
        };

        // Step 6: record.
        Ok(RoutingDecision {
            requested_model_id: request.requested_model_id.clone(),
            selected_model_id,
            strategy: final_strategy,
            is_fallback: false,
            fallback_reason: None,
            router_latency: start.elapsed(),
            timestamp: chrono::Utc::now(),
        })
    }

    fn choose_strategy(
        &self,
        canonical_id: &str,
        request: &RoutingRequest,
        user_preference: Option<&UserPreference>,
    ) -> RoutingStrategy {
        if !self.policy.enable_smart_routing {
            return RoutingStrategy::Direct;
        }

        // 3a: user preference.
        if let Some(pref) = user_preference {
            if let Some(strategy) = pref.strategy {
                if strategy != RoutingStrategy::Direct {
                    return strategy;
                }
            }
        }

        // 3b: per-model strategy override.
        if let Some(strategy) = self.policy.per_model_strategy.get(canonical_id) {
            return *strategy;
        }

        // 3c: content-based routing.
        if self.policy.enable_content_based_routing {
            if let Some(text) = &request.last_user_message {
                let classification = classifier::classify(text);
                if !classification.categories().is_empty() {
                    return RoutingStrategy::ContentBased;
                }
            }
        }

        // 3d: global cascade.
        self.policy.global_strategy()
    }

    #[allow(clippy::too_many_arguments)]
    fn resolve(
        &self,
        strategy: RoutingStrategy,
        canonical_id: &str,
        request: &RoutingRequest,
        candidates: &[&ModelCandidate],
        user_preference: Option<&UserPreference>,
        metrics: &dyn MetricsSource,
        health: &dyn HealthSource,
    ) -> Option<String> {
        match strategy {
            RoutingStrategy::Direct => Some(canonical_id.to_string()),

            RoutingStrategy::CostOptimized => {
                let max_tokens = request.max_tokens.unwrap_or(1000);
                candidates
                    .iter()
                    .filter(|m| m.context_window >= request.prompt_tokens + max_tokens)
                    .min_by(|a, b| {
                        let cost_a = a.price_input * request.prompt_tokens as f64
                            + a.price_output * max_tokens as f64;
                        let cost_b = b.price_input * request.prompt_tokens as f64
                            + b.price_output * max_tokens as f64;
                        cost_a
                            .partial_cmp(&cost_b)
                            .unwrap_or(std::cmp::Ordering::Equal)
                            .then(b.quality_rank.cmp(&a.quality_rank))
                    })
                    .map(|m| m.model_id.clone())
            }

            RoutingStrategy::LatencyOptimized => {
                let requested_provider = candidates
                    .iter()
                    .find(|m| m.model_id == canonical_id)
                    .map(|m| m.provider.clone());

                let Some(provider) = requested_provider else {
                    return Some(canonical_id.to_string());
                };

                let same_provider: Vec<&&ModelCandidate> = candidates
                    .iter()
                    .filter(|m| m.provider == provider)
                    .collect();

                if same_provider.is_empty() {
                    return Some(canonical_id.to_string());
                }

                same_provider
                    .iter()
                    .min_by(|a, b| {
                        let lat_a = metrics.avg_latency_ms(&a.model_id).unwrap_or(f64::MAX);
                        let lat_b = metrics.avg_latency_ms(&b.model_id).unwrap_or(f64::MAX);
                        lat_a.partial_cmp(&lat_b).unwrap_or(std::cmp::Ordering::Equal)
                    })
                    .map(|m| m.model_id.clone())
            }

            RoutingStrategy::QualityOptimized => {
                let requested_rank = candidates
                    .iter()
                    .find(|m| m.model_id == canonical_id)
                    .map(|m| m.quality_rank)
                    .unwrap_or(0);

                candidates
                    .iter()
                    .filter(|m| m.quality_rank >= requested_rank)
                    .min_by(|a, b| {
                        b.quality_rank
                            .cmp(&a.quality_rank)
                            .then(
                                a.price_input
                                    .partial_cmp(&b.price_input)
                                    .unwrap_or(std::cmp::Ordering::Equal),
                            )
                    })
                    .map(|m| m.model_id.clone())
            }

            RoutingStrategy::LoadBalanced => {
                let requested_provider = candidates
                    .iter()
                    .find(|m| m.model_id == canonical_id)
                    .map(|m| m.provider.clone());

                let provider_healthy = requested_provider
                    .as_ref()
                    .map(|p| health.is_provider_healthy(p))
                    .unwrap_or(false);

                if !provider_healthy {
                    let mut rng = rand::thread_rng();
                    let idx = rng.gen_range(0..candidates.len());
                    return Some(candidates[idx].model_id.clone());
                }

                let Some(provider) = requested_provider else {
                    return Some(canonical_id.to_string());
                };

                candidates
                    .iter()
                    .filter(|m| m.provider == provider)
                    .min_by_key(|m| metrics.throughput_per_minute(&m.model_id))
                    .map(|m| m.model_id.clone())
            }

            RoutingStrategy::ContentBased => {
                let text = request.last_user_message.as_deref().unwrap_or("");
                let classification = classifier::classify(text);
                for category in classification.categories() {
                    if let Some(preferred) = self.policy.content_specialty_map.get(&category) {
                        if let Some(model_id) = preferred
                            .iter()
                            .find(|id| candidates.iter().any(|c| &c.model_id == *id))
                        {
                            return Some(model_id.clone());
                        }
                    }
                }
                Some(canonical_id.to_string())
            }

            RoutingStrategy::UserPreference => {
                if let Some(pref) = user_preference {
                    if let Some(preferred) = &pref.preferred_model_id {
                        if candidates.iter().any(|c| &c.model_id == preferred) {
                            return Some(preferred.clone());
                        }
                    }
                    if let Some(frequent) = pref.most_frequent_selection() {
                        if candidates.iter().any(|c| c.model_id == frequent) {
                            return Some(frequent);
                        }
                    }
                }
                Some(canonical_id.to_string())
            }

            RoutingStrategy::Experimental => {
                let mut rng = rand::thread_rng();
                if rng.gen_range(0.0..1.0) < self.policy.experimental_sampling_rate
                    && !self.policy.experimental_models.is_empty()
                {
                    let idx = rng.gen_range(0..self.policy.experimental_models.len());
                    Some(self.policy.experimental_models[idx].clone())
                } else {
                    Some(canonical_id.to_string())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedMetrics {
        latency: HashMap<String, f64>,
        throughput: HashMap<String, u64>,
    }

    impl MetricsSource for FixedMetrics {
        fn avg_latency_ms(&self, model_id: &str) -> Option<f64> {
            self.latency.get(model_id).copied()
        }

        fn throughput_per_minute(&self, model_id: &str) -> u64 {
            self.throughput.get(model_id).copied().unwrap_or(0)
        }
    }

    struct AllHealthy;
    impl HealthSource for AllHealthy {
        fn is_provider_healthy(&self, _provider: &str) -> bool {
            true
        }
    }

    struct OnlyHealthy(&'static str);
    impl HealthSource for OnlyHealthy {
        fn is_provider_healthy(&self, provider: &str) -> bool {
            provider == self.0
        }
    }

    fn candidate(id: &str, provider: &str, quality: u32, price_in: f64, price_out: f64) -> ModelCandidate {
        ModelCandidate {
            model_id: id.to_string(),
            provider: provider.to_string(),
            context_window: 8192,
            price_input: price_in,
            price_output: price_out,
            quality_rank: quality,
            capabilities: vec![ProviderCapability::ChatCompletion],
        }
    }

    fn base_request(model_id: &str) -> RoutingRequest {
        RoutingRequest {
            requested_model_id: model_id.to_string(),
            user_id: None,
            required_capability: ProviderCapability::ChatCompletion,
            prompt_tokens: 100,
            max_tokens: Some(200),
            last_user_message: None,
        }
    }

    #[test]
    fn direct_strategy_returns_requested_model() {
        let router = ModelRouter::new(RoutingPolicy::default(), HashMap::new());
        let candidates = vec![candidate("gpt-4", "openai", 5, 0.01, 0.02)];
        let decision = router
            .select(
                &base_request("gpt-4"),
                &candidates,
                None,
                &FixedMetrics {
                    latency: HashMap::new(),
                    throughput: HashMap::new(),
                },
                &AllHealthy,
            )
            .unwrap();
        assert_eq!(decision.selected_model_id, "gpt-4");
        assert_eq!(decision.strategy, RoutingStrategy::Direct);
    }

    #[test]
    fn alias_resolution_swaps_canonical_id() {
        let mut aliases = HashMap::new();
        aliases.insert("gpt-4".to_string(), "openai.gpt-4-turbo".to_string());
        let router = ModelRouter::new(RoutingPolicy::default(), aliases);
        let candidates = vec![candidate("openai.gpt-4-turbo", "openai", 5, 0.01, 0.02)];
        let decision = router
            .select(
                &base_request("gpt-4"),
                &candidates,
                None,
                &FixedMetrics {
                    latency: HashMap::new(),
                    throughput: HashMap::new(),
                },
                &AllHealthy,
            )
            .unwrap();
        assert_eq!(decision.selected_model_id, "openai.gpt-4-turbo");
    }

    #[test]
    fn empty_candidate_set_fails_no_eligible_model() {
        let router = ModelRouter::new(RoutingPolicy::default(), HashMap::new());
        let result = router.select(
            &base_request("gpt-4"),
            &[],
            None,
            &FixedMetrics {
                latency: HashMap::new(),
                throughput: HashMap::new(),
            },
            &AllHealthy,
        );
        assert!(matches!(result, Err(RouterError::NoEligibleModel { .. })));
    }

    #[test]
    fn cost_optimized_picks_cheapest_fitting_candidate() {
        let mut policy = RoutingPolicy::default();
        policy.enable_cost_optimized_routing = true;
        let router = ModelRouter::new(policy, HashMap::new());
        let candidates = vec![
            candidate("expensive", "openai", 5, 0.05, 0.05),
            candidate("cheap", "openai", 3, 0.001, 0.001),
        ];
        let decision = router
            .select(
                &base_request("expensive"),
                &candidates,
                None,
                &FixedMetrics {
                    latency: HashMap::new(),
                    throughput: HashMap::new(),
                },
                &AllHealthy,
            )
            .unwrap();
        assert_eq!(decision.selected_model_id, "cheap");
        assert_eq!(decision.strategy, RoutingStrategy::CostOptimized);
    }

    #[test]
    fn latency_optimized_picks_fastest_same_provider() {
        let mut policy = RoutingPolicy::default();
        policy.enable_latency_optimized_routing = true;
        let router = ModelRouter::new(policy, HashMap::new());
        let candidates = vec![
            candidate("slow", "openai", 5, 0.01, 0.01),
            candidate("fast", "openai", 5, 0.01, 0.01),
        ];
        let mut latency = HashMap::new();
        latency.insert("slow".to_string(), 500.0);
        latency.insert("fast".to_string(), 50.0);
        let decision = router
            .select(
                &base_request("slow"),
                &candidates,
                None,
                &FixedMetrics {
                    latency,
                    throughput: HashMap::new(),
                },
                &AllHealthy,
            )
            .unwrap();
        assert_eq!(decision.selected_model_id, "fast");
    }

    #[test]
    fn load_balanced_picks_random_healthy_provider_when_unhealthy() {
        let mut policy = RoutingPolicy::default();
        policy.enable_load_balancing = true;
        let router = ModelRouter::new(policy, HashMap::new());
        let candidates = vec![
            candidate("a", "down-provider", 5, 0.01, 0.01),
            candidate("b", "up-provider", 5, 0.01, 0.01),
        ];
        let decision = router
            .select(
                &base_request("a"),
                &candidates,
                None,
                &FixedMetrics {
                    latency: HashMap::new(),
                    throughput: HashMap::new(),
                },
                &OnlyHealthy("up-provider"),
            )
            .unwrap();
        // only "b" survives the health filter in the capability step, so it must win.
        assert_eq!(decision.selected_model_id, "b");
    }

    #[test]
    fn content_based_routes_code_request_to_specialty_model() {
        let mut policy = RoutingPolicy::default();
        policy.enable_content_based_routing = true;
        policy
            .content_specialty_map
            .insert(ContentCategory::Code, vec!["code-model".to_string()]);
        let router = ModelRouter::new(policy, HashMap::new());
        let candidates = vec![
            candidate("general", "openai", 5, 0.01, 0.01),
            candidate("code-model", "openai", 5, 0.01, 0.01),
        ];
        let mut request = base_request("general");
        request.last_user_message = Some("def solve():\n    return 1".to_string());
        let decision = router
            .select(
                &request,
                &candidates,
                None,
                &FixedMetrics {
                    latency: HashMap::new(),
                    throughput: HashMap::new(),
                },
                &AllHealthy,
            )
            .unwrap();
        assert_eq!(decision.selected_model_id, "code-model");
        assert_eq!(decision.strategy, RoutingStrategy::ContentBased);
    }

    #[test]
    fn user_preference_wins_over_global_cascade() {
        let mut policy = RoutingPolicy::default();
        policy.enable_cost_optimized_routing = true;
        let router = ModelRouter::new(policy, HashMap::new());
        let candidates = vec![
            candidate("cheap", "openai", 3, 0.001, 0.001),
            candidate("preferred", "openai", 5, 0.05, 0.05),
        ];
        let preference = UserPreference {
            strategy: Some(RoutingStrategy::UserPreference),
            preferred_model_id: Some("preferred".to_string()),
            recent_selections: Vec::new(),
        };
        let decision = router
            .select(
                &base_request("cheap"),
                &candidates,
                Some(&preference),
                &FixedMetrics {
                    latency: HashMap::new(),
                    throughput: HashMap::new(),
                },
                &AllHealthy,
            )
            .unwrap();
        assert_eq!(decision.selected_model_id, "preferred");
    }

    #[test]
    fn guard_falls_back_to_requested_id_when_selection_invalid() {
        let mut policy = RoutingPolicy::default();
        policy.enable_experimental_routing = true;
        policy.experimental_sampling_rate = 1.0;
        policy.experimental_models = vec!["not-a-candidate".to_string()];
        let router = ModelRouter::new(policy, HashMap::new());
        let candidates = vec![candidate("gpt-4", "openai", 5, 0.01, 0.01)];
        let decision = router
            .select(
                &base_request("gpt-4"),
                &candidates,
                None,
                &FixedMetrics {
                    latency: HashMap::new(),
                    throughput: HashMap::new(),
                },
                &AllHealthy,
            )
            .unwrap();
        assert_eq!(decision.selected_model_id, "gpt-4");
        assert_eq!(decision.strategy, RoutingStrategy::Direct);
    }
}
