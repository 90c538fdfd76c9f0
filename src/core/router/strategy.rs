//! Routing strategies and the policy that decides which one applies.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::router::classifier::ContentCategory;

/// A named routing strategy (spec §4.5 step 3/4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingStrategy {
    /// Return the requested model id unchanged.
    Direct,
    /// Minimize estimated price among candidates that fit the context window.
    CostOptimized,
    /// Minimize average latency among same-provider candidates.
    LatencyOptimized,
    /// Maximize quality rank at or above the requested model's.
    QualityOptimized,
    /// Spread load across same-provider candidates by throughput.
    LoadBalanced,
    /// Route by the content classifier's specialty categories.
    ContentBased,
    /// Honor the user's explicit or historical preference.
    UserPreference,
    /// Sample a configured experimental candidate list.
    Experimental,
}

/// Gateway-wide routing configuration (`Routing.*` in the spec).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingPolicy {
    /// Master switch; when false the router always returns `Direct`.
    pub enable_smart_routing: bool,
    /// Enables `LoadBalanced` in the global strategy cascade.
    pub enable_load_balancing: bool,
    /// Enables `LatencyOptimized` in the global strategy cascade.
    pub enable_latency_optimized_routing: bool,
    /// Enables `CostOptimized` in the global strategy cascade.
    pub enable_cost_optimized_routing: bool,
    /// Enables `ContentBased` routing ahead of the global cascade.
    pub enable_content_based_routing: bool,
    /// Enables `Experimental` in the global strategy cascade.
    pub enable_experimental_routing: bool,
    /// Probability (0..1) an experimental candidate is chosen when enabled.
    pub experimental_sampling_rate: f64,
    /// Candidate model ids eligible for experimental sampling.
    pub experimental_models: Vec<String>,
    /// Per-model strategy overrides (step 3b).
    pub per_model_strategy: HashMap<String, RoutingStrategy>,
    /// Specialty → ordered preferred-model list for `ContentBased` (step 4).
    pub content_specialty_map: HashMap<ContentCategory, Vec<String>>,
}

impl Default for RoutingPolicy {
    fn default() -> Self {
        Self {
            enable_smart_routing: true,
            enable_load_balancing: false,
            enable_latency_optimized_routing: false,
            enable_cost_optimized_routing: false,
            enable_content_based_routing: false,
            enable_experimental_routing: false,
            experimental_sampling_rate: 0.0,
            experimental_models: Vec::new(),
            per_model_strategy: HashMap::new(),
            content_specialty_map: HashMap::new(),
        }
    }
}

impl RoutingPolicy {
    /// The first enabled strategy in the global cascade
    /// (`LoadBalanced → LatencyOptimized → CostOptimized → Experimental`),
    /// or `Direct` if none are enabled (spec §4.5 step 3d).
    pub fn global_strategy(&self) -> RoutingStrategy {
        if self.enable_load_balancing {
            RoutingStrategy::LoadBalanced
        } else if self.enable_latency_optimized_routing {
            RoutingStrategy::LatencyOptimized
        } else if self.enable_cost_optimized_routing {
            RoutingStrategy::CostOptimized
        } else if self.enable_experimental_routing {
            RoutingStrategy::Experimental
        } else {
            RoutingStrategy::Direct
        }
    }
}
