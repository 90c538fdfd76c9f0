//! Shared data types for the Model Router (spec component C5).

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::router::strategy::RoutingStrategy;
use crate::core::types::model::ProviderCapability;

/// A model eligible for selection, as seen by the router. Built from
/// `LLMRouting.ModelMappings` plus the live metrics/health snapshot at
/// selection time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelCandidate {
    /// Canonical model id (what the Provider Registry keys adapters by).
    pub model_id: String,
    /// Owning provider name (e.g. "openai").
    pub provider: String,
    /// Context window in tokens.
    pub context_window: u32,
    /// Price per input token.
    pub price_input: f64,
    /// Price per output token.
    pub price_output: f64,
    /// Relative quality rank; higher is better.
    pub quality_rank: u32,
    /// Capabilities this model supports.
    pub capabilities: Vec<ProviderCapability>,
}

impl ModelCandidate {
    /// Whether this candidate supports the capability a request requires.
    pub fn supports(&self, capability: &ProviderCapability) -> bool {
        self.capabilities.contains(capability)
    }
}

/// Caller-supplied routing preferences, resolved per user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreference {
    /// Explicit strategy override; `None` or `Direct` means "no preference".
    pub strategy: Option<RoutingStrategy>,
    /// Explicitly preferred model id, if any.
    pub preferred_model_id: Option<String>,
    /// Most-recent selections, oldest first, capped at 20 by the caller.
    pub recent_selections: Vec<String>,
}

impl UserPreference {
    /// The user's single most-frequent selection within `recent_selections`.
    pub fn most_frequent_selection(&self) -> Option<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for model_id in &self.recent_selections {
            *counts.entry(model_id.as_str()).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .max_by_key(|(_, count)| *count)
            .map(|(model_id, _)| model_id.to_string())
    }
}

/// Everything the router needs to make a selection for one request.
#[derive(Debug, Clone)]
pub struct RoutingRequest {
    /// Model id as requested by the caller (pre alias-resolution).
    pub requested_model_id: String,
    /// Authenticated user id, if any.
    pub user_id: Option<String>,
    /// Capability the request needs (chat, embeddings, ...).
    pub required_capability: ProviderCapability,
    /// Estimated prompt tokens, used by `CostOptimized`.
    pub prompt_tokens: u32,
    /// Requested `maxTokens`, defaulting to 1000 per spec where absent.
    pub max_tokens: Option<u32>,
    /// Text of the last user message, used by the content classifier.
    pub last_user_message: Option<String>,
}

/// Outcome of one routing pass, independent of whether it succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Model id the caller asked for.
    pub requested_model_id: String,
    /// Model id the router picked.
    pub selected_model_id: String,
    /// Strategy that produced the selection.
    pub strategy: RoutingStrategy,
    /// Whether this decision represents a fallback from a prior failure.
    pub is_fallback: bool,
    /// Error text that triggered the fallback, if any.
    pub fallback_reason: Option<String>,
    /// Wall-clock time spent inside the router (not the vendor call).
    pub router_latency: Duration,
    /// When the decision was recorded.
    pub timestamp: DateTime<Utc>,
}
