//! Token usage and cost accounting types.

use serde::{Deserialize, Serialize};

/// Token counts for a single request/response pair.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt.
    pub input_tokens: u32,
    /// Tokens produced in the completion.
    pub output_tokens: u32,
}

impl TokenUsage {
    /// Build a usage record from prompt/completion token counts.
    pub fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    /// Total tokens spent (input + output).
    pub fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

/// Per-token and per-request billing rates for a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostRates {
    /// Cost per input (prompt) token.
    pub input_cost_per_token: f64,
    /// Cost per output (completion) token.
    pub output_cost_per_token: f64,
    /// Flat cost per request, if the model is billed that way.
    pub cost_per_request: Option<f64>,
}

/// Computed cost breakdown for a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostInfo {
    /// Cost attributable to the prompt.
    pub input_cost: f64,
    /// Cost attributable to the completion.
    pub output_cost: f64,
    /// Total cost charged.
    pub total_cost: f64,
    /// Currency code (e.g. "USD").
    pub currency: String,
    /// Rates used to compute this breakdown.
    pub rates: CostRates,
}
