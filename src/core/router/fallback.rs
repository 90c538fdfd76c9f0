//! Fallback Controller (spec component C8)
//!
//! Decides the next model to try when a provider call fails, driven by the
//! classified error type. Bounded by `maxFallbackAttempts` so a pathological
//! fallback chain cannot recurse forever.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::core::providers::unified_provider::ProviderError;

/// Fallback type enumeration
///
/// Defines different types of fallback scenarios that can trigger alternative model selection.
/// Each type corresponds to a specific error condition and has its own fallback mapping.
///
/// ## Fallback Priority
///
/// When determining fallback models, the router checks in this order:
/// 1. Specific fallback type (ContextWindow, ContentPolicy, RateLimit)
/// 2. General fallback (if no specific type matches)
/// 3. Empty list (no fallback available)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackType {
    /// General fallback for any error
    General,
    /// Context window exceeded - model cannot handle the input size
    ContextWindow,
    /// Content policy violation - content was filtered/rejected
    ContentPolicy,
    /// Rate limit exceeded - too many requests
    RateLimit,
}

impl ProviderError {
    /// Classify this error into the fallback-type taxonomy the Fallback Controller
    /// consumes to pick which fallback list applies. Errors that are not retryable
    /// by any fallback (auth, invalid request, not-found) classify as `None`.
    pub fn classify(&self) -> Option<FallbackType> {
        match self {
            ProviderError::RateLimit { .. } | ProviderError::QuotaExceeded { .. } => {
                Some(FallbackType::RateLimit)
            }
            ProviderError::ContextLengthExceeded { .. } | ProviderError::TokenLimitExceeded { .. } => {
                Some(FallbackType::ContextWindow)
            }
            ProviderError::ContentFiltered { .. } => Some(FallbackType::ContentPolicy),
            ProviderError::Network { .. }
            | ProviderError::Timeout { .. }
            | ProviderError::ProviderUnavailable { .. }
            | ProviderError::ApiError { .. }
            | ProviderError::Streaming { .. } => Some(FallbackType::General),
            ProviderError::Authentication { .. }
            | ProviderError::InvalidRequest { .. }
            | ProviderError::ModelNotFound { .. }
            | ProviderError::NotSupported { .. }
            | ProviderError::NotImplemented { .. }
            | ProviderError::Configuration { .. } => None,
            _ => Some(FallbackType::General),
        }
    }
}

/// Outcome of a pipeline run that may have gone through one or more fallbacks.
#[derive(Debug, Clone)]
pub struct ExecutionResult<T> {
    /// The successful result value
    pub result: T,
    /// Total number of attempts across all retries and fallbacks
    pub attempts: u32,
    /// The actual model that was used (may differ from requested if fallback occurred)
    pub model_used: String,
    /// Whether a fallback model was used (true if not the original model)
    pub used_fallback: bool,
    /// Total execution latency in microseconds (including retries)
    pub latency_us: u64,
}

/// Fallback rule table: model_name -> fallback model_names, per error class.
///
/// ## Thread Safety
///
/// Uses `RwLock` to allow concurrent reads and exclusive writes.
#[derive(Debug, Default)]
pub struct FallbackConfig {
    general: RwLock<HashMap<String, Vec<String>>>,
    context_window: RwLock<HashMap<String, Vec<String>>>,
    content_policy: RwLock<HashMap<String, Vec<String>>>,
    rate_limit: RwLock<HashMap<String, Vec<String>>>,
}

impl FallbackConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fallback list for `model` under `fallback_type`.
    ///
    /// Rejects lists that are not distinct from the primary model or from each other,
    /// per the Fallback Rule invariant.
    pub fn set(
        &self,
        model: &str,
        fallback_type: FallbackType,
        fallbacks: Vec<String>,
    ) -> Result<(), String> {
        if fallbacks.iter().any(|f| f == model) {
            return Err(format!("fallback list for {model} includes the primary model"));
        }
        let mut seen = std::collections::HashSet::new();
        for f in &fallbacks {
            if !seen.insert(f) {
                return Err(format!("fallback list for {model} contains duplicate {f}"));
            }
        }

        let lock = self.lock_for(fallback_type);
        lock.write().unwrap().insert(model.to_string(), fallbacks);
        Ok(())
    }

    /// Builder-style variant of [`Self::set`] that panics on an invalid rule; only
    /// intended for constructing known-good configuration at startup.
    pub fn with(self, model: &str, fallback_type: FallbackType, fallbacks: Vec<String>) -> Self {
        self.set(model, fallback_type, fallbacks)
            .expect("invalid fallback rule");
        self
    }

    fn lock_for(&self, fallback_type: FallbackType) -> &RwLock<HashMap<String, Vec<String>>> {
        match fallback_type {
            FallbackType::General => &self.general,
            FallbackType::ContextWindow => &self.context_window,
            FallbackType::ContentPolicy => &self.content_policy,
            FallbackType::RateLimit => &self.rate_limit,
        }
    }

    /// Get fallback models for a specific type, falling back to the general list
    /// when no type-specific list is configured for `model_name`.
    pub fn get_fallbacks_for_type(&self, model_name: &str, fallback_type: FallbackType) -> Vec<String> {
        let specific = self
            .lock_for(fallback_type)
            .read()
            .unwrap()
            .get(model_name)
            .cloned();

        match specific {
            Some(list) if !list.is_empty() => list,
            _ if fallback_type != FallbackType::General => {
                self.general.read().unwrap().get(model_name).cloned().unwrap_or_default()
            }
            _ => Vec::new(),
        }
    }
}

/// Fallback Controller: given a failed model and its classified error, decides the
/// next model to try, bounded by `max_attempts`.
#[derive(Debug)]
pub struct FallbackController {
    rules: FallbackConfig,
    max_attempts: u32,
}

impl FallbackController {
    pub fn new(rules: FallbackConfig, max_attempts: u32) -> Self {
        Self { rules, max_attempts }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Candidate models to try next for `failed_model`, in order, given `error`.
    /// Returns an empty list if the error is not fallback-eligible or no rule matches.
    pub fn candidates(&self, failed_model: &str, error: &ProviderError) -> Vec<String> {
        match error.classify() {
            Some(fallback_type) => self.rules.get_fallbacks_for_type(failed_model, fallback_type),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_self_referential_fallback() {
        let cfg = FallbackConfig::new();
        let err = cfg.set("gpt-4", FallbackType::General, vec!["gpt-4".to_string()]);
        assert!(err.is_err());
    }

    #[test]
    fn rejects_duplicate_fallback_entries() {
        let cfg = FallbackConfig::new();
        let err = cfg.set(
            "gpt-4",
            FallbackType::General,
            vec!["gpt-3.5".to_string(), "gpt-3.5".to_string()],
        );
        assert!(err.is_err());
    }

    #[test]
    fn falls_back_to_general_when_no_specific_rule() {
        let cfg = FallbackConfig::new().with("gpt-4", FallbackType::General, vec!["gpt-3.5".to_string()]);
        let fallbacks = cfg.get_fallbacks_for_type("gpt-4", FallbackType::RateLimit);
        assert_eq!(fallbacks, vec!["gpt-3.5".to_string()]);
    }

    #[test]
    fn specific_rule_overrides_general() {
        let cfg = FallbackConfig::new()
            .with("gpt-4", FallbackType::General, vec!["gpt-3.5".to_string()])
            .with("gpt-4", FallbackType::RateLimit, vec!["claude-3-haiku".to_string()]);
        let fallbacks = cfg.get_fallbacks_for_type("gpt-4", FallbackType::RateLimit);
        assert_eq!(fallbacks, vec!["claude-3-haiku".to_string()]);
    }

    #[test]
    fn auth_errors_are_not_fallback_eligible() {
        let err = ProviderError::authentication("openai", "bad key");
        assert_eq!(err.classify(), None);
    }

    #[test]
    fn rate_limit_classifies_as_rate_limit() {
        let err = ProviderError::rate_limit("openai", Some(30));
        assert_eq!(err.classify(), Some(FallbackType::RateLimit));
    }
}
