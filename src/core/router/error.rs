//! Router-local error type.

use thiserror::Error;

/// Errors the Model Router itself can raise (distinct from provider errors,
/// which flow through [`crate::core::providers::unified_provider::ProviderError`]).
#[derive(Debug, Error, Clone)]
pub enum RouterError {
    /// The capability filter emptied the candidate set (spec: `NoEligibleModel`, 422).
    #[error("no eligible model for requested model '{requested_model_id}'")]
    NoEligibleModel {
        /// The model id the caller asked for.
        requested_model_id: String,
    },
    /// The requested model id (or its alias target) is not registered.
    #[error("unknown model id '{0}'")]
    UnknownModel(String),
}
