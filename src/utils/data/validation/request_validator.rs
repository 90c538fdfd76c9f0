//! Chat completion request validation

use crate::core::models::openai::ChatMessage;
use crate::utils::error::{GatewayError, Result};

/// Request validation utilities
pub struct RequestValidator;

impl RequestValidator {
    /// Validate a chat completion request's model id, message list, and the
    /// caller-supplied sampling parameters.
    pub fn validate_chat_completion_request(
        model: &str,
        messages: &[ChatMessage],
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<()> {
        Self::validate_model_name(model)?;
        Self::validate_messages(messages)?;

        if let Some(max_tokens) = max_tokens {
            if max_tokens == 0 {
                return Err(GatewayError::Validation(
                    "max_tokens must be greater than 0".to_string(),
                ));
            }
        }

        if let Some(temperature) = temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(GatewayError::Validation(
                    "temperature must be between 0.0 and 2.0".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Model ids are non-empty and restricted to the characters vendors
    /// actually use (`gpt-4`, `claude-3.5-sonnet`, `text-embedding-3-small`).
    fn validate_model_name(model: &str) -> Result<()> {
        if model.trim().is_empty() {
            return Err(GatewayError::Validation(
                "model name cannot be empty".to_string(),
            ));
        }

        let is_valid = model
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/'));

        if !is_valid {
            return Err(GatewayError::Validation(format!(
                "invalid model name '{model}'"
            )));
        }

        Ok(())
    }

    fn validate_messages(messages: &[ChatMessage]) -> Result<()> {
        if messages.is_empty() {
            return Err(GatewayError::Validation(
                "messages cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_messages() {
        assert!(RequestValidator::validate_chat_completion_request("gpt-4", &[], None, None).is_err());
    }

    #[test]
    fn rejects_out_of_range_temperature() {
        let message = ChatMessage::default();
        assert!(RequestValidator::validate_chat_completion_request(
            "gpt-4",
            &[message],
            None,
            Some(3.0)
        )
        .is_err());
    }
}
