//! Stateless auth helpers shared outside the `auth` module proper — format
//! checks and hashing that don't need storage access.

use sha2::{Digest, Sha256};

/// Stateless authentication/security helpers.
pub struct AuthUtils;

impl AuthUtils {
    /// Hash a raw credential (API key, bearer token) for storage or
    /// comparison, matching the hashing scheme `auth::api_key` uses for
    /// persisted key lookups.
    pub fn hash_credential(raw: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(raw.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Extract the raw token from a `Bearer <token>` header value.
    pub fn strip_bearer_prefix(header_value: &str) -> Option<&str> {
        header_value.strip_prefix("Bearer ")
    }

    /// True if `header_value` looks like one of the gateway's own issued
    /// API keys (`sk-gw-...`), as opposed to an opaque vendor credential.
    pub fn looks_like_gateway_api_key(header_value: &str) -> bool {
        header_value.starts_with("sk-gw-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_deterministic() {
        assert_eq!(
            AuthUtils::hash_credential("secret"),
            AuthUtils::hash_credential("secret")
        );
        assert_ne!(
            AuthUtils::hash_credential("secret"),
            AuthUtils::hash_credential("other")
        );
    }

    #[test]
    fn strips_bearer_prefix() {
        assert_eq!(AuthUtils::strip_bearer_prefix("Bearer abc"), Some("abc"));
        assert_eq!(AuthUtils::strip_bearer_prefix("abc"), None);
    }

    #[test]
    fn recognizes_gateway_api_keys() {
        assert!(AuthUtils::looks_like_gateway_api_key("sk-gw-xyz"));
        assert!(!AuthUtils::looks_like_gateway_api_key("sk-openai-xyz"));
    }
}
