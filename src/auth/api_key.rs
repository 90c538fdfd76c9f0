//! API key issuance and validation, backed by the storage layer's
//! key-value facade (`hash_set`/`hash_get_all`), so keys survive for the
//! lifetime of the in-memory repository rather than the auth system alone.

use super::AuthenticatedIdentity;
use crate::storage::StorageLayer;
use crate::utils::error::{GatewayError, Result};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

const API_KEY_BUCKET: &str = "auth:api_keys";
const API_KEY_PREFIX: &str = "sk-gw-";

fn hash_key(raw_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw_key.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Validates `X-API-Key` credentials against stored key hashes.
#[derive(Debug, Default)]
pub struct ApiKeyValidator;

impl ApiKeyValidator {
    pub fn new() -> Self {
        Self
    }

    pub async fn issue(
        &self,
        storage: &StorageLayer,
        subject: &str,
        roles: Vec<String>,
    ) -> Result<String> {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        let raw_key = format!("{API_KEY_PREFIX}{suffix}");

        let record = serde_json::json!({ "subject": subject, "roles": roles });
        storage
            .hash_set(API_KEY_BUCKET, &hash_key(&raw_key), &record.to_string())
            .await?;

        Ok(raw_key)
    }

    pub async fn validate(
        &self,
        storage: &StorageLayer,
        raw_key: &str,
    ) -> Result<AuthenticatedIdentity> {
        let record = storage
            .hash_get(API_KEY_BUCKET, &hash_key(raw_key))
            .await?
            .ok_or_else(|| GatewayError::Auth("unknown API key".to_string()))?;

        let value: serde_json::Value = serde_json::from_str(&record)?;
        let subject = value["subject"]
            .as_str()
            .ok_or_else(|| GatewayError::Auth("corrupt API key record".to_string()))?
            .to_string();
        let roles = value["roles"]
            .as_array()
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Ok(AuthenticatedIdentity { subject, roles })
    }
}
