//! Authentication system.
//!
//! Validates inbound requests against the `X-API-Key` header or a bearer
//! JWT, per spec §6's HTTP surface note ("auth via `X-API-Key` header or
//! bearer token"). Credentials are looked up through the storage layer so
//! the same in-memory repository backs both API keys and JWT claims
//! rather than introducing a second store.

mod api_key;
mod jwt;

pub use api_key::ApiKeyValidator;
pub use jwt::JwtValidator;

use crate::config::models::auth::AuthConfig;
use crate::storage::StorageLayer;
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;
use tracing::info;

/// An authenticated caller, resolved from either an API key or a JWT.
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity {
    /// Opaque user/account id.
    pub subject: String,
    /// Roles granted to this identity, used by [`AuthSystem::check_permission`].
    pub roles: Vec<String>,
}

/// Which credential scheme a request carried, as sniffed straight from its
/// headers by the HTTP middleware before the full [`AuthSystem::authenticate`]
/// lookup runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// `Authorization: Bearer <token>` or a `gw-`-prefixed API key value.
    Jwt(String),
    /// `X-API-Key` header, or `Authorization: ApiKey <key>`.
    ApiKey(String),
    /// `session=<id>` cookie.
    Session(String),
    /// No recognizable credentials present.
    None,
}

/// Owns the credential validators and exposes the single entry point
/// (`authenticate`) the HTTP layer calls for every request.
#[derive(Debug, Clone)]
pub struct AuthSystem {
    config: Arc<AuthConfig>,
    storage: Arc<StorageLayer>,
    api_keys: Arc<ApiKeyValidator>,
    jwt: Arc<JwtValidator>,
}

impl AuthSystem {
    /// Build the auth system from config. Storage is kept around so API
    /// keys issued at runtime (not just ones loaded at startup) can be
    /// looked up without a second initialization path.
    pub async fn new(config: &AuthConfig, storage: Arc<StorageLayer>) -> Result<Self> {
        info!(
            jwt = config.enable_jwt,
            api_key = config.enable_api_key,
            "Initializing authentication system"
        );

        config
            .validate()
            .map_err(|e| GatewayError::Config(format!("invalid auth config: {e}")))?;

        Ok(Self {
            config: Arc::new(config.clone()),
            storage,
            api_keys: Arc::new(ApiKeyValidator::new()),
            jwt: Arc::new(JwtValidator::new(config.jwt_secret.clone(), config.jwt_expiration)),
        })
    }

    /// Name of the header API keys are expected in (e.g. `X-API-Key`).
    pub fn api_key_header(&self) -> &str {
        &self.config.api_key_header
    }

    /// Register a new API key for `subject`, returning the opaque key value.
    pub async fn issue_api_key(&self, subject: &str, roles: Vec<String>) -> Result<String> {
        self.api_keys.issue(&self.storage, subject, roles).await
    }

    /// Mint a bearer JWT for `subject`.
    pub fn issue_jwt(&self, subject: &str, roles: Vec<String>) -> Result<String> {
        self.jwt.issue(subject, roles)
    }

    /// Authenticate a request given its `X-API-Key` header value and/or its
    /// `Authorization` header value. Tries the API key first, then the
    /// bearer token, matching spec §6's "API-key header or bearer token".
    pub async fn authenticate(
        &self,
        api_key_header: Option<&str>,
        authorization_header: Option<&str>,
    ) -> Result<AuthenticatedIdentity> {
        if self.config.enable_api_key {
            if let Some(key) = api_key_header {
                return self.api_keys.validate(&self.storage, key).await;
            }
        }

        if self.config.enable_jwt {
            if let Some(header) = authorization_header {
                if let Some(token) = header.strip_prefix("Bearer ") {
                    return self.jwt.validate(token);
                }
            }
        }

        Err(GatewayError::Auth(
            "missing or unsupported credentials".to_string(),
        ))
    }

    /// RBAC check: `identity` must carry `required_role`, or RBAC must be
    /// disabled (spec leaves authorization policy unspecified; the teacher's
    /// `RbacConfig.enabled` flag is honored when present).
    pub fn check_permission(&self, identity: &AuthenticatedIdentity, required_role: &str) -> bool {
        if !self.config.rbac.enabled {
            return true;
        }
        identity.roles.iter().any(|r| r == required_role)
            || identity
                .roles
                .iter()
                .any(|r| self.config.rbac.admin_roles.contains(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::models::storage::{DatabaseConfig, RedisConfig};
    use crate::config::StorageConfig;

    async fn test_storage() -> Arc<StorageLayer> {
        Arc::new(
            StorageLayer::new(&StorageConfig {
                database: DatabaseConfig::default(),
                redis: RedisConfig::default(),
            })
            .await
            .unwrap(),
        )
    }

    fn test_auth_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "a-sufficiently-long-Mixed-Case-1234!-secret".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn issues_and_validates_api_key() {
        let storage = test_storage().await;
        let auth = AuthSystem::new(&test_auth_config(), storage).await.unwrap();

        let key = auth.issue_api_key("user-1", vec!["member".to_string()]).await.unwrap();
        let identity = auth.authenticate(Some(&key), None).await.unwrap();
        assert_eq!(identity.subject, "user-1");
    }

    #[tokio::test]
    async fn rejects_unknown_api_key() {
        let storage = test_storage().await;
        let auth = AuthSystem::new(&test_auth_config(), storage).await.unwrap();

        assert!(auth.authenticate(Some("not-a-real-key"), None).await.is_err());
    }

    #[tokio::test]
    async fn issues_and_validates_jwt() {
        let storage = test_storage().await;
        let auth = AuthSystem::new(&test_auth_config(), storage).await.unwrap();

        let token = auth.issue_jwt("user-2", vec!["admin".to_string()]).unwrap();
        let identity = auth
            .authenticate(None, Some(&format!("Bearer {token}")))
            .await
            .unwrap();
        assert_eq!(identity.subject, "user-2");
    }

    #[tokio::test]
    async fn rejects_missing_credentials() {
        let storage = test_storage().await;
        let auth = AuthSystem::new(&test_auth_config(), storage).await.unwrap();
        assert!(auth.authenticate(None, None).await.is_err());
    }
}
