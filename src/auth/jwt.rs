//! Bearer-token validation via `jsonwebtoken`, mirroring the teacher's use
//! of the crate for signing (see `config/models/auth.rs`'s JWT secret
//! handling).

use super::AuthenticatedIdentity;
use crate::utils::error::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    roles: Vec<String>,
    exp: usize,
}

/// Signs and verifies HS256 bearer tokens.
#[derive(Debug)]
pub struct JwtValidator {
    secret: String,
    expiration_seconds: u64,
}

impl JwtValidator {
    pub fn new(secret: String, expiration_seconds: u64) -> Self {
        Self {
            secret,
            expiration_seconds,
        }
    }

    pub fn issue(&self, subject: &str, roles: Vec<String>) -> Result<String> {
        let exp = (chrono::Utc::now() + chrono::Duration::seconds(self.expiration_seconds as i64))
            .timestamp() as usize;
        let claims = Claims {
            sub: subject.to_string(),
            roles,
            exp,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;
        Ok(token)
    }

    pub fn validate(&self, token: &str) -> Result<AuthenticatedIdentity> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(AuthenticatedIdentity {
            subject: data.claims.sub,
            roles: data.claims.roles,
        })
    }
}
