use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::fs;

use super::{CallerPrivileges, PrivilegeResolver, ServiceError};
use crate::config::JwtConfig;

/// Verifies RS256 access tokens issued by the authentication server.
#[derive(Clone)]
pub struct JwtService {
    decoding_key: DecodingKey,
    validation: Validation,
}

/// Claims carried by access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject (login)
    pub sub: String,
    /// Granted authorities, e.g. `ROLE_ADMIN`
    #[serde(default)]
    pub authorities: Vec<String>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl JwtService {
    /// Load the verification key from `config.public_key_path`.
    pub fn new(config: &JwtConfig) -> Result<Self, anyhow::Error> {
        let public_key_pem = fs::read_to_string(&config.public_key_path).map_err(|e| {
            anyhow::anyhow!(
                "Failed to read public key from {}: {}",
                config.public_key_path,
                e
            )
        })?;

        let service = Self::from_public_key_pem(&public_key_pem)?;
        tracing::info!("JWT verification initialized with RS256 public key");
        Ok(service)
    }

    pub fn from_public_key_pem(pem: &str) -> Result<Self, anyhow::Error> {
        let decoding_key = DecodingKey::from_rsa_pem(pem.as_bytes())
            .map_err(|e| anyhow::anyhow!("Failed to parse public key: {}", e))?;

        Ok(Self {
            decoding_key,
            validation: Validation::new(Algorithm::RS256),
        })
    }

    pub fn validate_access_token(&self, token: &str) -> Result<AccessTokenClaims, ServiceError> {
        decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Access token rejected");
                ServiceError::InvalidToken
            })
    }
}

#[async_trait]
impl PrivilegeResolver for JwtService {
    async fn resolve(&self, bearer_token: &str) -> Result<CallerPrivileges, ServiceError> {
        let claims = self.validate_access_token(bearer_token)?;
        Ok(CallerPrivileges::new(claims.sub, claims.authorities))
    }
}
