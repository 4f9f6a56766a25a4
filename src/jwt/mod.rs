//! JWT token handling
//!
//! Token issuance belongs to the external auth collaborator; this module
//! holds the shared-secret claim model plus the verification path consumed
//! by the principal extractor. Issuance is kept alongside it so that the
//! collaborator contract (and the test suite) has a single source of truth.

use crate::config::JwtConfig;
use crate::domain::{Role, User};
use crate::error::{AppError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Access token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user id)
    pub sub: String,
    /// Email
    pub email: String,
    /// Roles granted to the user
    pub roles: Vec<Role>,
    /// Issuer
    pub iss: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// JWT token manager (HS256 over the shared secret)
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue an access token for the given user with the configured TTL
    pub fn issue_access_token(&self, user: &User) -> Result<String> {
        self.issue_access_token_with_ttl(user, self.config.access_token_ttl_secs)
    }

    /// Issue an access token with an explicit TTL in seconds
    pub fn issue_access_token_with_ttl(&self, user: &User, ttl_secs: i64) -> Result<String> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            roles: user.roles.clone(),
            iss: self.config.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to sign token: {e}")))
    }

    /// Verify an access token, returning its claims
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["exp", "iss"]);
        validation.leeway = 0;

        let data = decode::<AccessClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {e}")))?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-for-jwt-signing-must-be-long".to_string(),
            issuer: "https://storefront.test".to_string(),
            access_token_ttl_secs: 3600,
        }
    }

    fn test_user() -> User {
        User {
            id: 1,
            name: "Maria Brown".to_string(),
            email: "maria@gmail.com".to_string(),
            roles: vec![Role::Client],
        }
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let manager = JwtManager::new(test_config());
        let token = manager.issue_access_token(&test_user()).unwrap();
        let claims = manager.verify_access_token(&token).unwrap();

        assert_eq!(claims.sub, "1");
        assert_eq!(claims.email, "maria@gmail.com");
        assert_eq!(claims.roles, vec![Role::Client]);
        assert_eq!(claims.iss, "https://storefront.test");
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let manager = JwtManager::new(test_config());
        let token = manager
            .issue_access_token_with_ttl(&test_user(), -60)
            .unwrap();
        let err = manager.verify_access_token(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let manager = JwtManager::new(test_config());
        let token = manager.issue_access_token(&test_user()).unwrap();
        let tampered = format!("{token}xpto");
        assert!(manager.verify_access_token(&tampered).is_err());
    }

    #[test]
    fn test_foreign_issuer_is_rejected() {
        let manager = JwtManager::new(test_config());
        let mut other_config = test_config();
        other_config.issuer = "https://somewhere-else.test".to_string();
        let other = JwtManager::new(other_config);

        let token = other.issue_access_token(&test_user()).unwrap();
        assert!(manager.verify_access_token(&token).is_err());
    }
}
