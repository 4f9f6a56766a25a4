//! Authenticated-principal extraction
//!
//! Provides the `AuthUser` extractor for handlers requiring an authenticated
//! caller. The JWT is validated against the shared secret; the resolved
//! identity (id, email, roles) is everything the policy layer needs.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::domain::Role;
use crate::jwt::AccessClaims;
use crate::server::AppState;

/// Authenticated principal resolved from the Bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// User id from the token's `sub` claim
    pub id: i64,
    /// User's email address
    pub email: String,
    /// Roles granted to the user
    pub roles: Vec<Role>,
}

impl AuthUser {
    /// Build the principal from verified token claims
    pub fn from_claims(claims: AccessClaims) -> Result<Self, AuthError> {
        let id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| AuthError::InvalidToken("Invalid user id in token".to_string()))?;

        Ok(Self {
            id,
            email: claims.email,
            roles: claims.roles,
        })
    }

    /// Check if the principal holds a specific role
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Authentication errors
#[derive(Debug, Clone)]
pub enum AuthError {
    /// No Authorization header present
    MissingToken,
    /// Invalid Authorization header format
    InvalidHeader(String),
    /// Token validation failed
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingToken => "Missing authorization token",
            AuthError::InvalidHeader(_) => "Invalid authorization header",
            AuthError::InvalidToken(_) => "Invalid token",
        };

        let body = serde_json::json!({
            "error": "unauthorized",
            "message": message,
        });

        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

/// Extract and validate the Bearer token from the Authorization header
fn extract_bearer_token(headers: &axum::http::HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidHeader("Invalid header encoding".to_string()))?;

    auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AuthError::InvalidHeader("Authorization header must use Bearer scheme".to_string())
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;

        let claims = state
            .jwt_manager
            .verify_access_token(token)
            .map_err(|_| AuthError::InvalidToken("Token validation failed".to_string()))?;

        AuthUser::from_claims(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;

    #[test]
    fn test_missing_header_is_rejected() {
        let headers = HeaderMap::new();
        assert!(matches!(
            extract_bearer_token(&headers),
            Err(AuthError::MissingToken)
        ));
    }

    #[test]
    fn test_non_bearer_scheme_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());
        assert!(matches!(
            extract_bearer_token(&headers),
            Err(AuthError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_bearer_token_is_extracted() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_from_claims_rejects_non_numeric_subject() {
        let claims = AccessClaims {
            sub: "not-a-number".to_string(),
            email: "maria@gmail.com".to_string(),
            roles: vec![Role::Client],
            iss: "https://storefront.test".to_string(),
            iat: 0,
            exp: 0,
        };
        assert!(matches!(
            AuthUser::from_claims(claims),
            Err(AuthError::InvalidToken(_))
        ));
    }
}
