//! HS256 JWT token validator.
//!
//! Tokens carry `sub` (user id), `role`, `exp` and `iss`, plus optional
//! `email` and `name`. The signing secret is shared with whichever service
//! issues the tokens.

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, Role, Timestamp, UserId};
use crate::ports::TokenValidator;

/// Claims this service reads from (and, for tooling, writes into) a token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub role: String,
    pub iss: String,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl TokenClaims {
    /// Claims for `user` valid for `ttl_hours` from now.
    pub fn for_user(user: &AuthenticatedUser, issuer: impl Into<String>, ttl_hours: i64) -> Self {
        let now = Timestamp::now();
        Self {
            sub: user.id.to_string(),
            role: user.role.to_string(),
            iss: issuer.into(),
            exp: now.add_hours(ttl_hours).as_unix_secs(),
            iat: Some(now.as_unix_secs()),
            email: user.email.clone(),
            name: user.display_name.clone(),
        }
    }
}

pub struct JwtTokenValidator {
    secret: SecretString,
    issuer: String,
    leeway_secs: u64,
}

impl JwtTokenValidator {
    pub fn new(secret: SecretString, issuer: impl Into<String>, leeway_secs: u64) -> Self {
        Self {
            secret,
            issuer: issuer.into(),
            leeway_secs,
        }
    }

    /// Signs claims with the validator's secret (dev tooling and tests).
    pub fn sign(&self, claims: &TokenClaims) -> Result<String, AuthError> {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .map_err(|e| {
            tracing::warn!(error = %e, "failed to sign token");
            AuthError::InvalidToken
        })
    }

    fn decode_claims(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.leeway = self.leeway_secs;
        validation.validate_exp = true;

        let key = DecodingKey::from_secret(self.secret.expose_secret().as_bytes());
        decode::<TokenClaims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("token expired");
                        AuthError::TokenExpired
                    }
                    _ => {
                        tracing::debug!(error = %e, "token validation failed");
                        AuthError::InvalidToken
                    }
                }
            })
    }
}

#[async_trait]
impl TokenValidator for JwtTokenValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.decode_claims(token)?;

        let user_id = UserId::new(&claims.sub).map_err(|_| {
            tracing::warn!("token has blank subject");
            AuthError::InvalidToken
        })?;
        let role: Role = claims
            .role
            .parse()
            .map_err(|_| AuthError::UnknownRole(claims.role.clone()))?;

        let mut user = AuthenticatedUser::new(user_id, role);
        if let Some(email) = claims.email {
            user = user.with_email(email);
        }
        if let Some(name) = claims.name {
            user = user.with_display_name(name);
        }
        Ok(user)
    }
}

impl std::fmt::Debug for JwtTokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenValidator")
            .field("issuer", &self.issuer)
            .field("leeway_secs", &self.leeway_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> JwtTokenValidator {
        JwtTokenValidator::new(SecretString::new("test-secret-value".to_string()), "therapy-booking", 0)
    }

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("user-42").unwrap(), role).with_email("u42@example.com")
    }

    #[tokio::test]
    async fn accepts_token_it_signed() {
        let v = validator();
        let token = v.sign(&TokenClaims::for_user(&user(Role::Therapist), "therapy-booking", 1)).unwrap();

        let validated = v.validate(&token).await.unwrap();
        assert_eq!(validated.id.as_str(), "user-42");
        assert_eq!(validated.role, Role::Therapist);
        assert_eq!(validated.email.as_deref(), Some("u42@example.com"));
    }

    #[tokio::test]
    async fn legacy_user_role_maps_to_client() {
        let v = validator();
        let mut claims = TokenClaims::for_user(&user(Role::Client), "therapy-booking", 1);
        claims.role = "user".to_string();
        let validated = v.validate(&v.sign(&claims).unwrap()).await.unwrap();
        assert_eq!(validated.role, Role::Client);
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let v = validator();
        let claims = TokenClaims::for_user(&user(Role::Client), "therapy-booking", -2);
        let err = v.validate(&v.sign(&claims).unwrap()).await.unwrap_err();
        assert_eq!(err, AuthError::TokenExpired);
    }

    #[tokio::test]
    async fn wrong_issuer_is_rejected() {
        let v = validator();
        let claims = TokenClaims::for_user(&user(Role::Client), "someone-else", 1);
        let err = v.validate(&v.sign(&claims).unwrap()).await.unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let other = JwtTokenValidator::new(SecretString::new("another-secret".to_string()), "therapy-booking", 0);
        let token = other
            .sign(&TokenClaims::for_user(&user(Role::Admin), "therapy-booking", 1))
            .unwrap();
        assert_eq!(validator().validate(&token).await.unwrap_err(), AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn unknown_role_is_reported() {
        let v = validator();
        let mut claims = TokenClaims::for_user(&user(Role::Client), "therapy-booking", 1);
        claims.role = "superuser".to_string();
        let err = v.validate(&v.sign(&claims).unwrap()).await.unwrap_err();
        assert_eq!(err, AuthError::UnknownRole("superuser".to_string()));
    }

    #[test]
    fn debug_hides_secret() {
        let rendered = format!("{:?}", validator());
        assert!(!rendered.contains("test-secret-value"));
    }
}
