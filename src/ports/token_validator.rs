//! Token validation port (identity provider).
//!
//! The booking core does not verify credentials itself. An implementation
//! turns a bearer token into an `AuthenticatedUser` carrying id and role.
//!
//! Implementations must:
//! - Validate the token signature
//! - Validate issuer and expiry claims
//! - Return `AuthError::InvalidToken` for malformed/bad signature tokens
//! - Return `AuthError::TokenExpired` for expired tokens
//! - Return `AuthError::ServiceUnavailable` for transient errors

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// Validate a raw token (without "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
