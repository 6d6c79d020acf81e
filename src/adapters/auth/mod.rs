//! Token validator adapters.
//!
//! - `JwtTokenValidator` - HS256 tokens signed with a shared secret
//! - `MockTokenValidator` - fixed token table for tests and local runs

mod jwt;
mod mock;

pub use jwt::{JwtTokenValidator, TokenClaims};
pub use mock::MockTokenValidator;
