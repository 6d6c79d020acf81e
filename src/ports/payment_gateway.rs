//! Payment gateway port.
//!
//! Booking authorizes the session price before a session row exists; the
//! lifecycle core only proceeds on success. An authorization whose booking
//! is then rejected is refunded.

use crate::domain::foundation::UserId;
use crate::domain::session::Price;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Authorize `request.amount` from the payer to the payee.
    async fn authorize(
        &self,
        request: AuthorizePaymentRequest,
    ) -> Result<PaymentAuthorization, PaymentError>;

    /// Return `request.amount` of an earlier authorization to the payer.
    async fn refund(&self, request: RefundPaymentRequest) -> Result<PaymentRefund, PaymentError>;
}

/// Request to authorize a session payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizePaymentRequest {
    pub amount: Price,
    pub currency: String,
    pub payer_id: UserId,
    pub payee_id: UserId,
    /// Human-readable line item, e.g. "Session with Dr. Rivera on 2025-01-15 at 10:00".
    pub description: String,
}

/// Successful authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAuthorization {
    pub transaction_id: String,
    pub amount: Price,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundPaymentRequest {
    pub transaction_id: String,
    pub amount: Price,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRefund {
    pub refund_id: String,
    pub transaction_id: String,
    pub amount: Price,
}

/// Payment error with code and message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentError {
    pub code: PaymentErrorCode,
    pub message: String,
}

impl PaymentError {
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn card_declined(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::CardDeclined, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    pub fn unknown_transaction(transaction_id: &str) -> Self {
        Self::new(
            PaymentErrorCode::UnknownTransaction,
            format!("no authorization {}", transaction_id),
        )
    }

    pub fn invalid_amount(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidAmount, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    NetworkError,
    CardDeclined,
    /// Refund larger than what is left of the authorization.
    InvalidAmount,
    UnknownTransaction,
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::CardDeclined => "card_declined",
            PaymentErrorCode::InvalidAmount => "invalid_amount",
            PaymentErrorCode::UnknownTransaction => "unknown_transaction",
        };
        write!(f, "{}", s)
    }
}
