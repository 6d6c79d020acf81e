//! Simulated payment gateway.
//!
//! Approves every authorization unless configured to decline, optionally
//! after a fixed latency. Every request is logged so tests can assert on
//! what was charged and what was given back.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::foundation::Timestamp;
use crate::domain::session::Price;
use crate::ports::{
    AuthorizePaymentRequest, PaymentAuthorization, PaymentError, PaymentGateway, PaymentRefund,
    RefundPaymentRequest,
};

#[derive(Default)]
struct GatewayState {
    decline_all: bool,
    /// Consumed by the next authorization.
    next_error: Option<PaymentError>,
    call_log: Vec<AuthorizePaymentRequest>,
    /// Refundable remainder per live authorization.
    outstanding: HashMap<String, Price>,
    refunds: Vec<PaymentRefund>,
}

#[derive(Clone, Default)]
pub struct MockPaymentGateway {
    inner: Arc<Mutex<GatewayState>>,
    latency: Duration,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway that declines every card.
    pub fn declining() -> Self {
        let gateway = Self::new();
        gateway.state().decline_all = true;
        gateway
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn set_error(&self, error: PaymentError) {
        self.state().next_error = Some(error);
    }

    pub fn calls(&self) -> Vec<AuthorizePaymentRequest> {
        self.state().call_log.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state().call_log.len()
    }

    pub fn refunds(&self) -> Vec<PaymentRefund> {
        self.state().refunds.clone()
    }

    /// Authorizations not yet fully refunded.
    pub fn outstanding_count(&self) -> usize {
        self.state().outstanding.len()
    }

    fn state(&self) -> MutexGuard<'_, GatewayState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn reference(prefix: &str) -> String {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        format!("{}_{}_{}", prefix, Timestamp::now().as_unix_secs(), &suffix[..9])
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn authorize(
        &self,
        request: AuthorizePaymentRequest,
    ) -> Result<PaymentAuthorization, PaymentError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let outcome = {
            let mut state = self.state();
            state.call_log.push(request.clone());
            match state.next_error.take() {
                Some(error) => Err(error),
                None if state.decline_all => Err(PaymentError::card_declined(
                    "Payment failed. Please try again.",
                )),
                None => Ok(()),
            }
        };

        if let Err(error) = outcome {
            tracing::info!(
                payer_id = %request.payer_id,
                amount = %request.amount,
                code = %error.code,
                "payment declined"
            );
            return Err(error);
        }

        let authorization = PaymentAuthorization {
            transaction_id: Self::reference("txn"),
            amount: request.amount,
            currency: request.currency,
        };
        self.state()
            .outstanding
            .insert(authorization.transaction_id.clone(), authorization.amount);
        tracing::debug!(
            transaction_id = %authorization.transaction_id,
            payer_id = %request.payer_id,
            payee_id = %request.payee_id,
            "payment authorized"
        );
        Ok(authorization)
    }

    async fn refund(&self, request: RefundPaymentRequest) -> Result<PaymentRefund, PaymentError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut state = self.state();
        let remaining = state
            .outstanding
            .get(&request.transaction_id)
            .copied()
            .ok_or_else(|| PaymentError::unknown_transaction(&request.transaction_id))?;
        let left = remaining.checked_sub(request.amount).ok_or_else(|| {
            PaymentError::invalid_amount(format!(
                "refund of {} exceeds remaining {}",
                request.amount, remaining
            ))
        })?;

        if left == Price::zero() {
            state.outstanding.remove(&request.transaction_id);
        } else {
            state.outstanding.insert(request.transaction_id.clone(), left);
        }

        let refund = PaymentRefund {
            refund_id: Self::reference("ref"),
            transaction_id: request.transaction_id,
            amount: request.amount,
        };
        state.refunds.push(refund.clone());
        tracing::debug!(
            refund_id = %refund.refund_id,
            transaction_id = %refund.transaction_id,
            reason = %request.reason,
            "payment refunded"
        );
        Ok(refund)
    }
}
