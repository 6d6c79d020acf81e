//! BookSessionHandler - Command handler for booking a therapist's slot.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, Role, SessionId, UserId};
use crate::domain::session::{NewSession, Session, SessionBooked, SessionError, SessionType, Slot};
use crate::ports::{
    AuthorizePaymentRequest, EventPublisher, PaymentAuthorization, PaymentGateway,
    RefundPaymentRequest, SessionRepository, TherapistDirectory,
};

use super::publish::publish_committed;

/// Command to book a session.
#[derive(Debug, Clone)]
pub struct BookSessionCommand {
    pub therapist_id: UserId,
    pub date: String,
    pub time: String,
    pub session_type: SessionType,
}

/// Result of a successful booking.
#[derive(Debug, Clone)]
pub struct BookSessionResult {
    pub session: Session,
    pub event: SessionBooked,
}

/// Handler for booking sessions.
///
/// Payment is authorized before anything is written; the insert itself is
/// the final arbiter of slot exclusivity.
pub struct BookSessionHandler {
    repository: Arc<dyn SessionRepository>,
    directory: Arc<dyn TherapistDirectory>,
    payments: Arc<dyn PaymentGateway>,
    event_publisher: Arc<dyn EventPublisher>,
    currency: String,
}

impl BookSessionHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        directory: Arc<dyn TherapistDirectory>,
        payments: Arc<dyn PaymentGateway>,
        event_publisher: Arc<dyn EventPublisher>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            directory,
            payments,
            event_publisher,
            currency: currency.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: BookSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<BookSessionResult, SessionError> {
        let actor = &metadata.actor;
        if actor.role != Role::Client {
            return Err(SessionError::not_authorized("only clients may book sessions"));
        }

        // 1. Therapist must exist and offer the requested mode
        let therapist = self
            .directory
            .get_therapist(&cmd.therapist_id)
            .await?
            .ok_or_else(|| SessionError::TherapistNotFound(cmd.therapist_id.clone()))?;

        if !therapist.offers(cmd.session_type) {
            return Err(SessionError::InvalidSessionType(cmd.session_type));
        }

        // 2. Slot must be well-formed and, if declared, offered
        let slot = Slot::parse(&cmd.date, &cmd.time)?;
        if !therapist.offers_slot(&slot) {
            return Err(SessionError::SlotNotOffered(slot));
        }

        // 3. Fail fast before charging anyone
        if self
            .repository
            .find_active_in_slot(&therapist.id, &slot)
            .await?
            .is_some()
        {
            return Err(SessionError::slot_conflict(slot));
        }

        // 4. Authorize payment at the therapist's current rate
        let authorization = self
            .payments
            .authorize(AuthorizePaymentRequest {
                amount: therapist.price,
                currency: self.currency.clone(),
                payer_id: actor.user_id.clone(),
                payee_id: therapist.id.clone(),
                description: format!("Session with {} on {}", therapist.name, slot),
            })
            .await
            .map_err(|err| {
                tracing::info!(code = %err.code, actor_id = %actor.user_id, "payment not authorized");
                SessionError::payment_failed(err.message)
            })?;

        // 5. Insert; a concurrent booking of the same slot loses here
        let session = Session::book(
            SessionId::new(),
            NewSession {
                client_id: actor.user_id.clone(),
                therapist_id: therapist.id.clone(),
                therapist_name: therapist.name.clone(),
                slot,
                session_type: cmd.session_type,
                price: therapist.price,
                payment_transaction_id: Some(authorization.transaction_id.clone()),
            },
        );

        if let Err(err) = self.repository.insert(&session).await {
            tracing::warn!(
                transaction_id = %authorization.transaction_id,
                therapist_id = %therapist.id,
                slot = %slot,
                error = %err,
                "booking rejected after payment authorization"
            );
            self.release(&authorization).await;
            return Err(err.into());
        }

        tracing::info!(
            session_id = %session.id(),
            therapist_id = %therapist.id,
            actor_id = %actor.user_id,
            slot = %slot,
            "session booked"
        );

        // 6. Publish
        let event = SessionBooked::from_session(&session);
        publish_committed(self.event_publisher.as_ref(), &event, &metadata).await;

        Ok(BookSessionResult { session, event })
    }

    /// Gives back an authorization whose booking was never stored. A failed
    /// refund does not change the booking outcome.
    async fn release(&self, authorization: &PaymentAuthorization) {
        let request = RefundPaymentRequest {
            transaction_id: authorization.transaction_id.clone(),
            amount: authorization.amount,
            reason: "booking not stored".to_string(),
        };
        if let Err(err) = self.payments.refund(request).await {
            tracing::warn!(
                transaction_id = %authorization.transaction_id,
                code = %err.code,
                error = %err.message,
                "authorization left open after rejected booking"
            );
        }
    }
}
