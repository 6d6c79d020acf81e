//! Post-commit event publication shared by the lifecycle handlers.

use serde::Serialize;

use crate::domain::foundation::{CommandMetadata, DomainEvent, EventEnvelope, EventMetadata};
use crate::ports::EventPublisher;

/// Publishes `event` after its state change has been committed.
///
/// Failures are logged and swallowed: the transition already happened.
pub(super) async fn publish_committed<E>(
    publisher: &dyn EventPublisher,
    event: &E,
    metadata: &CommandMetadata,
) where
    E: DomainEvent + Serialize,
{
    let envelope = match EventEnvelope::from_event(event) {
        Ok(envelope) => envelope.with_metadata(EventMetadata::from(metadata)),
        Err(err) => {
            tracing::warn!(
                event_type = event.event_type(),
                aggregate_id = %event.aggregate_id(),
                error = %err,
                "failed to serialize committed event"
            );
            return;
        }
    };

    if let Err(err) = publisher.publish(envelope).await {
        tracing::warn!(
            event_type = event.event_type(),
            aggregate_id = %event.aggregate_id(),
            error = %err,
            "failed to publish committed event"
        );
    }
}
