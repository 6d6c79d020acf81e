//! Event infrastructure for lifecycle events.
//!
//! Event types follow `<aggregate>.<what>.v<version>`, for example
//! `session.booked.v1`. The aggregate kind and the schema version are read
//! back from that string, so events only declare it once.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use super::{CommandMetadata, Role, Timestamp};

/// Implemented by every event an aggregate emits.
pub trait DomainEvent: Send + Sync {
    /// Routing key, e.g. "session.booked.v1".
    fn event_type(&self) -> &'static str;

    /// ID of the aggregate that emitted this event.
    fn aggregate_id(&self) -> String;

    fn occurred_at(&self) -> Timestamp;

    fn event_id(&self) -> EventId;

    fn version(&self) -> u32 {
        version_of(self.event_type())
    }

    fn aggregate_kind(&self) -> &'static str {
        kind_of(self.event_type())
    }
}

/// Implements [`DomainEvent`] for a struct with an `event_id: EventId` field.
///
/// ```ignore
/// domain_event!(SessionBooked, "session.booked.v1", id = session_id, at = booked_at);
/// ```
#[macro_export]
macro_rules! domain_event {
    ($event_name:ident, $event_type:expr, id = $agg_id_field:ident, at = $occurred_field:ident) => {
        impl $crate::domain::foundation::DomainEvent for $event_name {
            fn event_type(&self) -> &'static str {
                $event_type
            }

            fn aggregate_id(&self) -> String {
                self.$agg_id_field.to_string()
            }

            fn occurred_at(&self) -> $crate::domain::foundation::Timestamp {
                self.$occurred_field
            }

            fn event_id(&self) -> $crate::domain::foundation::EventId {
                self.event_id.clone()
            }
        }
    };
}

pub use domain_event;

/// "x.y.v2" is 2; a missing or malformed suffix counts as 1.
fn version_of(event_type: &str) -> u32 {
    event_type
        .rsplit_once(".v")
        .and_then(|(_, v)| v.parse::<u32>().ok())
        .unwrap_or(1)
}

fn kind_of(event_type: &str) -> &str {
    event_type.split('.').next().unwrap_or(event_type)
}

/// Unique identifier for an event, stable across redelivery.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who caused an event, and from which request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_role: Option<Role>,

    /// Entry point of the originating command ("http", "test").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl From<&CommandMetadata> for EventMetadata {
    fn from(command: &CommandMetadata) -> Self {
        Self {
            correlation_id: Some(command.correlation_id()),
            actor_id: Some(command.actor.user_id.to_string()),
            actor_role: Some(command.actor.role),
            source: command.source().map(str::to_string),
        }
    }
}

/// What travels on the bus: routing fields plus the event as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_id: EventId,
    pub event_type: String,
    pub version: u32,
    pub aggregate_id: String,
    pub aggregate_kind: String,
    pub occurred_at: Timestamp,
    pub payload: JsonValue,
    pub metadata: EventMetadata,
}

impl EventEnvelope {
    /// Builds an envelope around a raw payload, stamped now.
    pub fn new(
        event_type: impl Into<String>,
        aggregate_id: impl Into<String>,
        payload: JsonValue,
    ) -> Self {
        let event_type = event_type.into();
        Self {
            event_id: EventId::new(),
            version: version_of(&event_type),
            aggregate_kind: kind_of(&event_type).to_string(),
            event_type,
            aggregate_id: aggregate_id.into(),
            occurred_at: Timestamp::now(),
            payload,
            metadata: EventMetadata::default(),
        }
    }

    pub fn from_event<T>(event: &T) -> Result<Self, serde_json::Error>
    where
        T: DomainEvent + Serialize,
    {
        Ok(Self {
            event_id: event.event_id(),
            event_type: event.event_type().to_string(),
            version: event.version(),
            aggregate_id: event.aggregate_id(),
            aggregate_kind: event.aggregate_kind().to_string(),
            occurred_at: event.occurred_at(),
            payload: serde_json::to_value(event)?,
            metadata: EventMetadata::default(),
        })
    }

    pub fn with_metadata(mut self, metadata: EventMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn payload_as<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }
}

#[cfg(test)]
impl EventEnvelope {
    pub fn test_fixture() -> Self {
        Self::new(
            "test.event.v1",
            "test-aggregate-123",
            serde_json::json!({"test": "data"}),
        )
    }
}
