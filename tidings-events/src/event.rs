//! Event definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt::Debug;
use uuid::Uuid;

/// Event trait
///
/// The object-safe view of an event that the dispatcher works with. The
/// dispatch key is [`Event::event_name`], which is fixed per event kind and
/// never derived from payload contents.
pub trait Event: Send + Sync + Debug + 'static {
    /// Get the event kind name (dispatch key)
    fn event_name(&self) -> &'static str;

    /// Get event ID
    fn event_id(&self) -> Uuid;

    /// Get the moment the event was created
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Cast to Any for downcasting
    fn as_any(&self) -> &dyn Any;
}

/// Payload of one event kind.
///
/// Every event kind declares its dispatch key as a constant, so subscribers
/// and producers agree on it at compile time.
pub trait EventPayload: Debug + Clone + Serialize + Send + Sync + 'static {
    /// Stable, unique name of this event kind
    const NAME: &'static str;
}

/// Base event metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    id: Uuid,
    occurred_at: DateTime<Utc>,
}

impl EventMetadata {
    /// Stamp new metadata with a fresh ID and the current time
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            occurred_at: Utc::now(),
        }
    }

    /// Unique event ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Timestamp when the event was created
    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// Domain event: occurrence metadata plus a kind-specific payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent<P> {
    #[serde(flatten)]
    metadata: EventMetadata,
    payload: P,
}

impl<P: EventPayload> DomainEvent<P> {
    /// Create a new event, stamping its occurrence time now
    pub fn new(payload: P) -> Self {
        Self {
            metadata: EventMetadata::new(),
            payload,
        }
    }

    /// Event metadata
    pub fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }

    /// Event payload
    pub fn payload(&self) -> &P {
        &self.payload
    }
}

impl<P: EventPayload> Event for DomainEvent<P> {
    fn event_name(&self) -> &'static str {
        P::NAME
    }

    fn event_id(&self) -> Uuid {
        self.metadata.id
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.metadata.occurred_at
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Shipped {
        order: String,
    }

    impl EventPayload for Shipped {
        const NAME: &'static str = "Shipped";
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Cancelled {
        order: String,
    }

    impl EventPayload for Cancelled {
        const NAME: &'static str = "Cancelled";
    }

    #[test]
    fn test_event_name_comes_from_kind() {
        let a = DomainEvent::new(Shipped {
            order: "a".to_string(),
        });
        let b = DomainEvent::new(Shipped {
            order: "b".to_string(),
        });
        let c = DomainEvent::new(Cancelled {
            order: "a".to_string(),
        });

        assert_eq!(a.event_name(), "Shipped");
        assert_eq!(a.event_name(), b.event_name());
        assert_ne!(a.event_name(), c.event_name());
    }

    #[test]
    fn test_metadata_is_stamped() {
        let first = DomainEvent::new(Shipped {
            order: "1".to_string(),
        });
        let second = DomainEvent::new(Shipped {
            order: "2".to_string(),
        });

        assert_ne!(first.event_id(), second.event_id());
        assert!(first.occurred_at() <= second.occurred_at());
    }

    #[test]
    fn test_downcast_through_any() {
        let event = DomainEvent::new(Shipped {
            order: "42".to_string(),
        });
        let erased: &dyn Event = &event;

        let typed = erased.as_any().downcast_ref::<DomainEvent<Shipped>>();
        assert_eq!(typed.map(|e| e.payload().order.as_str()), Some("42"));
        assert!(erased
            .as_any()
            .downcast_ref::<DomainEvent<Cancelled>>()
            .is_none());
    }

    #[test]
    fn test_serialize_flattens_metadata() {
        let event = DomainEvent::new(Shipped {
            order: "42".to_string(),
        });
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["id"], event.event_id().to_string());
        assert!(json["occurred_at"].is_string());
        assert_eq!(json["payload"]["order"], "42");
    }
}
