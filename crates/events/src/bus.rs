//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` in the API state. Publishing
//! never blocks and never fails; events published while nobody listens are
//! dropped.

use beautyboss_core::types::{DbId, Timestamp};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Event names published by the API.
pub mod event_types {
    pub const SIGNED_UP: &str = "auth.signed_up";
    pub const SIGNED_IN: &str = "auth.signed_in";
    pub const SIGNED_OUT: &str = "auth.signed_out";
    pub const ONBOARDING_SAVED: &str = "onboarding.saved";
    pub const BOOKING_CONFIRMED: &str = "booking.confirmed";
}

// ---------------------------------------------------------------------------
// PlatformEvent
// ---------------------------------------------------------------------------

/// Something that happened in a tenant's account or on a public booking
/// page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformEvent {
    /// Dot-separated name, one of [`event_types`].
    pub event_type: String,

    /// Account the event belongs to. Anonymous booking visitors have none.
    pub owner_id: Option<DbId>,

    /// Event-specific data.
    pub payload: serde_json::Value,

    pub timestamp: Timestamp,
}

impl PlatformEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            owner_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_owner(mut self, owner_id: DbId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

const DEFAULT_CAPACITY: usize = 256;

/// Fan-out bus: every subscriber receives every event published after it
/// subscribed.
pub struct EventBus {
    sender: broadcast::Sender<PlatformEvent>,
}

impl EventBus {
    /// When `capacity` unread events pile up, the oldest are dropped and
    /// slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn publish(&self, event: PlatformEvent) {
        // A send error only means nobody is subscribed.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlatformEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_owner_and_payload() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(
            PlatformEvent::new(event_types::ONBOARDING_SAVED)
                .with_owner(7)
                .with_payload(serde_json::json!({"services": 4})),
        );

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.event_type, "onboarding.saved");
        assert_eq!(received.owner_id, Some(7));
        assert_eq!(received.payload["services"], 4);
    }

    #[tokio::test]
    async fn every_subscriber_gets_a_copy() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(PlatformEvent::new(event_types::SIGNED_IN));

        assert_eq!(rx1.recv().await.unwrap().event_type, "auth.signed_in");
        assert_eq!(rx2.recv().await.unwrap().event_type, "auth.signed_in");
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::default();
        bus.publish(PlatformEvent::new(event_types::BOOKING_CONFIRMED));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn new_event_is_anonymous_with_empty_payload() {
        let event = PlatformEvent::new(event_types::SIGNED_OUT);
        assert!(event.owner_id.is_none());
        assert!(event.payload.is_object());
    }
}
