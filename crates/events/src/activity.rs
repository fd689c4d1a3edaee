//! Activity log subscriber.
//!
//! [`ActivityLog`] drains a bus receiver and writes one structured log line
//! per event. It runs as a background task and returns once the
//! [`EventBus`](crate::bus::EventBus) is dropped.

use tokio::sync::broadcast;

use crate::bus::PlatformEvent;

pub struct ActivityLog;

impl ActivityLog {
    /// Consume events until the channel closes. Returns how many events
    /// were logged.
    pub async fn run(mut receiver: broadcast::Receiver<PlatformEvent>) -> u64 {
        let mut logged = 0;
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    Self::record(&event);
                    logged += 1;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Activity log lagged, some events were dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!(logged, "Event bus closed, activity log shutting down");
                    break;
                }
            }
        }
        logged
    }

    fn record(event: &PlatformEvent) {
        tracing::info!(
            event_type = %event.event_type,
            owner_id = ?event.owner_id,
            payload = %event.payload,
            at = %event.timestamp,
            "Platform event"
        );
    }
}
