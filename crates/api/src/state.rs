use std::sync::Arc;

use beautyboss_db::Store;
use beautyboss_events::EventBus;

use crate::booking_sessions::BookingSessions;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Postgres or in-memory, chosen at startup.
    pub store: Arc<dyn Store>,
    pub config: Arc<ServerConfig>,
    pub event_bus: Arc<EventBus>,
    pub booking_sessions: Arc<BookingSessions>,
}
