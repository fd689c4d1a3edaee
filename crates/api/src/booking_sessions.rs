//! Server-held public booking wizards.
//!
//! Each anonymous visitor gets a session id and one [`BookingDraft`].
//! Sessions untouched for longer than the TTL are removed by
//! [`BookingSessions::run_sweeper`]. At most `max_sessions` are held at once.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use beautyboss_core::booking::BookingDraft;
use beautyboss_core::error::CoreError;
use beautyboss_core::types::DbId;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// How often the sweeper looks for idle sessions.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct BookingSession {
    pub draft: BookingDraft,
    /// Tenant whose booking link opened the session, if any.
    pub owner_id: Option<DbId>,
    last_seen: Instant,
}

pub struct BookingSessions {
    sessions: RwLock<HashMap<Uuid, BookingSession>>,
    ttl: Duration,
    max_sessions: usize,
}

impl BookingSessions {
    pub fn new(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
            max_sessions,
        }
    }

    /// Start a session. Idle sessions are swept first when the map is
    /// full; `None` means it is still full afterwards.
    pub async fn create(&self, owner_id: Option<DbId>) -> Option<(Uuid, BookingSession)> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            sessions.retain(|_, s| now.saturating_duration_since(s.last_seen) <= self.ttl);
            if sessions.len() >= self.max_sessions {
                return None;
            }
        }

        let id = Uuid::new_v4();
        let session = BookingSession {
            draft: BookingDraft::default(),
            owner_id,
            last_seen: now,
        };
        sessions.insert(id, session.clone());
        Some((id, session))
    }

    pub async fn get(&self, id: Uuid) -> Result<BookingSession, CoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| CoreError::not_found("BookingSession", id))?;
        session.last_seen = Instant::now();
        Ok(session.clone())
    }

    /// Run `f` against the session's draft. The draft is only written back
    /// when `f` succeeds.
    pub async fn update<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut BookingDraft) -> Result<T, CoreError>,
    ) -> Result<(T, BookingSession), CoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| CoreError::not_found("BookingSession", id))?;

        let mut draft = session.draft.clone();
        let out = f(&mut draft)?;
        session.draft = draft;
        session.last_seen = Instant::now();
        Ok((out, session.clone()))
    }

    /// Drop sessions idle since before `now - ttl`. Returns how many went.
    pub async fn sweep_expired(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| now.saturating_duration_since(s.last_seen) <= self.ttl);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Periodically sweep idle sessions until `cancel` fires.
    pub async fn run_sweeper(self: Arc<Self>, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Booking session sweeper cancelled");
                    break;
                }
                _ = interval.tick() => {
                    let removed = self.sweep_expired(Instant::now()).await;
                    if removed > 0 {
                        tracing::debug!(removed, "Expired booking sessions removed");
                    }
                }
            }
        }
    }
}
