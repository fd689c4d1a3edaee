//! Error type returned by every [`crate::store`] backend.

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Raised by the Postgres backend. Unique violations on `uq_*`
    /// constraints are classified by the HTTP layer.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A uniqueness rule was broken (raised directly by the in-memory backend).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A domain rule refused an edit made inside the store.
    #[error(transparent)]
    Rejected(#[from] beautyboss_core::error::CoreError),

    /// A stored JSON document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
