/// Primary keys are PostgreSQL BIGSERIAL; the in-memory store hands out the
/// same shape from a counter.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Service durations are whole minutes.
pub type Minutes = i32;
