use beautyboss_core::types::{DbId, Minutes, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `services` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Service {
    pub id: DbId,
    pub owner_id: DbId,
    pub professional_id: Option<DbId>,
    pub name: String,
    pub duration_minutes: Minutes,
    pub price: Decimal,
    pub sort_order: i32,
    pub created_at: Timestamp,
}
