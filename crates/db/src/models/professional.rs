use beautyboss_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `professionals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Professional {
    pub id: DbId,
    pub owner_id: DbId,
    /// Set for the staff entry that is the account owner.
    pub user_id: Option<DbId>,
    pub name: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
}
