use beautyboss_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `clients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    pub owner_id: DbId,
    pub professional_id: Option<DbId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: Timestamp,
}

/// DTO for creating a client.
#[derive(Debug, Clone)]
pub struct CreateClient {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub professional_id: Option<DbId>,
}

/// Filter and paging for client lists.
#[derive(Debug, Clone, Default)]
pub struct ClientQuery {
    /// Lower-cased term matched against name, email and phone.
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}
