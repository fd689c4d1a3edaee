use beautyboss_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `booking_links` table. One per owner.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookingLink {
    pub id: DbId,
    pub owner_id: DbId,
    pub slug: String,
    pub is_active: bool,
    pub welcome_message: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing an owner's booking link.
#[derive(Debug, Clone)]
pub struct UpsertBookingLink {
    /// Already normalized and validated.
    pub slug: String,
    pub is_active: bool,
    pub welcome_message: String,
}
