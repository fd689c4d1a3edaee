//! Business profile: what onboarding and the settings page record about
//! the tenant's business.

use beautyboss_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `profiles` table. One per owner.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BusinessProfile {
    pub id: DbId,
    pub owner_id: DbId,
    pub business_type: Option<String>,
    pub plan_id: Option<String>,
    pub business_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub onboarded_at: Option<Timestamp>,
    pub trial_ends_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the business part of the settings page.
#[derive(Debug, Clone)]
pub struct UpdateBusinessDetails {
    pub business_name: String,
    pub address: String,
    pub phone: String,
}
