//! Appointment entity model and DTOs.

use beautyboss_core::appointment::AppointmentStatus;
use beautyboss_core::dashboard::AppointmentFact;
use beautyboss_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `appointments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Appointment {
    pub id: DbId,
    pub owner_id: DbId,
    pub client_id: DbId,
    pub professional_id: Option<DbId>,
    pub service_id: Option<DbId>,
    pub starts_at: Timestamp,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An appointment joined with client, professional and service names.
///
/// Staff and services can be replaced by a later onboarding save, so their
/// side of the join is optional.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AppointmentDetail {
    pub id: DbId,
    pub client_id: DbId,
    pub client_name: String,
    pub professional_id: Option<DbId>,
    pub professional_name: Option<String>,
    pub service_id: Option<DbId>,
    pub service_name: Option<String>,
    pub price: Option<Decimal>,
    pub starts_at: Timestamp,
    pub status: String,
}

impl AppointmentDetail {
    /// View used by the dashboard summary. Unknown statuses count as
    /// scheduled.
    pub fn to_fact(&self) -> AppointmentFact {
        AppointmentFact {
            client_name: self.client_name.clone(),
            service_name: self.service_name.clone().unwrap_or_default(),
            price: self.price.unwrap_or_default(),
            starts_at: self.starts_at,
            status: AppointmentStatus::from_str_db(&self.status)
                .unwrap_or(AppointmentStatus::Scheduled),
        }
    }
}

/// DTO for creating an appointment. New appointments start as `scheduled`.
#[derive(Debug, Clone)]
pub struct CreateAppointment {
    pub client_id: DbId,
    pub professional_id: DbId,
    pub service_id: DbId,
    pub starts_at: Timestamp,
}
