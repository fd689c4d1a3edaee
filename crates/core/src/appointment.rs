//! Appointment status values and the transitions allowed between them.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Canceled,
}

impl AppointmentStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "canceled" => Ok(Self::Canceled),
            _ => Err(CoreError::Validation(format!(
                "Invalid appointment status '{s}'. Must be one of: scheduled, completed, canceled"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }

    /// Only scheduled appointments change state; completed and canceled
    /// are final.
    pub fn validate_transition(self, next: Self) -> Result<(), CoreError> {
        match (self, next) {
            (Self::Scheduled, Self::Completed | Self::Canceled) => Ok(()),
            (from, to) if from == to => Ok(()),
            (from, to) => Err(CoreError::Conflict(format!(
                "Appointment cannot move from {} to {}",
                from.as_str(),
                to.as_str()
            ))),
        }
    }
}
