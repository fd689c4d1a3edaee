//! User entity model and DTOs.

use beautyboss_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub password_hash: String,
    pub is_subscribed: bool,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub is_subscribed: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            whatsapp: user.whatsapp.clone(),
            is_subscribed: user.is_subscribed,
        }
    }
}

/// DTO for creating a new user. The email is stored lower-cased.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub password_hash: String,
}

/// DTO for the account part of the settings page.
#[derive(Debug, Clone)]
pub struct UpdateAccount {
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
}
