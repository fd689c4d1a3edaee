//! Request handlers, one submodule per resource.
//!
//! Tenant-scoped handlers take [`crate::middleware::auth::AuthUser`] and
//! pass its `user_id` to the store as the owner id. Errors are mapped via
//! [`crate::error::AppError`].

pub mod appointments;
pub mod auth;
pub mod booking_link;
pub mod catalog;
pub mod clients;
pub mod dashboard;
pub mod onboarding;
pub mod public_booking;
pub mod settings;
