//! BeautyBoss event bus.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`]: the domain event envelope (sign-ups, sign-ins,
//!   onboarding saves, booking confirmations).
//! - [`ActivityLog`]: background subscriber that writes every event to the
//!   structured log.

pub mod activity;
pub mod bus;

pub use activity::ActivityLog;
pub use bus::{event_types, EventBus, PlatformEvent};
