pub mod appointment;
pub mod booking_link;
pub mod client;
pub mod onboarding_draft;
pub mod professional;
pub mod profile;
pub mod schedule;
pub mod service;
pub mod session;
pub mod user;
