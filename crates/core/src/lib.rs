//! Domain logic for the BeautyBoss scheduling backend.
//!
//! No I/O lives here: the db and api crates build on these types.

pub mod appointment;
pub mod booking;
pub mod booking_link;
pub mod business_type;
pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod navigation;
pub mod notice;
pub mod onboarding;
pub mod pagination;
pub mod plans;
pub mod schedule;
pub mod types;
