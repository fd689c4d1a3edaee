//! BeautyBoss API server library.
//!
//! Exposes config, state, error handling, the booking session manager and
//! the routes so the binary and the integration tests share one router.

pub mod auth;
pub mod booking_sessions;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
