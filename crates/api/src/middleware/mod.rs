//! Request extractors.
//!
//! - [`auth::AuthUser`] -- the signed-in account owner, from a Bearer token.

pub mod auth;
