//! Route definitions for what the owner configured: catalog, booking link
//! and settings. All require auth.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{booking_link, catalog, settings};
use crate::state::AppState;

/// Read-only views mounted at the `/api/v1` root.
///
/// ```text
/// GET /services       -> list_services
/// GET /professionals  -> list_professionals
/// GET /schedule       -> get_schedule
/// ```
pub fn catalog_router() -> Router<AppState> {
    Router::new()
        .route("/services", get(catalog::list_services))
        .route("/professionals", get(catalog::list_professionals))
        .route("/schedule", get(catalog::get_schedule))
}

/// Routes mounted at `/booking-link`.
///
/// ```text
/// GET /  -> get_booking_link
/// PUT /  -> update_booking_link
/// ```
pub fn booking_link_router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(booking_link::get_booking_link).put(booking_link::update_booking_link),
    )
}

/// Routes mounted at `/settings`.
///
/// ```text
/// PUT /profile   -> update_profile
/// PUT /business  -> update_business
/// ```
pub fn settings_router() -> Router<AppState> {
    Router::new()
        .route("/profile", put(settings::update_profile))
        .route("/business", put(settings::update_business))
}
