pub mod agenda;
pub mod auth;
pub mod business;
pub mod dashboard;
pub mod health;
pub mod onboarding;
pub mod public_booking;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                         signup (public)
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
/// /auth/session                        current user (requires auth)
///
/// /onboarding                          draft (requires auth)
/// /onboarding/...                      wizard steps, save, option lists
///
/// /dashboard/shell                     navigation + title + initials
/// /dashboard/summary                   overview figures
/// /dashboard/reports                   report catalog
/// /dashboard/routes                    client route table
/// /dashboard/routes/resolve            match a path against the table
///
/// /clients                             list, create
/// /appointments                        list by day, create
/// /appointments/{id}/status            complete or cancel
///
/// /services                            saved services
/// /professionals                       saved staff
/// /schedule                            saved weekly hours
///
/// /booking-link                        get, update
/// /settings/profile                    update account
/// /settings/business                   update business details
///
/// /public/booking/...                  catalog, preview, wizard sessions
/// /public/booking/{slug}               tenant booking page
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/onboarding", onboarding::router())
        .nest("/dashboard", dashboard::router())
        .nest("/clients", agenda::clients_router())
        .nest("/appointments", agenda::appointments_router())
        .merge(business::catalog_router())
        .nest("/booking-link", business::booking_link_router())
        .nest("/settings", business::settings_router())
        .nest("/public/booking", public_booking::router())
}
