//! Route definitions for the public booking wizard. No auth.
//!
//! Mounted at `/public/booking` by `api_routes()`.
//!
//! ```text
//! GET    /catalog                  catalog
//! GET    /preview                  preview
//! POST   /sessions                 create_session
//! GET    /sessions/{id}            get_session
//! PUT    /sessions/{id}            update_answers
//! POST   /sessions/{id}/advance    advance
//! POST   /sessions/{id}/back       go_back
//! POST   /sessions/{id}/confirm    confirm
//! GET    /sessions/{id}/summary    summary
//! GET    /{slug}                   booking_page
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::public_booking;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(public_booking::catalog))
        .route("/preview", get(public_booking::preview))
        .route("/sessions", post(public_booking::create_session))
        .route(
            "/sessions/{id}",
            get(public_booking::get_session).put(public_booking::update_answers),
        )
        .route("/sessions/{id}/advance", post(public_booking::advance))
        .route("/sessions/{id}/back", post(public_booking::go_back))
        .route("/sessions/{id}/confirm", post(public_booking::confirm))
        .route("/sessions/{id}/summary", get(public_booking::summary))
        .route("/{slug}", get(public_booking::booking_page))
}
