//! Route definitions for clients and appointments.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{appointments, clients};
use crate::state::AppState;

/// Routes mounted at `/clients`.
///
/// ```text
/// GET  /   -> list_clients (?search, limit, offset)
/// POST /   -> create_client
/// ```
pub fn clients_router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(clients::list_clients).post(clients::create_client),
    )
}

/// Routes mounted at `/appointments`.
///
/// ```text
/// GET  /               -> list_appointments (?date=YYYY-MM-DD)
/// POST /               -> create_appointment
/// PUT  /{id}/status    -> update_status
/// ```
pub fn appointments_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(appointments::list_appointments).post(appointments::create_appointment),
        )
        .route("/{id}/status", put(appointments::update_status))
}
