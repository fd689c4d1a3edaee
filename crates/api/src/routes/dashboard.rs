//! Route definitions for the dashboard shell and overview.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /shell?path=            -> shell (requires auth)
/// GET /summary                -> summary (requires auth)
/// GET /reports                -> reports (requires auth)
/// GET /routes                 -> routes
/// GET /routes/resolve?path=   -> resolve
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/shell", get(dashboard::shell))
        .route("/summary", get(dashboard::summary))
        .route("/reports", get(dashboard::reports))
        .route("/routes", get(dashboard::routes))
        .route("/routes/resolve", get(dashboard::resolve))
}
