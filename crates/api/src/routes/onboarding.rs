//! Route definitions for the onboarding wizard.
//!
//! Mounted at `/onboarding` by `api_routes()`. Everything except the option
//! lists requires auth.
//!
//! ```text
//! GET    /                          get_draft
//! POST   /reset                     reset
//! PUT    /step                      set_step
//! POST   /next                      next_step
//! POST   /back                      previous_step
//! PUT    /business-type             set_business_type
//! POST   /professionals             add_professional
//! DELETE /professionals/{index}     remove_professional
//! POST   /services                  add_service
//! PUT    /services/{index}          update_service
//! DELETE /services/{index}          remove_service
//! POST   /services/defaults         load_default_services
//! PUT    /schedule/{day}            set_schedule
//! PUT    /plan                      select_plan
//! POST   /save                      save
//! GET    /business-types            list_business_types
//! GET    /plans                     list_plans
//! GET    /time-slots                list_time_slots
//! ```

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(onboarding::get_draft))
        .route("/reset", post(onboarding::reset))
        .route("/step", put(onboarding::set_step))
        .route("/next", post(onboarding::next_step))
        .route("/back", post(onboarding::previous_step))
        .route("/business-type", put(onboarding::set_business_type))
        .route("/professionals", post(onboarding::add_professional))
        .route(
            "/professionals/{index}",
            delete(onboarding::remove_professional),
        )
        .route("/services", post(onboarding::add_service))
        .route("/services/defaults", post(onboarding::load_default_services))
        .route(
            "/services/{index}",
            put(onboarding::update_service).delete(onboarding::remove_service),
        )
        .route("/schedule/{day}", put(onboarding::set_schedule))
        .route("/plan", put(onboarding::select_plan))
        .route("/save", post(onboarding::save))
        .route("/business-types", get(onboarding::list_business_types))
        .route("/plans", get(onboarding::list_plans))
        .route("/time-slots", get(onboarding::list_time_slots))
}
