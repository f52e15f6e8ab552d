//! Route definitions for repair jobs.
//!
//! Mounted at `/repair-jobs` by `api_routes()`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::repair_jobs;
use crate::state::AppState;

/// Repair job routes.
///
/// ```text
/// POST   /                        -> create_repair_job
/// GET    /                        -> list_repair_jobs
/// GET    /{id}                    -> get_repair_job
/// PUT    /{id}/repair-stage       -> update_repair_stage
/// PUT    /{id}/delivery-stage     -> update_delivery_stage
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(repair_jobs::create_repair_job).get(repair_jobs::list_repair_jobs),
        )
        .route("/{id}", get(repair_jobs::get_repair_job))
        .route("/{id}/repair-stage", put(repair_jobs::update_repair_stage))
        .route("/{id}/delivery-stage", put(repair_jobs::update_delivery_stage))
}
