//! Route definitions for the stage catalogue.
//!
//! Mounted at `/stages` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::stages;
use crate::state::AppState;

/// Stage catalogue routes.
///
/// ```text
/// GET    /                  -> get_stage_catalog
/// GET    /validate          -> validate_stage
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(stages::get_stage_catalog))
        .route("/validate", get(stages::validate_stage))
}
