pub mod dashboard;
pub mod health;
pub mod repair_jobs;
pub mod stages;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /stages                                   stage catalogue (GET)
/// /stages/validate                          membership check (GET)
///
/// /repair-jobs                              list, create
/// /repair-jobs/{id}                         get
/// /repair-jobs/{id}/repair-stage            set repair stage (PUT)
/// /repair-jobs/{id}/delivery-stage          set delivery stage (PUT)
///
/// /dashboard/repair-stages                  active stage counts (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/stages", stages::router())
        .nest("/repair-jobs", repair_jobs::router())
        .nest("/dashboard", dashboard::router())
}
