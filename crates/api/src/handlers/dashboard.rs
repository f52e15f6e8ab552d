//! Handlers for back-office dashboard widgets.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use repairdesk_core::dashboard::summarize_active_stages;
use repairdesk_db::repositories::RepairJobRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /dashboard/repair-stages
// ---------------------------------------------------------------------------

/// Per-stage counts of in-flight repair jobs, zero-filled, in flow order.
pub async fn repair_stage_summary(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = RepairJobRepo::count_by_repair_stage(&state.pool).await?;
    let summary = summarize_active_stages(rows.iter().map(|r| (r.stage.as_str(), r.count)));

    Ok(Json(DataResponse { data: summary }))
}
