//! Handlers for repair job bookings and their stage changes.
//!
//! Stage updates check membership only. Any stage may follow any other, and
//! the repair and delivery stages are not cross-checked.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use repairdesk_core::error::CoreError;
use repairdesk_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use repairdesk_core::stage::{self, DeliveryStage, RepairStage};
use repairdesk_core::types::DbId;
use repairdesk_db::models::repair_job::{CreateRepairJob, RepairJobListParams, UpdateStage};
use repairdesk_db::repositories::RepairJobRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "RepairJob",
        id,
    })
}

// ---------------------------------------------------------------------------
// POST /repair-jobs
// ---------------------------------------------------------------------------

/// Book a new repair job.
pub async fn create_repair_job(
    State(state): State<AppState>,
    Json(input): Json<CreateRepairJob>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let job = RepairJobRepo::create(&state.pool, &input).await?;

    tracing::info!(
        repair_job_id = job.id,
        repair_stage = %job.repair_stage,
        delivery_stage = %job.delivery_stage,
        "Repair job booked",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: job })))
}

// ---------------------------------------------------------------------------
// GET /repair-jobs
// ---------------------------------------------------------------------------

/// List repair jobs with optional stage filters.
pub async fn list_repair_jobs(
    State(state): State<AppState>,
    Query(params): Query<RepairJobListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref s) = params.repair_stage {
        stage::validate_repair_stage(s)?;
    }
    if let Some(ref s) = params.delivery_stage {
        stage::validate_delivery_stage(s)?;
    }

    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let jobs = RepairJobRepo::list_filtered(
        &state.pool,
        params.repair_stage.as_deref(),
        params.delivery_stage.as_deref(),
        limit,
        offset,
    )
    .await?;

    Ok(Json(DataResponse { data: jobs }))
}

// ---------------------------------------------------------------------------
// GET /repair-jobs/{id}
// ---------------------------------------------------------------------------

/// Get a single repair job by ID.
pub async fn get_repair_job(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let job = RepairJobRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: job }))
}

// ---------------------------------------------------------------------------
// PUT /repair-jobs/{id}/repair-stage
// ---------------------------------------------------------------------------

/// Set the repair stage of a job.
pub async fn update_repair_stage(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStage>,
) -> AppResult<impl IntoResponse> {
    let next = RepairStage::from_str_db(&input.stage)?;
    let update = RepairJobRepo::update_repair_stage(&state.pool, id, next)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        repair_job_id = id,
        from = %update.previous_stage,
        to = %next,
        "Repair stage updated",
    );

    Ok(Json(DataResponse { data: update.job }))
}

// ---------------------------------------------------------------------------
// PUT /repair-jobs/{id}/delivery-stage
// ---------------------------------------------------------------------------

/// Set the delivery stage of a job.
pub async fn update_delivery_stage(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStage>,
) -> AppResult<impl IntoResponse> {
    let next = DeliveryStage::from_str_db(&input.stage)?;
    let update = RepairJobRepo::update_delivery_stage(&state.pool, id, next)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        repair_job_id = id,
        from = %update.previous_stage,
        to = %next,
        "Delivery stage updated",
    );

    Ok(Json(DataResponse { data: update.job }))
}
