//! Handlers for the workflow stage catalogue.
//!
//! Read-only: serves the fixed stage lists to dashboards and answers
//! membership checks for string-origin values.

use axum::extract::Query;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use repairdesk_core::stage::{active_repair_stages, DeliveryStage, RepairStage, StageKind};

use crate::error::AppResult;
use crate::response::DataResponse;

/// One stage in catalogue order.
#[derive(Debug, Serialize)]
pub struct StageEntry {
    pub value: &'static str,
    pub label: &'static str,
    pub position: usize,
}

/// Both stage sets plus the active repair subset.
#[derive(Debug, Serialize)]
pub struct StageCatalog {
    pub repair: Vec<StageEntry>,
    pub delivery: Vec<StageEntry>,
    pub active_repair: Vec<&'static str>,
}

/// Query parameters for `GET /stages/validate`.
///
/// Both default to empty so a missing parameter flows through the normal
/// checks: an empty `kind` is rejected, an empty `value` is simply invalid.
#[derive(Debug, Deserialize)]
pub struct ValidateStageParams {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub value: String,
}

/// Result of a membership check.
#[derive(Debug, Serialize)]
pub struct StageValidation {
    pub kind: StageKind,
    pub value: String,
    pub valid: bool,
}

// ---------------------------------------------------------------------------
// GET /stages
// ---------------------------------------------------------------------------

/// Return the full stage catalogue in flow order.
pub async fn get_stage_catalog() -> Json<DataResponse<StageCatalog>> {
    let repair = RepairStage::ALL
        .iter()
        .map(|s| StageEntry {
            value: s.as_str(),
            label: s.label(),
            position: s.position(),
        })
        .collect();

    let delivery = DeliveryStage::ALL
        .iter()
        .map(|s| StageEntry {
            value: s.as_str(),
            label: s.label(),
            position: s.position(),
        })
        .collect();

    let active_repair = active_repair_stages().iter().map(|s| s.as_str()).collect();

    Json(DataResponse {
        data: StageCatalog {
            repair,
            delivery,
            active_repair,
        },
    })
}

// ---------------------------------------------------------------------------
// GET /stages/validate
// ---------------------------------------------------------------------------

/// Check whether `value` belongs to the stage set named by `kind`.
///
/// An invalid value is a normal `valid: false` answer, not an error. Only an
/// unknown `kind` is rejected.
pub async fn validate_stage(
    Query(params): Query<ValidateStageParams>,
) -> AppResult<impl IntoResponse> {
    let kind = StageKind::from_str_db(&params.kind)?;
    let valid = kind.contains(&params.value);

    Ok(Json(DataResponse {
        data: StageValidation {
            kind,
            value: params.value,
            valid,
        },
    }))
}
