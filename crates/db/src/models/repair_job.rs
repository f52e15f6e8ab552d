//! Repair job entity model and DTOs.

use repairdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `repair_jobs` table.
///
/// Stage columns are stored as plain strings; see `repairdesk_core::stage`
/// for the accepted values.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RepairJob {
    pub id: DbId,
    pub customer_name: String,
    pub customer_email: String,
    pub device_name: String,
    pub issue_description: String,
    pub repair_stage: String,
    pub delivery_stage: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for booking a new repair.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRepairJob {
    #[validate(length(min = 1, max = 200, message = "customer_name must be 1-200 characters"))]
    pub customer_name: String,
    #[validate(email(message = "customer_email must be a valid email address"))]
    pub customer_email: String,
    #[validate(length(min = 1, max = 200, message = "device_name must be 1-200 characters"))]
    pub device_name: String,
    #[validate(length(
        min = 1,
        max = 10000,
        message = "issue_description must be 1-10000 characters"
    ))]
    pub issue_description: String,
    /// Whether a courier collects and returns the device.
    #[serde(default)]
    pub delivery_required: bool,
}

/// DTO for setting either stage on a job.
#[derive(Debug, Deserialize)]
pub struct UpdateStage {
    pub stage: String,
}

/// Query parameters for listing repair jobs.
#[derive(Debug, Default, Deserialize)]
pub struct RepairJobListParams {
    pub repair_stage: Option<String>,
    pub delivery_stage: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// One grouped row of `SELECT repair_stage, COUNT(*)`.
#[derive(Debug, Clone, FromRow)]
pub struct StageCountRow {
    pub stage: String,
    pub count: i64,
}

/// Result of a stage write: the updated row plus the stage it replaced.
#[derive(Debug, Clone, FromRow)]
pub struct StageUpdate {
    #[sqlx(flatten)]
    pub job: RepairJob,
    pub previous_stage: String,
}
