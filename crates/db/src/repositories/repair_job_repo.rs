//! Repository for the `repair_jobs` table.

use repairdesk_core::stage::{DeliveryStage, RepairStage};
use repairdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::repair_job::{CreateRepairJob, RepairJob, StageCountRow, StageUpdate};

/// Column list for `repair_jobs` queries.
const COLUMNS: &str = "\
    id, customer_name, customer_email, device_name, issue_description, \
    repair_stage, delivery_stage, created_at, updated_at";

/// `COLUMNS` qualified with the `r` alias used by stage updates.
const UPDATED_COLUMNS: &str = "\
    r.id, r.customer_name, r.customer_email, r.device_name, r.issue_description, \
    r.repair_stage, r.delivery_stage, r.created_at, r.updated_at";

/// Provides CRUD and stage operations for repair jobs.
pub struct RepairJobRepo;

impl RepairJobRepo {
    /// Book a new repair job, returning the full row.
    ///
    /// The repair stage starts at `pending_assignment`; the delivery stage
    /// starts at `pending_assignment` or `not_required` depending on the
    /// booking.
    pub async fn create(pool: &PgPool, input: &CreateRepairJob) -> Result<RepairJob, sqlx::Error> {
        let query = format!(
            "INSERT INTO repair_jobs \
                (customer_name, customer_email, device_name, issue_description, \
                 repair_stage, delivery_stage) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RepairJob>(&query)
            .bind(&input.customer_name)
            .bind(&input.customer_email)
            .bind(&input.device_name)
            .bind(&input.issue_description)
            .bind(RepairStage::default().as_str())
            .bind(DeliveryStage::initial(input.delivery_required).as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a repair job by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<RepairJob>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM repair_jobs WHERE id = $1");
        sqlx::query_as::<_, RepairJob>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List repair jobs with optional exact-match stage filters.
    ///
    /// Results are ordered newest-first.
    pub async fn list_filtered(
        pool: &PgPool,
        repair_stage: Option<&str>,
        delivery_stage: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RepairJob>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if repair_stage.is_some() {
            conditions.push(format!("repair_stage = ${param_idx}"));
            param_idx += 1;
        }
        if delivery_stage.is_some() {
            conditions.push(format!("delivery_stage = ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM repair_jobs {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, RepairJob>(&query);

        if let Some(s) = repair_stage {
            q = q.bind(s);
        }
        if let Some(s) = delivery_stage {
            q = q.bind(s);
        }
        q = q.bind(limit).bind(offset);

        q.fetch_all(pool).await
    }

    /// Set the repair stage. Returns the updated row and the stage it
    /// replaced, or `None` if the job does not exist.
    pub async fn update_repair_stage(
        pool: &PgPool,
        id: DbId,
        stage: RepairStage,
    ) -> Result<Option<StageUpdate>, sqlx::Error> {
        Self::update_stage_column(pool, "repair_stage", id, stage.as_str()).await
    }

    /// Set the delivery stage. Returns the updated row and the stage it
    /// replaced, or `None` if the job does not exist.
    pub async fn update_delivery_stage(
        pool: &PgPool,
        id: DbId,
        stage: DeliveryStage,
    ) -> Result<Option<StageUpdate>, sqlx::Error> {
        Self::update_stage_column(pool, "delivery_stage", id, stage.as_str()).await
    }

    /// Overwrite one stage column in a single statement.
    ///
    /// The CTE locks the row and captures the old value, so `previous_stage`
    /// is the value this write replaced even under concurrent updates.
    /// `column` is always one of the two fixed stage column names.
    async fn update_stage_column(
        pool: &PgPool,
        column: &'static str,
        id: DbId,
        value: &str,
    ) -> Result<Option<StageUpdate>, sqlx::Error> {
        let query = format!(
            "WITH prev AS ( \
                SELECT id, {column} AS previous_stage FROM repair_jobs \
                WHERE id = $2 FOR UPDATE \
             ) \
             UPDATE repair_jobs r SET {column} = $1 \
             FROM prev WHERE r.id = prev.id \
             RETURNING {UPDATED_COLUMNS}, prev.previous_stage"
        );
        sqlx::query_as::<_, StageUpdate>(&query)
            .bind(value)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count jobs grouped by their current repair stage.
    pub async fn count_by_repair_stage(pool: &PgPool) -> Result<Vec<StageCountRow>, sqlx::Error> {
        sqlx::query_as::<_, StageCountRow>(
            "SELECT repair_stage AS stage, COUNT(*) AS count \
             FROM repair_jobs \
             GROUP BY repair_stage",
        )
        .fetch_all(pool)
        .await
    }
}
