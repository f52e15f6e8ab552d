//! Dashboard aggregation over repair stages.
//!
//! The repository returns raw `(stage, count)` rows grouped by the stored
//! string. This module folds them into a zero-filled summary over the
//! active stages so the UI always gets every column in flow order.

use std::collections::HashMap;

use serde::Serialize;

use crate::stage::{active_repair_stages, RepairStage};

/// Number of jobs currently sitting in one repair stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageCount {
    pub stage: RepairStage,
    pub label: &'static str,
    pub count: i64,
}

/// Per-stage counts of in-flight repair work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveStageSummary {
    pub stages: Vec<StageCount>,
    pub total_active: i64,
}

/// Build the active-stage summary from grouped count rows.
///
/// Rows for `pending_assignment`, `cancelled`, or strings outside the
/// repair stage set are ignored. Duplicate rows for the same stage add up.
pub fn summarize_active_stages<'a, I>(rows: I) -> ActiveStageSummary
where
    I: IntoIterator<Item = (&'a str, i64)>,
{
    let mut by_stage: HashMap<RepairStage, i64> = HashMap::new();
    for (value, count) in rows {
        if let Ok(stage) = RepairStage::from_str_db(value) {
            if stage.is_active() {
                *by_stage.entry(stage).or_insert(0) += count;
            }
        }
    }

    let stages: Vec<StageCount> = active_repair_stages()
        .iter()
        .map(|&stage| StageCount {
            stage,
            label: stage.label(),
            count: by_stage.get(&stage).copied().unwrap_or(0),
        })
        .collect();
    let total_active = stages.iter().map(|s| s.count).sum();

    ActiveStageSummary {
        stages,
        total_active,
    }
}
