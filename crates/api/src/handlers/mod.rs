pub mod dashboard;
pub mod repair_jobs;
pub mod stages;
