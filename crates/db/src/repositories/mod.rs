pub mod repair_job_repo;

pub use repair_job_repo::RepairJobRepo;
