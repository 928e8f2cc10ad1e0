pub mod aggregator;

pub use aggregator::{compute_snapshot, derive_stage_status, overall_progress, stage_distribution, STAGES};
