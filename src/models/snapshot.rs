use serde::{Deserialize, Serialize};
use super::status::Status;

/// Per-stage entry of the dashboard distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageSummary {
    pub name: String,
    pub value: usize,
    pub status: Status,
}

/// Aggregated dashboard metrics for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub active_participants: usize,
    pub total_participants: usize,
    pub overall_progress: f64,
    /// Always the five pipeline stages, in pipeline order.
    pub stage_distribution: Vec<StageSummary>,
}
