use crate::models::{Record, Snapshot, StageSummary, Status};

/// Pipeline stages in display order.
pub const STAGES: [&str; 5] = ["Pre-Visa", "Visa Processing", "Onboarding", "Acknowledgment", "Training"];

/// A stage is delayed once delayed records exceed 3/10 of it (strictly).
const DELAYED_RATIO: (usize, usize) = (3, 10);

/// Build the dashboard snapshot.
///
/// `active_participants` and `overall_progress` follow the filter, while the
/// stage distribution is always computed over `all_records`.
pub fn compute_snapshot(all_records: &[Record], filtered_records: &[Record]) -> Snapshot {
    Snapshot {
        active_participants: filtered_records.len(),
        total_participants: all_records.len(),
        overall_progress: overall_progress(filtered_records),
        stage_distribution: stage_distribution(all_records),
    }
}

/// Mean `progress` of the records; a missing value counts as 0 and an empty
/// set yields 0.
pub fn overall_progress(records: &[Record]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }

    let total: f64 = records.iter()
        .map(|r| r.progress.filter(|p| p.is_finite()).unwrap_or(0.0))
        .sum();

    total / records.len() as f64
}

pub fn stage_distribution(records: &[Record]) -> Vec<StageSummary> {
    STAGES
        .iter()
        .map(|&name| {
            let in_stage: Vec<&Record> = records.iter()
                .filter(|r| r.stage.as_deref() == Some(name))
                .collect();

            StageSummary {
                name: name.to_string(),
                value: in_stage.len(),
                status: derive_stage_status(in_stage),
            }
        })
        .collect()
}

/// Summarise the statuses of one stage's records. First match wins:
/// any critical, then a delayed share above 30%, then any in progress,
/// otherwise on track. Records without a status only count toward the
/// denominator.
pub fn derive_stage_status<'a, I>(stage_records: I) -> Status
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut total = 0usize;
    let mut critical = 0usize;
    let mut delayed = 0usize;
    let mut in_progress = 0usize;

    for record in stage_records {
        total += 1;
        match record.status {
            Some(Status::Critical) => critical += 1,
            Some(Status::Delayed) => delayed += 1,
            Some(Status::OnProgress) => in_progress += 1,
            Some(Status::OnTrack) | None => {}
        }
    }

    if total == 0 {
        return Status::OnTrack;
    }

    let (num, den) = DELAYED_RATIO;
    if critical > 0 {
        Status::Critical
    } else if delayed * den > total * num {
        Status::Delayed
    } else if in_progress > 0 {
        Status::OnProgress
    } else {
        Status::OnTrack
    }
}
