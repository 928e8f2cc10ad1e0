use console::style;
use crate::models::{Snapshot, Status};

pub fn render_status_badge(status: Status) -> String {
    let label = format!("[{}]", status.as_str());
    match status {
        Status::OnTrack => style(label).green().to_string(),
        Status::OnProgress => style(label).cyan().to_string(),
        Status::Delayed => style(label).yellow().bold().to_string(),
        Status::Critical => style(label).red().bold().to_string(),
    }
}

/// Plain-terminal rendering of a snapshot.
pub fn render_snapshot(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {} of {} records active\n",
        style("Participants:").bold(),
        snapshot.active_participants,
        snapshot.total_participants,
    ));
    out.push_str(&format!(
        "{} {:.1}%\n\n",
        style("Overall progress:").bold(),
        snapshot.overall_progress,
    ));

    let width = snapshot.stage_distribution.iter()
        .map(|s| s.name.len())
        .max()
        .unwrap_or(0);

    for stage in &snapshot.stage_distribution {
        out.push_str(&format!(
            "  {:<width$}  {:>5}  {}\n",
            stage.name,
            stage.value,
            render_status_badge(stage.status),
            width = width,
        ));
    }

    out
}
