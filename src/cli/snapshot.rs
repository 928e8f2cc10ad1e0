use crate::api::models::DashboardResponse;
use crate::cli::commands::SnapshotArgs;
use crate::cli::render::render_snapshot;
use crate::config::{load_settings, Overrides};
use crate::db::{load_snapshot, Database};
use crate::errors::DashboardError;
use crate::models::{RecordFilter, RecordView};
use tracing::info;

pub async fn handle_snapshot(args: SnapshotArgs) -> Result<(), DashboardError> {
    let overrides = Overrides { db_path: args.db, ..Default::default() };
    let settings = load_settings(args.config.as_deref(), &overrides).await?;

    let filter = RecordFilter::from_params(&args.filter.to_params());
    let db = Database::new(&settings.db_path)?;
    let (snapshot, filtered) = load_snapshot(&db, &filter)?;

    info!(active = snapshot.active_participants, total = snapshot.total_participants, "Snapshot computed");

    if args.json {
        let response = DashboardResponse {
            filtered_data: filtered.iter().map(RecordView::from).collect(),
            snapshot,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", render_snapshot(&snapshot));
    }

    Ok(())
}
