use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::{debug, error};
use crate::api::AppState;
use crate::api::models::DashboardResponse;
use crate::db::load_snapshot;
use crate::models::{FilterParams, RecordFilter, RecordView};

pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<DashboardResponse>, (StatusCode, Json<Value>)> {
    let filter = RecordFilter::from_params(&params);

    let (snapshot, filtered) = load_snapshot(&state.db, &filter).map_err(|e| {
        error!(error = %e, "Dashboard query failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Failed to fetch dashboard data",
                "message": e.to_string(),
            })),
        )
    })?;

    debug!(
        active = snapshot.active_participants,
        total = snapshot.total_participants,
        constraints = filter.constraints().len(),
        "Dashboard snapshot computed"
    );

    Ok(Json(DashboardResponse {
        filtered_data: filtered.iter().map(RecordView::from).collect(),
        snapshot,
    }))
}
