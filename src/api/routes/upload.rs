use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::{error, info, warn};
use crate::api::AppState;
use crate::api::models::rows_from_body;
use crate::errors::DashboardError;
use crate::import::import_rows;

/// Bulk import of spreadsheet rows, upserted by `(month, country, stage)`.
pub async fn upload_rows(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let rows = rows_from_body(body).map_err(reject)?;
    let row_count = rows.len();

    let db = state.db.clone();
    let max_rows = state.max_import_rows;
    let report = tokio::task::spawn_blocking(move || import_rows(&db, &rows, max_rows))
        .await
        .map_err(|e| reject(DashboardError::Internal(format!("Import task failed: {}", e))))?
        .map_err(reject)?;

    if report.coerced_statuses > 0 {
        warn!(count = report.coerced_statuses, "Imported rows with unrecognized status");
    }
    if report.clamped_progress > 0 {
        warn!(count = report.clamped_progress, "Imported rows with progress clamped to 0-100");
    }
    info!(rows = row_count, inserted = report.inserted, updated = report.updated, "Upload processed");

    Ok(Json(json!({
        "success": true,
        "message": report.message(),
        "report": report,
    })))
}

fn reject(e: DashboardError) -> (StatusCode, Json<Value>) {
    match e {
        DashboardError::Import(msg) => (StatusCode::BAD_REQUEST, Json(json!({"error": msg}))),
        other => {
            error!(error = %other, "Upload error");
            (
                other.status_code(),
                Json(json!({"error": "Upload failed", "details": other.to_string()})),
            )
        }
    }
}
