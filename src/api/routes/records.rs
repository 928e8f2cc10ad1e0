use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;
use crate::api::AppState;
use crate::api::models::RecordKey;
use crate::db::UpsertOutcome;
use crate::errors::DashboardError;
use crate::models::{FilterParams, Record, RecordFilter};

/// Manual entry of one record from the input form.
pub async fn create_record(
    State(state): State<AppState>,
    Json(record): Json<Record>,
) -> Result<(StatusCode, Json<Value>), DashboardError> {
    record.validate()?;

    let outcome = state.db.upsert_record(&record)?;
    let (status, label) = match outcome {
        UpsertOutcome::Inserted => (StatusCode::CREATED, "inserted"),
        UpsertOutcome::Updated => (StatusCode::OK, "updated"),
        UpsertOutcome::Unchanged => (StatusCode::OK, "unchanged"),
    };

    info!(
        stage = record.stage.as_deref().unwrap_or_default(),
        country = record.country.as_deref().unwrap_or_default(),
        outcome = label,
        "Record saved"
    );

    let key = RecordKey {
        month: record.month,
        country: record.country,
        stage: record.stage,
    };

    Ok((status, Json(json!({ "outcome": label, "key": key }))))
}

pub async fn list_records(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Value>, DashboardError> {
    let filter = RecordFilter::from_params(&params);
    let records = state.db.fetch_matching(&filter)?;
    Ok(Json(json!({ "total": records.len(), "records": records })))
}
