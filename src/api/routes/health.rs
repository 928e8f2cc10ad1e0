use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use crate::api::AppState;

pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let records = state.db.count()
        .map_err(|e| (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"status": "unhealthy", "error": e.to_string()}))))?;

    Ok(Json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "git_hash": option_env!("GIT_HASH"),
        "built_at": option_env!("BUILD_TIMESTAMP"),
        "records": records,
    })))
}
