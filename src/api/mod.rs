pub mod routes;
pub mod models;
pub mod errors;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::config::DEFAULT_MAX_IMPORT_ROWS;
use crate::db::Database;
use crate::errors::DashboardError;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub max_import_rows: usize,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db, max_import_rows: DEFAULT_MAX_IMPORT_ROWS }
    }
}

pub async fn create_app_state(db_path: &str, max_import_rows: usize) -> Result<AppState, DashboardError> {
    let db = Database::new(db_path)?;
    Ok(AppState { db, max_import_rows })
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", axum::routing::get(routes::health::health_check))
        .route("/api/dashboard", axum::routing::get(routes::dashboard::get_dashboard))
        .route("/api/records", axum::routing::post(routes::records::create_record).get(routes::records::list_records))
        .route("/api/upload", axum::routing::post(routes::upload::upload_rows))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
