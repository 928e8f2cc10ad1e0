use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use crate::errors::DashboardError;

impl DashboardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Config(_) => StatusCode::BAD_REQUEST,
            DashboardError::Import(_) => StatusCode::BAD_REQUEST,
            DashboardError::InvalidRecord(_) => StatusCode::BAD_REQUEST,
            DashboardError::Json(_) | DashboardError::Yaml(_) => StatusCode::BAD_REQUEST,
            DashboardError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let message = match &self {
            DashboardError::Import(msg) | DashboardError::InvalidRecord(msg) => msg.clone(),
            _ => self.to_string(),
        };

        (status, Json(json!({"error": message}))).into_response()
    }
}
