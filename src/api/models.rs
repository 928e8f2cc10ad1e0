use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::errors::DashboardError;
use crate::models::{RecordView, Snapshot};

/// Body of `GET /api/dashboard`: the snapshot fields at the top level plus
/// the per-record detail of the filtered set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub snapshot: Snapshot,
    pub filtered_data: Vec<RecordView>,
}

/// Rows carried by a `POST /api/upload` body: either `{"rows": [...]}` or a
/// bare list.
pub fn rows_from_body(body: Value) -> Result<Vec<Value>, DashboardError> {
    match body {
        Value::Array(rows) => Ok(rows),
        Value::Object(mut obj) => match obj.remove("rows") {
            Some(Value::Array(rows)) => Ok(rows),
            _ => Err(DashboardError::Import("No rows received".into())),
        },
        _ => Err(DashboardError::Import("No rows received".into())),
    }
}

#[derive(Serialize)]
pub struct RecordKey {
    pub month: Option<String>,
    pub country: Option<String>,
    pub stage: Option<String>,
}
