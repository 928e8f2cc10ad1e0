use axum::http::StatusCode;
use axum::body::Body;
use http_body_util::BodyExt;
use tower::ServiceExt;
use serde_json::{json, Value};
use progress_dashboard::db::Database;
use progress_dashboard::api::{build_router, AppState};

fn create_test_state() -> AppState {
    let db = Database::in_memory().unwrap();
    AppState {
        db,
        max_import_rows: 100,
    }
}

fn app(state: &AppState) -> axum::Router {
    build_router(state.clone())
}

fn make_request(method: &str, uri: &str, body: Option<Value>) -> axum::http::Request<Body> {
    let builder = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    match body {
        Some(b) => builder.body(Body::from(serde_json::to_string(&b).unwrap())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn response_json(response: axum::http::Response<Body>) -> Value {
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        panic!("Empty response body. Status: {}, Headers: {:?}", parts.status, parts.headers);
    }
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("JSON parse error: {}. Body: {:?}", e, String::from_utf8_lossy(&bytes)))
}

async fn upload(state: &AppState, rows: Value) -> (StatusCode, Value) {
    let req = make_request("POST", "/api/upload", Some(json!({ "rows": rows })));
    let response = app(state).oneshot(req).await.unwrap();
    let status = response.status();
    (status, response_json(response).await)
}

fn sample_rows() -> Value {
    json!([
        {"month": "2024-01", "country": "UAE", "batch": "2024-Q1", "program": "Hospitality",
         "stage": "Visa Processing", "status": "critical", "progress": 20},
        {"month": "2024-01", "country": "UK", "batch": "2024-Q1", "program": "Hospitality",
         "stage": "Visa Processing", "status": "onTrack", "progress": 60},
        {"month": "2024-02", "country": "UK", "batch": "2024-Q2", "program": "Culinary",
         "stage": "Training", "status": "onprogress", "progress": 90, "workshops": 3}
    ])
}

#[tokio::test]
async fn test_health_endpoint() {
    let state = create_test_state();
    let req = make_request("GET", "/api/health", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "progress-dashboard");
    assert_eq!(body["records"], 0);
}

#[tokio::test]
async fn test_dashboard_empty_store() {
    let state = create_test_state();
    let req = make_request("GET", "/api/dashboard", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["activeParticipants"], 0);
    assert_eq!(body["totalParticipants"], 0);
    assert_eq!(body["overallProgress"], 0.0);

    let stages = body["stageDistribution"].as_array().unwrap();
    let names: Vec<&str> = stages.iter().map(|s| s["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Pre-Visa", "Visa Processing", "Onboarding", "Acknowledgment", "Training"]);
    assert!(stages.iter().all(|s| s["value"] == 0 && s["status"] == "onTrack"));
    assert!(body["filteredData"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_then_dashboard() {
    let state = create_test_state();
    let (status, body) = upload(&state, sample_rows()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Processed 3 new and 0 existing documents");

    let req = make_request("GET", "/api/dashboard", None);
    let body = response_json(app(&state).oneshot(req).await.unwrap()).await;
    assert_eq!(body["activeParticipants"], 3);
    assert_eq!(body["totalParticipants"], 3);

    let progress = body["overallProgress"].as_f64().unwrap();
    assert!((progress - (20.0 + 60.0 + 90.0) / 3.0).abs() < 1e-9);

    let visa = &body["stageDistribution"][1];
    assert_eq!(visa["name"], "Visa Processing");
    assert_eq!(visa["value"], 2);
    assert_eq!(visa["status"], "critical");

    let training = &body["stageDistribution"][4];
    assert_eq!(training["value"], 1);
    assert_eq!(training["status"], "onprogress");
}

#[tokio::test]
async fn test_dashboard_filter_keeps_global_stage_counts() {
    let state = create_test_state();
    upload(&state, sample_rows()).await;

    let req = make_request("GET", "/api/dashboard?country=UK&batch=All%20Batches&stage=All%20Stages&program=All%20Programs", None);
    let body = response_json(app(&state).oneshot(req).await.unwrap()).await;

    assert_eq!(body["activeParticipants"], 2);
    assert_eq!(body["totalParticipants"], 3);
    assert!((body["overallProgress"].as_f64().unwrap() - 75.0).abs() < 1e-9);
    // Stage counts ignore the country filter.
    assert_eq!(body["stageDistribution"][1]["value"], 2);

    let filtered = body["filteredData"].as_array().unwrap();
    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|r| r["basicInfo"]["country"] == "UK"));
}

#[tokio::test]
async fn test_dashboard_all_countries_sentinel() {
    let state = create_test_state();
    upload(&state, sample_rows()).await;

    let req = make_request("GET", "/api/dashboard?country=All%20Countries&batch=2024-Q1", None);
    let body = response_json(app(&state).oneshot(req).await.unwrap()).await;
    assert_eq!(body["activeParticipants"], 2);
}

#[tokio::test]
async fn test_dashboard_no_match_progress_is_zero() {
    let state = create_test_state();
    upload(&state, sample_rows()).await;

    let req = make_request("GET", "/api/dashboard?country=Australia", None);
    let body = response_json(app(&state).oneshot(req).await.unwrap()).await;
    assert_eq!(body["activeParticipants"], 0);
    assert_eq!(body["overallProgress"], 0.0);
    assert_eq!(body["totalParticipants"], 3);
}

#[tokio::test]
async fn test_upload_upserts_by_month_country_stage() {
    let state = create_test_state();
    upload(&state, sample_rows()).await;

    let (status, body) = upload(&state, json!([
        {"month": "2024-01", "country": "UAE", "stage": "Visa Processing", "status": "onTrack", "progress": 80}
    ])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Processed 0 new and 1 existing documents");

    let req = make_request("GET", "/api/dashboard", None);
    let body = response_json(app(&state).oneshot(req).await.unwrap()).await;
    assert_eq!(body["totalParticipants"], 3);
    assert_eq!(body["stageDistribution"][1]["status"], "onTrack");
}

#[tokio::test]
async fn test_upload_identical_sheet_reports_no_existing_changes() {
    let state = create_test_state();
    upload(&state, sample_rows()).await;

    let (status, body) = upload(&state, sample_rows()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Processed 0 new and 0 existing documents");
    assert_eq!(body["report"]["unchanged"], 3);
}

#[tokio::test]
async fn test_upload_clamps_progress_out_of_range() {
    let state = create_test_state();
    let (status, body) = upload(&state, json!([
        {"month": "2024-01", "country": "UK", "stage": "Training", "progress": 250}
    ])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["report"]["clamped_progress"], 1);

    let req = make_request("GET", "/api/dashboard", None);
    let body = response_json(app(&state).oneshot(req).await.unwrap()).await;
    assert_eq!(body["overallProgress"], 100.0);
}

#[tokio::test]
async fn test_upload_empty_rows() {
    let state = create_test_state();
    let (status, body) = upload(&state, json!([])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No data to insert");
}

#[tokio::test]
async fn test_upload_bare_list() {
    let state = create_test_state();
    let req = make_request("POST", "/api/upload", Some(json!([{"stage": "Onboarding", "status": "delayed"}])));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.db.count().unwrap(), 1);
}

#[tokio::test]
async fn test_upload_without_rows() {
    let state = create_test_state();
    let req = make_request("POST", "/api/upload", Some(json!({"file": "march.xlsx"})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_over_limit() {
    let state = AppState { max_import_rows: 2, ..create_test_state() };
    let (status, body) = upload(&state, sample_rows()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("exceeds the limit"));
    assert_eq!(state.db.count().unwrap(), 0);
}

#[tokio::test]
async fn test_upload_unknown_status_is_stored_without_status() {
    let state = create_test_state();
    let (status, body) = upload(&state, json!([
        {"month": "2024-04", "country": "USA", "stage": "Onboarding", "status": "paused"}
    ])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["report"]["coerced_statuses"], 1);

    let req = make_request("GET", "/api/dashboard", None);
    let body = response_json(app(&state).oneshot(req).await.unwrap()).await;
    let onboarding = &body["stageDistribution"][2];
    assert_eq!(onboarding["value"], 1);
    assert_eq!(onboarding["status"], "onTrack");
}

#[tokio::test]
async fn test_create_record_insert_then_update() {
    let state = create_test_state();
    let record = json!({
        "month": "2024-05",
        "country": "Canada",
        "batch": "2024-Q2",
        "stage": "Acknowledgment",
        "program": "Hospitality",
        "status": "delayed",
        "progress": 35,
        "participants": 12
    });

    let req = make_request("POST", "/api/records", Some(record.clone()));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["outcome"], "inserted");
    assert_eq!(body["key"]["stage"], "Acknowledgment");

    let req = make_request("POST", "/api/records", Some(record.clone()));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["outcome"], "unchanged");

    let mut changed = record;
    changed["status"] = json!("critical");
    let req = make_request("POST", "/api/records", Some(changed));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["outcome"], "updated");

    let req = make_request("GET", "/api/records?country=Canada", None);
    let body = response_json(app(&state).oneshot(req).await.unwrap()).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["records"][0]["status"], "critical");
    assert_eq!(body["records"][0]["participants"], 12.0);
}

#[tokio::test]
async fn test_create_record_ignores_client_id() {
    let state = create_test_state();
    for (country, stage) in [("UAE", "Training"), ("UK", "Onboarding")] {
        let req = make_request("POST", "/api/records", Some(json!({
            "id": "not-a-uuid",
            "month": "2024-01",
            "country": country,
            "stage": stage,
            "status": "onTrack"
        })));
        let response = app(&state).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let records = state.db.fetch_all().unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.id.as_deref() != Some("not-a-uuid")));
    assert_ne!(records[0].id, records[1].id);
}

#[tokio::test]
async fn test_create_record_requires_stage() {
    let state = create_test_state();
    let req = make_request("POST", "/api/records", Some(json!({"country": "UAE", "status": "onTrack"})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["error"], "stage is required");
}

#[tokio::test]
async fn test_create_record_rejects_unknown_status() {
    let state = create_test_state();
    let req = make_request("POST", "/api/records", Some(json!({"stage": "Training", "status": "paused"})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(state.db.count().unwrap(), 0);
}

#[tokio::test]
async fn test_create_record_progress_out_of_range() {
    let state = create_test_state();
    let req = make_request("POST", "/api/records", Some(json!({"stage": "Training", "progress": 150})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
