use crate::api::models::DashboardResponse;
use crate::cli::commands::QueryArgs;
use crate::cli::render::render_snapshot;
use crate::errors::{with_retry, DashboardError, RetryConfig};
use crate::models::FilterParams;
use reqwest::StatusCode;
use tracing::info;

pub async fn handle_query(args: QueryArgs) -> Result<(), DashboardError> {
    let url = format!("{}/api/dashboard", args.url.trim_end_matches('/'));
    let params = query_pairs(&args.filter.to_params());
    info!(url = %url, filters = params.len(), "Querying dashboard");

    let client = reqwest::Client::new();
    let config = RetryConfig { max_attempts: args.retries, ..Default::default() };

    let response = with_retry("dashboard query", &config, || fetch(&client, &url, &params)).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", render_snapshot(&response.snapshot));
    }

    Ok(())
}

/// Present filters as query pairs; absent ones are left off so the server
/// treats them as unconstrained.
fn query_pairs(params: &FilterParams) -> Vec<(&'static str, String)> {
    [
        ("country", &params.country),
        ("batch", &params.batch),
        ("stage", &params.stage),
        ("program", &params.program),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.clone().map(|v| (key, v)))
    .collect()
}

async fn fetch(
    client: &reqwest::Client,
    url: &str,
    params: &[(&'static str, String)],
) -> Result<DashboardResponse, DashboardError> {
    let resp = client.get(url).query(params).send().await
        .map_err(|e| {
            if e.is_timeout() {
                DashboardError::Timeout(format!("Dashboard request timed out: {}", e))
            } else {
                DashboardError::Network(format!("Failed to query dashboard: {}", e))
            }
        })?;

    match resp.status() {
        StatusCode::GATEWAY_TIMEOUT => {
            Err(DashboardError::Timeout("Server answered 504 Gateway Timeout".into()))
        }
        status if status.is_success() => resp.json::<DashboardResponse>().await
            .map_err(|e| DashboardError::Internal(format!("Invalid dashboard response: {}", e))),
        status => {
            let body: serde_json::Value = resp.json().await.unwrap_or_default();
            let detail = body["message"].as_str()
                .or_else(|| body["error"].as_str())
                .unwrap_or("no details");
            Err(DashboardError::Internal(format!("Server returned {}: {}", status, detail)))
        }
    }
}
