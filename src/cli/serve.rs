use crate::cli::commands::ServeArgs;
use crate::config::{load_settings, Overrides};
use crate::errors::DashboardError;
use crate::api;
use tracing::info;

pub async fn handle_serve(args: ServeArgs) -> Result<(), DashboardError> {
    let overrides = Overrides {
        host: args.host,
        port: args.port,
        db_path: args.db,
    };
    let settings = load_settings(args.config.as_deref(), &overrides).await?;

    info!(host = %settings.host, port = settings.port, db = %settings.db_path, "Starting API server");

    let state = api::create_app_state(&settings.db_path, settings.max_import_rows).await?;
    let app = api::build_router(state);

    let addr = format!("{}:{}", settings.host, settings.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| DashboardError::Internal(format!("Server error: {}", e)))?;

    // The router, and with it the last store handle, is dropped here.
    info!("Server stopped, store released");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
