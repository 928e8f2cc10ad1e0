use std::path::Path;
use crate::errors::DashboardError;
use super::types::DashboardConfig;
use super::schema::CONFIG_SCHEMA;
use tracing::warn;

const MAX_CONFIG_BYTES: u64 = 1_048_576;
const LARGE_IMPORT_ROWS: usize = 1_000_000;

pub async fn parse_config(path: &Path) -> Result<DashboardConfig, DashboardError> {
    if !path.exists() {
        return Err(DashboardError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(DashboardError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;

    // An empty file is a valid, all-defaults config.
    if yaml.is_null() {
        return Ok(DashboardConfig::default());
    }

    validate_schema(&yaml)?;

    let config: DashboardConfig = serde_yaml::from_value(yaml)?;
    validate_semantics(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), DashboardError> {
    let json_value = serde_json::to_value(yaml)
        .map_err(|e| DashboardError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| DashboardError::Config(format!("Schema compilation error: {}", e)))?;

    if let Err(errors) = compiled.validate(&json_value) {
        let messages: Vec<String> = errors
            .map(|e| format!("{} at {}", e, e.instance_path))
            .collect();
        return Err(DashboardError::Config(format!("Invalid configuration: {}", messages.join("; "))));
    }

    Ok(())
}

fn validate_semantics(config: &DashboardConfig) -> Result<(), DashboardError> {
    if let Some(path) = config.store.as_ref().and_then(|s| s.path.as_deref()) {
        if Path::new(path).is_dir() {
            return Err(DashboardError::Config(format!(
                "store.path points to a directory, expected a database file: {}",
                path
            )));
        }
    }

    if let Some(max_rows) = config.import.as_ref().and_then(|i| i.max_rows) {
        if max_rows > LARGE_IMPORT_ROWS {
            warn!(max_rows, "Import row limit is very large; uploads are held in memory");
        }
    }

    Ok(())
}
