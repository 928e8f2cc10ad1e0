use std::path::{Path, PathBuf};
use serde_json::Value;
use crate::errors::DashboardError;

/// Expand shell-style patterns into a sorted, de-duplicated file list.
pub fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>, DashboardError> {
    let mut paths = Vec::new();
    for pattern in patterns {
        let entries = glob::glob(pattern)
            .map_err(|e| DashboardError::Import(format!("Invalid pattern '{}': {}", pattern, e)))?;

        let mut matched = false;
        for entry in entries {
            let path = entry.map_err(|e| DashboardError::Import(format!("Unreadable path: {}", e)))?;
            if path.is_file() {
                paths.push(path);
                matched = true;
            }
        }

        if !matched {
            return Err(DashboardError::Import(format!("No files match '{}'", pattern)));
        }
    }

    paths.sort();
    paths.dedup();
    Ok(paths)
}

/// Read the rows of one exported sheet. JSON and YAML files must hold a
/// top-level list of row objects.
pub async fn load_rows(path: &Path) -> Result<Vec<Value>, DashboardError> {
    let content = tokio::fs::read_to_string(path).await?;
    let extension = path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let value: Value = match extension.as_deref() {
        Some("json") => serde_json::from_str(&content)?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        _ => {
            return Err(DashboardError::Import(format!(
                "Unsupported file type: {} (expected .json, .yaml or .yml)",
                path.display()
            )))
        }
    };

    match value {
        Value::Array(rows) => Ok(rows),
        _ => Err(DashboardError::Import(format!(
            "{} must contain a list of rows",
            path.display()
        ))),
    }
}
