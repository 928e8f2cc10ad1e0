pub mod parser;
pub mod schema;
pub mod types;

pub use types::*;
pub use parser::parse_config;

use std::path::Path;
use crate::errors::DashboardError;

/// Load the config file if one was given, then layer CLI overrides on top.
pub async fn load_settings(config_path: Option<&str>, overrides: &Overrides) -> Result<Settings, DashboardError> {
    let config = match config_path {
        Some(path) => parse_config(Path::new(path)).await?,
        None => DashboardConfig::default(),
    };
    Ok(config.resolve(overrides))
}
