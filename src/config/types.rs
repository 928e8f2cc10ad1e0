use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DB_PATH: &str = "./data/dashboard.db";
pub const DEFAULT_MAX_IMPORT_ROWS: usize = 10_000;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DashboardConfig {
    pub server: Option<ServerConfig>,
    pub store: Option<StoreConfig>,
    pub import: Option<ImportConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StoreConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ImportConfig {
    pub max_rows: Option<usize>,
}

/// Fully resolved settings after layering CLI flags over the file over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub db_path: String,
    pub max_import_rows: usize,
}

/// Values given on the command line; `None` defers to the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub db_path: Option<String>,
}

impl DashboardConfig {
    pub fn resolve(&self, overrides: &Overrides) -> Settings {
        let server = self.server.clone().unwrap_or_default();
        let store = self.store.clone().unwrap_or_default();
        let import = self.import.clone().unwrap_or_default();

        Settings {
            host: overrides.host.clone()
                .or(server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(server.port).unwrap_or(DEFAULT_PORT),
            db_path: overrides.db_path.clone()
                .or(store.path)
                .unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
            max_import_rows: import.max_rows.unwrap_or(DEFAULT_MAX_IMPORT_ROWS),
        }
    }
}
