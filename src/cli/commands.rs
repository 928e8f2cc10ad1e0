use clap::{Parser, Subcommand, Args};
use crate::models::FilterParams;

#[derive(Parser)]
#[command(name = "progress-dashboard", version, about = "Program progress reporting dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(ServeArgs),
    /// Bulk import rows from JSON or YAML files
    Import(ImportArgs),
    /// Compute a dashboard snapshot from the local store
    Snapshot(SnapshotArgs),
    /// Fetch a dashboard snapshot from a running server
    Query(QueryArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dimension filters shared by `snapshot` and `query`.
#[derive(Args, Clone, Default)]
pub struct FilterArgs {
    /// Country to restrict to ("All Countries" for none)
    #[arg(long)]
    pub country: Option<String>,

    /// Batch to restrict to ("All Batches" for none)
    #[arg(long)]
    pub batch: Option<String>,

    /// Stage to restrict to ("All Stages" for none)
    #[arg(long)]
    pub stage: Option<String>,

    /// Program to restrict to ("All Programs" for none)
    #[arg(long)]
    pub program: Option<String>,
}

impl FilterArgs {
    pub fn to_params(&self) -> FilterParams {
        FilterParams {
            country: self.country.clone(),
            batch: self.batch.clone(),
            stage: self.stage.clone(),
            program: self.program.clone(),
        }
    }
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(long)]
    pub port: Option<u16>,

    /// Listen address
    #[arg(long)]
    pub host: Option<String>,

    /// SQLite database path
    #[arg(long)]
    pub db: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,
}

#[derive(Args, Clone)]
pub struct ImportArgs {
    /// Files or glob patterns (.json, .yaml, .yml)
    #[arg(required = true)]
    pub files: Vec<String>,

    /// SQLite database path
    #[arg(long)]
    pub db: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,
}

#[derive(Args, Clone)]
pub struct SnapshotArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// SQLite database path
    #[arg(long)]
    pub db: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct QueryArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Base URL of the dashboard server
    #[arg(long, default_value = "http://localhost:8080")]
    pub url: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Attempts before giving up on timeouts
    #[arg(long, default_value = "3")]
    pub retries: u32,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
