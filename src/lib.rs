pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod errors;
pub mod import;
pub mod metrics;
pub mod models;
