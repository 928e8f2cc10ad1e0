pub mod commands;
pub mod import;
pub mod query;
pub mod render;
pub mod serve;
pub mod snapshot;

pub use commands::{Cli, Commands};
