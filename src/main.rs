use clap::Parser;
use progress_dashboard::{cli, config, errors};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match (cli.quiet, cli.verbose) {
        (true, 0) => "warn",
        (_, 0) => "info",
        (_, 1) => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(!cli.no_color)
            .init();
    }

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let result = match cli.command {
        cli::Commands::Serve(args) => cli::serve::handle_serve(args).await,
        cli::Commands::Import(args) => cli::import::handle_import(args, cli.quiet).await,
        cli::Commands::Snapshot(args) => cli::snapshot::handle_snapshot(args).await,
        cli::Commands::Query(args) => cli::query::handle_query(args).await,
        cli::Commands::Validate(args) => handle_validate(args).await,
    };

    match result {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            let exit_code = match &e {
                errors::DashboardError::Config(_) => 2,
                errors::DashboardError::Database(_) => 3,
                errors::DashboardError::Import(_) | errors::DashboardError::InvalidRecord(_) => 4,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }
}

async fn handle_validate(args: cli::commands::ValidateArgs) -> Result<(), errors::DashboardError> {
    let path = std::path::PathBuf::from(&args.config);
    let config = config::parse_config(&path).await?;
    let settings = config.resolve(&config::Overrides::default());
    println!("Configuration is valid: {}", args.config);
    println!("  listen: {}:{}", settings.host, settings.port);
    println!("  store:  {}", settings.db_path);
    Ok(())
}
