// src/main.rs
use clap::Parser;
use lineup_builder::cli::Args;
use lineup_builder::config::Config;
use lineup_builder::error::AppError;
use lineup_builder::logging::setup_logging;
use lineup_builder::{app, commands};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    commands::validate_args(&args)?;

    // The guard must be kept alive until the program exits
    let (log_file_path, _guard) = setup_logging(&args).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    // Handle version flag first
    if args.version {
        return commands::handle_version_command().await;
    }

    if args.list_config {
        return commands::handle_list_config_command().await;
    }

    if args.new_log_file_path.is_some() || args.clear_log_file_path {
        return commands::handle_config_update_command(&args).await;
    }

    // Load config first to fail early if there's an issue
    let config = Config::load().await?;

    if args.set_api_key.is_some() || args.clear_api_key {
        return commands::handle_api_key_command(&args, &config).await;
    }

    if args.list_saved {
        return commands::handle_list_saved_command(&config).await;
    }

    if args.delete_saved.is_some() || args.share_saved.is_some() || args.export_saved.is_some() {
        return commands::handle_saved_lineup_command(&args, &config).await;
    }

    if args.once {
        return commands::handle_once_command(&args, &config).await;
    }

    app::run_interactive(&args, config).await
}
