use crate::cli::Args;
use crate::config::Config;
use crate::constants::{storage_keys, ui::DEFAULT_TEXT_WIDTH};
use crate::controller::LineupController;
use crate::error::AppError;
use crate::export::{PitchCapture, SvgCapture, TextCapture};
use crate::formation::Formation;
use crate::storage::LocalStore;
use crate::ui::console::format_saved_lineups;
use crate::ui::{ConsoleView, LineupView};
use crate::version;
use crossterm::{execute, terminal::SetTitle};
use std::io::stdout;
use tracing::info;

pub const APP_TITLE: &str = "Lineup Builder";

/// Validates command line argument combinations.
///
/// Returns an error if incompatible arguments are used together or a
/// selector value is unusable.
pub fn validate_args(args: &Args) -> Result<(), AppError> {
    if let Some(key) = &args.formation {
        if Formation::get(key).is_none() {
            return Err(AppError::UnknownFormation(key.clone()));
        }
        if args.lineup.is_some() || args.load_saved.is_some() {
            return Err(AppError::config_error(
                "--formation cannot be combined with --lineup or --load-saved",
            ));
        }
    }

    if args.lineup.is_some() && args.load_saved.is_some() {
        return Err(AppError::config_error(
            "Cannot use both --lineup and --load-saved",
        ));
    }

    if let Some(league) = &args.league {
        if league.is_empty() || !league.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::config_error(format!(
                "League must be a numeric id, got '{league}'"
            )));
        }
    }

    if let Some(season) = &args.season {
        if season.len() != 4 || !season.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::config_error(format!(
                "Season must be a four-digit year, got '{season}'"
            )));
        }
    }

    let saved_commands = [args.delete_saved, args.share_saved, args.export_saved]
        .iter()
        .filter(|command| command.is_some())
        .count();
    if saved_commands > 1 {
        return Err(AppError::config_error(
            "Use only one of --delete-saved, --share-saved and --export-saved",
        ));
    }

    if args.set_api_key.is_some() && args.clear_api_key {
        return Err(AppError::config_error(
            "Cannot use both --set-api-key and --clear-api-key",
        ));
    }
    if args.set_api_key.as_deref().is_some_and(|key| key.trim().is_empty()) {
        return Err(AppError::config_error("API key cannot be empty"));
    }

    if args.new_log_file_path.is_some() && args.clear_log_file_path {
        return Err(AppError::config_error(
            "Cannot use both --set-log-file and --clear-log-file",
        ));
    }

    Ok(())
}

/// SVG unless `--text` asks for the plain-text rendering.
pub fn create_capture(args: &Args) -> Box<dyn PitchCapture> {
    if args.text {
        Box::new(TextCapture::default())
    } else {
        Box::new(SvgCapture::default())
    }
}

pub fn open_store(config: &Config) -> LocalStore {
    LocalStore::new(config.storage_dir())
}

/// Applies the startup flags to a freshly built controller: share link,
/// saved lineup, selectors and the mock squad.
pub async fn prepare_controller<V: LineupView>(
    controller: &mut LineupController<V>,
    args: &Args,
) -> Result<(), AppError> {
    controller.start(args.lineup.as_deref()).await;

    if let Some(index) = args.load_saved {
        if !controller.load_saved(index).await {
            return Err(AppError::config_error(format!(
                "No saved lineup at index {index}"
            )));
        }
    }

    if let Some(formation) = args.formation.as_deref().and_then(Formation::get) {
        controller.change_formation(formation);
    }
    if let Some(league) = &args.league {
        controller.change_league(league);
    }
    if let Some(season) = &args.season {
        controller.change_season(season);
    }
    if args.mock {
        controller.use_mock_players();
    }

    Ok(())
}

/// Handles the --version command.
pub async fn handle_version_command() -> Result<(), AppError> {
    execute!(stdout(), SetTitle(APP_TITLE))?;

    version::print_logo();
    version::print_version_info();

    Ok(())
}

/// Handles the --list-config command.
///
/// Displays current configuration settings with logo.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    execute!(stdout(), SetTitle(APP_TITLE))?;

    version::print_logo();
    Config::display().await?;

    Ok(())
}

/// Handles configuration update commands (--set-log-file, --clear-log-file).
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let mut config = Config::load().await.unwrap_or_default();

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.save().await?;
    println!("Config updated successfully!");

    Ok(())
}

/// Handles --set-api-key and --clear-api-key against the local store.
pub async fn handle_api_key_command(args: &Args, config: &Config) -> Result<(), AppError> {
    let store = open_store(config);

    if let Some(key) = &args.set_api_key {
        store.set_item(storage_keys::API_KEY, key.trim()).await?;
        info!("API key stored in {}", store.root().display());
        println!("API key saved.");
    } else if args.clear_api_key {
        store.remove_item(storage_keys::API_KEY).await?;
        println!("API key removed.");
    }

    Ok(())
}

/// Handles --list-saved.
pub async fn handle_list_saved_command(config: &Config) -> Result<(), AppError> {
    let saved = open_store(config).saved_lineups().await?;

    if saved.is_empty() {
        println!("No saved lineups yet");
        return Ok(());
    }
    for line in format_saved_lineups(&saved) {
        println!("{line}");
    }

    Ok(())
}

/// Handles --delete-saved, --share-saved and --export-saved.
pub async fn handle_saved_lineup_command(args: &Args, config: &Config) -> Result<(), AppError> {
    let store = open_store(config);
    let view = ConsoleView::new(args.yes);
    let mut controller = LineupController::new(config.clone(), store, view, create_capture(args))?;

    if let Some(index) = args.delete_saved {
        if controller.store().saved_lineup(index).await?.is_none() {
            return Err(AppError::config_error(format!(
                "No saved lineup at index {index}"
            )));
        }
        if controller.delete_saved(index).await {
            println!("Lineup deleted.");
        } else {
            println!("Nothing deleted.");
        }
        return Ok(());
    }

    let index = args.share_saved.or(args.export_saved);
    let Some(index) = index else {
        return Ok(());
    };
    if !controller.load_saved(index).await {
        return Err(AppError::config_error(format!(
            "No saved lineup at index {index}"
        )));
    }

    if args.share_saved.is_some() {
        controller
            .share()
            .ok_or_else(|| AppError::share_link("could not build share link"))?;
    } else {
        controller
            .export()
            .await
            .ok_or_else(|| AppError::export_error("could not write export file"))?;
    }

    Ok(())
}

/// Handles the --once command.
///
/// Applies the startup flags and prints the pitch once. With `--mock` the
/// squad size is reported as well.
pub async fn handle_once_command(args: &Args, config: &Config) -> Result<(), AppError> {
    let store = open_store(config);
    let view = ConsoleView::new(args.yes);
    let mut controller = LineupController::new(config.clone(), store, view, create_capture(args))?;

    prepare_controller(&mut controller, args).await?;

    execute!(stdout(), SetTitle(APP_TITLE))?;

    let layout = controller.layout();
    for line in layout.to_text(DEFAULT_TEXT_WIDTH) {
        println!("{line}");
    }
    if args.mock {
        println!();
        println!("{} mock players available", controller.catalog().len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(flags: &[&str]) -> Args {
        Args::parse_from(std::iter::once("lineup_builder").chain(flags.iter().copied()))
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(validate_args(&parse(&[])).is_ok());
        assert!(validate_args(&parse(&["--formation", "3-5-2", "--league", "140"])).is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_formation() {
        let result = validate_args(&parse(&["--formation", "2-2-2"]));
        assert!(matches!(result, Err(AppError::UnknownFormation(key)) if key == "2-2-2"));
    }

    #[test]
    fn test_validate_rejects_conflicting_sources() {
        assert!(validate_args(&parse(&["--lineup", "abc", "--load-saved", "0"])).is_err());
        assert!(validate_args(&parse(&["--formation", "4-3-3", "--lineup", "abc"])).is_err());
        assert!(validate_args(&parse(&["--share-saved", "0", "--export-saved", "0"])).is_err());
        assert!(validate_args(&parse(&["--set-api-key", "k", "--clear-api-key"])).is_err());
    }

    #[test]
    fn test_validate_selector_values() {
        assert!(validate_args(&parse(&["--league", "premier"])).is_err());
        assert!(validate_args(&parse(&["--season", "24"])).is_err());
        assert!(validate_args(&parse(&["--season", "2022"])).is_ok());
        assert!(validate_args(&parse(&["--set-api-key", "  "])).is_err());
    }

    #[test]
    fn test_create_capture_follows_text_flag() {
        let layout = crate::pitch::PitchLayout::build(
            Formation::default_formation(),
            &crate::lineup::Lineup::new(),
        );
        let text = create_capture(&parse(&["--text"])).capture(&layout).unwrap();
        assert_eq!(text.extension, "txt");
        let svg = create_capture(&parse(&[])).capture(&layout).unwrap();
        assert_eq!(svg.extension, "svg");
    }
}
