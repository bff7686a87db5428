use crate::cli::Args;
use crate::commands::{APP_TITLE, create_capture, open_store, prepare_controller};
use crate::config::Config;
use crate::controller::LineupController;
use crate::error::AppError;
use crate::ui::{self, TerminalView};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use std::io::stdout;
use tracing::info;

/// Run the interactive application flow.
///
/// - Builds the controller and applies the startup flags
/// - Sets up terminal raw mode and alternate screen
/// - Runs the interactive UI
/// - Cleans up terminal state
pub async fn run_interactive(args: &Args, config: Config) -> Result<(), AppError> {
    let store = open_store(&config);
    let mut controller =
        LineupController::new(config, store, TerminalView::new(), create_capture(args))?;

    enable_raw_mode()?;
    let mut out = stdout();

    execute!(out, SetTitle(APP_TITLE))?;
    execute!(out, EnterAlternateScreen)?;

    let result = match prepare_controller(&mut controller, args).await {
        Ok(()) => {
            info!("Interactive session started");
            ui::run_interactive_ui(&mut controller).await
        }
        Err(e) => Err(e),
    };

    // Restore the terminal even when the UI failed
    execute!(out, Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;

    result
}
