use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Determines if the application should run in non-interactive mode
/// Non-interactive mode is used when any of these conditions are met:
/// - --once flag is set (print the lineup once and exit)
/// - a saved-lineup command (list, delete, share, export) is requested
/// - API key or config operations are requested
/// - --version flag is set
pub fn is_noninteractive_mode(args: &Args) -> bool {
    args.once
        || args.list_saved
        || args.delete_saved.is_some()
        || args.share_saved.is_some()
        || args.export_saved.is_some()
        || args.set_api_key.is_some()
        || args.clear_api_key
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
        || args.list_config
        || args.version
}

/// Football Lineup Builder
///
/// Pick a formation, fill it with players from API-Football (or a mock
/// squad) and save, share or export the lineup.
///
/// In interactive mode (default):
/// - f / F cycle the formation, l the league, y the season
/// - p loads players for the selected league and season
/// - Arrow keys move between slots, Enter opens the player list
/// - s saves, c clears, e exports, h shares, o opens saved lineups
/// - q quits
///
/// The API key is read from the API_FOOTBALL_KEY environment variable or
/// stored with --set-api-key. Without a key the mock squad is used.
#[derive(Parser, Debug, Default)]
#[command(author = "Lineup Builder Contributors", about, long_about = None)]
#[command(disable_version_flag = true)]
#[command(styles = get_styles())]
pub struct Args {
    /// Print the lineup once and exit. Useful for scripts; the output stays
    /// visible in terminal history.
    #[arg(short, long)]
    pub once: bool,

    /// Formation to start with, e.g. 4-3-3
    #[arg(long = "formation", short = 'f', help_heading = "Lineup")]
    pub formation: Option<String>,

    /// League id to load players from (39, 140, 135, 78, 61)
    #[arg(long = "league", help_heading = "Lineup")]
    pub league: Option<String>,

    /// Season year to load players from
    #[arg(long = "season", help_heading = "Lineup")]
    pub season: Option<String>,

    /// Open a shared lineup, given as a share URL or bare token
    #[arg(long = "lineup", value_name = "TOKEN|URL", help_heading = "Lineup")]
    pub lineup: Option<String>,

    /// Use the mock squad instead of calling the API
    #[arg(long = "mock", help_heading = "Lineup")]
    pub mock: bool,

    /// List saved lineups with their indices
    #[arg(long = "list-saved", help_heading = "Saved Lineups")]
    pub list_saved: bool,

    /// Start with the saved lineup at this index
    #[arg(long = "load-saved", value_name = "N", help_heading = "Saved Lineups")]
    pub load_saved: Option<usize>,

    /// Delete the saved lineup at this index
    #[arg(long = "delete-saved", value_name = "N", help_heading = "Saved Lineups")]
    pub delete_saved: Option<usize>,

    /// Print a share link for the saved lineup at this index
    #[arg(long = "share-saved", value_name = "N", help_heading = "Saved Lineups")]
    pub share_saved: Option<usize>,

    /// Export the saved lineup at this index
    #[arg(long = "export-saved", value_name = "N", help_heading = "Saved Lineups")]
    pub export_saved: Option<usize>,

    /// Answer yes to confirmation questions
    #[arg(long = "yes", short = 'y', help_heading = "Saved Lineups")]
    pub yes: bool,

    /// Export as plain text instead of SVG
    #[arg(long = "text", help_heading = "Export")]
    pub text: bool,

    /// Store the API-Football key in the local store
    #[arg(long = "set-api-key", value_name = "KEY", help_heading = "Configuration")]
    pub set_api_key: Option<String>,

    /// Remove the stored API-Football key
    #[arg(long = "clear-api-key", help_heading = "Configuration")]
    pub clear_api_key: bool,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Show version information
    #[arg(short = 'V', long = "version", help_heading = "Info")]
    pub version: bool,

    /// Enable debug-level logging.
    /// With --once, logs are also printed to the terminal.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lineup_flags() {
        let args = Args::parse_from([
            "lineup_builder",
            "--formation",
            "4-3-3",
            "--league",
            "140",
            "--season",
            "2023",
            "--mock",
            "--once",
        ]);
        assert_eq!(args.formation.as_deref(), Some("4-3-3"));
        assert_eq!(args.league.as_deref(), Some("140"));
        assert_eq!(args.season.as_deref(), Some("2023"));
        assert!(args.mock);
        assert!(is_noninteractive_mode(&args));
    }

    #[test]
    fn test_default_is_interactive() {
        let args = Args::parse_from(["lineup_builder"]);
        assert!(!is_noninteractive_mode(&args));

        let args = Args::parse_from(["lineup_builder", "--load-saved", "2", "--debug"]);
        assert_eq!(args.load_saved, Some(2));
        assert!(!is_noninteractive_mode(&args));
    }

    #[test]
    fn test_saved_commands_are_noninteractive() {
        for flags in [
            vec!["--list-saved"],
            vec!["--delete-saved", "0"],
            vec!["--share-saved", "1"],
            vec!["--export-saved", "1", "--text"],
            vec!["--set-api-key", "abc"],
            vec!["--clear-api-key"],
            vec!["--list-config"],
            vec!["-V"],
        ] {
            let args = Args::parse_from(std::iter::once("lineup_builder").chain(flags.clone()));
            assert!(is_noninteractive_mode(&args), "{flags:?}");
        }
    }

    #[test]
    fn test_saved_index_must_be_number() {
        assert!(Args::try_parse_from(["lineup_builder", "--load-saved", "first"]).is_err());
    }
}
