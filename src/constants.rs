//! Application-wide constants and configuration values
//!
//! This module centralizes magic numbers, storage keys and default selector
//! values so the rest of the codebase can refer to them by name.

/// Default base URL of the API-Football service
pub const DEFAULT_API_BASE_URL: &str = "https://v3.football.api-sports.io";

/// Value sent in the `x-rapidapi-host` header
pub const API_HOST: &str = "v3.football.api-sports.io";

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-rapidapi-key";

/// Header carrying the API host
pub const API_HOST_HEADER: &str = "x-rapidapi-host";

/// Environment variable consulted for the API key before the local store
pub const API_KEY_ENV_VAR: &str = "API_FOOTBALL_KEY";

/// Default page the share link points at
pub const DEFAULT_SHARE_BASE_URL: &str = "http://localhost:8080/";

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of idle connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 4;

/// Directory name used under the platform config/data directories
pub const APP_DIR_NAME: &str = "lineup_builder";

/// Default log file name
pub const LOG_FILE_NAME: &str = "lineup_builder.log";

/// Local store keys
pub mod storage_keys {
    /// API key entered by the user
    pub const API_KEY: &str = "api_football_key";

    /// JSON array of saved lineups
    pub const SAVED_LINEUPS: &str = "savedLineups";
}

/// Query parameter carrying the share token
pub const SHARE_QUERY_PARAM: &str = "lineup";

/// Position label used when the API has no statistics for a player
pub const DEFAULT_POSITION_LABEL: &str = "Player";

/// Team label used when the API has no statistics for a player
pub const DEFAULT_TEAM_LABEL: &str = "Unknown";

/// Placeholder image used for players without a photo
pub const PLACEHOLDER_PHOTO_URL: &str = "https://via.placeholder.com/50";

/// Default formation key
pub const DEFAULT_FORMATION: &str = "4-4-2";

/// Selectable leagues as (API id, display name)
pub const LEAGUES: &[(&str, &str)] = &[
    ("39", "Premier League"),
    ("140", "La Liga"),
    ("135", "Serie A"),
    ("78", "Bundesliga"),
    ("61", "Ligue 1"),
];

/// Selectable seasons, newest first
pub const SEASONS: &[&str] = &["2024", "2023", "2022", "2021"];

/// Default league id
pub const DEFAULT_LEAGUE: &str = "39";

/// Default season id
pub const DEFAULT_SEASON: &str = "2024";

/// Seed for the mock player generator
pub const MOCK_PLAYER_SEED: u64 = 0x4c49_4e45_5550;

/// Export settings
pub mod export {
    /// Scale factor applied to the SVG capture
    pub const DEFAULT_SCALE: u32 = 2;

    /// Width of a single slot card in the SVG capture, before scaling
    pub const CARD_WIDTH: u32 = 120;

    /// Height of a single pitch row in the SVG capture, before scaling
    pub const ROW_HEIGHT: u32 = 90;

    /// Pitch width in the SVG capture, before scaling
    pub const PITCH_WIDTH: u32 = 680;
}

/// UI layout constants
pub mod ui {
    /// Content margin from terminal border
    pub const CONTENT_MARGIN: usize = 2;

    /// Width of a slot card on the terminal pitch
    pub const CARD_WIDTH: usize = 16;

    /// Default width for non-interactive rendering
    pub const DEFAULT_TEXT_WIDTH: usize = 80;

    /// Maximum rows shown in the player picker at once
    pub const PICKER_VISIBLE_ROWS: usize = 12;

    /// Polling interval for keyboard events in milliseconds
    pub const EVENT_POLL_MS: u64 = 250;
}

/// Display name for a league id, falling back to the id itself
pub fn league_name(id: &str) -> &str {
    LEAGUES
        .iter()
        .find(|(league_id, _)| *league_id == id)
        .map(|(_, name)| *name)
        .unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_league_name_lookup() {
        assert_eq!(league_name("39"), "Premier League");
        assert_eq!(league_name("78"), "Bundesliga");
        assert_eq!(league_name("999"), "999");
    }

    #[test]
    fn test_defaults_are_selectable() {
        assert!(LEAGUES.iter().any(|(id, _)| *id == DEFAULT_LEAGUE));
        assert!(SEASONS.contains(&DEFAULT_SEASON));
    }
}
