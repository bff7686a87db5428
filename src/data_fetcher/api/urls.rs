//! URL building utilities for API endpoints

/// Builds the players URL for a league and season.
///
/// # Arguments
/// * `api_base_url` - The base API URL
/// * `league` - The league id (e.g. "39" for the Premier League)
/// * `season` - The season year (e.g. "2024")
///
/// # Returns
/// * `String` - The complete players URL
///
/// # Example
/// ```
/// use lineup_builder::data_fetcher::api::build_players_url;
///
/// let url = build_players_url("https://v3.football.api-sports.io", "39", "2024");
/// assert_eq!(url, "https://v3.football.api-sports.io/players?league=39&season=2024");
/// ```
pub fn build_players_url(api_base_url: &str, league: &str, season: &str) -> String {
    let base = api_base_url.trim_end_matches('/');
    format!("{base}/players?league={league}&season={season}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_players_url_trims_trailing_slash() {
        assert_eq!(
            build_players_url("http://localhost:8080/", "140", "2023"),
            "http://localhost:8080/players?league=140&season=2023"
        );
    }
}
