use crate::config::Config;
use crate::constants::{API_KEY_ENV_VAR, storage_keys};
use crate::data_fetcher::models::{Player, PlayersResponse};
use crate::error::AppError;
use crate::storage::LocalStore;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use super::fetch_utils::fetch;
use super::urls::build_players_url;

/// Resolves the API key: the `API_FOOTBALL_KEY` environment variable wins,
/// then the `api_football_key` entry of the local store. Blank values count
/// as absent.
pub async fn resolve_api_key(store: &LocalStore) -> Result<Option<String>, AppError> {
    if let Some(key) = std::env::var(API_KEY_ENV_VAR)
        .ok()
        .filter(|key| !key.trim().is_empty())
    {
        debug!("Using API key from {API_KEY_ENV_VAR}");
        return Ok(Some(key.trim().to_string()));
    }

    let stored = store.get_item(storage_keys::API_KEY).await?;
    Ok(stored
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty()))
}

/// Fetches players for a league and season and maps them to [`Player`]s.
///
/// An empty `response` array is a successful, empty result. A payload that
/// lists errors fails with [`AppError::ApiReported`] carrying the first
/// message. A missing key fails before any request is sent.
///
/// The caller decides what to do on failure; nothing here substitutes mock
/// data.
///
/// # Arguments
/// * `client` - HTTP client for making requests
/// * `config` - Configuration with the API base URL
/// * `api_key` - API key, `None` if not configured
/// * `league` - League id
/// * `season` - Season year
#[instrument(skip(client, config, api_key))]
pub async fn fetch_players(
    client: &Client,
    config: &Config,
    api_key: Option<&str>,
    league: &str,
    season: &str,
) -> Result<Vec<Player>, AppError> {
    let api_key = api_key
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or(AppError::MissingApiKey)?;

    let url = build_players_url(&config.api_base_url, league, season);
    let response: PlayersResponse = fetch(client, &url, api_key).await?;

    if response.has_errors() {
        let messages = response.error_messages();
        warn!("API reported {} error(s) for {url}: {:?}", messages.len(), messages);
        let message = messages
            .into_iter()
            .next()
            .filter(|first| !first.trim().is_empty())
            .unwrap_or_else(|| "API Error".to_string());
        return Err(AppError::api_reported(message));
    }

    if let Some(paging) = &response.paging {
        debug!("Players page {}/{} for {url}", paging.current, paging.total);
    }

    let players: Vec<Player> = response.response.into_iter().map(Player::from).collect();
    info!(
        "Fetched {} players for league {league}, season {season}",
        players.len()
    );
    Ok(players)
}
