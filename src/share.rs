//! Share links: a lineup packed into a URL query parameter.
//!
//! The token is the JSON document `{"formation": ..., "players": ...}`
//! encoded as URL-safe base64 without padding. Decoding also accepts
//! standard base64 so older links keep working.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::SHARE_QUERY_PARAM;
use crate::error::AppError;
use crate::formation::Formation;
use crate::lineup::Lineup;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedLineup {
    pub formation: String,
    pub players: Lineup,
}

impl SharedLineup {
    pub fn new(formation: &Formation, players: &Lineup) -> Self {
        SharedLineup {
            formation: formation.key().to_string(),
            players: players.clone(),
        }
    }

    /// The formation this link refers to, if it is a known one.
    pub fn resolve_formation(&self) -> Result<&'static Formation, AppError> {
        Formation::get(&self.formation)
            .ok_or_else(|| AppError::UnknownFormation(self.formation.clone()))
    }
}

pub fn encode_share_token(shared: &SharedLineup) -> Result<String, AppError> {
    let json = serde_json::to_string(shared)?;
    Ok(URL_SAFE_NO_PAD.encode(json.as_bytes()))
}

pub fn decode_share_token(token: &str) -> Result<SharedLineup, AppError> {
    // URLSearchParams-style decoding turns '+' into ' '
    let token: String = token
        .trim()
        .chars()
        .map(|c| if c == ' ' { '+' } else { c })
        .collect();
    if token.is_empty() {
        return Err(AppError::share_link("empty token"));
    }

    let bytes = match URL_SAFE_NO_PAD.decode(&token) {
        Ok(bytes) => bytes,
        Err(first_error) => [&URL_SAFE, &STANDARD, &STANDARD_NO_PAD]
            .into_iter()
            .find_map(|engine| engine.decode(&token).ok())
            .ok_or(first_error)?,
    };

    let shared: SharedLineup = serde_json::from_slice(&bytes)
        .map_err(|e| AppError::share_link(format!("payload is not a lineup: {e}")))?;
    Ok(shared)
}

/// Appends the token to `base_url` as the `lineup` query parameter,
/// replacing any previous `lineup` value and keeping other parameters.
pub fn build_share_url(base_url: &str, token: &str) -> Result<String, AppError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| AppError::config_error(format!("Invalid share base URL '{base_url}': {e}")))?;

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| name != SHARE_QUERY_PARAM)
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    url.set_query(None);
    {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in &kept {
            pairs.append_pair(name, value);
        }
        pairs.append_pair(SHARE_QUERY_PARAM, token);
    }
    Ok(url.to_string())
}

/// Pulls the token out of a full share URL, a bare query string, or returns
/// the input unchanged when it already looks like a token.
pub fn extract_share_token(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(url) = Url::parse(input)
        && url.query().is_some()
    {
        return url
            .query_pairs()
            .find(|(name, _)| name == SHARE_QUERY_PARAM)
            .map(|(_, value)| value.into_owned());
    }

    // Padded base64 ends in '=', so only a leading '?' or a `lineup=` pair
    // marks a query string
    let query = input.trim_start_matches('?');
    let prefix = format!("{SHARE_QUERY_PARAM}=");
    if input.starts_with('?') || query.split('&').any(|pair| pair.starts_with(&prefix)) {
        return query.split('&').find_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            (name == SHARE_QUERY_PARAM).then(|| value.to_string())
        });
    }

    Some(input.to_string())
}

/// Decodes a share URL or token into a known formation and lineup.
pub fn parse_share_input(input: &str) -> Result<(&'static Formation, Lineup), AppError> {
    let token = extract_share_token(input)
        .ok_or_else(|| AppError::share_link(format!("no '{SHARE_QUERY_PARAM}' parameter")))?;
    let shared = decode_share_token(&token)?;
    let formation = shared.resolve_formation()?;
    debug!(
        "Decoded share link: {} with {} players",
        formation.key(),
        shared.players.len()
    );
    Ok((formation, shared.players))
}
