//! Wire types for the API-Football `/players` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::players::Player;
use crate::constants::{DEFAULT_POSITION_LABEL, DEFAULT_TEAM_LABEL};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlayersResponse {
    #[serde(default)]
    pub response: Vec<PlayerEntry>,
    /// Either an array of `{ "message": ... }` objects or an object of
    /// field → message, depending on the failure.
    #[serde(default)]
    pub errors: Value,
    #[serde(default)]
    pub results: Option<u32>,
    #[serde(default)]
    pub paging: Option<Paging>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging {
    pub current: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub player: ApiPlayer,
    #[serde(default)]
    pub statistics: Vec<PlayerStatistics>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiPlayer {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlayerStatistics {
    #[serde(default)]
    pub team: Option<StatisticsTeam>,
    #[serde(default)]
    pub games: Option<StatisticsGames>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StatisticsTeam {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StatisticsGames {
    #[serde(default)]
    pub position: Option<String>,
}

impl PlayersResponse {
    /// Messages listed in the `errors` field, in payload order.
    pub fn error_messages(&self) -> Vec<String> {
        match &self.errors {
            Value::Array(items) => items.iter().map(error_item_message).collect(),
            Value::Object(fields) => fields.values().map(error_item_message).collect(),
            Value::String(message) if !message.is_empty() => vec![message.clone()],
            _ => Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.error_messages().is_empty()
    }
}

fn error_item_message(item: &Value) -> String {
    match item {
        Value::String(message) => message.clone(),
        Value::Object(fields) => match fields.get("message") {
            Some(Value::String(message)) => message.clone(),
            _ => item.to_string(),
        },
        other => other.to_string(),
    }
}

impl From<PlayerEntry> for Player {
    /// Uses the first statistics entry for position and team.
    fn from(entry: PlayerEntry) -> Self {
        let first = entry.statistics.into_iter().next().unwrap_or_default();
        let position = first
            .games
            .and_then(|games| games.position)
            .filter(|position| !position.is_empty())
            .unwrap_or_else(|| DEFAULT_POSITION_LABEL.to_string());
        let team = first
            .team
            .and_then(|team| team.name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_TEAM_LABEL.to_string());

        Player {
            id: entry.player.id,
            name: entry.player.name,
            photo: entry.player.photo,
            position,
            team,
        }
    }
}
