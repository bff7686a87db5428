//! Lineup state: which player sits in which slot of the active formation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::{DEFAULT_LEAGUE, DEFAULT_SEASON};
use crate::data_fetcher::models::Player;
use crate::formation::Formation;

/// Mapping from slot index to player. Serialized as a JSON object keyed by
/// the decimal slot index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lineup {
    players: BTreeMap<usize, Player>,
}

impl Lineup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `player` in `slot`, replacing whoever was there. The index is not
    /// checked against the active formation.
    pub fn assign(&mut self, slot: usize, player: Player) {
        self.players.insert(slot, player);
    }

    pub fn clear(&mut self) {
        self.players.clear();
    }

    pub fn get(&self, slot: usize) -> Option<&Player> {
        self.players.get(&slot)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Assignments in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Player)> {
        self.players.iter().map(|(slot, player)| (*slot, player))
    }

    /// Slot indices that fall outside `formation`.
    pub fn stale_slots(&self, formation: &Formation) -> Vec<usize> {
        let total = formation.total_slots();
        self.players
            .keys()
            .copied()
            .filter(|slot| *slot >= total)
            .collect()
    }
}

impl FromIterator<(usize, Player)> for Lineup {
    fn from_iter<I: IntoIterator<Item = (usize, Player)>>(iter: I) -> Self {
        Lineup {
            players: iter.into_iter().collect(),
        }
    }
}

/// A lineup persisted under a user-chosen name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedLineup {
    pub name: String,
    pub formation: String,
    pub league: String,
    pub season: String,
    pub players: Lineup,
    pub created_at: DateTime<Utc>,
}

impl SavedLineup {
    /// One-line summary for lists, e.g. `4-3-3 • Premier League • 2024`.
    pub fn details(&self) -> String {
        format!(
            "{} • {} • {}",
            self.formation,
            crate::constants::league_name(&self.league),
            self.season
        )
    }
}

/// The single active document: formation, selectors and lineup.
#[derive(Debug, Clone)]
pub struct LineupState {
    formation: &'static Formation,
    pub league: String,
    pub season: String,
    lineup: Lineup,
}

impl Default for LineupState {
    fn default() -> Self {
        LineupState {
            formation: Formation::default_formation(),
            league: DEFAULT_LEAGUE.to_string(),
            season: DEFAULT_SEASON.to_string(),
            lineup: Lineup::new(),
        }
    }
}

impl LineupState {
    pub fn formation(&self) -> &'static Formation {
        self.formation
    }

    pub fn lineup(&self) -> &Lineup {
        &self.lineup
    }

    /// Switches formation. Existing assignments are always discarded.
    pub fn set_formation(&mut self, formation: &'static Formation) {
        self.formation = formation;
        self.lineup.clear();
    }

    pub fn assign(&mut self, slot: usize, player: Player) {
        self.lineup.assign(slot, player);
    }

    pub fn clear(&mut self) {
        self.lineup.clear();
    }

    /// Replaces formation, lineup and (when given) league and season
    /// wholesale. Nothing from the previous lineup survives.
    pub fn replace(
        &mut self,
        formation: &'static Formation,
        lineup: Lineup,
        league: Option<&str>,
        season: Option<&str>,
    ) {
        self.formation = formation;
        self.lineup = lineup;
        if let Some(league) = league {
            self.league = league.to_string();
        }
        if let Some(season) = season {
            self.season = season.to_string();
        }
    }

    /// Snapshot of the current state under `name`.
    pub fn to_saved(&self, name: &str, created_at: DateTime<Utc>) -> SavedLineup {
        SavedLineup {
            name: name.to_string(),
            formation: self.formation.key().to_string(),
            league: self.league.clone(),
            season: self.season.clone(),
            players: self.lineup.clone(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn player(id: i64, name: &str) -> Player {
        Player::new(id, name, "Midfielder", "Team 1")
    }

    #[test]
    fn test_assign_overwrites() {
        let mut lineup = Lineup::new();
        lineup.assign(3, player(1, "Toni Kroos"));
        lineup.assign(3, player(2, "Luka Modrić"));
        assert_eq!(lineup.len(), 1);
        assert_eq!(lineup.get(3).unwrap().name, "Luka Modrić");
    }

    #[test]
    fn test_assign_accepts_out_of_range_slot() {
        let mut state = LineupState::default();
        state.assign(42, player(1, "Casemiro"));
        assert_eq!(state.lineup().len(), 1);
        assert_eq!(state.lineup().stale_slots(state.formation()), vec![42]);
    }

    #[test]
    fn test_formation_change_resets_lineup() {
        let mut state = LineupState::default();
        state.assign(0, player(1, "Manuel Neuer"));
        state.assign(5, player(2, "Toni Kroos"));

        state.set_formation(Formation::get("4-3-3").unwrap());
        assert!(state.lineup().is_empty());
        assert_eq!(state.formation().key(), "4-3-3");

        state.assign(1, player(3, "Sergio Ramos"));
        state.set_formation(Formation::get("4-3-3").unwrap());
        assert!(state.lineup().is_empty(), "same formation still resets");
    }

    #[test]
    fn test_replace_does_not_merge() {
        let mut state = LineupState::default();
        state.assign(0, player(1, "Manuel Neuer"));
        state.assign(9, player(2, "Harry Kane"));

        let incoming: Lineup = [(4, player(3, "Joshua Kimmich"))].into_iter().collect();
        state.replace(
            Formation::get("3-5-2").unwrap(),
            incoming.clone(),
            Some("78"),
            Some("2023"),
        );

        assert_eq!(state.lineup(), &incoming);
        assert_eq!(state.formation().key(), "3-5-2");
        assert_eq!(state.league, "78");
        assert_eq!(state.season, "2023");
    }

    #[test]
    fn test_lineup_json_uses_string_slot_keys() {
        let lineup: Lineup = [(0, player(1, "Jan Oblak")), (10, player(2, "Harry Kane"))]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&lineup).unwrap();
        assert!(json.get("0").is_some());
        assert!(json.get("10").is_some());

        let back: Lineup = serde_json::from_value(json).unwrap();
        assert_eq!(back, lineup);
    }

    #[test]
    fn test_saved_lineup_json_shape() {
        let mut state = LineupState::default();
        state.assign(0, player(1, "Jan Oblak"));
        let created_at = Utc.with_ymd_and_hms(2024, 8, 17, 12, 30, 0).unwrap();
        let saved = state.to_saved("Weekend XI", created_at);

        let json = serde_json::to_value(&saved).unwrap();
        assert_eq!(json["name"], "Weekend XI");
        assert_eq!(json["formation"], "4-4-2");
        assert_eq!(json["league"], "39");
        assert_eq!(json["season"], "2024");
        assert_eq!(json["players"]["0"]["name"], "Jan Oblak");
        assert_eq!(json["createdAt"], "2024-08-17T12:30:00Z");
        assert_eq!(saved.details(), "4-4-2 • Premier League • 2024");
    }

    #[test]
    fn test_details_falls_back_to_league_id() {
        let mut state = LineupState::default();
        state.league = "203".to_string();
        let created_at = Utc.with_ymd_and_hms(2024, 8, 17, 12, 30, 0).unwrap();
        let saved = state.to_saved("Away XI", created_at);
        assert_eq!(saved.details(), "4-4-2 • 203 • 2024");
    }

    #[test]
    fn test_saved_lineup_accepts_browser_timestamp() {
        let json = r#"{
            "name": "Old",
            "formation": "4-5-1",
            "league": "140",
            "season": "2023",
            "players": {"2": {"id": 7, "name": "Marcelo", "position": "Defender", "team": "Team 5"}},
            "createdAt": "2024-05-01T09:15:42.123Z"
        }"#;
        let saved: SavedLineup = serde_json::from_str(json).unwrap();
        assert_eq!(saved.players.get(2).unwrap().name, "Marcelo");
        assert_eq!(saved.formation, "4-5-1");
    }
}
