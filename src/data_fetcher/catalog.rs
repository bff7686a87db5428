//! The working set of selectable players.

use crate::data_fetcher::mock::generate_mock_players;
use crate::data_fetcher::models::Player;
use crate::formation::PositionType;

/// Where the current catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogSource {
    /// Nothing loaded yet
    #[default]
    Empty,
    /// Fetched from the API
    Live,
    /// Generated mock dataset
    Mock,
}

#[derive(Debug, Clone, Default)]
pub struct PlayerCatalog {
    players: Vec<Player>,
    source: CatalogSource,
}

impl PlayerCatalog {
    pub fn live(players: Vec<Player>) -> Self {
        PlayerCatalog {
            players,
            source: CatalogSource::Live,
        }
    }

    pub fn mock() -> Self {
        PlayerCatalog {
            players: generate_mock_players(),
            source: CatalogSource::Mock,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn source(&self) -> CatalogSource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Players whose position label contains a keyword of `position`.
    pub fn for_position(&self, position: PositionType) -> Vec<Player> {
        self.players
            .iter()
            .filter(|player| position.matches(&player.position))
            .cloned()
            .collect()
    }

    /// Same as [`for_position`](Self::for_position) for a category code such
    /// as `"MID"`. An unknown code yields the whole catalog.
    pub fn for_code(&self, code: &str) -> Vec<Player> {
        match PositionType::from_code(code) {
            Some(position) => self.for_position(position),
            None => self.players.clone(),
        }
    }
}
