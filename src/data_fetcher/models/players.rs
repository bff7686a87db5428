use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_POSITION_LABEL, DEFAULT_TEAM_LABEL};

/// A selectable player, as stored in lineups and share links.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default = "default_position")]
    pub position: String,
    #[serde(default = "default_team")]
    pub team: String,
}

fn default_position() -> String {
    DEFAULT_POSITION_LABEL.to_string()
}

fn default_team() -> String {
    DEFAULT_TEAM_LABEL.to_string()
}

impl Player {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        position: impl Into<String>,
        team: impl Into<String>,
    ) -> Self {
        Player {
            id,
            name: name.into(),
            photo: None,
            position: position.into(),
            team: team.into(),
        }
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    /// Photo URL, or the placeholder image when the player has none.
    pub fn photo_or_placeholder(&self) -> &str {
        self.photo
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(crate::constants::PLACEHOLDER_PHOTO_URL)
    }
}
