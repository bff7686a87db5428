//! Presentation seam between the controller and whatever draws the screen.

use crate::data_fetcher::models::Player;
use crate::formation::{Formation, PositionType};
use crate::lineup::SavedLineup;
use crate::pitch::PitchLayout;

/// Message shown when a slot's filtered player list is empty.
pub const NO_PLAYERS_FOR_POSITION: &str = "No players found for this position.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Everything the controller needs from a front end.
///
/// `confirm` and `prompt` block until the user answers. A `prompt` that the
/// user cancels returns `None`.
pub trait LineupView {
    fn show_selectors(&mut self, formation: &'static Formation, league: &str, season: &str);

    fn render_pitch(&mut self, layout: &PitchLayout);

    /// Opens the picker for `slot` with the already filtered `players`.
    /// An empty list shows [`NO_PLAYERS_FOR_POSITION`].
    fn show_player_picker(&mut self, position: PositionType, slot: usize, players: &[Player]);

    fn hide_player_picker(&mut self);

    /// Lists saved lineups; an empty slice hides the list.
    fn show_saved_lineups(&mut self, saved: &[SavedLineup]);

    fn set_loading(&mut self, loading: bool);

    fn notify(&mut self, notice: Notice);

    fn confirm(&mut self, question: &str) -> bool;

    fn prompt(&mut self, question: &str) -> Option<String>;

    /// Hands a share link to the user: clipboard where available, otherwise
    /// shown for manual copying.
    fn present_share_link(&mut self, url: &str);
}
