//! Line-oriented view for one-shot commands.

use std::io::{BufRead, Write};
use tracing::debug;

use crate::data_fetcher::models::Player;
use crate::formation::{Formation, PositionType};
use crate::lineup::SavedLineup;
use crate::pitch::PitchLayout;

use super::view::{LineupView, NO_PLAYERS_FOR_POSITION, Notice};

/// Prints notices and reads answers from stdin. Pitch painting is left to
/// the caller, which prints the final layout once.
#[derive(Debug, Default)]
pub struct ConsoleView {
    /// Answer every confirmation with yes
    pub assume_yes: bool,
}

impl ConsoleView {
    pub fn new(assume_yes: bool) -> Self {
        ConsoleView { assume_yes }
    }

    fn read_line(&self, question: &str) -> Option<String> {
        print!("{question} ");
        std::io::stdout().flush().ok()?;

        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

/// Formats the saved list the way `--list-saved` prints it.
pub fn format_saved_lineups(saved: &[SavedLineup]) -> Vec<String> {
    saved
        .iter()
        .enumerate()
        .map(|(index, lineup)| {
            format!(
                "{index:>3}  {}  ({})  {}",
                lineup.name,
                lineup.details(),
                lineup.created_at.format("%Y-%m-%d %H:%M")
            )
        })
        .collect()
}

impl LineupView for ConsoleView {
    fn show_selectors(&mut self, formation: &'static Formation, league: &str, season: &str) {
        debug!("Selectors: {formation} / {league} / {season}");
    }

    fn render_pitch(&mut self, layout: &PitchLayout) {
        debug!(
            "Pitch {} with {}/{} players",
            layout.formation(),
            layout.assigned_count(),
            layout.slot_count()
        );
    }

    fn show_player_picker(&mut self, position: PositionType, slot: usize, players: &[Player]) {
        println!("Select {} for slot {}:", position.display_name(), slot + 1);
        if players.is_empty() {
            println!("  {NO_PLAYERS_FOR_POSITION}");
        }
        for (i, player) in players.iter().enumerate() {
            println!("  {i:>3}  {} ({}, {})", player.name, player.position, player.team);
        }
    }

    fn hide_player_picker(&mut self) {}

    fn show_saved_lineups(&mut self, saved: &[SavedLineup]) {
        debug!("{} saved lineups", saved.len());
    }

    fn set_loading(&mut self, loading: bool) {
        if loading {
            println!("Loading players...");
        }
    }

    fn notify(&mut self, notice: Notice) {
        if notice.is_error() {
            eprintln!("{}", notice.text);
        } else {
            println!("{}", notice.text);
        }
    }

    fn confirm(&mut self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        self.read_line(&format!("{question} [y/N]"))
            .is_some_and(|answer| matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
    }

    fn prompt(&mut self, question: &str) -> Option<String> {
        self.read_line(question)
    }

    fn present_share_link(&mut self, url: &str) {
        println!("{url}");
    }
}
