use std::collections::VecDeque;

use crate::data_fetcher::models::Player;
use crate::formation::{Formation, PositionType};
use crate::lineup::{Lineup, SavedLineup};
use crate::pitch::PitchLayout;
use crate::ui::view::{LineupView, Notice};
use chrono::{TimeZone, Utc};

/// Test utilities for creating players, lineups and API payloads
pub struct TestDataBuilder;

impl TestDataBuilder {
    pub fn create_player(id: i64, name: &str, position: &str) -> Player {
        Player::new(id, name, position, "Test FC")
    }

    /// A goalkeeper, two defenders, a midfielder and a forward
    pub fn create_squad() -> Vec<Player> {
        vec![
            Self::create_player(1, "Alisson", "Goalkeeper"),
            Self::create_player(2, "Virgil van Dijk", "Defender"),
            Self::create_player(3, "Andrew Robertson", "Defender"),
            Self::create_player(4, "Alexis Mac Allister", "Midfielder"),
            Self::create_player(5, "Mohamed Salah", "Attacker"),
        ]
    }

    pub fn create_lineup(entries: &[(usize, &str)]) -> Lineup {
        entries
            .iter()
            .enumerate()
            .map(|(i, (slot, name))| (*slot, Self::create_player(i as i64 + 1, name, "Midfielder")))
            .collect()
    }

    pub fn create_saved_lineup(name: &str, formation: &str, players: Lineup) -> SavedLineup {
        SavedLineup {
            name: name.to_string(),
            formation: formation.to_string(),
            league: "39".to_string(),
            season: "2024".to_string(),
            players,
            created_at: Utc.with_ymd_and_hms(2024, 8, 17, 12, 0, 0).single().unwrap_or_default(),
        }
    }

    /// `/players` response body in the API's shape
    pub fn create_players_body(players: &[Player]) -> serde_json::Value {
        let response: Vec<serde_json::Value> = players
            .iter()
            .map(|player| {
                serde_json::json!({
                    "player": {"id": player.id, "name": player.name, "photo": player.photo},
                    "statistics": [{
                        "team": {"id": 1, "name": player.team},
                        "games": {"position": player.position}
                    }]
                })
            })
            .collect();
        serde_json::json!({
            "get": "players",
            "errors": [],
            "results": response.len(),
            "paging": {"current": 1, "total": 1},
            "response": response
        })
    }
}

/// A picker as last shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerSnapshot {
    pub position: PositionType,
    pub slot: usize,
    pub players: Vec<Player>,
}

/// [`LineupView`] that records every call and answers `confirm`/`prompt`
/// from scripted queues.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub selectors: Option<(String, String, String)>,
    pub pitch: Option<PitchLayout>,
    pub render_count: usize,
    pub picker: Option<PickerSnapshot>,
    pub saved: Vec<SavedLineup>,
    pub saved_visible: bool,
    pub loading_changes: Vec<bool>,
    pub notices: Vec<Notice>,
    pub questions: Vec<String>,
    pub shared_links: Vec<String>,
    confirm_answers: VecDeque<bool>,
    prompt_answers: VecDeque<Option<String>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the answer for the next `confirm`. Unscripted confirms answer no.
    pub fn answer_confirm(&mut self, answer: bool) -> &mut Self {
        self.confirm_answers.push_back(answer);
        self
    }

    /// Queues the answer for the next `prompt`. Unscripted prompts cancel.
    pub fn answer_prompt(&mut self, answer: Option<&str>) -> &mut Self {
        self.prompt_answers.push_back(answer.map(str::to_string));
        self
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub fn notice_texts(&self) -> Vec<&str> {
        self.notices.iter().map(|n| n.text.as_str()).collect()
    }
}

impl LineupView for RecordingView {
    fn show_selectors(&mut self, formation: &'static Formation, league: &str, season: &str) {
        self.selectors = Some((
            formation.key().to_string(),
            league.to_string(),
            season.to_string(),
        ));
    }

    fn render_pitch(&mut self, layout: &PitchLayout) {
        self.pitch = Some(layout.clone());
        self.render_count += 1;
    }

    fn show_player_picker(&mut self, position: PositionType, slot: usize, players: &[Player]) {
        self.picker = Some(PickerSnapshot {
            position,
            slot,
            players: players.to_vec(),
        });
    }

    fn hide_player_picker(&mut self) {
        self.picker = None;
    }

    fn show_saved_lineups(&mut self, saved: &[SavedLineup]) {
        self.saved = saved.to_vec();
        self.saved_visible = !saved.is_empty();
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading_changes.push(loading);
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn confirm(&mut self, question: &str) -> bool {
        self.questions.push(question.to_string());
        self.confirm_answers.pop_front().unwrap_or(false)
    }

    fn prompt(&mut self, question: &str) -> Option<String> {
        self.questions.push(question.to_string());
        self.prompt_answers.pop_front().flatten()
    }

    fn present_share_link(&mut self, url: &str) {
        self.shared_links.push(url.to_string());
    }
}
