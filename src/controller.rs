//! The lineup controller: owns the application state and implements every
//! user action against a [`LineupView`].
//!
//! Handlers never fail outward. Problems are logged and reported through
//! the view, and the state stays usable.

use chrono::Utc;
use reqwest::Client;
use std::path::PathBuf;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::constants::{LEAGUES, SEASONS};
use crate::data_fetcher::api::{create_http_client_with_timeout, fetch_players, resolve_api_key};
use crate::data_fetcher::models::Player;
use crate::data_fetcher::{CatalogSource, PlayerCatalog};
use crate::error::AppError;
use crate::export::{PitchCapture, export_pitch};
use crate::formation::{Formation, PositionType};
use crate::lineup::{LineupState, SavedLineup};
use crate::pitch::PitchLayout;
use crate::share::{SharedLineup, build_share_url, encode_share_token, parse_share_input};
use crate::storage::LocalStore;
use crate::ui::view::{LineupView, Notice};

pub const MSG_LOAD_PLAYERS_FIRST: &str = "Please load players first!";
pub const MSG_CREATE_LINEUP_FIRST: &str = "Please create a lineup first!";
pub const MSG_NO_PLAYERS_FOUND: &str = "No players found. Try a different league or season.";
pub const PROMPT_LINEUP_NAME: &str = "Enter a name for this lineup:";
pub const CONFIRM_DELETE: &str = "Delete this lineup?";
pub const CONFIRM_CLEAR: &str = "Clear all players from the lineup?";

/// The open player picker: which slot it fills and the list it shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerState {
    pub slot: usize,
    pub position: PositionType,
    pub players: Vec<Player>,
}

pub struct LineupController<V: LineupView> {
    state: LineupState,
    catalog: PlayerCatalog,
    picker: Option<PickerState>,
    config: Config,
    store: LocalStore,
    client: Client,
    capture: Box<dyn PitchCapture>,
    view: V,
}

impl<V: LineupView> LineupController<V> {
    pub fn new(
        config: Config,
        store: LocalStore,
        view: V,
        capture: Box<dyn PitchCapture>,
    ) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(LineupController {
            state: LineupState::default(),
            catalog: PlayerCatalog::default(),
            picker: None,
            config,
            store,
            client,
            capture,
            view,
        })
    }

    pub fn state(&self) -> &LineupState {
        &self.state
    }

    pub fn catalog(&self) -> &PlayerCatalog {
        &self.catalog
    }

    pub fn picker(&self) -> Option<&PickerState> {
        self.picker.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    pub fn layout(&self) -> PitchLayout {
        PitchLayout::build(self.state.formation(), self.state.lineup())
    }

    /// Initial paint. A share link, when given, is applied first.
    pub async fn start(&mut self, shared: Option<&str>) {
        if let Some(input) = shared {
            self.apply_share_link(input);
        }
        self.render();
        self.refresh_saved().await;
    }

    /// Repaints selectors and pitch.
    pub fn render(&mut self) {
        self.view.show_selectors(
            self.state.formation(),
            &self.state.league,
            &self.state.season,
        );
        let layout = self.layout();
        self.view.render_pitch(&layout);
    }

    /// Switches formation. The lineup is always emptied.
    pub fn change_formation(&mut self, formation: &'static Formation) {
        info!("Formation changed to {formation}");
        self.close_picker();
        self.state.set_formation(formation);
        self.render();
    }

    pub fn cycle_formation(&mut self, forward: bool) {
        let current = self.state.formation();
        let next = if forward {
            current.next()
        } else {
            current.previous()
        };
        self.change_formation(next);
    }

    pub fn change_league(&mut self, league: &str) {
        self.state.league = league.to_string();
        self.render();
    }

    pub fn cycle_league(&mut self) {
        let position = LEAGUES
            .iter()
            .position(|(id, _)| *id == self.state.league)
            .map_or(0, |i| (i + 1) % LEAGUES.len());
        self.change_league(LEAGUES[position].0);
    }

    pub fn change_season(&mut self, season: &str) {
        self.state.season = season.to_string();
        self.render();
    }

    pub fn cycle_season(&mut self) {
        let position = SEASONS
            .iter()
            .position(|season| *season == self.state.season)
            .map_or(0, |i| (i + 1) % SEASONS.len());
        self.change_season(SEASONS[position]);
    }

    /// Fetches players for the selected league and season. Any retrieval
    /// failure is reported and replaced by the mock dataset.
    pub async fn load_players(&mut self) -> CatalogSource {
        let league = self.state.league.clone();
        let season = self.state.season.clone();

        self.view.set_loading(true);
        let result = match resolve_api_key(&self.store).await {
            Ok(api_key) => {
                fetch_players(
                    &self.client,
                    &self.config,
                    api_key.as_deref(),
                    &league,
                    &season,
                )
                .await
            }
            Err(e) => Err(e),
        };
        self.view.set_loading(false);

        match result {
            Ok(players) if players.is_empty() => {
                info!("No players returned for league {league}, season {season}");
                self.catalog = PlayerCatalog::live(players);
                self.view.notify(Notice::info(MSG_NO_PLAYERS_FOUND));
            }
            Ok(players) => {
                let count = players.len();
                self.catalog = PlayerCatalog::live(players);
                self.view.notify(Notice::info(format!("Loaded {count} players!")));
            }
            Err(e) => {
                warn!("Loading players failed: {e}");
                info!("Using mock data for demonstration");
                self.catalog = PlayerCatalog::mock();
                self.view.notify(Notice::error(format!(
                    "Error loading players: {e}. Note: API key must be configured. For testing, you can use mock data."
                )));
            }
        }

        self.close_picker();
        self.catalog.source()
    }

    /// Replaces the catalog with the mock dataset without touching the API.
    pub fn use_mock_players(&mut self) {
        self.catalog = PlayerCatalog::mock();
        info!("Using {} mock players", self.catalog.len());
    }

    /// Opens the picker for `slot`, filtered to the slot's position.
    pub fn select_slot(&mut self, slot: usize) {
        if self.catalog.is_empty() {
            self.view.notify(Notice::error(MSG_LOAD_PLAYERS_FIRST));
            return;
        }
        let Some(formation_slot) = self.state.formation().slot(slot) else {
            warn!("Ignoring selection of slot {slot} outside {}", self.state.formation());
            return;
        };

        let players = self.catalog.for_position(formation_slot.position);
        self.view
            .show_player_picker(formation_slot.position, slot, &players);
        self.picker = Some(PickerState {
            slot,
            position: formation_slot.position,
            players,
        });
    }

    /// Assigns the `choice`-th player of the open picker to its slot and
    /// closes the picker.
    pub fn choose_player(&mut self, choice: usize) {
        let Some(picker) = self.picker.take() else {
            return;
        };
        let Some(player) = picker.players.get(choice).cloned() else {
            self.picker = Some(picker);
            return;
        };

        info!("Assigning {} to slot {}", player.name, picker.slot);
        self.state.assign(picker.slot, player);
        self.view.hide_player_picker();
        let layout = self.layout();
        self.view.render_pitch(&layout);
    }

    pub fn close_picker(&mut self) {
        if self.picker.take().is_some() {
            self.view.hide_player_picker();
        }
    }

    /// Saves the current lineup under a name asked from the user. An empty
    /// lineup or a cancelled / blank name saves nothing.
    pub async fn save_lineup(&mut self) -> bool {
        if self.state.lineup().is_empty() {
            self.view.notify(Notice::error(MSG_CREATE_LINEUP_FIRST));
            return false;
        }

        let Some(name) = self
            .view
            .prompt(PROMPT_LINEUP_NAME)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
        else {
            return false;
        };

        let saved = self.state.to_saved(&name, Utc::now());
        match self.store.append_saved_lineup(saved).await {
            Ok(_) => {
                self.view.notify(Notice::info("Lineup saved!"));
                self.refresh_saved().await;
                true
            }
            Err(e) => {
                error!("Saving lineup '{name}' failed: {e}");
                self.view
                    .notify(Notice::error(format!("Could not save lineup: {e}")));
                false
            }
        }
    }

    /// Re-reads the saved list and shows it.
    pub async fn refresh_saved(&mut self) -> Vec<SavedLineup> {
        match self.store.saved_lineups().await {
            Ok(saved) => {
                self.view.show_saved_lineups(&saved);
                saved
            }
            Err(e) => {
                error!("Reading saved lineups failed: {e}");
                self.view.show_saved_lineups(&[]);
                self.view
                    .notify(Notice::error(format!("Could not read saved lineups: {e}")));
                Vec::new()
            }
        }
    }

    /// Replaces formation, selectors and lineup with the saved entry at
    /// `index`. An index past the end does nothing.
    pub async fn load_saved(&mut self, index: usize) -> bool {
        let saved = match self.store.saved_lineup(index).await {
            Ok(Some(saved)) => saved,
            Ok(None) => {
                warn!("No saved lineup at index {index}");
                return false;
            }
            Err(e) => {
                error!("Reading saved lineups failed: {e}");
                self.view
                    .notify(Notice::error(format!("Could not read saved lineups: {e}")));
                return false;
            }
        };

        let Some(formation) = Formation::get(&saved.formation) else {
            let e = AppError::UnknownFormation(saved.formation.clone());
            error!("Cannot load '{}': {e}", saved.name);
            self.view.notify(Notice::error(e.to_string()));
            return false;
        };

        self.close_picker();
        self.state.replace(
            formation,
            saved.players,
            Some(&saved.league),
            Some(&saved.season),
        );
        info!("Loaded saved lineup '{}'", saved.name);
        self.render();
        self.view.notify(Notice::info("Lineup loaded!"));
        true
    }

    /// Deletes the saved entry at `index` after confirmation.
    pub async fn delete_saved(&mut self, index: usize) -> bool {
        if !self.view.confirm(CONFIRM_DELETE) {
            return false;
        }

        let deleted = match self.store.delete_saved_lineup(index).await {
            Ok(removed) => removed.is_some(),
            Err(e) => {
                error!("Deleting saved lineup {index} failed: {e}");
                self.view
                    .notify(Notice::error(format!("Could not delete lineup: {e}")));
                false
            }
        };
        self.refresh_saved().await;
        deleted
    }

    /// Empties the lineup after confirmation.
    pub fn clear_lineup(&mut self) -> bool {
        if !self.view.confirm(CONFIRM_CLEAR) {
            return false;
        }
        self.close_picker();
        self.state.clear();
        self.render();
        true
    }

    /// Captures the pitch and writes it to the export directory.
    pub async fn export(&mut self) -> Option<PathBuf> {
        let layout = self.layout();
        let dir = self.config.export_dir();

        match export_pitch(self.capture.as_ref(), &layout, &dir, Utc::now()).await {
            Ok(path) => {
                self.view.notify(Notice::info(format!(
                    "Lineup exported to {}",
                    path.display()
                )));
                Some(path)
            }
            Err(e) => {
                error!("Export failed: {e}");
                self.view
                    .notify(Notice::error(format!("Error exporting image: {e}")));
                None
            }
        }
    }

    /// Builds the share URL for the current formation and lineup and hands
    /// it to the view.
    pub fn share(&mut self) -> Option<String> {
        let shared = SharedLineup::new(self.state.formation(), self.state.lineup());
        let url = encode_share_token(&shared)
            .and_then(|token| build_share_url(&self.config.share_base_url, &token));

        match url {
            Ok(url) => {
                self.view.present_share_link(&url);
                Some(url)
            }
            Err(e) => {
                error!("Building share link failed: {e}");
                self.view
                    .notify(Notice::error(format!("Could not create share link: {e}")));
                None
            }
        }
    }

    /// Applies a share URL or token. Malformed input is logged and the
    /// default state is kept.
    pub fn apply_share_link(&mut self, input: &str) -> bool {
        match parse_share_input(input) {
            Ok((formation, lineup)) => {
                info!(
                    "Loaded shared {formation} lineup with {} players",
                    lineup.len()
                );
                self.state.replace(formation, lineup, None, None);
                true
            }
            Err(e) => {
                error!("Error loading lineup from URL: {e}");
                self.state = LineupState::default();
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::TextCapture;
    use crate::testing_utils::{RecordingView, TestDataBuilder};
    use tempfile::{TempDir, tempdir};

    fn controller(temp_dir: &TempDir) -> LineupController<RecordingView> {
        let config = Config {
            api_base_url: "http://127.0.0.1:9".to_string(),
            export_dir: Some(temp_dir.path().join("exports").to_string_lossy().to_string()),
            ..Config::default()
        };
        let store = LocalStore::new(temp_dir.path().join("storage"));
        LineupController::new(config, store, RecordingView::new(), Box::new(TextCapture::default()))
            .unwrap()
    }

    fn with_squad(controller: &mut LineupController<RecordingView>) {
        controller.catalog = PlayerCatalog::live(TestDataBuilder::create_squad());
    }

    #[test]
    fn test_select_slot_requires_players() {
        let temp_dir = tempdir().unwrap();
        let mut controller = controller(&temp_dir);

        controller.select_slot(0);
        assert_eq!(
            controller.view().last_notice().map(|n| n.text.as_str()),
            Some(MSG_LOAD_PLAYERS_FIRST)
        );
        assert!(controller.picker().is_none());
    }

    #[test]
    fn test_select_and_choose_assigns_filtered_player() {
        let temp_dir = tempdir().unwrap();
        let mut controller = controller(&temp_dir);
        with_squad(&mut controller);

        // slot 1 is the first defender in 4-4-2
        controller.select_slot(1);
        let picker = controller.view().picker.clone().unwrap();
        assert_eq!(picker.position, PositionType::Defender);
        assert_eq!(picker.players.len(), 2);

        controller.choose_player(1);
        assert_eq!(
            controller.state().lineup().get(1).unwrap().name,
            "Andrew Robertson"
        );
        assert!(controller.view().picker.is_none());
        assert!(controller.picker().is_none());
    }

    #[test]
    fn test_select_slot_outside_formation_is_ignored() {
        let temp_dir = tempdir().unwrap();
        let mut controller = controller(&temp_dir);
        with_squad(&mut controller);

        controller.select_slot(11);
        assert!(controller.picker().is_none());
        assert!(controller.view().notices.is_empty());
    }

    #[test]
    fn test_choose_out_of_range_keeps_picker_open() {
        let temp_dir = tempdir().unwrap();
        let mut controller = controller(&temp_dir);
        with_squad(&mut controller);

        controller.select_slot(0);
        controller.choose_player(5);
        assert!(controller.picker().is_some());
        assert!(controller.state().lineup().is_empty());
    }

    #[test]
    fn test_formation_change_clears_lineup() {
        let temp_dir = tempdir().unwrap();
        let mut controller = controller(&temp_dir);
        with_squad(&mut controller);

        controller.select_slot(0);
        controller.choose_player(0);
        assert_eq!(controller.state().lineup().len(), 1);

        controller.change_formation(Formation::get("4-3-3").unwrap());
        assert!(controller.state().lineup().is_empty());
        assert_eq!(controller.view().pitch.as_ref().unwrap().assigned_count(), 0);
        assert_eq!(
            controller.view().selectors.as_ref().unwrap().0,
            "4-3-3".to_string()
        );
    }

    #[test]
    fn test_cycle_selectors_wrap() {
        let temp_dir = tempdir().unwrap();
        let mut controller = controller(&temp_dir);

        for _ in 0..LEAGUES.len() {
            controller.cycle_league();
        }
        assert_eq!(controller.state().league, "39");

        controller.cycle_season();
        assert_eq!(controller.state().season, "2023");

        controller.cycle_formation(false);
        assert_eq!(controller.state().formation().key(), "4-5-1");
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let temp_dir = tempdir().unwrap();
        let mut controller = controller(&temp_dir);
        with_squad(&mut controller);
        controller.select_slot(0);
        controller.choose_player(0);

        assert!(!controller.clear_lineup());
        assert_eq!(controller.state().lineup().len(), 1);

        controller.view_mut().answer_confirm(true);
        assert!(controller.clear_lineup());
        assert!(controller.state().lineup().is_empty());
        assert_eq!(controller.view().questions, vec![CONFIRM_CLEAR, CONFIRM_CLEAR]);
    }

    #[test]
    fn test_apply_malformed_share_link_keeps_default_state() {
        let temp_dir = tempdir().unwrap();
        let mut controller = controller(&temp_dir);
        controller.change_formation(Formation::get("3-5-2").unwrap());

        assert!(!controller.apply_share_link("http://localhost:8080/?lineup=%%%"));
        assert_eq!(controller.state().formation().key(), "4-4-2");
        assert!(controller.state().lineup().is_empty());
    }

    #[test]
    fn test_share_then_apply_round_trip() {
        let temp_dir = tempdir().unwrap();
        let mut controller = controller(&temp_dir);
        with_squad(&mut controller);
        controller.change_formation(Formation::get("3-4-3").unwrap());
        controller.select_slot(0);
        controller.choose_player(0);

        let url = controller.share().unwrap();
        assert!(url.starts_with("http://localhost:8080/?lineup="));
        assert_eq!(controller.view().shared_links, vec![url.clone()]);

        let temp_dir2 = tempdir().unwrap();
        let mut other = self::controller(&temp_dir2);
        assert!(other.apply_share_link(&url));
        assert_eq!(other.state().formation().key(), "3-4-3");
        assert_eq!(other.state().lineup(), controller.state().lineup());
    }
}
