//! Full-screen crossterm front end.
//!
//! The whole screen is composed into one string of ANSI escape sequences
//! and written in a single operation to avoid flicker.

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{execute, style::Print};
use std::io::{Stdout, Write, stdout};
use tracing::{debug, warn};

use crate::constants::league_name;
use crate::constants::ui::{CARD_WIDTH, CONTENT_MARGIN, DEFAULT_TEXT_WIDTH, PICKER_VISIBLE_ROWS};
use crate::data_fetcher::models::Player;
use crate::error::AppError;
use crate::formation::{Formation, PositionType};
use crate::lineup::SavedLineup;
use crate::pitch::{PitchLayout, center, truncate};

use super::input::{Direction, Focus, move_in_list, move_slot};
use super::view::{LineupView, NO_PLAYERS_FOR_POSITION, Notice, NoticeLevel};

const HEADER_BG: u8 = 21;
const SUBHEADER_FG: u8 = 46;
const TEXT_FG: u8 = 231;
const FILLED_FG: u8 = 51;
const CURSOR_FG: u8 = 226;
const ERROR_FG: u8 = 196;
const EMPTY_CARD_TEXT: &str = "Enter to select";
const CONTROLS: &str = "q=Quit f/F=Formation l=League y=Season p=Players s=Save c=Clear e=Export h=Share o=Saved";

#[derive(Debug, Clone)]
struct Picker {
    position: PositionType,
    slot: usize,
    players: Vec<Player>,
}

/// What the footer is currently asking the user.
#[derive(Debug, Clone)]
enum Question {
    Confirm(String),
    Prompt { question: String, input: String },
}

pub struct TerminalView {
    out: Stdout,
    header: Option<(&'static Formation, String, String)>,
    layout: Option<PitchLayout>,
    slot_cursor: usize,
    picker: Option<Picker>,
    picker_cursor: usize,
    saved: Vec<SavedLineup>,
    saved_open: bool,
    saved_cursor: usize,
    loading: bool,
    notice: Option<Notice>,
    question: Option<Question>,
    clipboard: Option<arboard::Clipboard>,
}

impl TerminalView {
    pub fn new() -> Self {
        TerminalView {
            out: stdout(),
            header: None,
            layout: None,
            slot_cursor: 0,
            picker: None,
            picker_cursor: 0,
            saved: Vec::new(),
            saved_open: false,
            saved_cursor: 0,
            loading: false,
            notice: None,
            question: None,
            clipboard: None,
        }
    }

    pub fn focus(&self) -> Focus {
        if self.picker.is_some() {
            Focus::Picker
        } else if self.saved_open {
            Focus::SavedList
        } else {
            Focus::Pitch
        }
    }

    pub fn slot_cursor(&self) -> usize {
        self.slot_cursor
    }

    pub fn picker_cursor(&self) -> usize {
        self.picker_cursor
    }

    pub fn saved_cursor(&self) -> usize {
        self.saved_cursor
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        match self.focus() {
            Focus::Pitch => {
                if let Some(layout) = &self.layout {
                    self.slot_cursor = move_slot(layout.formation(), self.slot_cursor, direction);
                }
            }
            Focus::Picker => {
                let len = self.picker.as_ref().map_or(0, |p| p.players.len());
                self.picker_cursor = move_in_list(self.picker_cursor, len, direction);
            }
            Focus::SavedList => {
                self.saved_cursor = move_in_list(self.saved_cursor, self.saved.len(), direction);
            }
        }
        self.redraw();
    }

    /// Opens the saved list if there is anything to show.
    pub fn open_saved_list(&mut self) {
        if self.saved.is_empty() {
            self.notice = Some(Notice::info("No saved lineups yet"));
        } else {
            self.saved_open = true;
            self.saved_cursor = self.saved_cursor.min(self.saved.len() - 1);
        }
        self.redraw();
    }

    pub fn close_saved_list(&mut self) {
        self.saved_open = false;
        self.redraw();
    }

    pub fn is_saved_list_open(&self) -> bool {
        self.saved_open
    }

    /// Repaints the screen; failures are logged, not raised.
    pub fn redraw(&mut self) {
        if let Err(e) = self.draw() {
            warn!("Failed to draw screen: {e}");
        }
    }

    fn draw(&mut self) -> Result<(), AppError> {
        let (width, height) = crossterm::terminal::size()
            .map(|(w, h)| (w as usize, h as usize))
            .unwrap_or((DEFAULT_TEXT_WIDTH, 24));
        let buffer = self.compose(width, height);

        execute!(self.out, crossterm::cursor::Hide)?;
        execute!(self.out, Print(buffer))?;
        self.out.flush()?;
        Ok(())
    }

    /// Builds the full screen as ANSI text.
    fn compose(&self, width: usize, height: usize) -> String {
        let mut buffer = String::with_capacity(width * height * 2);
        buffer.push_str("\x1b[H\x1b[0J");

        let inner = width.saturating_sub(CONTENT_MARGIN * 2).max(20);
        let margin = CONTENT_MARGIN + 1;

        let selectors = match &self.header {
            Some((formation, league, season)) => {
                format!("{} • {} • {}", formation.key(), league_name(league), season)
            }
            None => String::new(),
        };
        buffer.push_str(&format!(
            "\x1b[1;1H\x1b[48;5;{HEADER_BG}m\x1b[38;5;{TEXT_FG}m{:<20}{:>w$}\x1b[0m",
            " LINEUP BUILDER",
            format!("{selectors} "),
            w = width.saturating_sub(20)
        ));

        let subheader = match &self.layout {
            Some(layout) => format!(
                "{} players placed of {}",
                layout.assigned_count(),
                layout.slot_count()
            ),
            None => String::new(),
        };
        buffer.push_str(&format!(
            "\x1b[2;{margin}H\x1b[38;5;{SUBHEADER_FG}m{subheader}\x1b[0m"
        ));

        let mut line = 4;
        if let Some(layout) = &self.layout {
            for row in layout.rows() {
                let cell = (inner / row.cards.len().max(1)).clamp(4, CARD_WIDTH + 4);
                let row_width = cell * row.cards.len();
                let offset = margin + inner.saturating_sub(row_width) / 2;

                for (i, card) in row.cards.iter().enumerate() {
                    let column = offset + i * cell;
                    let selected = self.focus() == Focus::Pitch && card.index == self.slot_cursor;
                    let color = if selected {
                        CURSOR_FG
                    } else if card.is_empty() {
                        TEXT_FG
                    } else {
                        FILLED_FG
                    };
                    let label = match &card.player {
                        Some(player) => player.name.as_str(),
                        None => EMPTY_CARD_TEXT,
                    };
                    let code = if selected {
                        format!("[{}]", card.position.code())
                    } else {
                        card.position.code().to_string()
                    };
                    buffer.push_str(&format!(
                        "\x1b[{line};{column}H\x1b[38;5;{SUBHEADER_FG}m{}",
                        center(&code, cell)
                    ));
                    buffer.push_str(&format!(
                        "\x1b[{};{column}H\x1b[38;5;{color}m{}\x1b[0m",
                        line + 1,
                        center(&truncate(label, cell.saturating_sub(1)), cell)
                    ));
                }
                line += 3;
            }
        }

        if let Some(picker) = &self.picker {
            buffer.push_str(&format!(
                "\x1b[{line};{margin}H\x1b[38;5;{SUBHEADER_FG}mSelect {} for slot {}\x1b[0m",
                picker.position.display_name(),
                picker.slot + 1
            ));
            line += 1;
            if picker.players.is_empty() {
                buffer.push_str(&format!(
                    "\x1b[{line};{margin}H\x1b[38;5;{TEXT_FG}m{NO_PLAYERS_FOR_POSITION}\x1b[0m"
                ));
                line += 1;
            } else {
                let start = list_window_start(self.picker_cursor, picker.players.len());
                for (i, player) in picker
                    .players
                    .iter()
                    .enumerate()
                    .skip(start)
                    .take(PICKER_VISIBLE_ROWS)
                {
                    let (marker, color) = if i == self.picker_cursor {
                        ("▶", CURSOR_FG)
                    } else {
                        (" ", TEXT_FG)
                    };
                    let text = truncate(
                        &format!("{} ({}, {})", player.name, player.position, player.team),
                        inner.saturating_sub(2),
                    );
                    buffer.push_str(&format!(
                        "\x1b[{line};{margin}H\x1b[38;5;{color}m{marker} {text}\x1b[0m"
                    ));
                    line += 1;
                }
            }
            line += 1;
        } else if self.saved_open && !self.saved.is_empty() {
            buffer.push_str(&format!(
                "\x1b[{line};{margin}H\x1b[38;5;{SUBHEADER_FG}mSaved lineups (Enter=Load d=Delete Esc=Close)\x1b[0m"
            ));
            line += 1;
            let start = list_window_start(self.saved_cursor, self.saved.len());
            for (i, saved) in self
                .saved
                .iter()
                .enumerate()
                .skip(start)
                .take(PICKER_VISIBLE_ROWS)
            {
                let (marker, color) = if i == self.saved_cursor {
                    ("▶", CURSOR_FG)
                } else {
                    (" ", TEXT_FG)
                };
                let text = truncate(
                    &format!("{}  {}", saved.name, saved.details()),
                    inner.saturating_sub(2),
                );
                buffer.push_str(&format!(
                    "\x1b[{line};{margin}H\x1b[38;5;{color}m{marker} {text}\x1b[0m"
                ));
                line += 1;
            }
            line += 1;
        }

        let footer_y = height.max(line + 2);
        let status_y = footer_y - 1;

        let status = match &self.question {
            Some(Question::Confirm(question)) => Some((format!("{question} (y/n)"), CURSOR_FG)),
            Some(Question::Prompt { question, input }) => {
                Some((format!("{question} {input}_"), CURSOR_FG))
            }
            None if self.loading => Some(("Loading players...".to_string(), CURSOR_FG)),
            None => self.notice.as_ref().map(|notice| {
                let color = match notice.level {
                    NoticeLevel::Info => FILLED_FG,
                    NoticeLevel::Error => ERROR_FG,
                };
                (notice.text.clone(), color)
            }),
        };
        if let Some((text, color)) = status {
            buffer.push_str(&format!(
                "\x1b[{status_y};{margin}H\x1b[38;5;{color}m{}\x1b[0m",
                truncate(&text, inner)
            ));
        }

        buffer.push_str(&format!(
            "\x1b[{footer_y};1H\x1b[48;5;{HEADER_BG}m\x1b[38;5;{TEXT_FG}m{:^width$}\x1b[0m",
            truncate(CONTROLS, width)
        ));

        buffer
    }

    /// Blocks until a key press arrives.
    fn read_key(&mut self) -> Option<event::KeyEvent> {
        loop {
            match event::read() {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => return Some(key),
                Ok(Event::Resize(_, _)) => self.redraw(),
                Ok(_) => {}
                Err(e) => {
                    warn!("Failed to read key: {e}");
                    return None;
                }
            }
        }
    }

    fn copy_to_clipboard(&mut self, text: &str) -> Result<(), arboard::Error> {
        if self.clipboard.is_none() {
            self.clipboard = Some(arboard::Clipboard::new()?);
        }
        match self.clipboard.as_mut() {
            Some(clipboard) => clipboard.set_text(text.to_string()),
            None => Err(arboard::Error::ClipboardNotSupported),
        }
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

/// First visible list row so that `cursor` stays on screen.
fn list_window_start(cursor: usize, len: usize) -> usize {
    if len <= PICKER_VISIBLE_ROWS {
        0
    } else {
        cursor
            .saturating_sub(PICKER_VISIBLE_ROWS - 1)
            .min(len - PICKER_VISIBLE_ROWS)
    }
}

impl LineupView for TerminalView {
    fn show_selectors(&mut self, formation: &'static Formation, league: &str, season: &str) {
        self.header = Some((formation, league.to_string(), season.to_string()));
    }

    fn render_pitch(&mut self, layout: &PitchLayout) {
        if self.slot_cursor >= layout.slot_count() {
            self.slot_cursor = 0;
        }
        self.layout = Some(layout.clone());
        self.redraw();
    }

    fn show_player_picker(&mut self, position: PositionType, slot: usize, players: &[Player]) {
        self.picker = Some(Picker {
            position,
            slot,
            players: players.to_vec(),
        });
        self.picker_cursor = 0;
        self.redraw();
    }

    fn hide_player_picker(&mut self) {
        self.picker = None;
        self.redraw();
    }

    fn show_saved_lineups(&mut self, saved: &[SavedLineup]) {
        self.saved = saved.to_vec();
        if self.saved.is_empty() {
            self.saved_open = false;
            self.saved_cursor = 0;
        } else {
            self.saved_cursor = self.saved_cursor.min(self.saved.len() - 1);
        }
        self.redraw();
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.redraw();
    }

    fn notify(&mut self, notice: Notice) {
        debug!("Notice: {}", notice.text);
        self.notice = Some(notice);
        self.redraw();
    }

    fn confirm(&mut self, question: &str) -> bool {
        self.question = Some(Question::Confirm(question.to_string()));
        self.redraw();

        let answer = loop {
            let Some(key) = self.read_key() else {
                break false;
            };
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => break true,
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => break false,
                _ => {}
            }
        };

        self.question = None;
        self.redraw();
        answer
    }

    fn prompt(&mut self, question: &str) -> Option<String> {
        let mut input = String::new();
        self.question = Some(Question::Prompt {
            question: question.to_string(),
            input: input.clone(),
        });
        self.redraw();

        let answer = loop {
            let Some(key) = self.read_key() else {
                break None;
            };
            match key.code {
                KeyCode::Enter => break Some(input.clone()),
                KeyCode::Esc => break None,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break None,
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(ch) => input.push(ch),
                _ => continue,
            }
            self.question = Some(Question::Prompt {
                question: question.to_string(),
                input: input.clone(),
            });
            self.redraw();
        };

        self.question = None;
        self.redraw();
        answer
    }

    fn present_share_link(&mut self, url: &str) {
        match self.copy_to_clipboard(url) {
            Ok(()) => self.notify(Notice::info("Link copied to clipboard!")),
            Err(e) => {
                debug!("Clipboard unavailable: {e}");
                self.notify(Notice::info(format!("Copy this link: {url}")));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineup::Lineup;

    fn view_with_layout(lineup: &Lineup) -> TerminalView {
        let mut view = TerminalView::new();
        let formation = Formation::get("4-4-2").unwrap();
        view.header = Some((formation, "140".to_string(), "2023".to_string()));
        view.layout = Some(PitchLayout::build(formation, lineup));
        view
    }

    #[test]
    fn test_compose_shows_selectors_and_cards() {
        let lineup: Lineup = [(0, Player::new(1, "Jan Oblak", "Goalkeeper", "Team 7"))]
            .into_iter()
            .collect();
        let screen = view_with_layout(&lineup).compose(100, 40);

        assert!(screen.contains("4-4-2 • La Liga • 2023"));
        assert!(screen.contains("Jan Oblak"));
        assert!(screen.contains("[GK]"), "cursor starts on the goalkeeper");
        assert!(screen.contains(EMPTY_CARD_TEXT));
        assert!(screen.contains("1 players placed of 11"));
    }

    #[test]
    fn test_focus_follows_open_panels() {
        let mut view = view_with_layout(&Lineup::new());
        assert_eq!(view.focus(), Focus::Pitch);

        view.picker = Some(Picker {
            position: PositionType::Defender,
            slot: 2,
            players: Vec::new(),
        });
        assert_eq!(view.focus(), Focus::Picker);
        assert!(view.compose(100, 40).contains(NO_PLAYERS_FOR_POSITION));

        view.picker = None;
        view.saved_open = true;
        assert_eq!(view.focus(), Focus::SavedList);
    }

    #[test]
    fn test_empty_saved_list_stays_hidden() {
        let mut view = view_with_layout(&Lineup::new());
        view.saved_open = true;
        view.saved = Vec::new();
        assert!(!view.compose(100, 40).contains("Saved lineups"));
    }

    #[test]
    fn test_list_window_keeps_cursor_visible() {
        assert_eq!(list_window_start(3, 5), 0);
        assert_eq!(list_window_start(0, 40), 0);
        assert_eq!(list_window_start(20, 40), 20 - (PICKER_VISIBLE_ROWS - 1));
        assert_eq!(list_window_start(39, 40), 40 - PICKER_VISIBLE_ROWS);
    }
}
