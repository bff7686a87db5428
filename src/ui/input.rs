//! Keyboard mapping for the interactive screen.
//!
//! Keys are translated into [`UiAction`]s depending on which part of the
//! screen has focus; the event loop then calls the matching controller
//! handler.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::formation::Formation;

/// Which part of the screen receives arrow keys and Enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Pitch,
    Picker,
    SavedList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Quit,
    NextFormation,
    PreviousFormation,
    CycleLeague,
    CycleSeason,
    LoadPlayers,
    Move(Direction),
    /// Enter: select slot, choose player or load saved lineup
    Activate,
    /// Esc: close picker or saved list
    Close,
    Save,
    Clear,
    Export,
    Share,
    ToggleSavedList,
    DeleteSaved,
}

/// Maps a key press to an action. Key releases and unbound keys map to `None`.
pub fn map_key(key_event: &KeyEvent, focus: Focus) -> Option<UiAction> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key_event.code, KeyCode::Char('c'))
    {
        return Some(UiAction::Quit);
    }

    let action = match key_event.code {
        KeyCode::Up => UiAction::Move(Direction::Up),
        KeyCode::Down => UiAction::Move(Direction::Down),
        KeyCode::Left => UiAction::Move(Direction::Left),
        KeyCode::Right => UiAction::Move(Direction::Right),
        KeyCode::Enter => UiAction::Activate,
        KeyCode::Esc => UiAction::Close,
        KeyCode::Char('q') => UiAction::Quit,
        KeyCode::Char('d') if focus == Focus::SavedList => UiAction::DeleteSaved,
        KeyCode::Char('o') => UiAction::ToggleSavedList,
        // letters below only act on the pitch
        _ if focus != Focus::Pitch => return None,
        KeyCode::Char('f') => UiAction::NextFormation,
        KeyCode::Char('F') => UiAction::PreviousFormation,
        KeyCode::Char('l') => UiAction::CycleLeague,
        KeyCode::Char('y') => UiAction::CycleSeason,
        KeyCode::Char('p') => UiAction::LoadPlayers,
        KeyCode::Char('s') => UiAction::Save,
        KeyCode::Char('c') => UiAction::Clear,
        KeyCode::Char('e') => UiAction::Export,
        KeyCode::Char('h') => UiAction::Share,
        _ => return None,
    };
    Some(action)
}

/// Moves the pitch cursor. Left/Right step within the row and wrap; Up/Down
/// jump to the neighbouring row, keeping the relative horizontal position.
pub fn move_slot(formation: &Formation, current: usize, direction: Direction) -> usize {
    let rows = formation.rows();
    let Some(row_pos) = rows.iter().position(|row| row.indices().contains(&current)) else {
        return 0;
    };
    let row = rows[row_pos];
    let column = current - row.first_index;

    match direction {
        Direction::Left => row.first_index + (column + row.slot_count - 1) % row.slot_count,
        Direction::Right => row.first_index + (column + 1) % row.slot_count,
        Direction::Up | Direction::Down => {
            let target_pos = match direction {
                Direction::Up if row_pos > 0 => row_pos - 1,
                Direction::Down if row_pos + 1 < rows.len() => row_pos + 1,
                _ => return current,
            };
            let target = rows[target_pos];
            // Map the column centre onto the target row
            let relative = (2 * column + 1) as f64 / (2 * row.slot_count) as f64;
            let target_column =
                ((relative * target.slot_count as f64) as usize).min(target.slot_count - 1);
            target.first_index + target_column
        }
    }
}

/// Moves a list cursor up or down, clamped to `len`.
pub fn move_in_list(current: usize, len: usize, direction: Direction) -> usize {
    match direction {
        _ if len == 0 => 0,
        Direction::Up => current.saturating_sub(1),
        Direction::Down => (current + 1).min(len - 1),
        Direction::Left | Direction::Right => current.min(len - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_pitch_key_bindings() {
        let cases = [
            (KeyCode::Char('f'), UiAction::NextFormation),
            (KeyCode::Char('F'), UiAction::PreviousFormation),
            (KeyCode::Char('l'), UiAction::CycleLeague),
            (KeyCode::Char('y'), UiAction::CycleSeason),
            (KeyCode::Char('p'), UiAction::LoadPlayers),
            (KeyCode::Char('s'), UiAction::Save),
            (KeyCode::Char('c'), UiAction::Clear),
            (KeyCode::Char('e'), UiAction::Export),
            (KeyCode::Char('h'), UiAction::Share),
            (KeyCode::Char('o'), UiAction::ToggleSavedList),
            (KeyCode::Char('q'), UiAction::Quit),
            (KeyCode::Enter, UiAction::Activate),
            (KeyCode::Left, UiAction::Move(Direction::Left)),
        ];
        for (code, expected) in cases {
            assert_eq!(map_key(&key(code), Focus::Pitch), Some(expected), "{code:?}");
        }
        assert_eq!(map_key(&key(KeyCode::Char('z')), Focus::Pitch), None);
        assert_eq!(map_key(&key(KeyCode::Char('d')), Focus::Pitch), None);
    }

    #[test]
    fn test_picker_ignores_pitch_letters() {
        assert_eq!(map_key(&key(KeyCode::Char('s')), Focus::Picker), None);
        assert_eq!(map_key(&key(KeyCode::Esc), Focus::Picker), Some(UiAction::Close));
        assert_eq!(
            map_key(&key(KeyCode::Down), Focus::Picker),
            Some(UiAction::Move(Direction::Down))
        );
        assert_eq!(map_key(&key(KeyCode::Char('q')), Focus::Picker), Some(UiAction::Quit));
    }

    #[test]
    fn test_saved_list_delete_binding() {
        assert_eq!(
            map_key(&key(KeyCode::Char('d')), Focus::SavedList),
            Some(UiAction::DeleteSaved)
        );
        assert_eq!(
            map_key(&key(KeyCode::Enter), Focus::SavedList),
            Some(UiAction::Activate)
        );
    }

    #[test]
    fn test_ctrl_c_quits_and_release_is_ignored() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&ctrl_c, Focus::Picker), Some(UiAction::Quit));

        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(&release, Focus::Pitch), None);
    }

    #[test]
    fn test_move_slot_within_row_wraps() {
        let formation = Formation::get("4-4-2").unwrap();
        assert_eq!(move_slot(formation, 1, Direction::Left), 4);
        assert_eq!(move_slot(formation, 4, Direction::Right), 1);
        assert_eq!(move_slot(formation, 0, Direction::Right), 0);
    }

    #[test]
    fn test_move_slot_between_rows() {
        let formation = Formation::get("4-4-2").unwrap();
        // goalkeeper down to the inner defenders
        assert_eq!(move_slot(formation, 0, Direction::Down), 3);
        assert_eq!(move_slot(formation, 3, Direction::Up), 0);
        // right-most midfielder down to the right striker
        assert_eq!(move_slot(formation, 8, Direction::Down), 10);
        // edges stay put
        assert_eq!(move_slot(formation, 0, Direction::Up), 0);
        assert_eq!(move_slot(formation, 9, Direction::Down), 9);
    }

    #[test]
    fn test_move_in_list_clamps() {
        assert_eq!(move_in_list(0, 3, Direction::Up), 0);
        assert_eq!(move_in_list(2, 3, Direction::Down), 2);
        assert_eq!(move_in_list(1, 3, Direction::Down), 2);
        assert_eq!(move_in_list(5, 0, Direction::Down), 0);
    }
}
