//! Interactive event loop: reads keys, maps them to actions and dispatches
//! them to the controller.

use crossterm::event::{self, Event};
use std::time::Duration;
use tracing::{debug, info};

use crate::constants::ui::EVENT_POLL_MS;
use crate::controller::LineupController;
use crate::error::AppError;

use super::input::{Focus, UiAction, map_key};
use super::terminal::TerminalView;

/// Whether the loop should keep running after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Exit,
}

/// Runs until the user quits. The terminal must already be in raw mode on
/// the alternate screen.
pub async fn run_interactive_ui(
    controller: &mut LineupController<TerminalView>,
) -> Result<(), AppError> {
    controller.view_mut().redraw();

    loop {
        if !event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            continue;
        }

        match event::read()? {
            Event::Key(key_event) => {
                let focus = controller.view().focus();
                let Some(action) = map_key(&key_event, focus) else {
                    continue;
                };
                debug!("Key {:?} in {focus:?} -> {action:?}", key_event.code);
                if handle_action(controller, action, focus).await == EventResult::Exit {
                    info!("Quit requested");
                    break;
                }
            }
            Event::Resize(_, _) => controller.view_mut().redraw(),
            _ => {}
        }
    }

    Ok(())
}

/// Dispatches one action to the matching controller handler.
pub async fn handle_action(
    controller: &mut LineupController<TerminalView>,
    action: UiAction,
    focus: Focus,
) -> EventResult {
    match action {
        UiAction::Quit => return EventResult::Exit,
        UiAction::NextFormation => controller.cycle_formation(true),
        UiAction::PreviousFormation => controller.cycle_formation(false),
        UiAction::CycleLeague => controller.cycle_league(),
        UiAction::CycleSeason => controller.cycle_season(),
        UiAction::LoadPlayers => {
            controller.load_players().await;
        }
        UiAction::Move(direction) => controller.view_mut().move_cursor(direction),
        UiAction::Activate => match focus {
            Focus::Pitch => {
                let slot = controller.view().slot_cursor();
                controller.select_slot(slot);
            }
            Focus::Picker => {
                let choice = controller.view().picker_cursor();
                controller.choose_player(choice);
            }
            Focus::SavedList => {
                let index = controller.view().saved_cursor();
                if controller.load_saved(index).await {
                    controller.view_mut().close_saved_list();
                }
            }
        },
        UiAction::Close => match focus {
            Focus::Picker => controller.close_picker(),
            Focus::SavedList => controller.view_mut().close_saved_list(),
            Focus::Pitch => {}
        },
        UiAction::Save => {
            controller.save_lineup().await;
        }
        UiAction::Clear => {
            controller.clear_lineup();
        }
        UiAction::Export => {
            controller.export().await;
        }
        UiAction::Share => {
            controller.share();
        }
        UiAction::ToggleSavedList => {
            if controller.view().is_saved_list_open() {
                controller.view_mut().close_saved_list();
            } else {
                controller.close_picker();
                controller.refresh_saved().await;
                controller.view_mut().open_saved_list();
            }
        }
        UiAction::DeleteSaved => {
            let index = controller.view().saved_cursor();
            controller.delete_saved(index).await;
        }
    }
    EventResult::Continue
}
