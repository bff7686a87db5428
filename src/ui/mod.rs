pub mod console;
pub mod input;
pub mod interactive;
pub mod terminal;
pub mod view;

pub use console::ConsoleView;
pub use input::{Direction, Focus, UiAction, map_key};
pub use interactive::run_interactive_ui;
pub use terminal::TerminalView;
pub use view::{LineupView, Notice, NoticeLevel};
