//! Football Lineup Builder Library
//!
//! This library provides the pieces behind the `lineup_builder` binary:
//! formations, lineup state, player retrieval from API-Football with a mock
//! fallback, saved lineups, share links and pitch export.
//!
//! # Examples
//!
//! ```rust,no_run
//! use lineup_builder::data_fetcher::generate_mock_players;
//! use lineup_builder::formation::Formation;
//! use lineup_builder::lineup::Lineup;
//! use lineup_builder::pitch::PitchLayout;
//! use lineup_builder::share::{SharedLineup, encode_share_token};
//! use lineup_builder::error::AppError;
//!
//! fn main() -> Result<(), AppError> {
//!     let formation = Formation::get("4-3-3").ok_or_else(|| AppError::UnknownFormation("4-3-3".into()))?;
//!     let players = generate_mock_players();
//!
//!     // Put the first goalkeeper in slot 0
//!     let mut lineup = Lineup::new();
//!     if let Some(keeper) = players.iter().find(|p| p.position == "Goalkeeper") {
//!         lineup.assign(0, keeper.clone());
//!     }
//!
//!     for line in PitchLayout::build(formation, &lineup).to_text(80) {
//!         println!("{line}");
//!     }
//!
//!     let token = encode_share_token(&SharedLineup::new(formation, &lineup))?;
//!     println!("?lineup={token}");
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod controller;
pub mod data_fetcher;
pub mod error;
pub mod export;
pub mod formation;
pub mod lineup;
pub mod logging;
pub mod pitch;
pub mod share;
pub mod storage;
pub mod testing_utils;
pub mod ui;
pub mod version;

// Re-export commonly used types for convenience
pub use config::Config;
pub use controller::LineupController;
pub use data_fetcher::{CatalogSource, Player, PlayerCatalog, fetch_players};
pub use error::AppError;
pub use formation::{Formation, PositionType};
pub use lineup::{Lineup, LineupState, SavedLineup};
pub use pitch::PitchLayout;
pub use storage::LocalStore;
pub use ui::{LineupView, Notice};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
