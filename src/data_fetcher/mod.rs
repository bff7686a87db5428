pub mod api;
pub mod catalog;
pub mod mock;
pub mod models;

pub use api::{fetch_players, resolve_api_key};
pub use catalog::{CatalogSource, PlayerCatalog};
pub use mock::generate_mock_players;
pub use models::Player;
