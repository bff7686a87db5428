pub mod api;
pub mod players;

pub use api::{ApiPlayer, Paging, PlayerEntry, PlayerStatistics, PlayersResponse};
pub use players::Player;
