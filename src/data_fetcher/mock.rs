//! Deterministic mock player dataset used when live data is unavailable.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::constants::{MOCK_PLAYER_SEED, PLACEHOLDER_PHOTO_URL};
use crate::data_fetcher::models::Player;

const MOCK_NAMES: [&str; 28] = [
    "Lionel Messi",
    "Cristiano Ronaldo",
    "Kylian Mbappé",
    "Erling Haaland",
    "Kevin De Bruyne",
    "Mohamed Salah",
    "Virgil van Dijk",
    "Manuel Neuer",
    "Luka Modrić",
    "Neymar Jr",
    "Robert Lewandowski",
    "Karim Benzema",
    "Sadio Mané",
    "Son Heung-min",
    "Harry Kane",
    "Bruno Fernandes",
    "Joshua Kimmich",
    "Toni Kroos",
    "Sergio Ramos",
    "Marcelo",
    "Thiago Silva",
    "Casemiro",
    "Paul Pogba",
    "Eden Hazard",
    "Antoine Griezmann",
    "Luis Suárez",
    "Gareth Bale",
    "Jan Oblak",
];

const MOCK_POSITIONS: [&str; 4] = ["Goalkeeper", "Defender", "Midfielder", "Attacker"];

/// Generates the mock dataset with the built-in seed.
pub fn generate_mock_players() -> Vec<Player> {
    generate_mock_players_with_seed(MOCK_PLAYER_SEED)
}

/// Generates the mock dataset. The same seed always yields the same list.
pub fn generate_mock_players_with_seed(seed: u64) -> Vec<Player> {
    let mut rng = SmallRng::seed_from_u64(seed);

    MOCK_NAMES
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let position = MOCK_POSITIONS[rng.random_range(0..MOCK_POSITIONS.len())];
            Player {
                id: index as i64 + 1,
                name: name.to_string(),
                photo: Some(format!("{PLACEHOLDER_PHOTO_URL}?text={}", initials(name))),
                position: position.to_string(),
                team: format!("Team {}", index / 4 + 1),
            }
        })
        .collect()
}

/// First letter of the first two words, e.g. "Son Heung-min" → "SH".
fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .collect()
}
