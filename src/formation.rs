//! Formation table and position categories.
//!
//! A formation is a named list of row sizes, goalkeeper row first. Slots are
//! numbered in row-major order starting at 0, which is the index the lineup
//! uses to address them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position category of a pitch row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionType {
    #[serde(rename = "GK")]
    Goalkeeper,
    #[serde(rename = "DEF")]
    Defender,
    #[serde(rename = "MID")]
    Midfielder,
    #[serde(rename = "FWD")]
    Forward,
}

/// Row labels in pitch order. Rows past the end reuse the last label.
const ROW_LABELS: [PositionType; 4] = [
    PositionType::Goalkeeper,
    PositionType::Defender,
    PositionType::Midfielder,
    PositionType::Forward,
];

impl PositionType {
    /// Category for a zero-based pitch row.
    pub fn for_row(row: usize) -> Self {
        ROW_LABELS[row.min(ROW_LABELS.len() - 1)]
    }

    /// Short code shown on slot cards.
    pub fn code(self) -> &'static str {
        match self {
            PositionType::Goalkeeper => "GK",
            PositionType::Defender => "DEF",
            PositionType::Midfielder => "MID",
            PositionType::Forward => "FWD",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PositionType::Goalkeeper => "Goalkeeper",
            PositionType::Defender => "Defender",
            PositionType::Midfielder => "Midfielder",
            PositionType::Forward => "Forward",
        }
    }

    /// Words that identify this category in an API position label.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            PositionType::Goalkeeper => &["Goalkeeper"],
            PositionType::Defender => &["Defender"],
            PositionType::Midfielder => &["Midfielder"],
            PositionType::Forward => &["Attacker", "Forward"],
        }
    }

    /// Whether a free-text position label belongs to this category.
    pub fn matches(self, position_label: &str) -> bool {
        self.keywords()
            .iter()
            .any(|keyword| position_label.contains(keyword))
    }

    pub fn from_code(code: &str) -> Option<Self> {
        ROW_LABELS
            .iter()
            .copied()
            .find(|position| position.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for PositionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A named arrangement of slots by row.
#[derive(Debug, PartialEq, Eq)]
pub struct Formation {
    key: &'static str,
    layout: &'static [usize],
}

static FORMATIONS: [Formation; 6] = [
    Formation {
        key: "4-4-2",
        layout: &[1, 4, 4, 2],
    },
    Formation {
        key: "4-3-3",
        layout: &[1, 4, 3, 3],
    },
    Formation {
        key: "3-5-2",
        layout: &[1, 3, 5, 2],
    },
    Formation {
        key: "4-2-3-1",
        layout: &[1, 4, 2, 3, 1],
    },
    Formation {
        key: "3-4-3",
        layout: &[1, 3, 4, 3],
    },
    Formation {
        key: "4-5-1",
        layout: &[1, 4, 5, 1],
    },
];

/// One row of a formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormationRow {
    pub row: usize,
    pub position: PositionType,
    pub slot_count: usize,
    /// Slot index of the leftmost slot in this row
    pub first_index: usize,
}

impl FormationRow {
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.first_index..self.first_index + self.slot_count
    }
}

/// One slot of a formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub index: usize,
    pub row: usize,
    pub column: usize,
    pub position: PositionType,
}

impl Formation {
    /// Looks up a formation by key, e.g. `"4-3-3"`.
    pub fn get(key: &str) -> Option<&'static Formation> {
        FORMATIONS.iter().find(|formation| formation.key == key.trim())
    }

    /// The formation selected on startup.
    pub fn default_formation() -> &'static Formation {
        Formation::get(crate::constants::DEFAULT_FORMATION).unwrap_or(&FORMATIONS[0])
    }

    /// Every built-in formation in selector order.
    pub fn all() -> &'static [Formation] {
        &FORMATIONS
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Slot count per row, goalkeeper row first.
    pub fn layout(&self) -> &'static [usize] {
        self.layout
    }

    pub fn total_slots(&self) -> usize {
        self.layout.iter().sum()
    }

    pub fn rows(&self) -> Vec<FormationRow> {
        let mut first_index = 0;
        self.layout
            .iter()
            .enumerate()
            .map(|(row, &slot_count)| {
                let formation_row = FormationRow {
                    row,
                    position: PositionType::for_row(row),
                    slot_count,
                    first_index,
                };
                first_index += slot_count;
                formation_row
            })
            .collect()
    }

    pub fn slots(&self) -> Vec<Slot> {
        self.rows()
            .into_iter()
            .flat_map(|row| {
                row.indices().enumerate().map(move |(column, index)| Slot {
                    index,
                    row: row.row,
                    column,
                    position: row.position,
                })
            })
            .collect()
    }

    pub fn slot(&self, index: usize) -> Option<Slot> {
        self.slots().into_iter().find(|slot| slot.index == index)
    }

    /// Next formation in selector order, wrapping around.
    pub fn next(&self) -> &'static Formation {
        let position = self.selector_position();
        &FORMATIONS[(position + 1) % FORMATIONS.len()]
    }

    /// Previous formation in selector order, wrapping around.
    pub fn previous(&self) -> &'static Formation {
        let position = self.selector_position();
        &FORMATIONS[(position + FORMATIONS.len() - 1) % FORMATIONS.len()]
    }

    fn selector_position(&self) -> usize {
        FORMATIONS
            .iter()
            .position(|formation| formation.key == self.key)
            .unwrap_or(0)
    }
}

impl fmt::Display for Formation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_count_matches_layout_sum_for_every_formation() {
        for formation in Formation::all() {
            let expected: usize = formation.layout().iter().sum();
            assert_eq!(formation.total_slots(), expected, "{formation}");
            assert_eq!(formation.slots().len(), expected, "{formation}");
            assert_eq!(formation.total_slots(), 11, "{formation} should field 11");
        }
    }

    #[test]
    fn test_slots_are_row_major_from_zero() {
        let formation = Formation::get("4-3-3").unwrap();
        let indices: Vec<usize> = formation.slots().iter().map(|slot| slot.index).collect();
        assert_eq!(indices, (0..11).collect::<Vec<_>>());

        let slots = formation.slots();
        assert_eq!(slots[0].row, 0);
        assert_eq!(slots[0].position, PositionType::Goalkeeper);
        assert_eq!(slots[1].row, 1);
        assert_eq!(slots[1].column, 0);
        assert_eq!(slots[4].column, 3);
        assert_eq!(slots[5].row, 2);
        assert_eq!(slots[5].position, PositionType::Midfielder);
        assert_eq!(slots[10].position, PositionType::Forward);
    }

    #[test]
    fn test_extra_rows_reuse_forward_label() {
        let formation = Formation::get("4-2-3-1").unwrap();
        let positions: Vec<PositionType> = formation.rows().iter().map(|r| r.position).collect();
        assert_eq!(
            positions,
            vec![
                PositionType::Goalkeeper,
                PositionType::Defender,
                PositionType::Midfielder,
                PositionType::Forward,
                PositionType::Forward,
            ]
        );
        assert_eq!(PositionType::for_row(9), PositionType::Forward);
    }

    #[test]
    fn test_row_first_indices() {
        let formation = Formation::get("3-5-2").unwrap();
        let firsts: Vec<usize> = formation.rows().iter().map(|r| r.first_index).collect();
        assert_eq!(firsts, vec![0, 1, 4, 9]);
    }

    #[test]
    fn test_lookup_and_default() {
        assert!(Formation::get("4-4-2").is_some());
        assert!(Formation::get(" 4-5-1 ").is_some());
        assert!(Formation::get("2-3-5").is_none());
        assert_eq!(Formation::default_formation().key(), "4-4-2");
    }

    #[test]
    fn test_next_and_previous_wrap() {
        let first = &Formation::all()[0];
        let last = Formation::all().last().unwrap();
        assert_eq!(last.next(), first);
        assert_eq!(first.previous(), last);
        assert_eq!(first.next().previous(), first);
    }

    #[test]
    fn test_position_keyword_matching() {
        assert!(PositionType::Forward.matches("Attacker"));
        assert!(PositionType::Forward.matches("Forward"));
        assert!(!PositionType::Forward.matches("Midfielder"));
        assert!(PositionType::Goalkeeper.matches("Goalkeeper"));
        assert!(!PositionType::Defender.matches("Player"));
    }

    #[test]
    fn test_position_codes() {
        assert_eq!(PositionType::from_code("gk"), Some(PositionType::Goalkeeper));
        assert_eq!(PositionType::from_code("FWD"), Some(PositionType::Forward));
        assert_eq!(PositionType::from_code("WING"), None);
        assert_eq!(PositionType::Midfielder.to_string(), "MID");
    }
}
