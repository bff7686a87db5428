//! Pitch layout: one card per formation slot, grouped by row.
//!
//! The layout is the render model shared by the terminal screen, the
//! one-shot text output and the export captures.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::data_fetcher::models::Player;
use crate::formation::{Formation, PositionType};
use crate::lineup::Lineup;

/// Label of a card with no player assigned.
pub const EMPTY_CARD_LABEL: &str = "Click to select";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCard {
    pub index: usize,
    pub position: PositionType,
    pub player: Option<Player>,
}

impl SlotCard {
    pub fn label(&self) -> &str {
        self.player
            .as_ref()
            .map(|player| player.name.as_str())
            .unwrap_or(EMPTY_CARD_LABEL)
    }

    pub fn is_empty(&self) -> bool {
        self.player.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PitchRow {
    pub row: usize,
    pub position: PositionType,
    pub cards: Vec<SlotCard>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PitchLayout {
    formation: &'static Formation,
    rows: Vec<PitchRow>,
}

impl PitchLayout {
    /// Builds one card per slot of `formation`. Lineup entries outside the
    /// formation are left out.
    pub fn build(formation: &'static Formation, lineup: &Lineup) -> Self {
        let rows = formation
            .rows()
            .into_iter()
            .map(|row| PitchRow {
                row: row.row,
                position: row.position,
                cards: row
                    .indices()
                    .map(|index| SlotCard {
                        index,
                        position: row.position,
                        player: lineup.get(index).cloned(),
                    })
                    .collect(),
            })
            .collect();

        PitchLayout { formation, rows }
    }

    pub fn formation(&self) -> &'static Formation {
        self.formation
    }

    pub fn rows(&self) -> &[PitchRow] {
        &self.rows
    }

    /// Every card in slot order.
    pub fn cards(&self) -> impl Iterator<Item = &SlotCard> {
        self.rows.iter().flat_map(|row| row.cards.iter())
    }

    pub fn slot_count(&self) -> usize {
        self.rows.iter().map(|row| row.cards.len()).sum()
    }

    pub fn card(&self, index: usize) -> Option<&SlotCard> {
        self.cards().find(|card| card.index == index)
    }

    pub fn assigned_count(&self) -> usize {
        self.cards().filter(|card| !card.is_empty()).count()
    }

    /// Plain-text rendering, goalkeeper row first. Each row is two lines:
    /// position codes, then player names, centred in equal-width cells.
    pub fn to_text(&self, width: usize) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.rows.len() * 3 + 2);
        lines.push(center(
            &format!(
                "Formation {} ({}/{})",
                self.formation.key(),
                self.assigned_count(),
                self.slot_count()
            ),
            width,
        ));
        lines.push("─".repeat(width));

        for row in &self.rows {
            let cell_width = (width / row.cards.len().max(1)).max(1);
            let codes: String = row
                .cards
                .iter()
                .map(|card| center(card.position.code(), cell_width))
                .collect();
            let names: String = row
                .cards
                .iter()
                .map(|card| center(&truncate(card.label(), cell_width.saturating_sub(1)), cell_width))
                .collect();
            lines.push(codes.trim_end().to_string());
            lines.push(names.trim_end().to_string());
            lines.push(String::new());
        }

        lines
    }
}

/// Cuts `text` to at most `max_width` columns, marking the cut with `…`.
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut result = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width + 1 > max_width {
            break;
        }
        result.push(ch);
        used += ch_width;
    }
    result.push('…');
    result
}

/// Centres `text` in a cell `width` columns wide.
pub fn center(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        return text.to_string();
    }
    let left = (width - text_width) / 2;
    let right = width - text_width - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: i64, name: &str) -> Player {
        Player::new(id, name, "Midfielder", "Team 1")
    }

    #[test]
    fn test_card_count_equals_slot_count_for_every_formation() {
        for formation in Formation::all() {
            let layout = PitchLayout::build(formation, &Lineup::new());
            assert_eq!(layout.slot_count(), formation.total_slots(), "{formation}");
            assert_eq!(layout.cards().count(), formation.total_slots());
            assert_eq!(layout.rows().len(), formation.layout().len());
        }
    }

    #[test]
    fn test_cards_carry_assigned_players() {
        let formation = Formation::get("4-3-3").unwrap();
        let lineup: Lineup = [(0, player(1, "Jan Oblak")), (7, player(2, "Toni Kroos"))]
            .into_iter()
            .collect();
        let layout = PitchLayout::build(formation, &lineup);

        assert_eq!(layout.card(0).unwrap().label(), "Jan Oblak");
        assert_eq!(layout.card(0).unwrap().position, PositionType::Goalkeeper);
        assert_eq!(layout.card(7).unwrap().label(), "Toni Kroos");
        assert_eq!(layout.card(7).unwrap().position, PositionType::Midfielder);
        assert!(layout.card(1).unwrap().is_empty());
        assert_eq!(layout.card(1).unwrap().label(), EMPTY_CARD_LABEL);
        assert_eq!(layout.assigned_count(), 2);
    }

    #[test]
    fn test_stale_indices_are_not_rendered() {
        let formation = Formation::get("4-4-2").unwrap();
        let lineup: Lineup = [(3, player(1, "Marcelo")), (11, player(2, "Ghost")), (40, player(3, "Ghost"))]
            .into_iter()
            .collect();
        let layout = PitchLayout::build(formation, &lineup);

        assert_eq!(layout.slot_count(), 11);
        assert_eq!(layout.assigned_count(), 1);
        assert!(layout.card(11).is_none());
        assert!(layout.to_text(80).iter().all(|line| !line.contains("Ghost")));
    }

    #[test]
    fn test_to_text_lists_rows_in_order() {
        let formation = Formation::get("4-2-3-1").unwrap();
        let lineup: Lineup = [(10, player(1, "Harry Kane"))].into_iter().collect();
        let lines = PitchLayout::build(formation, &lineup).to_text(80);

        assert!(lines[0].contains("Formation 4-2-3-1 (1/11)"));
        assert_eq!(lines[2].trim(), "GK");
        assert!(lines[3].contains(EMPTY_CARD_LABEL));
        let fwd_rows = lines.iter().filter(|line| line.contains("FWD")).count();
        assert_eq!(fwd_rows, 2, "the last two rows share the forward label");
        assert!(lines.iter().any(|line| line.trim() == "Harry Kane"));
    }

    #[test]
    fn test_truncate_and_center() {
        assert_eq!(truncate("Cristiano Ronaldo", 10), "Cristiano…");
        assert_eq!(truncate("Kane", 10), "Kane");
        assert_eq!(truncate("Kane", 0), "");
        assert_eq!(center("GK", 6), "  GK  ");
        assert_eq!(center("MID", 6), " MID  ");
        assert_eq!(center("too long", 3), "too long");
    }
}
