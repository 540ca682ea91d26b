//! Stat label layout.

use super::data::CardType;
use super::error::CardError;
use super::stats::{CardStats, StatKey};
use crate::core::config::CardConfig;

/// Glyph shown on power cards.
pub const POWER_GLYPH: &str = "P";

/// The text label in the bottom-right corner of a card.
///
/// Offsets are relative to the card's top-left corner, before horizontal
/// scaling.
#[derive(Clone, Debug, PartialEq)]
pub struct StatDisplay {
    pub text: String,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl StatDisplay {
    /// Lay out the label for a card type.
    ///
    /// Battle cards show `"AP/HP"` as zero-padded two-digit numbers and
    /// need both stats; power cards show a single glyph.
    pub fn for_card(card_type: CardType, stats: &CardStats, config: &CardConfig) -> Result<Self, CardError> {
        let offset_y = config.height - 32.0;
        match card_type {
            CardType::Battle => {
                let ap = stats.require(StatKey::Ap)?;
                let hp = stats.require(StatKey::Hp)?;
                Ok(Self {
                    text: battle_text(ap, hp),
                    offset_x: config.width - 80.0,
                    offset_y,
                })
            }
            CardType::Power => Ok(Self {
                text: POWER_GLYPH.to_string(),
                offset_x: config.width - 28.0,
                offset_y,
            }),
        }
    }

    /// Replace the label with new attack and health values.
    ///
    /// Power cards keep their glyph.
    pub fn set_stats(&mut self, card_type: CardType, ap: i32, hp: i32) {
        if card_type == CardType::Battle {
            self.text = battle_text(ap, hp);
        }
    }
}

/// `"{ap:02}/{hp:02}"`.
#[must_use]
pub fn battle_text(ap: i32, hp: i32) -> String {
    format!("{ap:02}/{hp:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardData, CardId};

    #[test]
    fn test_battle_text_padding() {
        assert_eq!(battle_text(3, 7), "03/07");
        assert_eq!(battle_text(12, 0), "12/00");
        assert_eq!(battle_text(123, 45), "123/45");
    }

    #[test]
    fn test_battle_layout() {
        let stats = CardStats::from_data(&CardData::battle(CardId::new(1), "K", "red", 3, 7));
        let display = StatDisplay::for_card(CardType::Battle, &stats, &CardConfig::default()).unwrap();

        assert_eq!(display.text, "03/07");
        assert_eq!(display.offset_x, 20.0);
        assert_eq!(display.offset_y, 118.0);
    }

    #[test]
    fn test_power_layout() {
        let display = StatDisplay::for_card(CardType::Power, &CardStats::default(), &CardConfig::default()).unwrap();

        assert_eq!(display.text, "P");
        assert_eq!(display.offset_x, 72.0);
        assert_eq!(display.offset_y, 118.0);
    }

    #[test]
    fn test_set_stats_keeps_power_glyph() {
        let mut display = StatDisplay::for_card(CardType::Power, &CardStats::default(), &CardConfig::default()).unwrap();
        display.set_stats(CardType::Power, 1, 2);
        assert_eq!(display.text, "P");

        let stats = CardStats::from_data(&CardData::battle(CardId::new(1), "K", "red", 3, 7));
        let mut display = StatDisplay::for_card(CardType::Battle, &stats, &CardConfig::default()).unwrap();
        display.set_stats(CardType::Battle, 4, 7);
        assert_eq!(display.text, "04/07");
    }

    #[test]
    fn test_battle_layout_needs_stats() {
        let mut stats = CardStats::default();
        stats.set(StatKey::Ap, 1);

        assert_eq!(
            StatDisplay::for_card(CardType::Battle, &stats, &CardConfig::default()),
            Err(CardError::MissingStat(StatKey::Hp))
        );
    }
}
