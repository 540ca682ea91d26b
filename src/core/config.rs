//! Configuration types.
//!
//! Hosts configure the crate at startup by providing:
//! - `CardConfig`: Card geometry, open/close timing, textures and label style
//! - `PhaseConfig`: Limits for the phase state machine
//! - `BattleConfig`: Combines all configuration
//!
//! Every field has a default, so a JSON document only needs to name the
//! values it overrides.

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::render::TextStyle;

/// Configuration shared by every card of a match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Card width in logical units.
    pub width: f32,

    /// Card height in logical units.
    pub height: f32,

    /// Duration of the open and close animations, in milliseconds.
    pub flip_duration: u32,

    /// Space kept free around the card image, summed over both sides.
    pub image_inset: f32,

    /// Texture shown while a card is face down.
    pub back_texture: String,

    /// Style of the stat label.
    pub stat_style: TextStyle,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 150.0,
            flip_duration: 200,
            image_inset: 12.0,
            back_texture: "card-back".to_string(),
            stat_style: TextStyle::default(),
        }
    }
}

impl CardConfig {
    /// Create the default card configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration of the open and close animations.
    #[must_use]
    pub fn with_flip_duration(mut self, duration: u32) -> Self {
        self.flip_duration = duration;
        self
    }

    /// Set the texture shown on the card back.
    #[must_use]
    pub fn with_back_texture(mut self, texture: impl Into<String>) -> Self {
        self.back_texture = texture.into();
        self
    }

    /// Set the stat label style.
    #[must_use]
    pub fn with_stat_style(mut self, style: TextStyle) -> Self {
        self.stat_style = style;
        self
    }
}

/// Configuration for the phase state machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseConfig {
    /// Maximum number of transitions applied within a single call into
    /// the machine. Phases that request a successor from `create` form a
    /// chain; a chain longer than this is reported as an error. Must be
    /// at least 1.
    #[serde(deserialize_with = "deserialize_limit")]
    pub max_chained_transitions: usize,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            max_chained_transitions: 32,
        }
    }
}

fn deserialize_limit<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let limit = usize::deserialize(deserializer)?;
    if limit == 0 {
        return Err(de::Error::custom("max_chained_transitions must be at least 1"));
    }
    Ok(limit)
}

impl PhaseConfig {
    /// Set the chained transition limit.
    #[must_use]
    pub fn with_max_chained_transitions(mut self, limit: usize) -> Self {
        assert!(limit > 0, "Transition limit must be at least 1");
        self.max_chained_transitions = limit;
        self
    }
}

/// Complete configuration for a card battle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub card: CardConfig,
    pub phase: PhaseConfig,
}

impl BattleConfig {
    /// Parse a configuration document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set the card configuration.
    #[must_use]
    pub fn with_card(mut self, card: CardConfig) -> Self {
        self.card = card;
        self
    }

    /// Set the phase configuration.
    #[must_use]
    pub fn with_phase(mut self, phase: PhaseConfig) -> Self {
        self.phase = phase;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Rgb;

    #[test]
    fn test_card_config_defaults() {
        let config = CardConfig::default();
        assert_eq!(config.width, 100.0);
        assert_eq!(config.height, 150.0);
        assert_eq!(config.flip_duration, 200);
        assert_eq!(config.image_inset, 12.0);
        assert_eq!(config.back_texture, "card-back");
    }

    #[test]
    fn test_card_config_builder() {
        let config = CardConfig::new()
            .with_flip_duration(120)
            .with_back_texture("back-blue");

        assert_eq!(config.flip_duration, 120);
        assert_eq!(config.back_texture, "back-blue");
        assert_eq!(config.width, 100.0);
    }

    #[test]
    fn test_battle_config_partial_json() {
        let config = BattleConfig::from_json(
            r#"{
                "card": { "flip_duration": 350, "stat_style": { "font_size": 18.0, "color": 0, "bold": false } },
                "phase": { "max_chained_transitions": 4 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.card.flip_duration, 350);
        assert_eq!(config.card.height, 150.0);
        assert_eq!(config.card.stat_style.color, Rgb::BLACK);
        assert!(!config.card.stat_style.bold);
        assert_eq!(config.phase.max_chained_transitions, 4);
    }

    #[test]
    fn test_battle_config_empty_json() {
        let config = BattleConfig::from_json("{}").unwrap();
        assert_eq!(config, BattleConfig::default());
    }

    #[test]
    fn test_battle_config_rejects_bad_types() {
        assert!(BattleConfig::from_json(r#"{ "card": { "width": "wide" } }"#).is_err());
    }

    #[test]
    #[should_panic(expected = "Transition limit must be at least 1")]
    fn test_phase_config_zero_limit() {
        let _ = PhaseConfig::default().with_max_chained_transitions(0);
    }

    #[test]
    fn test_battle_config_rejects_zero_limit() {
        let err = BattleConfig::from_json(r#"{ "phase": { "max_chained_transitions": 0 } }"#).unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }
}
