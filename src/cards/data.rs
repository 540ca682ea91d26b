//! Card data - immutable content loaded from the catalog.
//!
//! `CardData` is kept exactly as authored: color and type are plain
//! strings so that a typo in content is reported by `Card::create` as a
//! configuration error instead of failing the whole catalog load.

use serde::{Deserialize, Serialize};

use super::error::CardError;

/// Unique identifier for a card in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// What kind of card this is; decides the stat label layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    /// Creature-like card with attack and health.
    Battle,
    /// Card without stats, shown with a single glyph.
    Power,
}

impl CardType {
    /// Type id as written in card content.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            CardType::Battle => "battle",
            CardType::Power => "power",
        }
    }
}

impl std::str::FromStr for CardType {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "battle" => Ok(CardType::Battle),
            "power" => Ok(CardType::Power),
            other => Err(CardError::UnknownCardType(other.to_string())),
        }
    }
}

/// Authored card content.
///
/// ```
/// use card_battle::cards::{CardData, CardId};
///
/// let knight = CardData::battle(CardId::new(1), "Knight", "blue", 3, 7)
///     .with_image("knight");
///
/// assert_eq!(knight.type_id, "battle");
/// assert_eq!(knight.hp, Some(7));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    pub id: CardId,

    pub name: String,

    /// `"battle"` or `"power"`.
    pub type_id: String,

    /// One of the six card color names.
    pub color: String,

    /// Attack points. Battle cards only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ap: Option<i32>,

    /// Health points. Battle cards only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<i32>,

    /// Texture shown when the card is face up.
    #[serde(default)]
    pub image_name: String,
}

impl CardData {
    /// Create card data with raw type and color ids.
    #[must_use]
    pub fn new(
        id: CardId,
        name: impl Into<String>,
        type_id: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            type_id: type_id.into(),
            color: color.into(),
            ap: None,
            hp: None,
            image_name: String::new(),
        }
    }

    /// Battle card with attack and health.
    #[must_use]
    pub fn battle(id: CardId, name: impl Into<String>, color: impl Into<String>, ap: i32, hp: i32) -> Self {
        Self::new(id, name, CardType::Battle.id(), color).with_stats(ap, hp)
    }

    /// Power card.
    #[must_use]
    pub fn power(id: CardId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self::new(id, name, CardType::Power.id(), color)
    }

    #[must_use]
    pub fn with_stats(mut self, ap: i32, hp: i32) -> Self {
        self.ap = Some(ap);
        self.hp = Some(hp);
        self
    }

    #[must_use]
    pub fn with_image(mut self, image_name: impl Into<String>) -> Self {
        self.image_name = image_name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_card_type_parse() {
        assert_eq!("battle".parse::<CardType>(), Ok(CardType::Battle));
        assert_eq!("power".parse::<CardType>(), Ok(CardType::Power));
        assert_eq!(
            "spell".parse::<CardType>(),
            Err(CardError::UnknownCardType("spell".to_string()))
        );
    }

    #[test]
    fn test_power_card_has_no_stats() {
        let data = CardData::power(CardId::new(2), "Surge", "orange");
        assert_eq!(data.type_id, "power");
        assert_eq!(data.ap, None);
        assert_eq!(data.hp, None);
    }

    #[test]
    fn test_card_data_json() {
        let data: CardData = serde_json::from_str(
            r#"{ "id": 5, "name": "Golem", "typeId": "battle", "color": "green", "ap": 4, "hp": 12, "imageName": "golem" }"#,
        )
        .unwrap();

        assert_eq!(data, CardData::battle(CardId::new(5), "Golem", "green", 4, 12).with_image("golem"));

        let json = serde_json::to_string(&CardData::power(CardId::new(1), "P", "red")).unwrap();
        assert!(json.contains("\"typeId\":\"power\""));
        assert!(!json.contains("\"ap\""));
    }
}
