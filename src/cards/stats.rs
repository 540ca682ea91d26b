//! Displayed card stats.

use serde::{Deserialize, Serialize};

use super::data::CardData;
use super::error::CardError;

/// Names of the stats a card can display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKey {
    /// Attack points.
    Ap,
    /// Health points.
    Hp,
}

impl std::fmt::Display for StatKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            StatKey::Ap => "ap",
            StatKey::Hp => "hp",
        })
    }
}

/// Current stat values of a card instance.
///
/// Seeded from `CardData` and then changed during play; the card data
/// itself is never modified. A stat the card does not have is `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStats {
    ap: Option<i32>,
    hp: Option<i32>,
}

impl CardStats {
    #[must_use]
    pub fn from_data(data: &CardData) -> Self {
        Self {
            ap: data.ap,
            hp: data.hp,
        }
    }

    #[must_use]
    pub fn get(&self, key: StatKey) -> Option<i32> {
        match key {
            StatKey::Ap => self.ap,
            StatKey::Hp => self.hp,
        }
    }

    /// Get a stat the caller expects to exist.
    pub fn require(&self, key: StatKey) -> Result<i32, CardError> {
        self.get(key).ok_or(CardError::MissingStat(key))
    }

    pub fn set(&mut self, key: StatKey, value: i32) {
        match key {
            StatKey::Ap => self.ap = Some(value),
            StatKey::Hp => self.hp = Some(value),
        }
    }
}
