//! Card colors and their background fills.

use serde::{Deserialize, Serialize};

use super::error::CardError;
use crate::render::Rgb;

/// The closed set of card colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardColor {
    Red,
    Blue,
    Green,
    White,
    Black,
    Orange,
}

impl CardColor {
    pub const ALL: [CardColor; 6] = [
        CardColor::Red,
        CardColor::Blue,
        CardColor::Green,
        CardColor::White,
        CardColor::Black,
        CardColor::Orange,
    ];

    /// Background fill for cards of this color.
    #[must_use]
    pub const fn background(self) -> Rgb {
        match self {
            CardColor::Red => Rgb(0xff0000),
            CardColor::Blue => Rgb(0x0000ff),
            CardColor::Green => Rgb(0x00ff00),
            CardColor::White => Rgb(0xffffff),
            CardColor::Black => Rgb(0x000000),
            CardColor::Orange => Rgb(0xffa500),
        }
    }

    /// Name as written in card content.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CardColor::Red => "red",
            CardColor::Blue => "blue",
            CardColor::Green => "green",
            CardColor::White => "white",
            CardColor::Black => "black",
            CardColor::Orange => "orange",
        }
    }
}

impl std::fmt::Display for CardColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for CardColor {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardColor::ALL
            .into_iter()
            .find(|color| color.name() == s)
            .ok_or_else(|| CardError::UnknownColor(s.to_string()))
    }
}
