//! Card system: content, catalog and the card entity.
//!
//! ## Key Types
//!
//! - `CardData`: Authored card content (immutable, shared)
//! - `CardCatalog`: Content lookup by `CardId`
//! - `Card`: A card on the table with its visual state machine
//! - `VisualState`: `Static`, `Moving` or `Updating`
//!
//! ## Construction Errors
//!
//! Unknown colors, unknown type ids and missing stats are content bugs.
//! `Card::create` reports them as `CardError` and no card is built.

pub mod card;
pub mod catalog;
pub mod color;
pub mod data;
pub mod display;
pub mod error;
pub mod state;
pub mod stats;

pub use card::Card;
pub use catalog::CardCatalog;
pub use color::CardColor;
pub use data::{CardData, CardId, CardType};
pub use display::{battle_text, StatDisplay};
pub use error::{CardError, CatalogError};
pub use state::{MoveBatch, StateChange, StatUpdate, VisualState, VisualStateKind};
pub use stats::{CardStats, StatKey};
