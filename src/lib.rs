//! # card-battle
//!
//! Card visuals and turn phases for a two-player card battle.
//!
//! ## Design Principles
//!
//! 1. **State Machines Everywhere**: A card's look is driven by one active
//!    visual state (static, moving, updating); a match is driven by one
//!    active phase. Both swap whole states rather than toggling flags.
//!
//! 2. **Merging Moves**: Move requests made while a card is moving join
//!    its running queue instead of interrupting it.
//!
//! 3. **Host Owns the Clock**: Nothing here sleeps or spawns. The host
//!    passes elapsed milliseconds to `pre_update`/`tick` and pulls a
//!    picture through `RenderSurface`.
//!
//! ## Modules
//!
//! - `animation`: Easing curves, tweens and the move queue
//! - `cards`: Card content, catalog and the animated `Card`
//! - `phases`: The phase contract and the machine that drives it
//! - `render`: Drawing primitives and the `RenderSurface` seam
//! - `core`: Configuration and deterministic randomness
//! - `games`: Complete games built on the above

pub mod animation;
pub mod cards;
pub mod core;
pub mod games;
pub mod phases;
pub mod render;

// Re-export commonly used types
pub use crate::core::{BattleConfig, CardConfig, GameRng, PhaseConfig};

pub use crate::animation::{Easing, Move, MoveQueue, Transform};

pub use crate::cards::{
    Card, CardCatalog, CardColor, CardData, CardError, CardId, CardType, CatalogError, StatKey, VisualStateKind,
};

pub use crate::phases::{Phase, PhaseContext, PhaseError, PhaseKind, PhaseMachine, PhaseRequest, PhaseTransitions};

pub use crate::render::{Rect, RenderSurface, Rgb, TextStyle};
