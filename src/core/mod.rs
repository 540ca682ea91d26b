//! Core building blocks shared by cards, phases and games: configuration
//! and deterministic randomness.

pub mod config;
pub mod rng;

pub use config::{BattleConfig, CardConfig, PhaseConfig};
pub use rng::GameRng;
