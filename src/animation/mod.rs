//! Animation primitives and their playback.
//!
//! ## Key Types
//!
//! - `Move`: One partial transform change with duration, easing and an
//!   optional completion callback
//! - `Tween`: The interpolation of the segment currently playing
//! - `MoveQueue`: FIFO of moves driving at most one tween at a time
//!
//! Time is measured in milliseconds and supplied by the host loop; nothing
//! here reads a clock or blocks.

pub mod easing;
pub mod queue;
pub mod tween;

pub use easing::Easing;
pub use queue::{MoveQueue, Step};
pub use tween::{Move, OnComplete, Transform, Tween};
