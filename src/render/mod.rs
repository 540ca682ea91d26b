//! Render surface boundary.
//!
//! The crate never draws anything itself. Hosts implement [`RenderSurface`]
//! on top of whatever rendering technology they use, and cards describe
//! themselves through it (see `Card::render`).
//!
//! Coordinates are logical units with the origin at the top-left corner
//! and y growing downwards.

mod surface;

pub use surface::{Rect, RenderSurface, Rgb, TextStyle};
