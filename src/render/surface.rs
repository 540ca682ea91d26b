//! Drawing primitives consumed from the host.

use serde::{Deserialize, Serialize};

/// A packed `0xRRGGBB` color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xffffff);
    pub const BLACK: Rgb = Rgb(0x000000);

    /// Create a color from a packed `0xRRGGBB` value.
    #[must_use]
    pub const fn new(packed: u32) -> Self {
        Self(packed & 0x00ff_ffff)
    }

    /// Red, green and blue channels.
    #[must_use]
    pub const fn channels(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            (self.0 & 0xff) as u8,
        )
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// Axis-aligned rectangle in surface coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

/// Text styling for labels drawn on a card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in logical pixels.
    pub font_size: f32,
    pub color: Rgb,
    pub bold: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 24.0,
            color: Rgb::WHITE,
            bold: true,
        }
    }
}

/// Drawing facility provided by the host renderer.
///
/// Calls are issued in painter's order: later calls draw on top.
pub trait RenderSurface {
    /// Native size of a loaded texture, or `None` if the key is unknown.
    fn texture_size(&self, key: &str) -> Option<(f32, f32)>;

    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Rgb);

    /// Draw a texture stretched into `rect`.
    fn draw_image(&mut self, key: &str, rect: Rect);

    /// Draw text with its top-left corner at `(x, y)`.
    ///
    /// `scale_x` is the horizontal scale of the owning object; a surface
    /// may squash glyphs or skip the label when it is close to zero.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, scale_x: f32, style: &TextStyle);
}
