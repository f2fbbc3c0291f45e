//! Frame drawing: typesetting, caching and primitives over the terminal buffer

pub mod cache;
pub mod math;
pub mod renderer;
pub mod surface;

use ratatui::style::Color;

pub use cache::{CacheKey, RenderCache};
pub use math::{MathError, MathImage, Rasterizer, TerminalMath};
pub use renderer::Renderer;
pub use surface::{BufferSurface, DrawSurface};

/// Palette used by every screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextColor {
    White,
    Gray,
    DarkGray,
    Red,
    LightRed,
    Green,
    LightGreen,
    Blue,
    Cyan,
    Yellow,
    Magenta,
}

impl From<TextColor> for Color {
    fn from(color: TextColor) -> Self {
        match color {
            TextColor::White => Color::White,
            TextColor::Gray => Color::Gray,
            TextColor::DarkGray => Color::DarkGray,
            TextColor::Red => Color::Red,
            TextColor::LightRed => Color::LightRed,
            TextColor::Green => Color::Green,
            TextColor::LightGreen => Color::LightGreen,
            TextColor::Blue => Color::Blue,
            TextColor::Cyan => Color::Cyan,
            TextColor::Yellow => Color::Yellow,
            TextColor::Magenta => Color::Magenta,
        }
    }
}
