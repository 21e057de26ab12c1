//! Renderers for the 2D overlay draw stream.

mod common;
mod rect;
mod text;

pub use rect::RectRenderer;
pub use text::TextRenderer;
