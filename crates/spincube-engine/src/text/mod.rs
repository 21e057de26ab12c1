//! Font loading and text measurement.
//!
//! Glyph rasterization for drawing lives in `render::shapes::text`.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
