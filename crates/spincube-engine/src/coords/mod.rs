//! Coordinate and geometry types shared across engine renderers and UI.
//!
//! Canonical CPU space for 2D work:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! 3D math lives in `glam`; these types only describe screen space.

mod rect;
mod vec2;
mod viewport;

pub use rect::{PhysicalRect, Rect};
pub use vec2::Vec2;
pub use viewport::Viewport;
