//! 2D overlay draw stream.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands for the UI layer
//! - provide deterministic ordering (z-index + insertion order)
//! - keep shape-specific helpers isolated per shape file under `scene::shapes`
//!
//! The 3D scene graph lives in `world`; this module is only the flat overlay.

mod cmd;
mod key;
mod list;
mod z_index;

pub mod shapes;

pub use cmd::DrawCmd;
pub use key::SortKey;
pub use list::{DrawItem, DrawList};
pub use z_index::ZIndex;
