//! Core engine-facing contracts.
//!
//! Defines the interface between the runtime (platform loop) and the game
//! layer: the `App` trait and the per-frame context it receives.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
