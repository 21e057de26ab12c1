//! Spinning-cube demo: a textured cube, a Start button, and hold-to-move
//! controls for a second cube.

pub mod app;
pub mod config;
pub mod controls;
pub mod cube;
pub mod host;
pub mod registry;
pub mod render_loop;
pub mod shell;
pub mod texture_fetch;
pub mod ui;

pub use app::SpincubeApp;
pub use config::{ConfigError, GameConfig};
