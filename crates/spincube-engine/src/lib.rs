//! Spincube engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by higher layers:
//! the winit loop, the wgpu device, 2D draw streams for UI overlays, and a
//! small 3D scene graph with its mesh renderer.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
pub mod text;
pub mod world;
