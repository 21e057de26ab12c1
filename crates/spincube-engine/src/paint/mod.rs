//! Color model shared between UI and renderers.
//!
//! Colors are stored linear + premultiplied; surfaces are sRGB so the
//! hardware applies the transfer function on write.

pub mod color;

pub use color::Color;
