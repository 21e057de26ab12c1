//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw streams or a `world::Scene` and issue GPU
//! commands via wgpu. Each renderer owns its GPU resources and builds them
//! lazily on first use.
//!
//! Convention:
//! - 2D geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using a viewport uniform.

mod ctx;
pub mod mesh;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::MeshRenderer;
pub use shapes::{RectRenderer, TextRenderer};
