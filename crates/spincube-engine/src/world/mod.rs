//! Retained 3D scene graph.
//!
//! Holds geometry, textures and nodes in handle-indexed storage. The mesh
//! renderer (`render::mesh`) draws a [`Scene`] through a
//! [`PerspectiveCamera`]; nothing here touches the GPU.

mod camera;
mod geometry;
mod light;
mod material;
mod node;
mod scene;
mod texture;

pub use camera::PerspectiveCamera;
pub use geometry::{Geometry, GeometryError, GeometryId, Vertex};
pub use light::DirectionalLight;
pub use material::Material;
pub use node::{Node, NodeId, Transform};
pub use scene::{Scene, TextureSlot};
pub use texture::{TextureError, TextureId, TextureImage, MAX_TEXTURE_DIMENSION};
