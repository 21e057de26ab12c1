use crate::paint::Color;

use super::TextureId;

/// Blinn-Phong surface description.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    /// Diffuse color, multiplied with the texture when present.
    pub color: Color,
    pub texture: Option<TextureId>,
    pub specular: Color,
    pub shininess: f32,
}

impl Material {
    /// Phong material with a dim grey specular highlight.
    pub fn phong(color: Color) -> Self {
        Self {
            color,
            texture: None,
            specular: Color::from_hex(0x111111),
            shininess: 30.0,
        }
    }

    #[must_use]
    pub fn with_texture(mut self, texture: TextureId) -> Self {
        self.texture = Some(texture);
        self
    }
}
