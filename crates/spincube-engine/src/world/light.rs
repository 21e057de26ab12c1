use glam::Vec3;

use crate::paint::Color;

/// Light arriving from `position` toward `target`, with no falloff.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl DirectionalLight {
    pub fn new(color: Color, intensity: f32, position: Vec3) -> Self {
        Self { color, intensity, position, target: Vec3::ZERO }
    }

    /// Unit vector from the lit surface toward the light.
    pub fn to_light(&self) -> Vec3 {
        (self.position - self.target).try_normalize().unwrap_or(Vec3::Z)
    }

    /// Linear RGB radiance (`color × intensity`).
    pub fn radiance(&self) -> Vec3 {
        let [r, g, b, _] = self.color.to_straight();
        Vec3::new(r, g, b) * self.intensity
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Color::WHITE, 1.0, Vec3::new(0.0, 0.0, 1.0))
    }
}
