use glam::{EulerRot, Mat4, Quat, Vec3};

use super::{GeometryId, Material};

/// Generational handle to a node in a [`Scene`](super::Scene).
///
/// A handle stays invalid after its node is removed, even when the slot is
/// reused.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

/// Position, XYZ Euler rotation in radians, and scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    /// Local-to-world matrix: translate × rotate(X, then Y, then Z) × scale.
    pub fn matrix(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            self.position,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A drawable object: shared geometry, own material and transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub geometry: GeometryId,
    pub material: Material,
    pub transform: Transform,
}

impl Node {
    pub fn new(geometry: GeometryId, material: Material, position: Vec3) -> Self {
        Self { geometry, material, transform: Transform::from_position(position) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn matrix_translates_then_rotates() {
        let t = Transform {
            position: Vec3::new(0.0, 1.0, 0.0),
            rotation: Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
            scale: Vec3::ONE,
        };
        // +X rotated 90° about Y lands on -Z, then moves up one unit.
        let p = t.matrix().transform_point3(Vec3::X);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn rotation_applies_x_before_z_in_intrinsic_order() {
        let a = std::f32::consts::FRAC_PI_2;
        let t = Transform { rotation: Vec3::new(a, 0.0, a), ..Transform::IDENTITY };
        let expected = Mat4::from_rotation_x(a) * Mat4::from_rotation_z(a);
        assert!(t.matrix().abs_diff_eq(expected, 1e-6));
    }
}
