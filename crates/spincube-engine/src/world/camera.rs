use glam::{Mat4, Vec3};

/// Right-handed perspective camera looking down its local -Z axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl PerspectiveCamera {
    pub fn new(fov_y_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self { fov_y_deg, aspect, near, far, position: Vec3::ZERO }
    }

    /// Updates the aspect ratio from a surface size. Degenerate sizes are ignored.
    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
            self.aspect = width / height;
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, Vec3::NEG_Z, Vec3::Y)
    }

    /// Projection with wgpu's `[0, 1]` depth range.
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> PerspectiveCamera {
        let mut cam = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        cam.position = Vec3::new(0.0, 0.0, 5.0);
        cam
    }

    #[test]
    fn origin_projects_to_center() {
        let ndc = camera().view_projection().project_point3(Vec3::ZERO);
        assert_relative_eq!(ndc.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(ndc.y, 0.0, epsilon = 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn wider_aspect_shrinks_horizontal_ndc() {
        let mut cam = camera();
        let narrow = cam.view_projection().project_point3(Vec3::X).x;
        cam.set_viewport_size(1600.0, 800.0);
        let wide = cam.view_projection().project_point3(Vec3::X).x;
        assert_relative_eq!(wide, narrow * 0.5, epsilon = 1e-5);
    }

    #[test]
    fn zero_size_keeps_previous_aspect() {
        let mut cam = camera();
        cam.set_viewport_size(0.0, 600.0);
        assert_eq!(cam.aspect, 1.0);
    }
}
