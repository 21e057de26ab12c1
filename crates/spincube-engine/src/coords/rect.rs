use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

/// Rectangle in physical pixels, clamped to a drawable surface.
///
/// This is the shape wgpu expects for `set_viewport` / `set_scissor_rect`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct PhysicalRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.origin.x && p.y >= self.origin.y && p.x < max.x && p.y < max.y
    }

    /// Converts to physical pixels, clamped to a `surface_w × surface_h` target.
    ///
    /// Returns `None` when nothing of the rect remains on the surface.
    pub fn to_physical(self, scale: f32, surface_w: u32, surface_h: u32) -> Option<PhysicalRect> {
        let clamp_x = |v: f32| ((v * scale).max(0.0) as u32).min(surface_w);
        let clamp_y = |v: f32| ((v * scale).max(0.0) as u32).min(surface_h);

        let max = self.max();
        let (x0, y0) = (clamp_x(self.origin.x), clamp_y(self.origin.y));
        let (x1, y1) = (clamp_x(max.x), clamp_y(max.y));

        let width = x1.saturating_sub(x0);
        let height = y1.saturating_sub(y0);
        if width == 0 || height == 0 {
            return None;
        }
        Some(PhysicalRect { x: x0, y: y0, width, height })
    }
}
