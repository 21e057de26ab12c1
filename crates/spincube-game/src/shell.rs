//! One-way start toggle and the layout that depends on it.

use spincube_engine::coords::{Rect, Vec2};

/// Share of each window dimension the scene covers before start.
pub const IDLE_SURFACE_FRACTION: f32 = 0.8;

#[derive(Debug, Default)]
pub struct AppShell {
    running: bool,
}

impl AppShell {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Flips `running` to `true`. Returns whether this call changed it.
    pub fn start(&mut self) -> bool {
        !std::mem::replace(&mut self.running, true)
    }

    /// Where the 3D scene is drawn, in logical pixels.
    ///
    /// Idle: a centered band at the top covering 80% of each dimension.
    /// Running: the whole window.
    pub fn surface_rect(&self, viewport: Vec2) -> Rect {
        if self.running {
            return Rect::new(0.0, 0.0, viewport.x, viewport.y);
        }
        let w = viewport.x * IDLE_SURFACE_FRACTION;
        let h = viewport.y * IDLE_SURFACE_FRACTION;
        Rect::new((viewport.x - w) * 0.5, 0.0, w, h)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn start_is_one_way_and_reports_the_first_transition() {
        let mut shell = AppShell::new();
        assert!(!shell.is_running());
        assert!(shell.start());
        assert!(!shell.start());
        assert!(shell.is_running());
    }

    #[test]
    fn idle_surface_is_centered_at_the_top() {
        let shell = AppShell::new();
        let r = shell.surface_rect(Vec2::new(1000.0, 500.0));
        assert_relative_eq!(r.origin.x, 100.0);
        assert_eq!(r.origin.y, 0.0);
        assert_relative_eq!(r.size.x, 800.0);
        assert_relative_eq!(r.size.y, 400.0);
    }

    #[test]
    fn running_surface_fills_the_window() {
        let mut shell = AppShell::new();
        shell.start();
        assert_eq!(shell.surface_rect(Vec2::new(640.0, 480.0)), Rect::new(0.0, 0.0, 640.0, 480.0));
    }
}
