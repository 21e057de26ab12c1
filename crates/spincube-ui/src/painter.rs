use spincube_engine::coords::{Rect, Vec2};
use spincube_engine::paint::Color;
use spincube_engine::scene::shapes::Border;
use spincube_engine::scene::{DrawList, ZIndex};
use spincube_engine::text::{FontId, FontSystem};

use crate::constraints::LayoutCtx;

/// A labelled interactive region recorded during paint.
///
/// Collected by [`UiScene`](crate::scene::UiScene) each frame so callers and
/// tests can discover what controls are on screen and where.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessNode {
    pub label: String,
    pub rect: Rect,
}

/// Drawing surface passed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Wraps the engine's `DrawList` and exposes per-frame pointer state so
/// widgets can express hover / pressed visuals directly while painting.
pub struct Painter<'a> {
    pub(crate) draw_list: &'a mut DrawList,
    pub(crate) font_system: &'a FontSystem,
    pub(crate) access: &'a mut Vec<AccessNode>,
    z: i32,
    /// Mouse position in logical pixels, `None` while outside the window.
    pub hover_pos: Option<Vec2>,
    /// Where each currently held pointer went down.
    pub press_starts: &'a [Vec2],
}

impl<'a> Painter<'a> {
    pub(crate) fn new(
        draw_list: &'a mut DrawList,
        font_system: &'a FontSystem,
        access: &'a mut Vec<AccessNode>,
        hover_pos: Option<Vec2>,
        press_starts: &'a [Vec2],
    ) -> Self {
        Self { draw_list, font_system, access, z: ZIndex::BASE.0, hover_pos, press_starts }
    }

    // ── input queries ─────────────────────────────────────────────────────

    /// Returns `true` if the mouse cursor is inside `rect`.
    #[inline]
    pub fn is_hovered(&self, rect: Rect) -> bool {
        self.hover_pos.is_some_and(|p| rect.contains(p))
    }

    /// Returns `true` if some held pointer started its press inside `rect`.
    ///
    /// Drives pressed visuals only; event routing follows pointer claims.
    #[inline]
    pub fn is_pressed(&self, rect: Rect) -> bool {
        self.press_starts.iter().any(|&p| rect.contains(p))
    }

    // ── layout context ────────────────────────────────────────────────────

    /// Returns a [`LayoutCtx`] borrowing this painter's font system.
    ///
    /// Containers use it inside `paint` to re-measure their children.
    #[inline]
    pub fn layout_ctx(&self) -> LayoutCtx<'a> {
        LayoutCtx { fonts: self.font_system }
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Solid axis-aligned rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let z = self.next_z();
        self.draw_list.push_solid_rect(z, rect, color);
    }

    /// Filled rectangle with a border stroke on top.
    pub fn bordered_rect(&mut self, rect: Rect, fill: Color, border: Border) {
        let z = self.next_z();
        // The border occupies the level above the fill.
        self.z += 1;
        self.draw_list.push_bordered_rect(z, rect, fill, border);
    }

    /// Single-line text at `origin` (top-left of the line box).
    pub fn text(&mut self, text: impl Into<String>, font: FontId, size: f32, color: Color, origin: Vec2) {
        let z = self.next_z();
        self.draw_list.push_text(z, text, font, size, color, origin);
    }

    /// Records an accessible region for this frame.
    pub fn annotate(&mut self, label: impl Into<String>, rect: Rect) {
        self.access.push(AccessNode { label: label.into(), rect });
    }

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex::new(self.z);
        self.z += 1;
        z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spincube_engine::scene::DrawCmd;

    #[test]
    fn later_draws_land_above_borders() {
        let mut list = DrawList::new();
        let fonts = FontSystem::new();
        let mut access = Vec::new();
        let mut painter = Painter::new(&mut list, &fonts, &mut access, None, &[]);

        let rect = Rect::new(0.0, 0.0, 40.0, 20.0);
        painter.bordered_rect(rect, Color::BLACK, Border::new(1.0, Color::WHITE));
        painter.text("x", FontId(0), 12.0, Color::WHITE, Vec2::zero());

        let last = list.items().last().unwrap();
        assert!(matches!(last.cmd, DrawCmd::Text(_)));
        assert_eq!(list.items()[0].key.z, ZIndex(0));
        assert!(list.items()[1..5].iter().all(|i| i.key.z == ZIndex(1)));
        assert_eq!(last.key.z, ZIndex(2));
    }

    #[test]
    fn pressed_follows_press_start_not_cursor() {
        let mut list = DrawList::new();
        let fonts = FontSystem::new();
        let mut access = Vec::new();
        let starts = [Vec2::new(5.0, 5.0)];
        let painter = Painter::new(&mut list, &fonts, &mut access, Some(Vec2::new(500.0, 5.0)), &starts);

        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(painter.is_pressed(rect));
        assert!(!painter.is_hovered(rect));
    }
}
