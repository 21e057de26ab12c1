use spincube_engine::coords::{Rect, Vec2};
use spincube_engine::text::FontSystem;

// ── Edges ─────────────────────────────────────────────────────────────────

/// Insets on all four sides (padding, border).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    #[inline]
    pub fn all(v: f32) -> Self {
        Self { top: v, right: v, bottom: v, left: v }
    }

    #[inline]
    pub fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self { top: vertical, bottom: vertical, left: horizontal, right: horizontal }
    }

    /// Total inset on the horizontal axis.
    #[inline]
    pub fn h(self) -> f32 {
        self.left + self.right
    }

    /// Total inset on the vertical axis.
    #[inline]
    pub fn v(self) -> f32 {
        self.top + self.bottom
    }
}

// ── Constraints ───────────────────────────────────────────────────────────

/// Layout constraints passed down from parent to child during measure.
///
/// A child may return any size in `[min, max]`. Parents enforce their own
/// policy by calling [`Constraints::constrain`] on the returned size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min: Vec2,
    pub max: Vec2,
}

impl Constraints {
    /// Tight: child must be exactly `size`.
    #[inline]
    pub fn tight(size: Vec2) -> Self {
        Self { min: size, max: size }
    }

    /// Loose: child can be anywhere from zero up to `max`.
    #[inline]
    pub fn loose(max: Vec2) -> Self {
        Self { min: Vec2::zero(), max }
    }

    /// Clamp a size into `[min, max]`.
    #[inline]
    #[must_use]
    pub fn constrain(self, size: Vec2) -> Vec2 {
        Vec2::new(
            size.x.max(self.min.x).min(self.max.x),
            size.y.max(self.min.y).min(self.max.y),
        )
    }

    /// Shrink max inward by `edges` (for padding). Min becomes zero.
    #[inline]
    #[must_use]
    pub fn shrink(self, edges: Edges) -> Self {
        Self {
            min: Vec2::zero(),
            max: Vec2::new(
                (self.max.x - edges.h()).max(0.0),
                (self.max.y - edges.v()).max(0.0),
            ),
        }
    }
}

// ── LayoutCtx ────────────────────────────────────────────────────────────

/// Resources made available to [`Widget::measure`](crate::widget::Widget::measure)
/// and [`Widget::on_event`](crate::widget::Widget::on_event).
#[derive(Clone, Copy)]
pub struct LayoutCtx<'a> {
    pub fonts: &'a FontSystem,
}

// ── rect helpers ─────────────────────────────────────────────────────────

/// Shrink a rect by `edges` (padding/inset).
#[inline]
pub fn inset_rect(rect: Rect, edges: Edges) -> Rect {
    Rect::new(
        rect.origin.x + edges.left,
        rect.origin.y + edges.top,
        (rect.size.x - edges.h()).max(0.0),
        (rect.size.y - edges.v()).max(0.0),
    )
}

/// Centers a `size` box inside `outer`.
#[inline]
pub fn center_in(outer: Rect, size: Vec2) -> Rect {
    Rect::new(
        outer.origin.x + (outer.size.x - size.x) * 0.5,
        outer.origin.y + (outer.size.y - size.y) * 0.5,
        size.x,
        size.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constrain_clamps_each_axis_independently() {
        let c = Constraints { min: Vec2::new(10.0, 10.0), max: Vec2::new(100.0, 100.0) };
        assert_eq!(c.constrain(Vec2::new(5.0, 250.0)), Vec2::new(10.0, 100.0));
        assert_eq!(c.constrain(Vec2::new(20.0, 30.0)), Vec2::new(20.0, 30.0));
    }

    #[test]
    fn control_padding_leaves_room_for_label() {
        // Movement buttons: 100 px above and below, 32 px on each side.
        let pad = Edges::symmetric(100.0, 32.0);
        assert_eq!((pad.h(), pad.v()), (64.0, 200.0));

        let inner = Constraints::tight(Vec2::new(400.0, 217.0)).shrink(pad);
        assert_eq!(inner.min, Vec2::zero());
        assert_eq!(inner.max, Vec2::new(336.0, 17.0));
    }

    #[test]
    fn shrinking_past_zero_saturates() {
        let pad = Edges::all(20.0);
        assert_eq!(Constraints::loose(Vec2::new(5.0, 5.0)).shrink(pad).max, Vec2::zero());
        assert_eq!(inset_rect(Rect::new(3.0, 3.0, 10.0, 10.0), pad).size, Vec2::zero());
    }

    #[test]
    fn inset_rect_moves_origin_by_leading_edges() {
        let edges = Edges { top: 4.0, bottom: 8.0, left: 6.0, right: 10.0 };
        let inner = inset_rect(Rect::new(5.0, 5.0, 100.0, 60.0), edges);
        assert_eq!(inner, Rect::new(11.0, 9.0, 84.0, 48.0));
    }

    #[test]
    fn center_in_splits_slack_evenly() {
        let r = center_in(Rect::new(10.0, 0.0, 100.0, 50.0), Vec2::new(40.0, 10.0));
        assert_eq!(r, Rect::new(40.0, 20.0, 40.0, 10.0));
    }
}
