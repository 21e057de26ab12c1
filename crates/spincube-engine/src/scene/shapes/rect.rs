use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::Border;

/// Solid rectangle draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub color: Color,
}

impl RectCmd {
    #[inline]
    pub fn new(rect: Rect, color: Color) -> Self {
        Self { rect, color }
    }
}

impl DrawList {
    /// Records a solid rectangle.
    #[inline]
    pub fn push_solid_rect(&mut self, z: ZIndex, rect: Rect, color: Color) {
        self.push(z, DrawCmd::Rect(RectCmd::new(rect, color)));
    }

    /// Records a filled rectangle with a border.
    ///
    /// The border is emitted as four edge rects one z-level above the fill,
    /// so the rect renderer needs no stroke support.
    pub fn push_bordered_rect(&mut self, z: ZIndex, rect: Rect, fill: Color, border: Border) {
        self.push_solid_rect(z, rect, fill);

        let w = border.width.min(rect.size.x * 0.5).min(rect.size.y * 0.5);
        if w <= 0.0 {
            return;
        }

        let edge_z = ZIndex(z.0 + 1);
        let Rect { origin: o, size: s } = rect;
        let edges = [
            Rect::new(o.x, o.y, s.x, w),
            Rect::new(o.x, o.y + s.y - w, s.x, w),
            Rect::new(o.x, o.y + w, w, s.y - 2.0 * w),
            Rect::new(o.x + s.x - w, o.y + w, w, s.y - 2.0 * w),
        ];
        for edge in edges {
            self.push_solid_rect(edge_z, edge, border.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_emits_fill_plus_four_edges() {
        let mut list = DrawList::new();
        let cyan = Color::from_hex(0x00ffff);
        list.push_bordered_rect(
            ZIndex::BASE,
            Rect::new(0.0, 0.0, 100.0, 40.0),
            Color::WHITE,
            Border::new(1.0, cyan),
        );

        let items = list.items();
        assert_eq!(items.len(), 5);
        assert!(items[1..].iter().all(|i| i.key.z == ZIndex(1)));

        let DrawCmd::Rect(bottom) = &items[2].cmd else { panic!("expected rect") };
        assert_eq!(bottom.rect, Rect::new(0.0, 39.0, 100.0, 1.0));
    }

    #[test]
    fn zero_width_border_only_fills() {
        let mut list = DrawList::new();
        list.push_bordered_rect(
            ZIndex::BASE,
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Color::WHITE,
            Border::new(0.0, Color::BLACK),
        );
        assert_eq!(list.items().len(), 1);
    }
}
