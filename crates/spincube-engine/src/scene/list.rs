use super::{DrawCmd, SortKey, ZIndex};

/// A single draw item: sort key + command.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Recorded overlay stream for one frame.
///
/// `push()` is O(1). Paint-order iteration reuses an internal index buffer,
/// so a warmed-up list does not allocate per frame.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_indices.clear();
        self.sorted_dirty = true;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem { key: SortKey::new(z, order), cmd });
        self.sorted_dirty = true;
    }

    /// Iterates items back-to-front without cloning draw commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }
        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        let items = &self.items;
        self.sorted_indices.sort_by(|&a, &b| items[a].key.cmp(&items[b].key));
        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::paint::Color;

    fn rect_at(x: f32) -> Rect {
        Rect::new(x, 0.0, 1.0, 1.0)
    }

    fn xs(list: &mut DrawList) -> Vec<f32> {
        list.iter_in_paint_order()
            .filter_map(|item| match &item.cmd {
                DrawCmd::Rect(r) => Some(r.rect.origin.x),
                DrawCmd::Text(_) => None,
            })
            .collect()
    }

    #[test]
    fn paint_order_sorts_by_z_then_insertion() {
        let mut list = DrawList::new();
        list.push_solid_rect(ZIndex::CONTENT, rect_at(1.0), Color::WHITE);
        list.push_solid_rect(ZIndex::BASE, rect_at(2.0), Color::WHITE);
        list.push_solid_rect(ZIndex::CONTENT, rect_at(3.0), Color::WHITE);
        list.push_solid_rect(ZIndex::BASE, rect_at(4.0), Color::WHITE);

        assert_eq!(xs(&mut list), vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn clear_resets_items_and_order() {
        let mut list = DrawList::new();
        list.push_solid_rect(ZIndex::BASE, rect_at(1.0), Color::WHITE);
        list.clear();
        assert!(list.is_empty());

        list.push_solid_rect(ZIndex::BASE, rect_at(5.0), Color::WHITE);
        assert_eq!(list.items()[0].key.order, 0);
        assert_eq!(xs(&mut list), vec![5.0]);
    }
}
