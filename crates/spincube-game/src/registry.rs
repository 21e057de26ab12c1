use spincube_engine::world::NodeId;

/// Insertion-ordered map from object name to an optional scene node.
///
/// Clearing an entry keeps its slot, so the positions of later entries
/// (which drive their spin speed) never shift.
#[derive(Debug, Default, Clone)]
pub struct ObjectRegistry {
    slots: Vec<(String, Option<NodeId>)>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points `name` at `node`, appending a slot on first use.
    pub fn set(&mut self, name: &str, node: Option<NodeId>) {
        match self.slots.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = node,
            None => self.slots.push((name.to_string(), node)),
        }
    }

    /// Empties the slot for `name` and returns what it held.
    pub fn clear(&mut self, name: &str) -> Option<NodeId> {
        self.slots
            .iter_mut()
            .find(|(n, _)| n == name)
            .and_then(|(_, slot)| slot.take())
    }

    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.slots.iter().find(|(n, _)| n == name).and_then(|(_, slot)| *slot)
    }

    /// Slots in insertion order, absent ones included.
    pub fn slots(&self) -> impl Iterator<Item = (usize, &str, Option<NodeId>)> {
        self.slots.iter().enumerate().map(|(i, (name, node))| (i, name.as_str(), *node))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use spincube_engine::world::{Geometry, Material, Node, Scene};
    use spincube_engine::paint::Color;

    use super::*;

    fn live_ids(n: usize) -> Vec<NodeId> {
        let mut scene = Scene::new();
        let geometry = scene.add_geometry(Geometry::cuboid(1.0, 1.0, 1.0));
        (0..n)
            .map(|_| scene.add_node(Node::new(geometry, Material::phong(Color::WHITE), glam::Vec3::ZERO)))
            .collect()
    }

    #[test]
    fn clearing_keeps_positions_stable() {
        let ids = live_ids(3);
        let mut registry = ObjectRegistry::new();
        registry.set("a", Some(ids[0]));
        registry.set("b", Some(ids[1]));
        registry.set("c", Some(ids[2]));

        assert_eq!(registry.clear("b"), Some(ids[1]));
        assert_eq!(registry.get("b"), None);

        let slots: Vec<_> = registry.slots().map(|(i, name, node)| (i, name.to_string(), node)).collect();
        assert_eq!(slots[2], (2, "c".to_string(), Some(ids[2])));
        assert_eq!(slots[1].2, None);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn setting_existing_name_reuses_its_slot() {
        let ids = live_ids(2);
        let mut registry = ObjectRegistry::new();
        registry.set("player", Some(ids[0]));
        registry.clear("player");
        registry.set("player", Some(ids[1]));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("player"), Some(ids[1]));
    }

    #[test]
    fn unknown_names_are_absent() {
        let mut registry = ObjectRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.get("ghost"), None);
        assert_eq!(registry.clear("ghost"), None);
    }
}
