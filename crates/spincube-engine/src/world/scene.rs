use super::{
    DirectionalLight, Geometry, GeometryId, Node, NodeId, TextureId, TextureImage,
};

/// A texture slot. The image may arrive after the slot is referenced; until
/// then materials using it render with a white texel.
#[derive(Debug, Clone, Default)]
pub struct TextureSlot {
    image: Option<TextureImage>,
    version: u64,
}

impl TextureSlot {
    #[inline]
    pub fn image(&self) -> Option<&TextureImage> {
        self.image.as_ref()
    }

    /// Bumped every time the image changes, so GPU caches know to re-upload.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }
}

#[derive(Debug)]
struct NodeSlot {
    generation: u32,
    node: Option<Node>,
}

/// Geometry, textures, nodes and the single directional light.
#[derive(Debug, Default)]
pub struct Scene {
    geometries: Vec<Geometry>,
    textures: Vec<TextureSlot>,
    nodes: Vec<NodeSlot>,
    free: Vec<u32>,
    pub light: DirectionalLight,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryId {
        self.geometries.push(geometry);
        GeometryId(self.geometries.len() - 1)
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&Geometry> {
        self.geometries.get(id.0)
    }

    /// Reserves a texture slot whose image is supplied later.
    pub fn add_texture_slot(&mut self) -> TextureId {
        self.textures.push(TextureSlot::default());
        TextureId(self.textures.len() - 1)
    }

    /// Fills or replaces a slot's image. Unknown ids are ignored.
    pub fn set_texture_image(&mut self, id: TextureId, image: TextureImage) {
        if let Some(slot) = self.textures.get_mut(id.0) {
            slot.image = Some(image);
            slot.version += 1;
        }
    }

    pub fn texture(&self, id: TextureId) -> Option<&TextureSlot> {
        self.textures.get(id.0)
    }

    pub fn add_node(&mut self, node: Node) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.nodes[index as usize];
            slot.node = Some(node);
            return NodeId { index, generation: slot.generation };
        }

        self.nodes.push(NodeSlot { generation: 0, node: Some(node) });
        NodeId { index: (self.nodes.len() - 1) as u32, generation: 0 }
    }

    /// Removes a node, returning it. Stale or unknown ids return `None`.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let slot = self.nodes.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(node)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Live nodes in slot order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().filter_map(|(i, slot)| {
            let node = slot.node.as_ref()?;
            Some((NodeId { index: i as u32, generation: slot.generation }, node))
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|s| s.node.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;
    use crate::world::Material;
    use glam::Vec3;

    fn scene_with_box() -> (Scene, GeometryId) {
        let mut scene = Scene::new();
        let g = scene.add_geometry(Geometry::cuboid(1.0, 1.0, 1.0));
        (scene, g)
    }

    fn node(g: GeometryId, x: f32) -> Node {
        Node::new(g, Material::phong(Color::WHITE), Vec3::new(x, 0.0, 0.0))
    }

    #[test]
    fn removed_handle_stays_invalid_after_slot_reuse() {
        let (mut scene, g) = scene_with_box();
        let a = scene.add_node(node(g, 1.0));
        assert!(scene.remove_node(a).is_some());

        let b = scene.add_node(node(g, 2.0));
        assert_eq!(a.index, b.index);
        assert!(scene.node(a).is_none());
        assert!(scene.remove_node(a).is_none());
        assert_eq!(scene.node(b).map(|n| n.transform.position.x), Some(2.0));
    }

    #[test]
    fn nodes_iterates_live_only() {
        let (mut scene, g) = scene_with_box();
        let a = scene.add_node(node(g, 1.0));
        let _b = scene.add_node(node(g, 2.0));
        scene.remove_node(a);

        let xs: Vec<f32> = scene.nodes().map(|(_, n)| n.transform.position.x).collect();
        assert_eq!(xs, vec![2.0]);
        assert_eq!(scene.node_count(), 1);
    }

    #[test]
    fn texture_version_bumps_on_update() {
        let mut scene = Scene::new();
        let t = scene.add_texture_slot();
        assert!(scene.texture(t).and_then(TextureSlot::image).is_none());

        scene.set_texture_image(t, TextureImage::white());
        let slot = scene.texture(t).unwrap();
        assert_eq!(slot.version(), 1);
        assert!(slot.image().is_some());
    }
}
