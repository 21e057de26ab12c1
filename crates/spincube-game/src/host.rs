//! Owner of the 3D scene, its camera and the object registry.

use glam::Vec3;
use spincube_engine::paint::Color;
use spincube_engine::world::{
    DirectionalLight, Geometry, GeometryError, GeometryId, Material, Node, NodeId, PerspectiveCamera,
    Scene, TextureId, TextureImage,
};

use crate::cube::cube_geometry;
use crate::registry::ObjectRegistry;

pub const CUBE_NAME: &str = "obj1";
pub const PLAYER_NAME: &str = "player";

/// Diffuse color shared by both cubes.
pub const CUBE_COLOR: u32 = 0x44aa88;

pub const PLAYER_START: Vec3 = Vec3::new(0.0, 1.0, 0.0);

pub struct SceneHost {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub registry: ObjectRegistry,
    box_geometry: Option<GeometryId>,
}

impl SceneHost {
    /// Empty scene with the camera at `z = 5` looking down -Z.
    pub fn new(aspect: f32) -> Self {
        let mut camera = PerspectiveCamera::new(75.0, aspect, 0.1, 1000.0);
        camera.position.z = 5.0;

        Self { scene: Scene::new(), camera, registry: ObjectRegistry::new(), box_geometry: None }
    }

    /// Adds the textured cube and the light.
    ///
    /// Returns the cube's texture slot; it renders white until an image is
    /// stored with [`set_texture`](Self::set_texture).
    pub fn build_initial_scene(&mut self) -> Result<TextureId, GeometryError> {
        let geometry = self.scene.add_geometry(cube_geometry()?);
        let texture = self.scene.add_texture_slot();

        let cube = self.make_instance(geometry, Color::from_hex(CUBE_COLOR), Vec3::ZERO, Some(texture));
        self.registry.set(CUBE_NAME, Some(cube));

        self.scene.light = DirectionalLight::new(Color::WHITE, 1.0, Vec3::new(-1.0, 2.0, 4.0));
        Ok(texture)
    }

    /// Adds a Phong-shaded node and returns its handle.
    pub fn make_instance(
        &mut self,
        geometry: GeometryId,
        color: Color,
        position: Vec3,
        texture: Option<TextureId>,
    ) -> NodeId {
        let material = match texture {
            Some(texture) => Material::phong(color).with_texture(texture),
            None => Material::phong(color),
        };
        self.scene.add_node(Node::new(geometry, material, position))
    }

    /// `true` spawns the player cube; `false` removes it from the scene and
    /// empties its registry slot.
    pub fn set_running(&mut self, running: bool) {
        if running {
            if self.registry.get(PLAYER_NAME).is_some() {
                log::debug!("player already present");
                return;
            }
            let geometry = self.unit_box();
            let player = self.make_instance(geometry, Color::from_hex(CUBE_COLOR), PLAYER_START, None);
            self.registry.set(PLAYER_NAME, Some(player));
            log::info!("player spawned at {PLAYER_START}");
        } else if let Some(player) = self.registry.clear(PLAYER_NAME) {
            self.scene.remove_node(player);
            log::info!("player removed");
        }
    }

    pub fn set_texture(&mut self, id: TextureId, image: TextureImage) {
        self.scene.set_texture_image(id, image);
    }

    /// Node registered under `name`, if present.
    pub fn object(&self, name: &str) -> Option<&Node> {
        self.registry.get(name).and_then(|id| self.scene.node(id))
    }

    fn unit_box(&mut self) -> GeometryId {
        *self
            .box_geometry
            .get_or_insert_with(|| self.scene.add_geometry(Geometry::cuboid(1.0, 1.0, 1.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_scene_matches_the_demo_setup() {
        let mut host = SceneHost::new(1.0);
        let texture = host.build_initial_scene().unwrap();

        let cube = host.object(CUBE_NAME).unwrap();
        assert_eq!(cube.transform.position, Vec3::ZERO);
        assert_eq!(cube.material.texture, Some(texture));
        assert_eq!(cube.material.color, Color::from_hex(CUBE_COLOR));

        assert_eq!(host.scene.light.position, Vec3::new(-1.0, 2.0, 4.0));
        assert_eq!(host.scene.light.intensity, 1.0);
        assert_eq!(host.camera.position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(host.camera.fov_y_deg, 75.0);
        assert!(host.object(PLAYER_NAME).is_none());
    }

    #[test]
    fn running_spawns_an_untextured_player_once() {
        let mut host = SceneHost::new(1.0);
        host.set_running(true);
        host.set_running(true);

        let player = host.object(PLAYER_NAME).unwrap();
        assert_eq!(player.transform.position, PLAYER_START);
        assert_eq!(player.material.texture, None);
        assert_eq!(host.scene.node_count(), 1);
    }

    #[test]
    fn stopping_removes_player_but_keeps_its_slot() {
        let mut host = SceneHost::new(1.0);
        host.build_initial_scene().unwrap();
        host.set_running(true);
        let id = host.registry.get(PLAYER_NAME).unwrap();

        host.set_running(false);

        assert!(host.scene.node(id).is_none());
        assert_eq!(host.registry.get(PLAYER_NAME), None);
        assert_eq!(host.registry.len(), 2);
        assert_eq!(host.scene.node_count(), 1);
    }

    #[test]
    fn player_geometry_is_shared_across_respawns() {
        let mut host = SceneHost::new(1.0);
        host.set_running(true);
        let first = host.object(PLAYER_NAME).unwrap().geometry;
        host.set_running(false);
        host.set_running(true);

        assert_eq!(host.object(PLAYER_NAME).unwrap().geometry, first);
    }
}
