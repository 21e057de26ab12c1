//! Per-frame scene update: input, movement, spin.

use crate::controls::{CommandQueue, MovementFlags};
use crate::host::{SceneHost, PLAYER_NAME};

/// Spin rate in radians per second for the object at registry `index`.
#[inline]
pub fn spin_speed(index: usize) -> f32 {
    1.0 + index as f32 * 0.1
}

/// Drains queued commands, moves the player, then spins every present object.
pub fn update_frame(host: &mut SceneHost, flags: &mut MovementFlags, queue: &CommandQueue, elapsed_secs: f32) {
    flags.apply(queue.drain());
    move_player(host, *flags);
    spin_objects(host, elapsed_secs);
}

pub fn move_player(host: &mut SceneHost, flags: MovementFlags) {
    let dx = flags.step();
    if dx == 0.0 {
        return;
    }
    let Some(id) = host.registry.get(PLAYER_NAME) else { return };
    if let Some(player) = host.scene.node_mut(id) {
        player.transform.position.x += dx;
    }
}

/// Sets x and y rotation of each present object to `elapsed × speed(index)`.
/// Absent slots are skipped but still count toward the index.
pub fn spin_objects(host: &mut SceneHost, elapsed_secs: f32) {
    let SceneHost { scene, registry, .. } = host;
    for (index, _, id) in registry.slots() {
        let Some(id) = id else { continue };
        let Some(node) = scene.node_mut(id) else { continue };
        let rot = elapsed_secs * spin_speed(index);
        node.transform.rotation.x = rot;
        node.transform.rotation.y = rot;
    }
}
