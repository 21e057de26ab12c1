//! The textured 2×2×2 cube shown from the first frame.

use spincube_engine::world::{Geometry, GeometryError, Vertex};

const fn v(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Vertex {
    Vertex::new(position, normal, uv)
}

/// Four vertices per face so every face carries its own normal and uvs.
pub const CUBE_VERTICES: [Vertex; 24] = [
    // front
    v([-1.0, -1.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
    v([1.0, -1.0, 1.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
    v([-1.0, 1.0, 1.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
    v([1.0, 1.0, 1.0], [0.0, 0.0, 1.0], [1.0, 1.0]),
    // right
    v([1.0, -1.0, 1.0], [1.0, 0.0, 0.0], [0.0, 0.0]),
    v([1.0, -1.0, -1.0], [1.0, 0.0, 0.0], [1.0, 0.0]),
    v([1.0, 1.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0]),
    v([1.0, 1.0, -1.0], [1.0, 0.0, 0.0], [1.0, 1.0]),
    // back
    v([1.0, -1.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0]),
    v([-1.0, -1.0, -1.0], [0.0, 0.0, -1.0], [1.0, 0.0]),
    v([1.0, 1.0, -1.0], [0.0, 0.0, -1.0], [0.0, 1.0]),
    v([-1.0, 1.0, -1.0], [0.0, 0.0, -1.0], [1.0, 1.0]),
    // left
    v([-1.0, -1.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 0.0]),
    v([-1.0, -1.0, 1.0], [-1.0, 0.0, 0.0], [1.0, 0.0]),
    v([-1.0, 1.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0]),
    v([-1.0, 1.0, 1.0], [-1.0, 0.0, 0.0], [1.0, 1.0]),
    // top
    v([1.0, 1.0, -1.0], [0.0, 1.0, 0.0], [0.0, 0.0]),
    v([-1.0, 1.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0]),
    v([1.0, 1.0, 1.0], [0.0, 1.0, 0.0], [0.0, 1.0]),
    v([-1.0, 1.0, 1.0], [0.0, 1.0, 0.0], [1.0, 1.0]),
    // bottom
    v([1.0, -1.0, 1.0], [0.0, -1.0, 0.0], [0.0, 0.0]),
    v([-1.0, -1.0, 1.0], [0.0, -1.0, 0.0], [1.0, 0.0]),
    v([1.0, -1.0, -1.0], [0.0, -1.0, 0.0], [0.0, 1.0]),
    v([-1.0, -1.0, -1.0], [0.0, -1.0, 0.0], [1.0, 1.0]),
];

/// Two counter-clockwise triangles per face.
pub const CUBE_INDICES: [u16; 36] = [
    0, 1, 2, 2, 1, 3, //
    4, 5, 6, 6, 5, 7, //
    8, 9, 10, 10, 9, 11, //
    12, 13, 14, 14, 13, 15, //
    16, 17, 18, 18, 17, 19, //
    20, 21, 22, 22, 21, 23,
];

pub fn cube_geometry() -> Result<Geometry, GeometryError> {
    Geometry::new(CUBE_VERTICES.to_vec(), CUBE_INDICES.to_vec())
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn table_builds_a_valid_geometry() {
        let g = cube_geometry().unwrap();
        assert_eq!(g.vertices().len(), 24);
        assert_eq!(g.indices().len(), 36);
    }

    #[test]
    fn triangles_wind_counter_clockwise_around_their_normal() {
        for tri in CUBE_INDICES.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| CUBE_VERTICES[i as usize]);
            let (pa, pb, pc) = (Vec3::from(a.position), Vec3::from(b.position), Vec3::from(c.position));
            let face_normal = (pb - pa).cross(pc - pa).normalize();
            assert!(face_normal.dot(Vec3::from(a.normal)) > 0.99, "triangle {tri:?}");
        }
    }

    #[test]
    fn every_face_spans_the_full_texture() {
        for face in CUBE_VERTICES.chunks(4) {
            let uvs: Vec<[f32; 2]> = face.iter().map(|v| v.uv).collect();
            assert_eq!(uvs, vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
        }
    }
}
