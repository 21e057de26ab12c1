use bytemuck::{Pod, Zeroable};

/// One mesh vertex: position, normal, texture coordinate.
///
/// `uv` follows the bottom-left image origin convention; the mesh shader
/// flips V when sampling.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    #[inline]
    pub const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, normal, uv }
    }
}

/// Handle to geometry stored in a [`Scene`](super::Scene).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GeometryId(pub(crate) usize);

impl GeometryId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("index count {0} is not a multiple of 3")]
    PartialTriangle(usize),

    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u16, vertex_count: usize },
}

/// Indexed triangle list. Immutable once added to a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
}

impl Geometry {
    /// Validates and wraps a vertex/index table.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u16>) -> Result<Self, GeometryError> {
        if indices.len() % 3 != 0 {
            return Err(GeometryError::PartialTriangle(indices.len()));
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(GeometryError::IndexOutOfRange { index, vertex_count: vertices.len() });
        }
        Ok(Self { vertices, indices })
    }

    /// Axis-aligned box centred on the origin, four vertices per face.
    ///
    /// Faces are emitted +X, -X, +Y, -Y, +Z, -Z with counter-clockwise
    /// winding seen from outside.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (hx, hy, hz) = (width * 0.5, height * 0.5, depth * 0.5);

        // (normal, u axis, v axis, half extents along normal/u/v)
        let faces: [([f32; 3], [f32; 3], [f32; 3], f32, f32, f32); 6] = [
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0], hx, hz, hy),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0], hx, hz, hy),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0], hy, hx, hz),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0], hy, hx, hz),
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], hz, hx, hy),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0], hz, hx, hy),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (n, u, v, dn, du, dv) in faces {
            let base = vertices.len() as u16;
            // top-left, top-right, bottom-left, bottom-right
            for (su, sv) in [(-1.0, 1.0), (1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)] {
                let position = [
                    n[0] * dn + u[0] * du * su + v[0] * dv * sv,
                    n[1] * dn + u[1] * du * su + v[1] * dv * sv,
                    n[2] * dn + u[2] * du * su + v[2] * dv * sv,
                ];
                let uv = [(su + 1.0) * 0.5, (sv + 1.0) * 0.5];
                vertices.push(Vertex::new(position, n, uv));
            }
            indices.extend_from_slice(&[base, base + 2, base + 1, base + 2, base + 3, base + 1]);
        }

        Self { vertices, indices }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn tri_normal(g: &Geometry, t: usize) -> Vec3 {
        let p = |k: usize| Vec3::from(g.vertices()[g.indices()[t * 3 + k] as usize].position);
        (p(1) - p(0)).cross(p(2) - p(0)).normalize()
    }

    #[test]
    fn cuboid_has_four_vertices_per_face() {
        let g = Geometry::cuboid(1.0, 1.0, 1.0);
        assert_eq!(g.vertices().len(), 24);
        assert_eq!(g.indices().len(), 36);
    }

    #[test]
    fn cuboid_winding_faces_outward() {
        let g = Geometry::cuboid(1.0, 2.0, 3.0);
        for t in 0..12 {
            let face_normal = tri_normal(&g, t);
            let stored = Vec3::from(g.vertices()[g.indices()[t * 3] as usize].normal);
            assert!(face_normal.dot(stored) > 0.99, "triangle {t} winds inward");
        }
    }

    #[test]
    fn cuboid_spans_requested_extents() {
        let g = Geometry::cuboid(1.0, 2.0, 3.0);
        let max = g
            .vertices()
            .iter()
            .fold(Vec3::splat(f32::MIN), |m, v| m.max(Vec3::from(v.position)));
        assert_eq!(max, Vec3::new(0.5, 1.0, 1.5));
    }

    #[test]
    fn new_rejects_bad_tables() {
        let v = vec![Vertex::new([0.0; 3], [0.0, 0.0, 1.0], [0.0; 2]); 3];
        assert_eq!(
            Geometry::new(v.clone(), vec![0, 1]),
            Err(GeometryError::PartialTriangle(2))
        );
        assert_eq!(
            Geometry::new(v, vec![0, 1, 3]),
            Err(GeometryError::IndexOutOfRange { index: 3, vertex_count: 3 })
        );
    }
}
