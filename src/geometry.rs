use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use itertools::izip;

use crate::math::BoundingSphere;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tex_coords: Vec2,
}

/// CPU-side mesh data handed to the backend at draw time. Bounds are used for
/// frustum culling of `frustum_culled` nodes.
pub struct Geometry {
    pub label: String,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub bounds: BoundingSphere,
}

impl Geometry {
    pub fn new(label: impl Into<String>, vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        let bounds = BoundingSphere::from_points(vertices.iter().map(|v| v.position));
        Self {
            label: label.into(),
            vertices,
            indices,
            bounds,
        }
    }

    /// Builds a geometry from separate attribute streams. Streams must have
    /// equal length.
    pub fn from_attributes(
        label: impl Into<String>,
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        tex_coords: Vec<Vec2>,
        indices: Vec<u32>,
    ) -> Self {
        let vertices = izip!(positions, normals, tex_coords)
            .map(|(position, normal, tex_coords)| Vertex {
                position,
                normal,
                tex_coords,
            })
            .collect();

        Self::new(label, vertices, indices)
    }

    /// Unit plane in the XY plane, facing +Z.
    pub fn plane() -> Self {
        let positions = vec![
            Vec3::new(-0.5, -0.5, 0.0),
            Vec3::new(0.5, -0.5, 0.0),
            Vec3::new(0.5, 0.5, 0.0),
            Vec3::new(-0.5, 0.5, 0.0),
        ];
        let normals = vec![Vec3::Z; 4];
        let tex_coords = vec![
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 0.0),
        ];
        let indices = vec![0, 1, 2, 0, 2, 3];

        Self::from_attributes("plane", positions, normals, tex_coords, indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_bounds_cover_corners() {
        let plane = Geometry::plane();
        assert_eq!(plane.vertices.len(), 4);
        assert_eq!(plane.indices.len(), 6);

        for vertex in &plane.vertices {
            assert!(vertex.position.distance(plane.bounds.center) <= plane.bounds.radius + 1e-6);
        }
    }
}
