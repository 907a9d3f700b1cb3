use glam::{Mat4, Vec3};

use crate::math::{frustum::Frustum, plane::Plane};

#[derive(Debug, Copy, Clone)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    /// Sphere around the center of the point cloud's bounding box. An empty
    /// point set yields a zero sphere at the origin.
    pub fn from_points(points: impl IntoIterator<Item = Vec3> + Clone) -> BoundingSphere {
        let Some(aabb) = AABB::from_points(points.clone()) else {
            return BoundingSphere {
                center: Vec3::ZERO,
                radius: 0.0,
            };
        };

        let center = aabb.center();
        let radius = points
            .into_iter()
            .map(|point| point.distance(center))
            .fold(0.0, f32::max);

        BoundingSphere { center, radius }
    }

    // Signed distance of the sphere surface point closest to the inside of
    // the plane. Negative only when the whole sphere is outside.
    fn signed_distance_to_plane(&self, plane: &Plane) -> f32 {
        plane.signed_distance_to_point(self.center) + self.radius
    }

    pub fn transform(&self, matrix: &Mat4) -> BoundingSphere {
        let center = matrix.transform_point3(self.center);
        let scale = matrix.to_scale_rotation_translation().0;
        let radius = self.radius * scale.max_element();
        BoundingSphere { center, radius }
    }

    pub fn intersects_frustum(&self, frustum: &Frustum) -> bool {
        frustum
            .planes
            .iter()
            .all(|plane| self.signed_distance_to_plane(plane) >= 0.0)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<AABB> {
        points
            .into_iter()
            .map(|point| AABB {
                min: point,
                max: point,
            })
            .reduce(|a, b| AABB {
                min: a.min.min(b.min),
                max: a.max.max(b.max),
            })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}
