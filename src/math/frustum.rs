use glam::{Mat4, Vec4};

use crate::math::plane::Plane;

#[derive(Debug, Copy, Clone)]
pub struct Frustum {
    // Planes are in the order: left, right, bottom, top, near, far.
    // Normals point into the frustum.
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extracts clip planes from a zero-to-one-depth view-projection matrix
    /// (Gribb & Hartmann). Works for both perspective and orthographic
    /// projections.
    pub fn from_view_projection(view_projection: Mat4) -> Frustum {
        let rows = view_projection.transpose();
        let [row0, row1, row2, row3] = [rows.x_axis, rows.y_axis, rows.z_axis, rows.w_axis];

        let planes = [
            Self::plane_from_row(row3 + row0),
            Self::plane_from_row(row3 - row0),
            Self::plane_from_row(row3 + row1),
            Self::plane_from_row(row3 - row1),
            // Zero-to-one depth: the near plane is the z row itself
            Self::plane_from_row(row2),
            Self::plane_from_row(row3 - row2),
        ];

        Frustum { planes }
    }

    fn plane_from_row(row: Vec4) -> Plane {
        let normal = row.truncate();
        let inv_len = normal.length().recip();
        Plane {
            normal: normal * inv_len,
            distance: row.w * inv_len,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn perspective_frustum_classifies_points() {
        let projection = Mat4::perspective_rh(75f32.to_radians(), 1.0, 0.1, 100.0);
        let frustum = Frustum::from_view_projection(projection);

        let inside = Vec3::new(0.0, 0.0, -10.0);
        let behind = Vec3::new(0.0, 0.0, 10.0);
        let past_far = Vec3::new(0.0, 0.0, -200.0);

        let contains = |p: Vec3| {
            frustum
                .planes
                .iter()
                .all(|plane| plane.signed_distance_to_point(p) >= 0.0)
        };

        assert!(contains(inside));
        assert!(!contains(behind));
        assert!(!contains(past_far));
    }
}
