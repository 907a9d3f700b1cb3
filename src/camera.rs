use glam::Mat4;

pub const DEFAULT_FOV: f32 = 75.0 * std::f32::consts::PI / 180.0;
pub const DEFAULT_NEAR: f32 = 0.1;
pub const DEFAULT_FAR: f32 = 1000.0;

/// Declared projection parameters. Both variants build zero-to-one-depth
/// matrices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective {
        /// Vertical field of view in radians.
        fov: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    Orthographic {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    },
}

impl Projection {
    pub fn perspective() -> Projection {
        Projection::Perspective {
            fov: DEFAULT_FOV,
            aspect: 1.0,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }

    pub fn orthographic() -> Projection {
        Projection::Orthographic {
            left: -1.0,
            right: 1.0,
            bottom: -1.0,
            top: 1.0,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        match *self {
            Projection::Perspective {
                fov,
                aspect,
                near,
                far,
            } => Mat4::perspective_rh(fov, aspect, near, far),
            Projection::Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => Mat4::orthographic_rh(left, right, bottom, top, near, far),
        }
    }
}

/// Per-camera-node derived state. The projection matrix is rebuilt only when
/// the declared parameters change; view and projection-view are written once
/// per frame by the dispatcher from the owning node's world matrix.
#[derive(Debug, Clone)]
pub struct CameraContext {
    projection: Option<Projection>,
    pub projection_matrix: Mat4,
    pub view_matrix: Mat4,
    pub projection_view_matrix: Mat4,
    /// Scratch matrix for look-at style orientation updates.
    pub look_at_matrix: Mat4,
}

impl CameraContext {
    pub fn new(projection: Projection) -> Self {
        Self {
            projection: Some(projection),
            projection_matrix: projection.matrix(),
            view_matrix: Mat4::IDENTITY,
            projection_view_matrix: Mat4::IDENTITY,
            look_at_matrix: Mat4::IDENTITY,
        }
    }

    /// Fallback camera used when no camera node is registered: identity
    /// transform, identity projection.
    pub fn identity() -> Self {
        Self {
            projection: None,
            projection_matrix: Mat4::IDENTITY,
            view_matrix: Mat4::IDENTITY,
            projection_view_matrix: Mat4::IDENTITY,
            look_at_matrix: Mat4::IDENTITY,
        }
    }

    /// Recomputes the projection matrix if the declared parameters changed.
    pub fn set_projection(&mut self, projection: Projection) {
        if self.projection != Some(projection) {
            self.projection = Some(projection);
            self.projection_matrix = projection.matrix();
        }
    }

    /// Per-frame update: view is the inverse of the camera node's world
    /// matrix, projection-view is projection * view.
    pub fn update_from_world(&mut self, world: Mat4) {
        self.view_matrix = world.inverse();
        self.projection_view_matrix = self.projection_matrix * self.view_matrix;
    }
}

impl Default for CameraContext {
    fn default() -> Self {
        Self::identity()
    }
}
