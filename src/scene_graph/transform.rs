use glam::{Mat4, Quat, Vec3};
use std::cell::Cell;

/// Local TRS state plus the derived local and world matrices.
///
/// Matrices live in `Cell`s so world propagation can run over a shared scene
/// graph borrow. The local matrix is rebuilt lazily from translation,
/// rotation and scale; the world matrix is written by the scene graph during
/// propagation and always equals `parent_world * local` as of the last
/// update pass.
#[derive(Debug, Clone)]
pub struct Transform {
    translation: Vec3,
    rotation: Quat,
    scale: Vec3,

    local_matrix: Cell<Mat4>,
    local_dirty: Cell<bool>,
    world_matrix: Cell<Mat4>,
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            local_matrix: Cell::new(Mat4::IDENTITY),
            local_dirty: Cell::new(true),
            world_matrix: Cell::new(Mat4::IDENTITY),
        }
    }

    /// Local matrix, composed as scale, then rotation, then translation.
    pub fn local_matrix(&self) -> Mat4 {
        if self.local_dirty.get() {
            let matrix =
                Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation);
            self.local_matrix.set(matrix);
            self.local_dirty.set(false);
        }

        self.local_matrix.get()
    }

    /// World matrix as of the last propagation pass.
    pub fn world_matrix(&self) -> Mat4 {
        self.world_matrix.get()
    }

    pub(crate) fn set_world_matrix(&self, world_matrix: Mat4) {
        self.world_matrix.set(world_matrix);
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
        self.local_dirty.set(true);
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
        self.local_dirty.set(true);
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.local_dirty.set(true);
    }

    pub fn set_trs(&mut self, translation: Vec3, rotation: Quat, scale: Vec3) {
        self.translation = translation;
        self.rotation = rotation;
        self.scale = scale;
        self.local_dirty.set(true);
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_translation(Vec3::ZERO)
    }
}
