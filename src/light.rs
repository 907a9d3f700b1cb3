use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    Directional,
    Point,
    Spot,
}

/// Per-light-node derived state, updated in place when declared parameters
/// change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightContext {
    pub kind: LightKind,
    pub color: Vec3,
    pub intensity: f32,
}

impl LightContext {
    pub fn new(kind: LightKind, color: Vec3, intensity: f32) -> Self {
        Self {
            kind,
            color,
            intensity,
        }
    }
}

impl Default for LightContext {
    fn default() -> Self {
        Self {
            kind: LightKind::Point,
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}
