use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use glam::{Quat, Vec3};

use crate::camera::Projection;
use crate::geometry::Geometry;
use crate::light::{LightContext, LightKind};
use crate::material::MaterialSlot;

/// Stable identity of a declarative description unit. Tokens are rebuilt
/// every pass; the id is what ties a token to its persistent node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenId(u64);

static NEXT_TOKEN_ID: AtomicU64 = AtomicU64::new(1);

impl TokenId {
    /// Allocates a fresh process-unique identity. Hold on to it: a new id
    /// means a new node.
    pub fn unique() -> TokenId {
        TokenId(NEXT_TOKEN_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformProps {
    pub position: Vec3,
    pub quaternion: Quat,
    pub scale: Vec3,
}

impl Default for TransformProps {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            quaternion: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightProps {
    pub kind: LightKind,
    pub color: Vec3,
    pub intensity: f32,
}

impl From<LightProps> for LightContext {
    fn from(props: LightProps) -> Self {
        LightContext::new(props.kind, props.color, props.intensity)
    }
}

#[derive(Clone)]
pub struct MeshProps {
    pub geometry: Arc<Geometry>,
    pub material: MaterialSlot,
}

/// Category of a token, deciding which scene context entry the reconciler
/// instantiates. Every kind is also a plain transform node.
pub enum TokenKind {
    Group,
    Camera(Projection),
    Light(LightProps),
    Mesh(MeshProps),
}

/// Children are either declared eagerly or resolved lazily during the
/// reconcile pass. A resolver may return a different set per pass; the
/// reconciler diffs the resulting identities.
pub enum Children {
    List(Vec<Token>),
    Resolve(Box<dyn Fn() -> Vec<Token>>),
}

impl Default for Children {
    fn default() -> Self {
        Children::List(Vec::new())
    }
}

/// Ephemeral description unit mapped onto a persistent scene graph node by
/// identity.
pub struct Token {
    pub id: TokenId,
    pub label: String,
    pub kind: TokenKind,
    pub transform: TransformProps,
    pub visible: bool,
    pub frustum_culled: bool,
    pub children: Children,
}

impl Token {
    fn new(id: TokenId, kind: TokenKind) -> Self {
        Self {
            id,
            label: String::new(),
            kind,
            transform: TransformProps::default(),
            visible: true,
            frustum_culled: true,
            children: Children::default(),
        }
    }

    pub fn group(id: TokenId) -> Self {
        Self::new(id, TokenKind::Group)
    }

    pub fn camera(id: TokenId, projection: Projection) -> Self {
        Self::new(id, TokenKind::Camera(projection))
    }

    pub fn light(id: TokenId, props: LightProps) -> Self {
        Self::new(id, TokenKind::Light(props))
    }

    pub fn mesh(id: TokenId, geometry: Arc<Geometry>, material: MaterialSlot) -> Self {
        Self::new(id, TokenKind::Mesh(MeshProps { geometry, material }))
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_quaternion(mut self, quaternion: Quat) -> Self {
        self.transform.quaternion = quaternion;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.transform.scale = scale;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_frustum_culled(mut self, frustum_culled: bool) -> Self {
        self.frustum_culled = frustum_culled;
        self
    }

    pub fn with_children(mut self, children: Vec<Token>) -> Self {
        self.children = Children::List(children);
        self
    }

    /// Lazily resolved children, re-evaluated on every reconcile pass.
    pub fn with_child_resolver(mut self, resolve: impl Fn() -> Vec<Token> + 'static) -> Self {
        self.children = Children::Resolve(Box::new(resolve));
        self
    }
}
