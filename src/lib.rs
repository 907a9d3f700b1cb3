//! Retained 3D scene graph with declarative reconciliation and glTF asset
//! import.
//!
//! A scene is described as a tree of [`tokens::Token`]s with stable
//! identities. Each [`reconciler::Reconciler`] pass maps that description
//! onto a persistent [`scene_graph::SceneGraph`] plus per-node
//! [`scene_context::SceneContext`] entries, applying only the structural
//! delta. The [`frame::FrameDispatcher`] then propagates world transforms
//! and hands the visible draw set to a [`backend::GpuBackend`]
//! implementation each display tick.

pub mod backend;
pub mod cache;
pub mod camera;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod importer;
pub mod light;
pub mod material;
pub mod math;
pub mod reconciler;
pub mod scene_context;
pub mod scene_graph;
pub mod texture;
pub mod tokens;

pub use backend::{Frame, GpuBackend, TextureDescriptor, TextureFormat, TextureHandle};
pub use camera::{CameraContext, Projection};
pub use error::Error;
pub use frame::FrameDispatcher;
pub use geometry::Geometry;
pub use importer::ImportContext;
pub use light::{LightContext, LightKind};
pub use material::{MaterialDescriptor, MaterialSlot, MaterialState};
pub use reconciler::Reconciler;
pub use scene_context::SceneContext;
pub use scene_graph::{Node, NodeId, SceneGraph, Transform};
pub use tokens::{LightProps, Token, TokenId};
