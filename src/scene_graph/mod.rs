pub mod node;
pub mod scene;
pub mod transform;

pub use node::{Node, NodeId};
pub use scene::SceneGraph;
pub use transform::Transform;
