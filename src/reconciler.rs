use std::collections::{HashMap, HashSet};

use crate::camera::CameraContext;
use crate::scene_context::{MeshContext, SceneContext};
use crate::scene_graph::{Node, NodeId, SceneGraph};
use crate::tokens::{Children, Token, TokenId, TokenKind};

/// Keeps a persistent scene graph and scene context in sync with a
/// declaratively produced token tree.
///
/// Identity is the sole key for matching old to new: a token seen before
/// updates its existing node in place (including kind changes, which swap the
/// context entry); an unseen token creates a node; a previously seen identity
/// missing from the resolved tree destroys its node. Structural edits happen
/// inside one synchronous pass, so the frame dispatcher never observes a
/// half-applied tree.
pub struct Reconciler {
    node_by_token: HashMap<TokenId, NodeId>,
    seen: HashSet<TokenId>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self {
            node_by_token: HashMap::new(),
            seen: HashSet::new(),
        }
    }

    /// The node a token identity is currently mapped to, if any.
    pub fn node_for(&self, token_id: TokenId) -> Option<NodeId> {
        self.node_by_token.get(&token_id).copied()
    }

    /// Applies one reconcile pass for the given root tokens.
    pub fn reconcile(&mut self, graph: &mut SceneGraph, ctx: &mut SceneContext, roots: &[Token]) {
        self.seen.clear();

        for token in roots {
            self.reconcile_token(graph, ctx, token, None);
        }

        self.sweep_removed(graph, ctx);
    }

    fn reconcile_token(
        &mut self,
        graph: &mut SceneGraph,
        ctx: &mut SceneContext,
        token: &Token,
        parent: Option<NodeId>,
    ) -> NodeId {
        self.seen.insert(token.id);

        let node_id = match self.node_by_token.get(&token.id).copied() {
            Some(id) if graph.get_node(id).is_some() => id,
            _ => {
                let id = graph.add_node(Node::default());
                self.node_by_token.insert(token.id, id);
                log::debug!("reconciler: created node for token {:?}", token.id);
                id
            }
        };

        self.update_node(graph, token, node_id);
        self.update_context(ctx, token, node_id);
        self.reparent(graph, node_id, parent);

        // Children: resolve (possibly lazily and conditionally), recurse in
        // resolution order, then reorder the node's child list to match.
        // Children attached outside the reconciler stay, after the declared
        // ones.
        let resolved;
        let children: &[Token] = match &token.children {
            Children::List(list) => list,
            Children::Resolve(resolve) => {
                resolved = resolve();
                &resolved
            }
        };

        let mut ordered = Vec::with_capacity(children.len());
        for child in children {
            ordered.push(self.reconcile_token(graph, ctx, child, Some(node_id)));
        }

        let node = &mut graph.nodes[node_id];
        let extras: Vec<NodeId> = node
            .child_ids
            .iter()
            .filter(|id| !ordered.contains(id))
            .copied()
            .collect();
        ordered.extend(extras);
        node.child_ids = ordered;

        node_id
    }

    fn update_node(&self, graph: &mut SceneGraph, token: &Token, node_id: NodeId) {
        let node = &mut graph.nodes[node_id];
        node.label.clone_from(&token.label);
        node.visible = token.visible;
        node.frustum_culled = token.frustum_culled;
        node.transform.set_trs(
            token.transform.position,
            token.transform.quaternion,
            token.transform.scale,
        );
    }

    fn update_context(&self, ctx: &mut SceneContext, token: &Token, node_id: NodeId) {
        match &token.kind {
            TokenKind::Group => {
                ctx.remove_node(node_id);
            }
            TokenKind::Camera(projection) => {
                ctx.lights.remove(&node_id);
                ctx.meshes.remove(&node_id);
                ctx.cameras
                    .entry(node_id)
                    .or_insert_with(|| CameraContext::new(*projection))
                    .set_projection(*projection);
            }
            TokenKind::Light(props) => {
                ctx.cameras.remove(&node_id);
                ctx.meshes.remove(&node_id);
                ctx.lights.insert(node_id, (*props).into());
            }
            TokenKind::Mesh(props) => {
                ctx.cameras.remove(&node_id);
                ctx.lights.remove(&node_id);
                ctx.meshes.insert(
                    node_id,
                    MeshContext {
                        geometry: props.geometry.clone(),
                        material: props.material.clone(),
                    },
                );
            }
        }
    }

    fn reparent(&self, graph: &mut SceneGraph, node_id: NodeId, parent: Option<NodeId>) {
        let current = graph.nodes[node_id].parent_id;
        if current == parent {
            return;
        }

        if let Some(old_parent) = current {
            graph.remove_child(old_parent, node_id);
        }
        if let Some(new_parent) = parent {
            // The node was just detached, so this cannot fail.
            graph
                .add_child(new_parent, node_id)
                .expect("freshly detached node");
        }
    }

    /// Destroys nodes whose token identities disappeared from the resolved
    /// tree.
    fn sweep_removed(&mut self, graph: &mut SceneGraph, ctx: &mut SceneContext) {
        let removed: Vec<(TokenId, NodeId)> = self
            .node_by_token
            .iter()
            .filter(|(token_id, _)| !self.seen.contains(token_id))
            .map(|(&token_id, &node_id)| (token_id, node_id))
            .collect();

        for (token_id, node_id) in removed {
            self.node_by_token.remove(&token_id);
            ctx.remove_node(node_id);
            graph.remove_node(node_id);
            log::debug!("reconciler: destroyed node for token {token_id:?}");
        }
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}
