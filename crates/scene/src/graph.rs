//! Scene graph: node ownership, hierarchy edits and world transform
//! propagation.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. A node
//! has at most one parent; detached nodes are roots. World transforms are
//! cached per node and refreshed explicitly with
//! [`SceneGraph::compute_world_transform`], which walks a subtree in
//! depth-first pre-order and stores `parent_world ∘ local` on every node.
//!
//! # Example
//!
//! ```
//! use arbor_scene::{SceneGraph, SceneNode, Transform};
//! use glam::Vec3;
//!
//! let mut graph = SceneGraph::new();
//! let root = graph.add_node(SceneNode::new("root"));
//! let arm = graph.add_node(
//!     SceneNode::new("arm").with_local(Transform::from_translation(Vec3::X)),
//! );
//! graph.add_child(root, arm).unwrap();
//!
//! graph.update(root, &Transform::from_translation(Vec3::Y)).unwrap();
//! graph.compute_world_transform(root, &Transform::IDENTITY).unwrap();
//!
//! let world = graph.world_transform(arm).unwrap();
//! assert_eq!(world.translation(), Vec3::new(1.0, 1.0, 0.0));
//! ```

use id_arena::Arena;
use tracing::debug;

use crate::error::{SceneError, SceneResult};
use crate::node::{NodeId, SceneNode, WorldState};
use crate::transform::Transform;

#[derive(Debug, Default)]
pub struct SceneGraph {
    pub(crate) nodes: Arena<SceneNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
        }
    }

    /// Insert a detached node. It is a root until attached.
    pub fn add_node(&mut self, mut node: SceneNode) -> NodeId {
        node.parent = None;
        node.children.clear();
        node.invalidate();
        self.nodes.alloc(node)
    }

    /// Append `child` to the children of `parent`.
    ///
    /// The child must be detached; moving a node between parents is done
    /// with [`reparent`](Self::reparent).
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        let child_node = self.node(child)?;
        if let Some(current) = child_node.parent {
            return Err(SceneError::AlreadyParented {
                child: child_node.name().to_string(),
                parent: self.node(current)?.name().to_string(),
            });
        }
        self.node(parent)?;
        if self.is_ancestor_or_self(child, parent) {
            return Err(SceneError::CyclicAttachment {
                child: self.node(child)?.name().to_string(),
                parent: self.node(parent)?.name().to_string(),
            });
        }

        self.node_mut(parent)?.children.push(child);
        let child_node = self.node_mut(child)?;
        child_node.parent = Some(parent);
        child_node.invalidate();
        Ok(())
    }

    /// Remove `child` from its parent, making it a root. Returns the
    /// former parent.
    pub fn detach(&mut self, child: NodeId) -> SceneResult<Option<NodeId>> {
        let Some(parent) = self.node(child)?.parent else {
            return Ok(None);
        };
        self.node_mut(parent)?.children.retain(|&id| id != child);
        let child_node = self.node_mut(child)?;
        child_node.parent = None;
        child_node.invalidate();
        Ok(Some(parent))
    }

    /// Move `child` under `new_parent`, appending it after the existing
    /// children. Nothing changes when the move would create a cycle.
    pub fn reparent(&mut self, child: NodeId, new_parent: NodeId) -> SceneResult<()> {
        self.node(new_parent)?;
        if self.is_ancestor_or_self(child, new_parent) {
            return Err(SceneError::CyclicAttachment {
                child: self.node(child)?.name().to_string(),
                parent: self.node(new_parent)?.name().to_string(),
            });
        }
        let previous = self.detach(child)?;
        self.add_child(new_parent, child)?;
        debug!(
            child = self.node(child)?.name(),
            from = ?previous.map(|id| id.index()),
            to = new_parent.index(),
            "reparented node"
        );
        Ok(())
    }

    /// `local = delta ∘ local` on a single node. Descendants are not
    /// visited; the node's world transform becomes stale.
    pub fn update(&mut self, id: NodeId, delta: &Transform) -> SceneResult<()> {
        self.node_mut(id)?.update(delta);
        Ok(())
    }

    pub fn set_local_transform(&mut self, id: NodeId, local: Transform) -> SceneResult<()> {
        self.node_mut(id)?.set_local_transform(local);
        Ok(())
    }

    /// Store `parent_world ∘ local` on `id` and every descendant, parents
    /// before children, children in insertion order.
    pub fn compute_world_transform(
        &mut self,
        id: NodeId,
        parent_world: &Transform,
    ) -> SceneResult<()> {
        self.node(id)?;
        let mut stack = vec![(id, *parent_world)];
        while let Some((id, parent_world)) = stack.pop() {
            let node = self.node_mut(id)?;
            let world = parent_world.multiply(&node.local_transform());
            node.set_world(world);
            stack.extend(node.children.iter().rev().map(|&child| (child, world)));
        }
        Ok(())
    }

    /// Refresh every tree in the graph from its root.
    pub fn compute_world_transforms(&mut self) -> SceneResult<()> {
        for root in self.roots() {
            self.compute_world_transform(root, &Transform::IDENTITY)?;
        }
        Ok(())
    }

    /// The cached world transform of `id`.
    ///
    /// Fails with `WorldTransformNotComputed` if the node, or any of its
    /// ancestors, changed since the last compute pass.
    pub fn world_transform(&self, id: NodeId) -> SceneResult<Transform> {
        let node = self.node(id)?;
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let ancestor = self.node(current)?;
            if ancestor.world_state() == WorldState::NotComputed {
                return Err(SceneError::WorldTransformNotComputed {
                    name: node.name().to_string(),
                    index: id.index(),
                });
            }
            cursor = ancestor.parent;
        }
        Ok(node.cached_world())
    }

    /// Whether any node on the path from the root down to `id` is stale.
    pub fn is_stale(&self, id: NodeId) -> SceneResult<bool> {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.node(current)?;
            if node.world_state() == WorldState::NotComputed {
                return Ok(true);
            }
            cursor = node.parent;
        }
        Ok(false)
    }

    /// First node with the given name, in insertion order.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, node)| node.name() == name)
            .map(|(id, _)| id)
    }

    pub fn node(&self, id: NodeId) -> SceneResult<&SceneNode> {
        self.nodes.get(id).ok_or(SceneError::NodeNotFound(id.index()))
    }

    pub fn node_mut(&mut self, id: NodeId) -> SceneResult<&mut SceneNode> {
        self.nodes
            .get_mut(id)
            .ok_or(SceneError::NodeNotFound(id.index()))
    }

    pub fn children(&self, id: NodeId) -> SceneResult<&[NodeId]> {
        Ok(self.node(id)?.children())
    }

    pub fn parent(&self, id: NodeId) -> SceneResult<Option<NodeId>> {
        Ok(self.node(id)?.parent())
    }

    /// Nodes without a parent, in insertion order.
    pub fn roots(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent().is_none())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 0
    }

    /// Whether `ancestor` is `id` or lies on the path from `id` to its root.
    fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.nodes.get(current).and_then(|node| node.parent);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn chain(graph: &mut SceneGraph, names: &[&str]) -> Vec<NodeId> {
        let ids: Vec<_> = names
            .iter()
            .map(|name| graph.add_node(SceneNode::new(*name)))
            .collect();
        for pair in ids.windows(2) {
            graph.add_child(pair[0], pair[1]).unwrap();
        }
        ids
    }

    #[test]
    fn test_add_child_links_both_sides() {
        let mut graph = SceneGraph::new();
        let ids = chain(&mut graph, &["root", "child"]);

        assert_eq!(graph.children(ids[0]).unwrap(), &[ids[1]]);
        assert_eq!(graph.parent(ids[1]).unwrap(), Some(ids[0]));
        assert_eq!(graph.roots(), vec![ids[0]]);
    }

    #[test]
    fn test_add_child_rejects_parented_node() {
        let mut graph = SceneGraph::new();
        let ids = chain(&mut graph, &["a", "b"]);
        let other = graph.add_node(SceneNode::new("other"));

        let err = graph.add_child(other, ids[1]).unwrap_err();
        assert_eq!(
            err,
            SceneError::AlreadyParented {
                child: "b".to_string(),
                parent: "a".to_string(),
            }
        );
        assert!(graph.children(other).unwrap().is_empty());
    }

    #[test]
    fn test_add_child_rejects_cycles() {
        let mut graph = SceneGraph::new();
        let ids = chain(&mut graph, &["a", "b", "c"]);

        assert!(matches!(
            graph.add_child(ids[2], ids[0]),
            Err(SceneError::CyclicAttachment { .. })
        ));
        let lone = graph.add_node(SceneNode::new("lone"));
        assert!(matches!(
            graph.add_child(lone, lone),
            Err(SceneError::CyclicAttachment { .. })
        ));
    }

    #[test]
    fn test_foreign_id_is_not_found() {
        let mut other = SceneGraph::new();
        let foreign = other.add_node(SceneNode::new("foreign"));
        let mut graph = SceneGraph::new();
        let root = graph.add_node(SceneNode::new("root"));

        assert!(matches!(
            graph.add_child(root, foreign),
            Err(SceneError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_reparent_moves_to_end() {
        let mut graph = SceneGraph::new();
        let ids = chain(&mut graph, &["a", "b"]);
        let c = graph.add_node(SceneNode::new("c"));
        let d = graph.add_node(SceneNode::new("d"));
        graph.add_child(c, d).unwrap();

        graph.reparent(ids[1], c).unwrap();

        assert!(graph.children(ids[0]).unwrap().is_empty());
        assert_eq!(graph.children(c).unwrap(), &[d, ids[1]]);
        assert_eq!(graph.parent(ids[1]).unwrap(), Some(c));
    }

    #[test]
    fn test_reparent_under_descendant_is_rejected() {
        let mut graph = SceneGraph::new();
        let ids = chain(&mut graph, &["a", "b", "c"]);

        assert!(graph.reparent(ids[1], ids[2]).is_err());
        assert_eq!(graph.parent(ids[1]).unwrap(), Some(ids[0]));
    }

    #[test]
    fn test_detach_returns_former_parent() {
        let mut graph = SceneGraph::new();
        let ids = chain(&mut graph, &["a", "b"]);

        assert_eq!(graph.detach(ids[1]).unwrap(), Some(ids[0]));
        assert_eq!(graph.detach(ids[1]).unwrap(), None);
        assert_eq!(graph.roots().len(), 2);
    }

    #[test]
    fn test_world_transform_requires_compute() {
        let mut graph = SceneGraph::new();
        let ids = chain(&mut graph, &["a", "b"]);

        assert!(matches!(
            graph.world_transform(ids[1]),
            Err(SceneError::WorldTransformNotComputed { .. })
        ));

        graph.compute_world_transforms().unwrap();
        assert!(graph.world_transform(ids[1]).is_ok());

        // A change to the parent invalidates the child.
        graph.update(ids[0], &Transform::from_translation(Vec3::X)).unwrap();
        assert!(graph.is_stale(ids[1]).unwrap());
        assert!(graph.world_transform(ids[1]).is_err());
    }

    #[test]
    fn test_compute_composes_parent_first() {
        let mut graph = SceneGraph::new();
        let ids = chain(&mut graph, &["a", "b"]);
        graph
            .set_local_transform(
                ids[0],
                Transform::identity().rotate_z(std::f32::consts::FRAC_PI_2),
            )
            .unwrap();
        graph
            .set_local_transform(ids[1], Transform::from_translation(Vec3::X))
            .unwrap();

        graph.compute_world_transforms().unwrap();

        let world = graph.world_transform(ids[1]).unwrap();
        assert!((world.translation() - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_find_by_name() {
        let mut graph = SceneGraph::new();
        let ids = chain(&mut graph, &["root", "head"]);

        assert_eq!(graph.find_by_name("head"), Some(ids[1]));
        assert_eq!(graph.find_by_name("tail"), None);
        assert_eq!(graph.len(), 2);
        assert!(!graph.is_empty());
    }
}
