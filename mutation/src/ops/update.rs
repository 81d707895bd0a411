//! In-place node updates: position, properties, color.
//!
//! Each command holds the node id plus old and new values. A node that has
//! disappeared makes `apply` fail and `revert` a no-op.

use cdg_core::{Node, NodeColor, NodeId, NodeProperties};
use cdg_graph::Graph;
use cdg_history::Reversible;

use crate::error::MutationError;

fn live_node(graph: &mut Graph, id: NodeId) -> Result<&mut Node, MutationError> {
    graph.node_mut(id).ok_or(MutationError::NodeNotFound(id))
}

// ==================== MoveNode ====================

#[derive(Debug, Clone, PartialEq)]
pub struct MoveNode {
    id: NodeId,
    old: (f32, f32),
    new: (f32, f32),
}

impl MoveNode {
    pub fn new(id: NodeId, old: (f32, f32), new: (f32, f32)) -> Self {
        Self { id, old, new }
    }

    /// Move `id` to `(x, y)`, reading the current position as the old one.
    pub fn to(graph: &Graph, id: NodeId, x: f32, y: f32) -> Option<Self> {
        let node = graph.node(id)?;
        Some(Self::new(id, (node.x, node.y), (x, y)))
    }
}

impl Reversible for MoveNode {
    type Target = Graph;
    type Error = MutationError;

    fn apply(&mut self, graph: &mut Graph) -> Result<(), MutationError> {
        let node = live_node(graph, self.id)?;
        (node.x, node.y) = self.new;
        Ok(())
    }

    fn revert(&mut self, graph: &mut Graph) {
        if let Some(node) = graph.node_mut(self.id) {
            (node.x, node.y) = self.old;
        }
    }

    fn label(&self) -> &'static str {
        "move-node"
    }
}

// ==================== EditNodeProperties ====================

#[derive(Debug, Clone, PartialEq)]
pub struct EditNodeProperties {
    id: NodeId,
    old: NodeProperties,
    new: NodeProperties,
}

impl EditNodeProperties {
    pub fn new(id: NodeId, old: NodeProperties, new: NodeProperties) -> Self {
        Self { id, old, new }
    }

    /// Edit `id`, snapshotting its current properties as the old ones.
    pub fn capture(graph: &Graph, id: NodeId, new: NodeProperties) -> Option<Self> {
        let old = NodeProperties::of(graph.node(id)?);
        Some(Self::new(id, old, new))
    }
}

impl Reversible for EditNodeProperties {
    type Target = Graph;
    type Error = MutationError;

    fn apply(&mut self, graph: &mut Graph) -> Result<(), MutationError> {
        self.new.apply_to(live_node(graph, self.id)?);
        Ok(())
    }

    fn revert(&mut self, graph: &mut Graph) {
        if let Some(node) = graph.node_mut(self.id) {
            self.old.apply_to(node);
        }
    }

    fn label(&self) -> &'static str {
        "edit-node"
    }
}

// ==================== ChangeNodeColor ====================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNodeColor {
    id: NodeId,
    old: NodeColor,
    new: NodeColor,
}

impl ChangeNodeColor {
    /// Recolor `id`. The old color is read now, not at undo time.
    pub fn capture(graph: &Graph, id: NodeId, color: NodeColor) -> Option<Self> {
        let old = graph.node(id)?.color;
        Some(Self { id, old, new: color })
    }
}

impl Reversible for ChangeNodeColor {
    type Target = Graph;
    type Error = MutationError;

    fn apply(&mut self, graph: &mut Graph) -> Result<(), MutationError> {
        live_node(graph, self.id)?.color = self.new;
        Ok(())
    }

    fn revert(&mut self, graph: &mut Graph) {
        if let Some(node) = graph.node_mut(self.id) {
            node.color = self.old;
        }
    }

    fn label(&self) -> &'static str {
        "change-color"
    }
}
