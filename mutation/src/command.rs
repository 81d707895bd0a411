//! The command enum submitted to the history.

use cdg_core::{Edge, EdgeId, Node, NodeColor, NodeId, NodeProperties};
use cdg_graph::Graph;
use cdg_history::Reversible;

use crate::error::MutationError;
use crate::ops::{
    AddEdge, AddNode, ChangeNodeColor, EditNodeProperties, MoveNode, RemoveEdge, RemoveNode,
};

/// A reversible diagram mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddNode(AddNode),
    RemoveNode(RemoveNode),
    AddEdge(AddEdge),
    RemoveEdge(RemoveEdge),
    MoveNode(MoveNode),
    EditNode(EditNodeProperties),
    ChangeColor(ChangeNodeColor),
}

impl Command {
    pub fn add_node(node: Node) -> Self {
        Self::AddNode(AddNode::new(node))
    }

    pub fn remove_node(id: NodeId) -> Self {
        Self::RemoveNode(RemoveNode::new(id))
    }

    pub fn add_edge(edge: Edge) -> Self {
        Self::AddEdge(AddEdge::new(edge))
    }

    /// Remove edge `id`, copying it out of `graph` now.
    pub fn remove_edge(graph: &Graph, id: EdgeId) -> Option<Self> {
        RemoveEdge::capture(graph, id).map(Self::RemoveEdge)
    }

    pub fn move_node(id: NodeId, old: (f32, f32), new: (f32, f32)) -> Self {
        Self::MoveNode(MoveNode::new(id, old, new))
    }

    /// Move `id` to `(x, y)` from wherever it is in `graph` now.
    pub fn move_node_to(graph: &Graph, id: NodeId, x: f32, y: f32) -> Option<Self> {
        MoveNode::to(graph, id, x, y).map(Self::MoveNode)
    }

    pub fn edit_node(id: NodeId, old: NodeProperties, new: NodeProperties) -> Self {
        Self::EditNode(EditNodeProperties::new(id, old, new))
    }

    /// Edit `id`, taking the old properties from `graph` now.
    pub fn edit_node_from(graph: &Graph, id: NodeId, new: NodeProperties) -> Option<Self> {
        EditNodeProperties::capture(graph, id, new).map(Self::EditNode)
    }

    pub fn change_color(graph: &Graph, id: NodeId, color: NodeColor) -> Option<Self> {
        ChangeNodeColor::capture(graph, id, color).map(Self::ChangeColor)
    }

    fn inner(&mut self) -> &mut dyn Reversible<Target = Graph, Error = MutationError> {
        match self {
            Command::AddNode(c) => c,
            Command::RemoveNode(c) => c,
            Command::AddEdge(c) => c,
            Command::RemoveEdge(c) => c,
            Command::MoveNode(c) => c,
            Command::EditNode(c) => c,
            Command::ChangeColor(c) => c,
        }
    }
}

impl Reversible for Command {
    type Target = Graph;
    type Error = MutationError;

    fn apply(&mut self, graph: &mut Graph) -> Result<(), MutationError> {
        self.inner().apply(graph)
    }

    fn revert(&mut self, graph: &mut Graph) {
        self.inner().revert(graph)
    }

    fn label(&self) -> &'static str {
        match self {
            Command::AddNode(c) => c.label(),
            Command::RemoveNode(c) => c.label(),
            Command::AddEdge(c) => c.label(),
            Command::RemoveEdge(c) => c.label(),
            Command::MoveNode(c) => c.label(),
            Command::EditNode(c) => c.label(),
            Command::ChangeColor(c) => c.label(),
        }
    }
}
