//! Remove a node together with its incident edges.

use cdg_core::{Edge, Node, NodeId};
use cdg_graph::Graph;
use cdg_history::Reversible;

use crate::error::MutationError;

/// What a removal took out of the graph, with original positions.
#[derive(Debug, Clone, PartialEq)]
struct Removed {
    index: usize,
    node: Node,
    /// Incident edges in ascending index order.
    edges: Vec<(usize, Edge)>,
}

/// Remove a node and every edge touching it.
///
/// The node and its incident edges are captured as values when the command
/// is applied. Undo puts each back at the position it came from, so the
/// graph is restored exactly, relative edge order included.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveNode {
    id: NodeId,
    removed: Option<Removed>,
}

impl RemoveNode {
    pub fn new(id: NodeId) -> Self {
        Self { id, removed: None }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Edges captured by the last apply, in original order.
    pub fn captured_edges(&self) -> impl Iterator<Item = &Edge> {
        self.removed
            .iter()
            .flat_map(|r| r.edges.iter().map(|(_, edge)| edge))
    }
}

impl Reversible for RemoveNode {
    type Target = Graph;
    type Error = MutationError;

    fn apply(&mut self, graph: &mut Graph) -> Result<(), MutationError> {
        if !graph.contains_node(self.id) {
            return Err(MutationError::NodeNotFound(self.id));
        }

        let incident: Vec<_> = graph.edges_touching(self.id).map(|e| e.id).collect();
        let mut edges = Vec::with_capacity(incident.len());
        // Back to front so earlier indices stay valid while removing.
        for edge_id in incident.into_iter().rev() {
            if let Some(entry) = graph.remove_edge(edge_id) {
                edges.push(entry);
            }
        }
        edges.reverse();

        let Some((index, node)) = graph.remove_node(self.id) else {
            return Err(MutationError::NodeNotFound(self.id));
        };

        tracing::trace!(node = %self.id, edges = edges.len(), "captured node removal");
        self.removed = Some(Removed { index, node, edges });
        Ok(())
    }

    fn revert(&mut self, graph: &mut Graph) {
        let Some(removed) = &self.removed else {
            return;
        };

        let _ = graph.insert_node_at(removed.index, removed.node.clone());
        for (index, edge) in &removed.edges {
            if !graph.contains_edge(edge.id) {
                let _ = graph.insert_edge_at(*index, edge.clone());
            }
        }
    }

    fn label(&self) -> &'static str {
        "remove-node"
    }
}
