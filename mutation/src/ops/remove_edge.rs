//! Remove an edge.

use cdg_core::{Edge, EdgeId};
use cdg_graph::Graph;
use cdg_history::Reversible;

use crate::error::MutationError;

/// Remove an edge by id, holding a value copy for undo.
///
/// Applying against a graph where the edge is already gone is a no-op, and
/// so is reverting that apply. Otherwise reverting re-inserts the copy at
/// its old position, unless an edge with that id exists again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveEdge {
    edge: Edge,
    index: Option<usize>,
}

impl RemoveEdge {
    /// Snapshot the edge `id` from `graph`. Returns `None` if it is absent.
    pub fn capture(graph: &Graph, id: EdgeId) -> Option<Self> {
        Some(Self::new(graph.edge(id)?.clone()))
    }

    pub fn new(edge: Edge) -> Self {
        Self { edge, index: None }
    }

    pub fn edge(&self) -> &Edge {
        &self.edge
    }
}

impl Reversible for RemoveEdge {
    type Target = Graph;
    type Error = MutationError;

    fn apply(&mut self, graph: &mut Graph) -> Result<(), MutationError> {
        self.index = graph.remove_edge(self.edge.id).map(|(index, _)| index);
        Ok(())
    }

    fn revert(&mut self, graph: &mut Graph) {
        let Some(index) = self.index else {
            return;
        };
        if !graph.contains_edge(self.edge.id) {
            let _ = graph.insert_edge_at(index, self.edge.clone());
        }
    }

    fn label(&self) -> &'static str {
        "remove-edge"
    }
}
