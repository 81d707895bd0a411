//! Add an edge.

use cdg_core::Edge;
use cdg_graph::Graph;
use cdg_history::Reversible;

use crate::error::MutationError;

/// Append an edge. The `forbidden` flag is decided by the caller before
/// construction and stored as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddEdge {
    edge: Edge,
}

impl AddEdge {
    pub fn new(edge: Edge) -> Self {
        Self { edge }
    }

    pub fn edge(&self) -> &Edge {
        &self.edge
    }
}

impl Reversible for AddEdge {
    type Target = Graph;
    type Error = MutationError;

    fn apply(&mut self, graph: &mut Graph) -> Result<(), MutationError> {
        graph.insert_edge(self.edge.clone())?;
        Ok(())
    }

    fn revert(&mut self, graph: &mut Graph) {
        graph.remove_edge(self.edge.id);
    }

    fn label(&self) -> &'static str {
        "add-edge"
    }
}
