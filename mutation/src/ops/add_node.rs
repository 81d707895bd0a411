//! Add a node.

use cdg_core::Node;
use cdg_graph::Graph;
use cdg_history::Reversible;

use crate::error::MutationError;

#[derive(Debug, Clone, PartialEq)]
pub struct AddNode {
    node: Node,
}

impl AddNode {
    pub fn new(node: Node) -> Self {
        Self { node }
    }

    pub fn node(&self) -> &Node {
        &self.node
    }
}

impl Reversible for AddNode {
    type Target = Graph;
    type Error = MutationError;

    fn apply(&mut self, graph: &mut Graph) -> Result<(), MutationError> {
        graph.insert_node(self.node.clone())?;
        Ok(())
    }

    fn revert(&mut self, graph: &mut Graph) {
        // Keep the value as it was at undo time so redo restores it exactly.
        if let Some((_, node)) = graph.remove_node(self.node.id) {
            self.node = node;
        }
    }

    fn label(&self) -> &'static str {
        "add-node"
    }
}
