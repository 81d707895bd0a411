//! Subgraph fragments for copy and paste.

use cdg_core::{Edge, EdgeId, Node, NodeId};
use cdg_graph::Graph;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::error::{DocumentError, DocumentResult};

/// A selection of nodes plus the edges running between them.
///
/// Serialized with the same keys as a document, so a fragment is also a
/// loadable (rule-less) document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Fragment {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Fragment {
    /// Copy the nodes in `selection` and every edge with both ends in it.
    /// Graph order is kept; unknown ids are ignored.
    pub fn extract(graph: &Graph, selection: &[NodeId]) -> Self {
        let selected: HashSet<NodeId> = selection.iter().copied().collect();
        let nodes = graph
            .nodes()
            .iter()
            .filter(|n| selected.contains(&n.id))
            .cloned()
            .collect();
        let edges = graph
            .edges()
            .iter()
            .filter(|e| selected.contains(&e.from) && selected.contains(&e.to))
            .cloned()
            .collect();
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn to_json(&self) -> DocumentResult<String> {
        crate::document::check_finite(&self.nodes)?;
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse clipboard text. A fragment without nodes is rejected.
    pub fn from_json(json: &str) -> DocumentResult<Self> {
        let fragment: Fragment = serde_json::from_str(json)?;
        if fragment.is_empty() {
            return Err(DocumentError::EmptyFragment);
        }
        Ok(fragment)
    }

    /// Produce a copy with fresh ids, ready to insert next to the original.
    ///
    /// The n-th node moves by `offset + n * cascade_step` on both axes so
    /// pasted nodes do not stack. Edges are rewired to the new ids and lose
    /// their forbidden flag; edges with an endpoint outside the fragment are
    /// dropped.
    pub fn remap(&self, offset: f32, cascade_step: f32) -> Self {
        let mut ids: HashMap<NodeId, NodeId> = HashMap::with_capacity(self.nodes.len());
        let mut shift = offset;

        let nodes = self
            .nodes
            .iter()
            .map(|node| {
                let fresh = Node {
                    id: NodeId::new(),
                    x: node.x + shift,
                    y: node.y + shift,
                    ..node.clone()
                };
                ids.insert(node.id, fresh.id);
                shift += cascade_step;
                fresh
            })
            .collect();

        let edges = self
            .edges
            .iter()
            .filter_map(|edge| {
                Some(Edge {
                    id: EdgeId::new(),
                    from: *ids.get(&edge.from)?,
                    to: *ids.get(&edge.to)?,
                    forbidden: false,
                })
            })
            .collect();

        Self { nodes, edges }
    }
}
