//! Whole-diagram documents.

use cdg_core::{Edge, ForbiddenRule, Node};
use cdg_graph::Graph;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{DocumentError, DocumentResult};

/// The persisted shape of a diagram.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Document {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub forbidden_rules: Vec<ForbiddenRule>,
}

impl Document {
    pub fn of(graph: &Graph) -> Self {
        Self {
            nodes: graph.nodes().to_vec(),
            edges: graph.edges().to_vec(),
            forbidden_rules: graph.rules().to_vec(),
        }
    }

    /// Build a fresh graph, rejecting duplicate ids.
    ///
    /// Edges naming a node the document does not contain are kept.
    pub fn into_graph(self) -> DocumentResult<Graph> {
        let mut graph = Graph::new();
        for node in self.nodes {
            graph.insert_node(node)?;
        }
        for edge in self.edges {
            if !graph.contains_node(edge.from) || !graph.contains_node(edge.to) {
                tracing::warn!(edge = %edge.id, from = %edge.from, to = %edge.to, "edge references a missing node");
            }
            graph.insert_edge(edge)?;
        }
        graph.set_rules(self.forbidden_rules);
        Ok(graph)
    }
}

/// Serialize `graph` as indented JSON.
///
/// JSON has no infinity or NaN, so a node holding one is refused rather
/// than written as `null`.
pub fn to_json(graph: &Graph) -> DocumentResult<String> {
    check_finite(graph.nodes())?;
    Ok(serde_json::to_string_pretty(&Document::of(graph))?)
}

pub(crate) fn check_finite(nodes: &[Node]) -> DocumentResult<()> {
    for node in nodes {
        for (field, value) in [("x", node.x), ("y", node.y), ("weight", node.weight)] {
            if !value.is_finite() {
                return Err(DocumentError::NonFinite {
                    node: node.id,
                    field,
                });
            }
        }
    }
    Ok(())
}

/// Parse a document into a new graph.
pub fn from_json(json: &str) -> DocumentResult<Graph> {
    let document: Document = serde_json::from_str(json)?;
    document.into_graph()
}

/// Write `graph` to `path`.
pub fn save(path: impl AsRef<Path>, graph: &Graph) -> DocumentResult<()> {
    let path = path.as_ref();
    let json = to_json(graph)?;
    fs::write(path, json).map_err(|e| DocumentError::write(path, e))?;
    tracing::info!(path = %path.display(), nodes = graph.node_count(), edges = graph.edge_count(), "saved diagram");
    Ok(())
}

/// Read a graph from `path`.
pub fn load(path: impl AsRef<Path>) -> DocumentResult<Graph> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|e| DocumentError::read(path, e))?;
    let graph = from_json(&json)?;
    tracing::info!(path = %path.display(), nodes = graph.node_count(), edges = graph.edge_count(), "loaded diagram");
    Ok(graph)
}
