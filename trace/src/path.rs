//! Trace results.

use cdg_core::{EdgeId, NodeId};
use std::collections::{HashMap, HashSet};

/// Why a path stopped growing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathEnd {
    /// The head has no predecessors.
    Source,
    /// The path reached the depth bound.
    DepthLimit,
}

/// A causal chain, ordered from its first cause to the traced target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CausalPath {
    pub nodes: Vec<NodeId>,
    pub end: PathEnd,
}

impl CausalPath {
    /// First node of the chain.
    pub fn head(&self) -> NodeId {
        self.nodes[0]
    }

    /// Length in edges.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consecutive `(cause, effect)` pairs along the chain.
    pub fn links(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Elements to mark on screen after a trace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlight {
    pub nodes: HashSet<NodeId>,
    pub edges: HashSet<EdgeId>,
}

impl Highlight {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// A distinct root cause and its distance to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootCause {
    pub node: NodeId,
    /// Shortest path length found, in edges.
    pub shortest: usize,
    /// Number of enumerated paths starting here.
    pub paths: usize,
}

/// The outcome of one trace.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub target: NodeId,
    /// Completed paths in discovery order (shortest first).
    pub paths: Vec<CausalPath>,
    /// True if exploration stopped before the frontier was exhausted.
    pub truncated: bool,
    pub highlight: Highlight,
}

impl Trace {
    /// Distinct root causes in discovery order.
    ///
    /// Only source-ended paths count, and the target itself never does: an
    /// isolated target yields an empty report.
    pub fn root_causes(&self) -> Vec<RootCause> {
        self.heads(PathEnd::Source)
    }

    /// Heads of paths cut off by the depth bound; their causes are unknown.
    pub fn frontier(&self) -> Vec<RootCause> {
        self.heads(PathEnd::DepthLimit)
    }

    fn heads(&self, end: PathEnd) -> Vec<RootCause> {
        let mut order: Vec<RootCause> = Vec::new();
        let mut seen: HashMap<NodeId, usize> = HashMap::new();

        for path in self.paths.iter().filter(|p| p.end == end) {
            let head = path.head();
            if head == self.target {
                continue;
            }
            match seen.get(&head) {
                Some(&slot) => {
                    let cause = &mut order[slot];
                    cause.shortest = cause.shortest.min(path.len());
                    cause.paths += 1;
                }
                None => {
                    seen.insert(head, order.len());
                    order.push(RootCause {
                        node: head,
                        shortest: path.len(),
                        paths: 1,
                    });
                }
            }
        }

        order
    }

    pub fn is_highlighted_node(&self, id: NodeId) -> bool {
        self.highlight.nodes.contains(&id)
    }

    pub fn is_highlighted_edge(&self, id: EdgeId) -> bool {
        self.highlight.edges.contains(&id)
    }
}
