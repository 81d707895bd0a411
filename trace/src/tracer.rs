//! Bounded breadth-first enumeration of partial paths.

use cdg_core::NodeId;
use cdg_graph::Graph;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

use crate::error::{TraceError, TraceResult};
use crate::path::{CausalPath, Highlight, PathEnd, Trace};
use crate::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_PATHS, DEFAULT_WORK_FACTOR};

/// Bounds for a trace. All three are required to be finite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Stop after this many completed paths.
    pub max_paths: usize,
    /// A path this many edges long is complete even if it could grow.
    pub max_depth: usize,
    /// At most `max_paths * work_factor` partial paths are ever enqueued.
    pub work_factor: usize,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            max_paths: DEFAULT_MAX_PATHS,
            max_depth: DEFAULT_MAX_DEPTH,
            work_factor: DEFAULT_WORK_FACTOR,
        }
    }
}

impl TraceConfig {
    pub fn new(max_paths: usize, max_depth: usize) -> Self {
        Self {
            max_paths,
            max_depth,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> TraceResult<()> {
        if self.max_paths == 0 {
            return Err(TraceError::invalid_bounds("max_paths must be at least 1"));
        }
        if self.work_factor == 0 {
            return Err(TraceError::invalid_bounds("work_factor must be at least 1"));
        }
        Ok(())
    }

    fn budget(&self) -> usize {
        self.max_paths.saturating_mul(self.work_factor)
    }
}

/// Read-only tracer over a graph snapshot.
pub struct CausalTracer<'g> {
    graph: &'g Graph,
    /// Distinct predecessors per node, in edge order.
    predecessors: HashMap<NodeId, Vec<NodeId>>,
}

impl<'g> CausalTracer<'g> {
    /// Build the reverse adjacency of `graph`.
    ///
    /// Self-loops and edges whose source is not a stored node are ignored.
    pub fn new(graph: &'g Graph) -> Self {
        let mut predecessors: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        for edge in graph.edges() {
            if edge.from == edge.to || !graph.contains_node(edge.from) {
                continue;
            }
            let preds = predecessors.entry(edge.to).or_default();
            if !preds.contains(&edge.from) {
                preds.push(edge.from);
            }
        }
        Self {
            graph,
            predecessors,
        }
    }

    pub fn predecessors(&self, id: NodeId) -> &[NodeId] {
        self.predecessors.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Enumerate causal paths ending at `target`.
    pub fn trace(&self, target: NodeId, config: &TraceConfig) -> TraceResult<Trace> {
        config.validate()?;
        if !self.graph.contains_node(target) {
            return Err(TraceError::NodeNotFound(target));
        }

        let budget = config.budget();
        let mut enqueued = 1usize;
        let mut truncated = false;
        let mut paths = Vec::new();

        // Partial paths are held target-first; the head is the last element.
        let mut frontier: VecDeque<Vec<NodeId>> = VecDeque::new();
        frontier.push_back(vec![target]);

        while let Some(partial) = frontier.pop_front() {
            let Some(&head) = partial.last() else {
                continue;
            };
            let preds = self.predecessors(head);
            let depth = partial.len() - 1;

            let end = if preds.is_empty() {
                Some(PathEnd::Source)
            } else if depth >= config.max_depth {
                Some(PathEnd::DepthLimit)
            } else {
                None
            };

            if let Some(end) = end {
                let mut nodes = partial;
                nodes.reverse();
                paths.push(CausalPath { nodes, end });
                if paths.len() >= config.max_paths {
                    truncated |= !frontier.is_empty();
                    break;
                }
                continue;
            }

            // A head whose predecessors are all on the path closes a cycle
            // and yields nothing.
            for &pred in preds {
                if partial.contains(&pred) {
                    continue;
                }
                if enqueued >= budget {
                    truncated = true;
                    break;
                }
                let mut next = Vec::with_capacity(partial.len() + 1);
                next.extend_from_slice(&partial);
                next.push(pred);
                frontier.push_back(next);
                enqueued += 1;
            }
        }

        let highlight = self.highlight(&paths);
        tracing::debug!(
            node = %target,
            paths = paths.len(),
            enqueued,
            truncated,
            "trace complete"
        );

        Ok(Trace {
            target,
            paths,
            truncated,
            highlight,
        })
    }

    /// Every node on a path, and every edge joining consecutive path nodes.
    fn highlight(&self, paths: &[CausalPath]) -> Highlight {
        let mut highlight = Highlight::default();
        for path in paths {
            highlight.nodes.extend(path.nodes.iter().copied());
            for (from, to) in path.links() {
                highlight
                    .edges
                    .extend(self.graph.edges_between(from, to).map(|e| e.id));
            }
        }
        highlight
    }
}
