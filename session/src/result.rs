//! Action outcomes.

use cdg_constraint::LinkViolation;
use cdg_core::{EdgeId, NodeId};
use cdg_document::Fragment;
use cdg_trace::Trace;
use std::path::PathBuf;

/// What an action did.
#[derive(Debug, Clone)]
pub enum Outcome {
    NodeAdded(NodeId),
    /// `violation` is set when a rule matched and the link was allowed anyway;
    /// the edge is then flagged forbidden.
    EdgeAdded {
        id: EdgeId,
        violation: Option<LinkViolation>,
    },
    /// The link matched a rule while enforcement was on. Nothing changed.
    LinkBlocked(LinkViolation),
    NodesRemoved {
        nodes: usize,
        edges: usize,
    },
    EdgeRemoved(EdgeId),
    NodeUpdated(NodeId),
    Pasted {
        nodes: Vec<NodeId>,
        edges: Vec<EdgeId>,
    },
    /// `false` when there was nothing to undo.
    Undone(bool),
    /// `false` when there was nothing to redo.
    Redone(bool),
    Traced(Trace),
    TraceCleared,
    Copied(Fragment),
    Created,
    Opened {
        path: PathBuf,
        nodes: usize,
        edges: usize,
    },
    Saved(PathBuf),
    RulesChanged(usize),
}
