//! User-level actions accepted by the editor.

use cdg_core::{EdgeId, ForbiddenRule, NodeCategory, NodeColor, NodeId, NodeProperties};
use cdg_document::Fragment;
use std::path::PathBuf;

/// Everything an interaction layer can ask of the editor.
#[derive(Debug, Clone)]
pub enum Action {
    // Document edits, undoable
    AddNode {
        title: String,
        x: f32,
        y: f32,
        category: NodeCategory,
        color: NodeColor,
    },
    Connect {
        from: NodeId,
        to: NodeId,
        /// Proceed even if a forbidden rule matches.
        allow_forbidden: bool,
    },
    RemoveNodes(Vec<NodeId>),
    RemoveEdge(EdgeId),
    MoveNode {
        id: NodeId,
        x: f32,
        y: f32,
    },
    EditNode {
        id: NodeId,
        properties: NodeProperties,
    },
    Paint {
        id: NodeId,
        color: NodeColor,
    },
    Paste(Fragment),

    // History
    Undo,
    Redo,

    // Analysis
    Trace {
        target: NodeId,
    },
    ClearTrace,
    Copy(Vec<NodeId>),

    // Files
    New,
    Open(PathBuf),
    Save(Option<PathBuf>),

    // Rules, not undoable
    SetRules(Vec<ForbiddenRule>),
    AddRule(ForbiddenRule),
    RemoveRule(usize),
}

impl Action {
    /// Shorthand for a default-styled node.
    pub fn add_node(title: impl Into<String>, x: f32, y: f32) -> Self {
        Self::AddNode {
            title: title.into(),
            x,
            y,
            category: NodeCategory::default(),
            color: NodeColor::default(),
        }
    }

    pub fn connect(from: NodeId, to: NodeId) -> Self {
        Self::Connect {
            from,
            to,
            allow_forbidden: false,
        }
    }
}
