//! The editor: one diagram, its history, and a single dispatch entry point.

use cdg_constraint::{audit, check_link, LinkViolations};
use cdg_core::{Edge, EdgeId, ForbiddenRule, Node, NodeCategory, NodeColor, NodeId, NodeProperties};
use cdg_document::{DocumentError, Fragment};
use cdg_graph::Graph;
use cdg_history::History;
use cdg_mutation::{Command, CommandHistory};
use cdg_trace::{CausalTracer, Trace};
use std::path::{Path, PathBuf};

use crate::action::Action;
use crate::config::EditorConfig;
use crate::error::{SessionError, SessionResult};
use crate::result::Outcome;

/// An editing session over one diagram.
///
/// All document changes go through [`Editor::dispatch`], which turns each
/// action into commands executed on the history. Rule edits bypass the
/// history. The last trace is kept for highlighting and dropped by any
/// document change.
#[derive(Debug)]
pub struct Editor {
    graph: Graph,
    history: CommandHistory,
    config: EditorConfig,
    path: Option<PathBuf>,
    dirty: bool,
    last_trace: Option<Trace>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Create an editor with an empty diagram.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_graph(config, Graph::new())
    }

    /// Create an editor over an existing diagram. History starts empty.
    pub fn with_graph(config: EditorConfig, graph: Graph) -> Self {
        if let Err(e) = config.validate() {
            tracing::warn!(error = %e, "editor started with an invalid config");
        }
        Self {
            graph,
            history: History::with_config(config.history),
            config,
            path: None,
            dirty: false,
            last_trace: None,
        }
    }

    /// Perform one user action.
    pub fn dispatch(&mut self, action: Action) -> SessionResult<Outcome> {
        match action {
            Action::AddNode {
                title,
                x,
                y,
                category,
                color,
            } => self.add_node(title, x, y, category, color),
            Action::Connect {
                from,
                to,
                allow_forbidden,
            } => self.connect(from, to, allow_forbidden),
            Action::RemoveNodes(ids) => self.remove_nodes(ids),
            Action::RemoveEdge(id) => self.remove_edge(id),
            Action::MoveNode { id, x, y } => self.move_node(id, x, y),
            Action::EditNode { id, properties } => self.edit_node(id, properties),
            Action::Paint { id, color } => self.paint(id, color),
            Action::Paste(fragment) => self.paste(fragment),
            Action::Undo => Ok(Outcome::Undone(self.undo())),
            Action::Redo => Ok(Outcome::Redone(self.redo())),
            Action::Trace { target } => self.trace(target),
            Action::ClearTrace => {
                self.last_trace = None;
                Ok(Outcome::TraceCleared)
            }
            Action::Copy(ids) => Ok(Outcome::Copied(Fragment::extract(&self.graph, &ids))),
            Action::New => Ok(self.new_document()),
            Action::Open(path) => self.open(path),
            Action::Save(path) => self.save(path),
            Action::SetRules(rules) => {
                self.graph.set_rules(rules);
                Ok(self.rules_changed())
            }
            Action::AddRule(rule) => {
                self.graph.push_rule(rule);
                Ok(self.rules_changed())
            }
            Action::RemoveRule(index) => {
                self.graph
                    .remove_rule(index)
                    .ok_or_else(|| SessionError::rule_index(index))?;
                Ok(self.rules_changed())
            }
        }
    }

    // ==================== Queries ====================

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn rules(&self) -> &[ForbiddenRule] {
        self.graph.rules()
    }

    pub fn last_trace(&self) -> Option<&Trace> {
        self.last_trace.as_ref()
    }

    pub fn is_highlighted_node(&self, id: NodeId) -> bool {
        self.last_trace
            .as_ref()
            .is_some_and(|t| t.is_highlighted_node(id))
    }

    pub fn is_highlighted_edge(&self, id: EdgeId) -> bool {
        self.last_trace
            .as_ref()
            .is_some_and(|t| t.is_highlighted_edge(id))
    }

    /// True if the diagram changed since it was last opened or saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Compare stored edge flags with the current rules.
    pub fn audit(&self) -> LinkViolations {
        audit(&self.graph)
    }

    // ==================== Document Edits ====================

    fn add_node(
        &mut self,
        title: String,
        x: f32,
        y: f32,
        category: NodeCategory,
        color: NodeColor,
    ) -> SessionResult<Outcome> {
        let (x, y) = self.position(x, y)?;
        let node = Node::new(title)
            .with_position(x, y)
            .with_category(category)
            .with_color(color);
        let id = node.id;
        self.execute(Command::add_node(node))?;
        Ok(Outcome::NodeAdded(id))
    }

    fn connect(&mut self, from: NodeId, to: NodeId, allow_forbidden: bool) -> SessionResult<Outcome> {
        if from == to {
            return Err(SessionError::SelfLink(from));
        }
        let source = self.graph.node(from).ok_or(SessionError::NodeNotFound(from))?;
        let target = self.graph.node(to).ok_or(SessionError::NodeNotFound(to))?;
        let violation = check_link(source, target, self.graph.rules());

        if let Some(violation) = &violation {
            if self.config.links.enforce_forbidden && !allow_forbidden {
                tracing::debug!(from = %from, to = %to, reason = %violation.message(), "link blocked");
                return Ok(Outcome::LinkBlocked(violation.clone()));
            }
        }

        let edge = Edge::new(from, to).with_forbidden(violation.is_some());
        let id = edge.id;
        self.execute(Command::add_edge(edge))?;
        Ok(Outcome::EdgeAdded { id, violation })
    }

    /// One command per node, so each removal undoes separately.
    fn remove_nodes(&mut self, ids: Vec<NodeId>) -> SessionResult<Outcome> {
        let mut unique: Vec<NodeId> = Vec::with_capacity(ids.len());
        for id in ids {
            if !self.graph.contains_node(id) {
                return Err(SessionError::NodeNotFound(id));
            }
            if !unique.contains(&id) {
                unique.push(id);
            }
        }

        let edges_before = self.graph.edge_count();
        for &id in &unique {
            self.execute(Command::remove_node(id))?;
        }

        Ok(Outcome::NodesRemoved {
            nodes: unique.len(),
            edges: edges_before - self.graph.edge_count(),
        })
    }

    fn remove_edge(&mut self, id: EdgeId) -> SessionResult<Outcome> {
        let command = Command::remove_edge(&self.graph, id).ok_or(SessionError::EdgeNotFound(id))?;
        self.execute(command)?;
        Ok(Outcome::EdgeRemoved(id))
    }

    fn move_node(&mut self, id: NodeId, x: f32, y: f32) -> SessionResult<Outcome> {
        let (x, y) = self.position(x, y)?;
        let command = Command::move_node_to(&self.graph, id, x, y)
            .ok_or(SessionError::NodeNotFound(id))?;
        self.execute(command)?;
        Ok(Outcome::NodeUpdated(id))
    }

    fn edit_node(&mut self, id: NodeId, properties: NodeProperties) -> SessionResult<Outcome> {
        SessionError::finite("weight", properties.weight)?;
        let command =
            Command::edit_node_from(&self.graph, id, properties).ok_or(SessionError::NodeNotFound(id))?;
        self.execute(command)?;
        Ok(Outcome::NodeUpdated(id))
    }

    fn paint(&mut self, id: NodeId, color: NodeColor) -> SessionResult<Outcome> {
        let command =
            Command::change_color(&self.graph, id, color).ok_or(SessionError::NodeNotFound(id))?;
        self.execute(command)?;
        Ok(Outcome::NodeUpdated(id))
    }

    /// Insert a copy of `fragment` with fresh ids. Pasted edges are flagged
    /// against the current rules but never blocked.
    fn paste(&mut self, fragment: Fragment) -> SessionResult<Outcome> {
        if fragment.is_empty() {
            return Err(DocumentError::EmptyFragment.into());
        }
        let paste = self.config.paste;
        let copy = fragment.remap(paste.offset, paste.cascade_step);
        for node in &copy.nodes {
            self.position(node.x, node.y)?;
            SessionError::finite("weight", node.weight)?;
        }

        let mut nodes = Vec::with_capacity(copy.nodes.len());
        for node in copy.nodes {
            nodes.push(node.id);
            self.execute(Command::add_node(node))?;
        }

        let mut edges = Vec::with_capacity(copy.edges.len());
        for edge in copy.edges {
            let forbidden = match (self.graph.node(edge.from), self.graph.node(edge.to)) {
                (Some(from), Some(to)) => check_link(from, to, self.graph.rules()).is_some(),
                _ => false,
            };
            edges.push(edge.id);
            self.execute(Command::add_edge(edge.with_forbidden(forbidden)))?;
        }

        Ok(Outcome::Pasted { nodes, edges })
    }

    // ==================== History ====================

    fn undo(&mut self) -> bool {
        let done = self.history.undo(&mut self.graph);
        if done {
            self.touch();
        }
        done
    }

    fn redo(&mut self) -> bool {
        let done = self.history.redo(&mut self.graph);
        if done {
            self.touch();
        }
        done
    }

    // ==================== Analysis ====================

    fn trace(&mut self, target: NodeId) -> SessionResult<Outcome> {
        let trace = CausalTracer::new(&self.graph).trace(target, &self.config.trace)?;
        self.last_trace = Some(trace.clone());
        Ok(Outcome::Traced(trace))
    }

    // ==================== Files ====================

    /// Start an empty diagram. Rules are configuration and carry over.
    fn new_document(&mut self) -> Outcome {
        let rules = self.graph.rules().to_vec();
        self.graph = Graph::new();
        self.graph.set_rules(rules);
        self.reset();
        self.path = None;
        Outcome::Created
    }

    /// Replace the diagram with the file at `path`. On any error the
    /// current diagram and history are untouched.
    fn open(&mut self, path: PathBuf) -> SessionResult<Outcome> {
        let graph = cdg_document::load(&path)?;
        let (nodes, edges) = (graph.node_count(), graph.edge_count());
        self.graph = graph;
        self.reset();
        self.path = Some(path.clone());
        Ok(Outcome::Opened { path, nodes, edges })
    }

    fn save(&mut self, path: Option<PathBuf>) -> SessionResult<Outcome> {
        let path = path.or_else(|| self.path.clone()).ok_or(SessionError::NoPath)?;
        cdg_document::save(&path, &self.graph)?;
        self.path = Some(path.clone());
        self.dirty = false;
        Ok(Outcome::Saved(path))
    }

    // ==================== Internals ====================

    /// Snap a requested position; infinite or NaN coordinates are refused.
    fn position(&self, x: f32, y: f32) -> SessionResult<(f32, f32)> {
        let canvas = self.config.canvas;
        let x = SessionError::finite("x", canvas.snap(SessionError::finite("x", x)?))?;
        let y = SessionError::finite("y", canvas.snap(SessionError::finite("y", y)?))?;
        Ok((x, y))
    }

    fn execute(&mut self, command: Command) -> SessionResult<()> {
        self.history.execute(command, &mut self.graph)?;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.dirty = true;
        self.last_trace = None;
    }

    fn reset(&mut self) {
        self.history.clear();
        self.last_trace = None;
        self.dirty = false;
    }

    fn rules_changed(&mut self) -> Outcome {
        self.dirty = true;
        Outcome::RulesChanged(self.graph.rules().len())
    }
}
