//! Core graph storage implementation.

use cdg_core::{Edge, EdgeId, ForbiddenRule, GraphError, GraphResult, Node, NodeId};

/// The in-memory diagram: ordered nodes, ordered edges, ordered rules.
///
/// Order is observable. Equality compares all three sequences element by
/// element, which is what undo restoration is checked against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    rules: Vec<ForbiddenRule>,
}

impl Graph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a graph from already-validated parts.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>, rules: Vec<ForbiddenRule>) -> Self {
        Self {
            nodes,
            edges,
            rules,
        }
    }

    // ==================== Node Operations ====================

    /// Append a node.
    pub fn insert_node(&mut self, node: Node) -> GraphResult<()> {
        let len = self.nodes.len();
        self.insert_node_at(len, node)
    }

    /// Insert a node at `index` (clamped to the current length).
    pub fn insert_node_at(&mut self, index: usize, node: Node) -> GraphResult<()> {
        if self.contains_node(node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        let index = index.min(self.nodes.len());
        self.nodes.insert(index, node);
        Ok(())
    }

    /// Remove a node, returning its former position and value.
    /// Removing an absent node is a no-op.
    pub fn remove_node(&mut self, id: NodeId) -> Option<(usize, Node)> {
        let index = self.node_index(id)?;
        Some((index, self.nodes.remove(index)))
    }

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Get a mutable reference to a node by ID.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn node_index(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_index(id).is_some()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    // ==================== Edge Operations ====================

    /// Append an edge.
    pub fn insert_edge(&mut self, edge: Edge) -> GraphResult<()> {
        let len = self.edges.len();
        self.insert_edge_at(len, edge)
    }

    /// Insert an edge at `index` (clamped to the current length).
    pub fn insert_edge_at(&mut self, index: usize, edge: Edge) -> GraphResult<()> {
        if self.contains_edge(edge.id) {
            return Err(GraphError::DuplicateEdge(edge.id));
        }
        let index = index.min(self.edges.len());
        self.edges.insert(index, edge);
        Ok(())
    }

    /// Remove an edge, returning its former position and value.
    /// Removing an absent edge is a no-op.
    pub fn remove_edge(&mut self, id: EdgeId) -> Option<(usize, Edge)> {
        let index = self.edge_index(id)?;
        Some((index, self.edges.remove(index)))
    }

    /// Get an edge by ID.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn edge_index(&self, id: EdgeId) -> Option<usize> {
        self.edges.iter().position(|e| e.id == id)
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edge_index(id).is_some()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    // ==================== Query Operations ====================

    /// Edges with `node` at either end, in edge order.
    pub fn edges_touching(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.touches(node))
    }

    /// Edges ending at `node`, in edge order.
    pub fn edges_into(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.to == node)
    }

    /// Edges starting at `node`, in edge order.
    pub fn edges_from(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.from == node)
    }

    /// Edges running `from -> to`. Parallel edges are allowed.
    pub fn edges_between(&self, from: NodeId, to: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges
            .iter()
            .filter(move |e| e.from == from && e.to == to)
    }

    /// Nodes whose title equals `title`, in node order.
    pub fn nodes_titled<'a>(&'a self, title: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.iter().filter(move |n| n.title == title)
    }

    // ==================== Rule Operations ====================

    pub fn rules(&self) -> &[ForbiddenRule] {
        &self.rules
    }

    pub fn set_rules(&mut self, rules: Vec<ForbiddenRule>) {
        self.rules = rules;
    }

    pub fn push_rule(&mut self, rule: ForbiddenRule) {
        self.rules.push(rule);
    }

    /// Remove the rule at `index`, if any.
    pub fn remove_rule(&mut self, index: usize) -> Option<ForbiddenRule> {
        (index < self.rules.len()).then(|| self.rules.remove(index))
    }

    pub fn clear_rules(&mut self) {
        self.rules.clear();
    }

    // ==================== Statistics ====================

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
