//! Diagram entities.
//!
//! Nodes and edges carry no highlight state: highlighting is derived by the
//! tracer and owned by whoever renders it.

use crate::{rpn, EdgeId, NodeId, ParseError, Rating};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display color of a node. Persisted by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NodeColor {
    #[default]
    Green,
    Yellow,
    Red,
}

impl NodeColor {
    pub const ALL: [NodeColor; 3] = [NodeColor::Green, NodeColor::Yellow, NodeColor::Red];

    pub fn name(self) -> &'static str {
        match self {
            NodeColor::Green => "Green",
            NodeColor::Yellow => "Yellow",
            NodeColor::Red => "Red",
        }
    }
}

impl fmt::Display for NodeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NodeColor {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::unknown_variant("color", s))
    }
}

/// Structural category of a node; forbidden-link rules are keyed on it.
/// Persisted by name, so reordering variants never corrupts stored rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NodeCategory {
    System,
    Subsystem,
    #[default]
    Component,
    Process,
    Person,
}

impl NodeCategory {
    pub const ALL: [NodeCategory; 5] = [
        NodeCategory::System,
        NodeCategory::Subsystem,
        NodeCategory::Component,
        NodeCategory::Process,
        NodeCategory::Person,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NodeCategory::System => "System",
            NodeCategory::Subsystem => "Subsystem",
            NodeCategory::Component => "Component",
            NodeCategory::Process => "Process",
            NodeCategory::Person => "Person",
        }
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NodeCategory {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::unknown_variant("category", s))
    }
}

/// A cause or effect in the diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Node {
    pub id: NodeId,
    pub title: String,
    pub description: String,
    pub x: f32,
    pub y: f32,
    pub weight: f32,
    pub severity: Rating,
    pub occurrence: Rating,
    pub detectability: Rating,
    #[serde(rename = "ColorName")]
    pub color: NodeColor,
    pub category: NodeCategory,
}

impl Node {
    /// Create a node with a fresh id and default attributes.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_category(mut self, category: NodeCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_color(mut self, color: NodeColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the three FMEA ratings, clamping each.
    pub fn with_ratings(mut self, severity: i64, occurrence: i64, detectability: i64) -> Self {
        self.severity = Rating::clamped(severity);
        self.occurrence = Rating::clamped(occurrence);
        self.detectability = Rating::clamped(detectability);
        self
    }

    /// Risk priority number, recomputed on every call.
    pub fn rpn(&self) -> u32 {
        rpn(self.severity, self.occurrence, self.detectability)
    }
}

impl Default for Node {
    fn default() -> Self {
        Self {
            id: NodeId::new(),
            title: String::new(),
            description: String::new(),
            x: 0.0,
            y: 0.0,
            weight: 0.0,
            severity: Rating::default(),
            occurrence: Rating::default(),
            detectability: Rating::default(),
            color: NodeColor::default(),
            category: NodeCategory::default(),
        }
    }
}

/// A directed causal link `from -> to`.
///
/// `forbidden` records whether a rule matched when the edge was created. It
/// is never re-evaluated when rules change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Edge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    #[serde(default)]
    pub forbidden: bool,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self {
            id: EdgeId::new(),
            from,
            to,
            forbidden: false,
        }
    }

    pub fn with_forbidden(mut self, forbidden: bool) -> Self {
        self.forbidden = forbidden;
        self
    }

    /// Returns true if either endpoint is `node`.
    pub fn touches(&self, node: NodeId) -> bool {
        self.from == node || self.to == node
    }
}

/// The editable attributes of a node. Identity and position are excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeProperties {
    pub title: String,
    pub description: String,
    pub weight: f32,
    pub color: NodeColor,
    pub severity: Rating,
    pub occurrence: Rating,
    pub detectability: Rating,
    pub category: NodeCategory,
}

impl NodeProperties {
    /// Snapshot the editable attributes of `node`.
    pub fn of(node: &Node) -> Self {
        Self {
            title: node.title.clone(),
            description: node.description.clone(),
            weight: node.weight,
            color: node.color,
            severity: node.severity,
            occurrence: node.occurrence,
            detectability: node.detectability,
            category: node.category,
        }
    }

    /// Copy every snapshot field onto `node`.
    pub fn apply_to(&self, node: &mut Node) {
        node.title.clone_from(&self.title);
        node.description.clone_from(&self.description);
        node.weight = self.weight;
        node.color = self.color;
        node.severity = self.severity;
        node.occurrence = self.occurrence;
        node.detectability = self.detectability;
        node.category = self.category;
    }
}
