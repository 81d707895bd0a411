//! Scenario definition and runner.

use std::collections::HashMap;

use cdg_core::{ForbiddenRule, NodeCategory, NodeColor, NodeId, NodeProperties, Rating};
use cdg_document::Fragment;
use cdg_session::{Action, Editor, EditorConfig, Outcome};

use crate::assertion::{Assertion, AssertionBuilder};
use crate::error::{ScenarioError, ScenarioResult};

/// One operation, addressing nodes by scenario-local names.
#[derive(Debug, Clone)]
pub enum Op {
    Node {
        name: String,
        title: String,
        category: NodeCategory,
    },
    Link {
        from: String,
        to: String,
        force: bool,
    },
    Unlink {
        from: String,
        to: String,
    },
    Remove(Vec<String>),
    Move {
        name: String,
        x: f32,
        y: f32,
    },
    Rate {
        name: String,
        severity: i64,
        occurrence: i64,
        detectability: i64,
    },
    Paint {
        name: String,
        color: NodeColor,
    },
    Rule {
        from: NodeCategory,
        to: NodeCategory,
    },
    Copy(Vec<String>),
    Paste,
    Undo,
    Redo,
    Trace(String),
}

impl Op {
    pub fn node(name: &str, title: &str) -> Self {
        Self::node_in(name, title, NodeCategory::default())
    }

    pub fn node_in(name: &str, title: &str, category: NodeCategory) -> Self {
        Self::Node {
            name: name.to_string(),
            title: title.to_string(),
            category,
        }
    }

    pub fn link(from: &str, to: &str) -> Self {
        Self::Link {
            from: from.to_string(),
            to: to.to_string(),
            force: false,
        }
    }

    /// Link even when a forbidden rule matches.
    pub fn force_link(from: &str, to: &str) -> Self {
        Self::Link {
            from: from.to_string(),
            to: to.to_string(),
            force: true,
        }
    }

    pub fn unlink(from: &str, to: &str) -> Self {
        Self::Unlink {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn remove(names: &[&str]) -> Self {
        Self::Remove(names.iter().map(|n| n.to_string()).collect())
    }

    pub fn move_to(name: &str, x: f32, y: f32) -> Self {
        Self::Move {
            name: name.to_string(),
            x,
            y,
        }
    }

    pub fn rate(name: &str, severity: i64, occurrence: i64, detectability: i64) -> Self {
        Self::Rate {
            name: name.to_string(),
            severity,
            occurrence,
            detectability,
        }
    }

    pub fn paint(name: &str, color: NodeColor) -> Self {
        Self::Paint {
            name: name.to_string(),
            color,
        }
    }

    pub fn rule(from: NodeCategory, to: NodeCategory) -> Self {
        Self::Rule { from, to }
    }

    pub fn copy(names: &[&str]) -> Self {
        Self::Copy(names.iter().map(|n| n.to_string()).collect())
    }

    pub fn trace(name: &str) -> Self {
        Self::Trace(name.to_string())
    }
}

/// A step: an operation and what must hold afterwards.
#[derive(Debug)]
pub struct Step {
    pub name: String,
    pub op: Op,
    pub assertion: Assertion,
}

/// A named sequence of steps run against a fresh editor.
#[derive(Debug)]
pub struct Scenario {
    pub name: String,
    config: EditorConfig,
    steps: Vec<Step>,
}

impl Scenario {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: EditorConfig::default(),
            steps: Vec::new(),
        }
    }

    pub fn config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a step with assertions.
    pub fn step<F>(mut self, name: &str, op: Op, f: F) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        self.steps.push(Step {
            name: name.to_string(),
            op,
            assertion: f(AssertionBuilder::new()).build(),
        });
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run every step in order, stopping at the first failure.
    pub fn run(&self) -> ScenarioResult<Editor> {
        let mut runner = Runner::new(self.config.clone());
        for step in &self.steps {
            let result = runner.perform(step)?;
            step.assertion
                .verify(&step.name, &runner.editor, &runner.names, &result)?;
        }
        Ok(runner.editor)
    }
}

struct Runner {
    editor: Editor,
    names: HashMap<String, NodeId>,
    clipboard: Option<Fragment>,
}

impl Runner {
    fn new(config: EditorConfig) -> Self {
        Self {
            editor: Editor::new(config),
            names: HashMap::new(),
            clipboard: None,
        }
    }

    fn id(&self, step: &str, name: &str) -> ScenarioResult<NodeId> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| ScenarioError::unknown_name(step, name))
    }

    fn ids(&self, step: &str, names: &[String]) -> ScenarioResult<Vec<NodeId>> {
        names.iter().map(|n| self.id(step, n)).collect()
    }

    /// Translate the op into an action and dispatch it. Editor errors are
    /// returned as the step result, not as scenario errors.
    fn perform(&mut self, step: &Step) -> ScenarioResult<Result<Outcome, String>> {
        let name = step.name.as_str();
        let action = match &step.op {
            Op::Node {
                title, category, ..
            } => Action::AddNode {
                title: title.clone(),
                x: 0.0,
                y: 0.0,
                category: *category,
                color: NodeColor::default(),
            },
            Op::Link { from, to, force } => Action::Connect {
                from: self.id(name, from)?,
                to: self.id(name, to)?,
                allow_forbidden: *force,
            },
            Op::Unlink { from, to } => {
                let from = self.id(name, from)?;
                let to = self.id(name, to)?;
                match self.editor.graph().edges_between(from, to).next() {
                    Some(edge) => Action::RemoveEdge(edge.id),
                    None => return Ok(Err("no such link".to_string())),
                }
            }
            Op::Remove(names) => Action::RemoveNodes(self.ids(name, names)?),
            Op::Move { name: node, x, y } => Action::MoveNode {
                id: self.id(name, node)?,
                x: *x,
                y: *y,
            },
            Op::Rate {
                name: node,
                severity,
                occurrence,
                detectability,
            } => {
                let id = self.id(name, node)?;
                let Some(current) = self.editor.graph().node(id) else {
                    return Ok(Err(format!("node not found: {}", node)));
                };
                let mut properties = NodeProperties::of(current);
                properties.severity = Rating::clamped(*severity);
                properties.occurrence = Rating::clamped(*occurrence);
                properties.detectability = Rating::clamped(*detectability);
                Action::EditNode { id, properties }
            }
            Op::Paint { name: node, color } => Action::Paint {
                id: self.id(name, node)?,
                color: *color,
            },
            Op::Rule { from, to } => Action::AddRule(ForbiddenRule::new(*from, *to, "")),
            Op::Copy(names) => Action::Copy(self.ids(name, names)?),
            Op::Paste => match &self.clipboard {
                Some(fragment) => Action::Paste(fragment.clone()),
                None => return Ok(Err("clipboard is empty".to_string())),
            },
            Op::Undo => Action::Undo,
            Op::Redo => Action::Redo,
            Op::Trace(node) => Action::Trace {
                target: self.id(name, node)?,
            },
        };

        let result = self.editor.dispatch(action).map_err(|e| e.to_string());
        match (&step.op, &result) {
            (Op::Node { name: node, .. }, Ok(Outcome::NodeAdded(id))) => {
                self.names.insert(node.clone(), *id);
            }
            (Op::Copy(_), Ok(Outcome::Copied(fragment))) => {
                self.clipboard = Some(fragment.clone());
            }
            _ => {}
        }
        Ok(result)
    }
}
