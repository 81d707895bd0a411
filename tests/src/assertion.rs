//! Assertion types and builders for verifying step results.

use std::collections::HashMap;

use cdg_core::NodeId;
use cdg_session::{Editor, Outcome};

use crate::error::{ScenarioError, ScenarioResult};

type EditorCheck = Box<dyn Fn(&Editor) -> bool + Send + Sync>;

/// What must hold after a step.
#[derive(Default)]
pub struct Assertion {
    // Diagram shape
    pub nodes: Option<usize>,
    pub edges: Option<usize>,
    pub forbidden_edges: Option<usize>,

    // Outcome of the step itself
    pub blocked: Option<bool>,
    pub flagged: Option<bool>,
    pub undone: Option<bool>,
    pub redone: Option<bool>,

    // Trace results, by scenario name
    pub roots: Option<Vec<String>>,
    pub paths: Option<usize>,
    pub truncated: Option<bool>,
    pub highlighted: Vec<String>,

    // Session state
    pub can_undo: Option<bool>,
    pub can_redo: Option<bool>,

    // Error assertions
    pub error: Option<String>,
    pub error_pattern: Option<String>,

    pub custom: Option<EditorCheck>,
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assertion")
            .field("nodes", &self.nodes)
            .field("edges", &self.edges)
            .field("blocked", &self.blocked)
            .field("flagged", &self.flagged)
            .field("roots", &self.roots)
            .field("paths", &self.paths)
            .field("error", &self.error)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

fn check<T: PartialEq + std::fmt::Debug>(
    step: &str,
    what: &str,
    expected: &Option<T>,
    actual: T,
) -> ScenarioResult<()> {
    match expected {
        Some(expected) if *expected != actual => Err(ScenarioError::assertion_failed(
            step,
            format!("expected {} {:?}, got {:?}", what, expected, actual),
        )),
        _ => Ok(()),
    }
}

impl Assertion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify the assertion against a step result and the editor after it.
    pub fn verify(
        &self,
        step: &str,
        editor: &Editor,
        names: &HashMap<String, NodeId>,
        result: &Result<Outcome, String>,
    ) -> ScenarioResult<()> {
        // Check error expectations first
        if let Some(ref expected_error) = self.error {
            return match result {
                Err(msg) if msg.contains(expected_error.as_str()) => Ok(()),
                Err(msg) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error containing '{}', got: {}", expected_error, msg),
                )),
                Ok(_) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error containing '{}', but step succeeded", expected_error),
                )),
            };
        }

        if let Some(ref pattern) = self.error_pattern {
            let re = regex_lite::Regex::new(pattern).map_err(|e| {
                ScenarioError::assertion_failed(step, format!("invalid regex pattern: {}", e))
            })?;
            return match result {
                Err(msg) if re.is_match(msg) => Ok(()),
                Err(msg) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error matching '{}', got: {}", pattern, msg),
                )),
                Ok(_) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error matching '{}', but step succeeded", pattern),
                )),
            };
        }

        let outcome = result
            .as_ref()
            .map_err(|msg| ScenarioError::step_execution(step, msg.clone()))?;

        let graph = editor.graph();
        check(step, "nodes", &self.nodes, graph.node_count())?;
        check(step, "edges", &self.edges, graph.edge_count())?;
        check(
            step,
            "forbidden edges",
            &self.forbidden_edges,
            graph.edges().iter().filter(|e| e.forbidden).count(),
        )?;

        check(step, "blocked", &self.blocked, matches!(outcome, Outcome::LinkBlocked(_)))?;
        check(
            step,
            "flagged",
            &self.flagged,
            matches!(outcome, Outcome::EdgeAdded { violation: Some(_), .. }),
        )?;
        check(step, "undone", &self.undone, matches!(outcome, Outcome::Undone(true)))?;
        check(step, "redone", &self.redone, matches!(outcome, Outcome::Redone(true)))?;

        check(step, "can undo", &self.can_undo, editor.history().can_undo())?;
        check(step, "can redo", &self.can_redo, editor.history().can_redo())?;

        self.verify_trace(step, editor, names, outcome)?;

        if let Some(ref f) = self.custom {
            if !f(editor) {
                return Err(ScenarioError::assertion_failed(step, "custom assertion failed"));
            }
        }

        Ok(())
    }

    fn verify_trace(
        &self,
        step: &str,
        editor: &Editor,
        names: &HashMap<String, NodeId>,
        outcome: &Outcome,
    ) -> ScenarioResult<()> {
        let wants_trace = self.roots.is_some() || self.paths.is_some() || self.truncated.is_some();
        if wants_trace {
            let Outcome::Traced(trace) = outcome else {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected a trace, got {:?}", outcome),
                ));
            };

            if let Some(ref expected) = self.roots {
                let mut expected: Vec<NodeId> = expected
                    .iter()
                    .map(|n| names.get(n).copied().ok_or_else(|| ScenarioError::unknown_name(step, n)))
                    .collect::<ScenarioResult<_>>()?;
                let mut actual: Vec<NodeId> = trace.root_causes().iter().map(|r| r.node).collect();
                expected.sort();
                actual.sort();
                if expected != actual {
                    let label = |id: &NodeId| {
                        names
                            .iter()
                            .find(|(_, v)| *v == id)
                            .map_or_else(|| id.to_string(), |(k, _)| k.clone())
                    };
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!(
                            "expected roots {:?}, got {:?}",
                            expected.iter().map(label).collect::<Vec<_>>(),
                            actual.iter().map(label).collect::<Vec<_>>()
                        ),
                    ));
                }
            }
            check(step, "paths", &self.paths, trace.paths.len())?;
            check(step, "truncated", &self.truncated, trace.truncated)?;
        }

        for name in &self.highlighted {
            let id = names
                .get(name)
                .copied()
                .ok_or_else(|| ScenarioError::unknown_name(step, name))?;
            if !editor.is_highlighted_node(id) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected '{}' to be highlighted", name),
                ));
            }
        }
        Ok(())
    }
}

/// Builder for creating assertions.
#[derive(Default)]
pub struct AssertionBuilder {
    assertion: Assertion,
}

impl AssertionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(self) -> Assertion {
        self.assertion
    }

    // ==================== Diagram ====================

    pub fn nodes(mut self, n: usize) -> Self {
        self.assertion.nodes = Some(n);
        self
    }

    pub fn edges(mut self, n: usize) -> Self {
        self.assertion.edges = Some(n);
        self
    }

    pub fn forbidden_edges(mut self, n: usize) -> Self {
        self.assertion.forbidden_edges = Some(n);
        self
    }

    // ==================== Outcome ====================

    /// The link was refused by a forbidden rule.
    pub fn blocked(mut self) -> Self {
        self.assertion.blocked = Some(true);
        self
    }

    /// The link was created despite a matching rule.
    pub fn flagged(mut self) -> Self {
        self.assertion.flagged = Some(true);
        self
    }

    pub fn undone(mut self) -> Self {
        self.assertion.undone = Some(true);
        self
    }

    pub fn nothing_to_undo(mut self) -> Self {
        self.assertion.undone = Some(false);
        self
    }

    pub fn redone(mut self) -> Self {
        self.assertion.redone = Some(true);
        self
    }

    pub fn nothing_to_redo(mut self) -> Self {
        self.assertion.redone = Some(false);
        self
    }

    // ==================== Trace ====================

    pub fn roots(mut self, names: &[&str]) -> Self {
        self.assertion.roots = Some(names.iter().map(|n| n.to_string()).collect());
        self
    }

    pub fn paths(mut self, n: usize) -> Self {
        self.assertion.paths = Some(n);
        self
    }

    pub fn truncated(mut self, truncated: bool) -> Self {
        self.assertion.truncated = Some(truncated);
        self
    }

    pub fn highlighted(mut self, names: &[&str]) -> Self {
        self.assertion
            .highlighted
            .extend(names.iter().map(|n| n.to_string()));
        self
    }

    // ==================== History ====================

    pub fn can_undo(mut self, can: bool) -> Self {
        self.assertion.can_undo = Some(can);
        self
    }

    pub fn can_redo(mut self, can: bool) -> Self {
        self.assertion.can_redo = Some(can);
        self
    }

    // ==================== Errors ====================

    pub fn error(mut self, contains: impl Into<String>) -> Self {
        self.assertion.error = Some(contains.into());
        self
    }

    pub fn error_matches(mut self, pattern: impl Into<String>) -> Self {
        self.assertion.error_pattern = Some(pattern.into());
        self
    }

    /// Custom check against the editor after the step.
    pub fn assert_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Editor) -> bool + Send + Sync + 'static,
    {
        self.assertion.custom = Some(Box::new(f));
        self
    }
}
