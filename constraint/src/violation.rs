//! Forbidden-link violation types.

use cdg_core::{EdgeId, ForbiddenRule, NodeId};
use std::fmt;

/// How a stored edge compares to the current rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditFinding {
    /// A prospective link, not yet stored.
    Proposed,
    /// Rule matches and the edge is flagged.
    Flagged,
    /// Rule matches but the edge predates it.
    Unflagged,
    /// Edge is flagged but no current rule matches.
    Lapsed,
}

/// A rule and its position in the rule list.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleMatch {
    pub index: usize,
    pub rule: ForbiddenRule,
}

/// A link that matches a forbidden rule, or a flagged edge that no longer does.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkViolation {
    /// The first matching rule; `None` only for a lapsed finding.
    pub matched: Option<RuleMatch>,
    pub from: NodeId,
    pub to: NodeId,
    /// The stored edge, when auditing.
    pub edge_id: Option<EdgeId>,
    pub finding: AuditFinding,
}

impl LinkViolation {
    pub fn new(rule_index: usize, rule: ForbiddenRule, from: NodeId, to: NodeId) -> Self {
        Self {
            matched: Some(RuleMatch {
                index: rule_index,
                rule,
            }),
            from,
            to,
            edge_id: None,
            finding: AuditFinding::Proposed,
        }
    }

    /// A flagged edge that no current rule covers.
    pub fn lapsed(edge_id: EdgeId, from: NodeId, to: NodeId) -> Self {
        Self {
            matched: None,
            from,
            to,
            edge_id: Some(edge_id),
            finding: AuditFinding::Lapsed,
        }
    }

    pub fn rule(&self) -> Option<&ForbiddenRule> {
        self.matched.as_ref().map(|m| &m.rule)
    }

    pub fn rule_index(&self) -> Option<usize> {
        self.matched.as_ref().map(|m| m.index)
    }

    pub fn with_edge(mut self, edge_id: EdgeId) -> Self {
        self.edge_id = Some(edge_id);
        self
    }

    pub fn with_finding(mut self, finding: AuditFinding) -> Self {
        self.finding = finding;
        self
    }

    /// Returns true if the stored flag disagrees with the current rules.
    pub fn is_disagreement(&self) -> bool {
        matches!(self.finding, AuditFinding::Unflagged | AuditFinding::Lapsed)
    }

    /// Human-readable reason, falling back to the category pair.
    pub fn message(&self) -> String {
        match self.rule() {
            None => "flagged, but no current rule forbids this link".to_string(),
            Some(rule) if rule.reason.is_empty() => format!(
                "links from {} to {} are forbidden",
                rule.from_category, rule.to_category
            ),
            Some(rule) => rule.reason.clone(),
        }
    }
}

impl fmt::Display for LinkViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.from, self.to, self.message())
    }
}

/// Collection of link violations.
#[derive(Debug, Clone, Default)]
pub struct LinkViolations {
    violations: Vec<LinkViolation>,
}

impl LinkViolations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: LinkViolation) {
        self.violations.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LinkViolation> {
        self.violations.iter()
    }

    /// Findings where the stored flag and the current rules disagree.
    pub fn disagreements(&self) -> impl Iterator<Item = &LinkViolation> {
        self.violations.iter().filter(|v| v.is_disagreement())
    }
}

impl IntoIterator for LinkViolations {
    type Item = LinkViolation;
    type IntoIter = std::vec::IntoIter<LinkViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a LinkViolations {
    type Item = &'a LinkViolation;
    type IntoIter = std::slice::Iter<'a, LinkViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}
