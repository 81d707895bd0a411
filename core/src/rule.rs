//! Forbidden-link rules.

use crate::NodeCategory;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Disallows (or flags) causal links from one node category to another.
/// Direction matters: `System -> Component` says nothing about the reverse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ForbiddenRule {
    pub from_category: NodeCategory,
    pub to_category: NodeCategory,
    #[serde(default)]
    pub reason: String,
}

impl ForbiddenRule {
    pub fn new(from: NodeCategory, to: NodeCategory, reason: impl Into<String>) -> Self {
        Self {
            from_category: from,
            to_category: to,
            reason: reason.into(),
        }
    }

    /// Returns true if this rule covers a link `from -> to`.
    pub fn matches(&self, from: NodeCategory, to: NodeCategory) -> bool {
        self.from_category == from && self.to_category == to
    }
}

impl fmt::Display for ForbiddenRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from_category, self.to_category)?;
        if !self.reason.is_empty() {
            write!(f, " ({})", self.reason)?;
        }
        Ok(())
    }
}
