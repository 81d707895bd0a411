//! CDG Constraint
//!
//! Category-pair rules that forbid (or flag) causal links.
//!
//! Responsibilities:
//! - Decide whether a prospective link matches a forbidden rule
//! - Describe the match as a violation the interaction layer can act on
//! - Audit stored edges against the current rule list (read-only)
//!
//! A match is advisory. The caller decides whether to block or proceed;
//! a created edge records the match in its `forbidden` flag.

mod engine;
mod violation;

pub use engine::{audit, check_link, is_forbidden};
pub use violation::{AuditFinding, LinkViolation, LinkViolations, RuleMatch};
