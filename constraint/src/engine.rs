//! Rule matching.

use cdg_core::{ForbiddenRule, Node};
use cdg_graph::Graph;

use crate::violation::{AuditFinding, LinkViolation, LinkViolations};

/// Return the first rule forbidding `from -> to`, scanning in list order.
pub fn is_forbidden<'a>(
    from: &Node,
    to: &Node,
    rules: &'a [ForbiddenRule],
) -> Option<&'a ForbiddenRule> {
    rules
        .iter()
        .find(|rule| rule.matches(from.category, to.category))
}

/// Check a prospective link, describing the first matching rule.
pub fn check_link(from: &Node, to: &Node, rules: &[ForbiddenRule]) -> Option<LinkViolation> {
    let index = rules
        .iter()
        .position(|rule| rule.matches(from.category, to.category))?;
    Some(LinkViolation::new(index, rules[index].clone(), from.id, to.id))
}

/// Compare every stored edge against the graph's current rules.
///
/// Edge flags are never changed; the result only reports where the stored
/// flag and the current rules disagree or agree on a match. Edges with a
/// missing endpoint are skipped.
pub fn audit(graph: &Graph) -> LinkViolations {
    let mut findings = LinkViolations::new();

    for edge in graph.edges() {
        let (Some(from), Some(to)) = (graph.node(edge.from), graph.node(edge.to)) else {
            continue;
        };

        match (check_link(from, to, graph.rules()), edge.forbidden) {
            (Some(violation), true) => {
                findings.push(violation.with_edge(edge.id).with_finding(AuditFinding::Flagged))
            }
            (Some(violation), false) => {
                findings.push(violation.with_edge(edge.id).with_finding(AuditFinding::Unflagged))
            }
            (None, true) => findings.push(LinkViolation::lapsed(edge.id, from.id, to.id)),
            (None, false) => {}
        }
    }

    findings
}
