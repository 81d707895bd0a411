//! Output formatting utilities for the REPL.

use cdg_constraint::LinkViolations;
use cdg_core::{Edge, ForbiddenRule, Node, NodeId};
use cdg_session::Editor;
use cdg_trace::{PathEnd, Trace};
use std::collections::HashMap;

/// Display name for a node: its alias if bound, else its title.
pub fn node_label(editor: &Editor, aliases: &HashMap<NodeId, String>, id: NodeId) -> String {
    if let Some(alias) = aliases.get(&id) {
        return alias.clone();
    }
    match editor.graph().node(id) {
        Some(node) if !node.title.is_empty() => format!("\"{}\"", node.title),
        _ => id.to_string(),
    }
}

/// One summary line per node.
pub fn format_node_line(node: &Node, label: &str, highlighted: bool) -> String {
    format!(
        "{}{} {} [{} {}] at ({}, {}) rpn={}",
        if highlighted { "* " } else { "  " },
        label,
        node.title,
        node.category,
        node.color,
        node.x,
        node.y,
        node.rpn()
    )
}

/// Full node details.
pub fn format_node_details(node: &Node) -> String {
    let mut lines = vec![
        format!("id:            {}", node.id),
        format!("title:         {}", node.title),
    ];
    if !node.description.is_empty() {
        lines.push(format!("description:   {}", node.description));
    }
    lines.extend([
        format!("category:      {}", node.category),
        format!("color:         {}", node.color),
        format!("position:      ({}, {})", node.x, node.y),
        format!("weight:        {}", node.weight),
        format!(
            "S/O/D:         {}/{}/{}",
            node.severity, node.occurrence, node.detectability
        ),
        format!("rpn:           {}", node.rpn()),
    ]);
    lines.join("\n")
}

pub fn format_edge_line(edge: &Edge, from: &str, to: &str, highlighted: bool) -> String {
    format!(
        "{}{} -> {}{}",
        if highlighted { "* " } else { "  " },
        from,
        to,
        if edge.forbidden { "  (forbidden)" } else { "" }
    )
}

pub fn format_rules(rules: &[ForbiddenRule]) -> String {
    if rules.is_empty() {
        return "No forbidden rules".to_string();
    }
    rules
        .iter()
        .enumerate()
        .map(|(i, rule)| format!("{:>3}. {}", i, rule))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Paths, root causes and truncation notice for a trace.
pub fn format_trace(trace: &Trace, label: impl Fn(NodeId) -> String) -> String {
    let mut out = Vec::new();

    if trace.paths.is_empty() {
        out.push("No causal paths (target only reachable through cycles)".to_string());
    }
    for path in &trace.paths {
        let chain: Vec<_> = path.nodes.iter().map(|&id| label(id)).collect();
        let suffix = match path.end {
            PathEnd::Source => "",
            PathEnd::DepthLimit => "  (depth limit)",
        };
        out.push(format!("  {}{}", chain.join(" -> "), suffix));
    }

    out.push(format_root_causes(trace, &label));

    let frontier = trace.frontier();
    if !frontier.is_empty() {
        let names: Vec<_> = frontier.iter().map(|f| label(f.node)).collect();
        out.push(format!("Unexplored beyond depth limit: {}", names.join(", ")));
    }
    if trace.truncated {
        out.push("(truncated: path or work limit reached)".to_string());
    }
    out.join("\n")
}

pub fn format_root_causes(trace: &Trace, label: impl Fn(NodeId) -> String) -> String {
    let roots = trace.root_causes();
    if roots.is_empty() {
        return "Root causes: none".to_string();
    }
    let items: Vec<_> = roots
        .iter()
        .map(|r| format!("{} (distance {}, {} path(s))", label(r.node), r.shortest, r.paths))
        .collect();
    format!("Root causes: {}", items.join(", "))
}

pub fn format_audit(findings: &LinkViolations, label: impl Fn(NodeId) -> String) -> String {
    if findings.is_empty() {
        return "All edges agree with the current rules".to_string();
    }
    findings
        .iter()
        .map(|v| {
            format!(
                "  {:?}: {} -> {}: {}",
                v.finding,
                label(v.from),
                label(v.to),
                v.message()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print help information.
pub fn print_help() {
    println!("CDG REPL Commands:");
    println!("  node <alias> <title> [x=<n>] [y=<n>] [category=<c>] [color=<c>]");
    println!("                          Add a node and bind it to <alias>");
    println!("  link <a> <b>            Link cause <a> to effect <b>");
    println!("  link! <a> <b>           Link even if a forbidden rule matches");
    println!("  unlink <a> <b>          Remove the link from <a> to <b>");
    println!("  rm <a> [<b> ...]        Remove nodes and their links");
    println!("  move <a> <x> <y>        Move a node");
    println!("  set <a> <key>=<value>   Edit title, description, weight, severity,");
    println!("                          occurrence, detectability, category, color");
    println!("  paint <a> <color>       Change a node's color");
    println!("  trace <a>               Enumerate causal paths ending at <a>");
    println!("  roots <a>               Root causes of <a> only");
    println!("  untrace                 Clear trace highlighting");
    println!("  undo, redo              Step through history");
    println!("  list                    List nodes and links (* = highlighted)");
    println!("  show <a>                Show node details");
    println!("  copy <a> [<b> ...]      Copy nodes and the links between them");
    println!("  paste                   Paste the last copy with fresh ids");
    println!();
    println!("Rules:");
    println!("  rules                   List forbidden rules");
    println!("  rule add <from> <to> [reason]");
    println!("  rule rm <index>");
    println!("  audit                   Compare link flags with current rules");
    println!();
    println!("Files:");
    println!("  new                     Start an empty diagram");
    println!("  open <path>             Open a diagram");
    println!("  save [path]             Save the diagram");
    println!();
    println!("  help, \\h               Show this help");
    println!("  quit, \\q               Exit");
    println!();
    println!("Nodes are referred to by alias, id, or unique title.");
}
