//! Command execution.
//!
//! Each function parses the words after the command name, dispatches one
//! editor action, and renders the outcome.

use cdg_core::{EdgeId, ForbiddenRule, NodeCategory, NodeColor, NodeId, NodeProperties, Rating};
use cdg_document::Fragment;
use cdg_session::{Action, Editor, Outcome};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::format::{
    format_audit, format_edge_line, format_node_details, format_node_line, format_root_causes,
    format_rules, format_trace, node_label,
};
use crate::tokenize::key_value;

/// Alias name -> node id.
pub type Bindings = HashMap<String, NodeId>;

/// Resolve a node reference: alias, then id, then unique title.
pub fn resolve(editor: &Editor, bindings: &Bindings, reference: &str) -> Result<NodeId, String> {
    if let Some(&id) = bindings.get(reference) {
        return Ok(id);
    }
    if let Ok(id) = reference.parse::<NodeId>() {
        if editor.graph().contains_node(id) {
            return Ok(id);
        }
    }
    let mut titled = editor.graph().nodes_titled(reference);
    match (titled.next(), titled.next()) {
        (Some(node), None) => Ok(node.id),
        (Some(_), Some(_)) => Err(format!("Ambiguous title: {}", reference)),
        _ => Err(format!("Unknown node: {}", reference)),
    }
}

/// Reverse bindings for display. The alphabetically first alias wins.
pub fn aliases(bindings: &Bindings) -> HashMap<NodeId, String> {
    let mut reverse: HashMap<NodeId, String> = HashMap::new();
    for (alias, &id) in bindings {
        match reverse.get(&id) {
            Some(existing) if existing <= alias => {}
            _ => {
                reverse.insert(id, alias.clone());
            }
        }
    }
    reverse
}

fn dispatch(editor: &mut Editor, action: Action) -> Result<Outcome, String> {
    editor.dispatch(action).map_err(|e| e.to_string())
}

fn parse_number(key: &str, value: &str) -> Result<f32, String> {
    value
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("Invalid number for {}: {}", key, value))
}

fn parse_rating(key: &str, value: &str) -> Result<Rating, String> {
    value
        .parse::<i64>()
        .map(Rating::clamped)
        .map_err(|_| format!("Invalid rating for {}: {}", key, value))
}

fn expect_args(args: &[String], count: usize, usage: &str) -> Result<(), String> {
    if args.len() < count {
        return Err(format!("Usage: {}", usage));
    }
    Ok(())
}

// ==================== Document Edits ====================

pub fn execute_node(editor: &mut Editor, bindings: &mut Bindings, args: &[String]) -> Result<String, String> {
    expect_args(args, 2, "node <alias> <title> [x=<n>] [y=<n>] [category=<c>] [color=<c>]")?;
    let alias = &args[0];
    let mut x = 0.0;
    let mut y = 0.0;
    let mut category = NodeCategory::default();
    let mut color = NodeColor::default();

    for token in &args[2..] {
        let (key, value) = key_value(token).ok_or_else(|| format!("Expected key=value, got: {}", token))?;
        match key {
            "x" => x = parse_number(key, value)?,
            "y" => y = parse_number(key, value)?,
            "category" => category = value.parse().map_err(|e| format!("{}", e))?,
            "color" => color = value.parse().map_err(|e| format!("{}", e))?,
            _ => return Err(format!("Unknown node attribute: {}", key)),
        }
    }

    let outcome = dispatch(
        editor,
        Action::AddNode {
            title: args[1].clone(),
            x,
            y,
            category,
            color,
        },
    )?;
    match outcome {
        Outcome::NodeAdded(id) => {
            bindings.insert(alias.clone(), id);
            Ok(format!("Created {}", alias))
        }
        other => Ok(format!("{:?}", other)),
    }
}

pub fn execute_link(
    editor: &mut Editor,
    bindings: &Bindings,
    args: &[String],
    allow_forbidden: bool,
) -> Result<String, String> {
    expect_args(args, 2, "link <cause> <effect>")?;
    let from = resolve(editor, bindings, &args[0])?;
    let to = resolve(editor, bindings, &args[1])?;

    match dispatch(
        editor,
        Action::Connect {
            from,
            to,
            allow_forbidden,
        },
    )? {
        Outcome::EdgeAdded {
            violation: Some(violation),
            ..
        } => Ok(format!(
            "Linked {} -> {} (forbidden: {})",
            args[0],
            args[1],
            violation.message()
        )),
        Outcome::EdgeAdded { .. } => Ok(format!("Linked {} -> {}", args[0], args[1])),
        Outcome::LinkBlocked(violation) => Ok(format!(
            "Blocked: {}. Use link! to create it anyway.",
            violation.message()
        )),
        other => Ok(format!("{:?}", other)),
    }
}

pub fn execute_unlink(editor: &mut Editor, bindings: &Bindings, args: &[String]) -> Result<String, String> {
    let edge_id = match args {
        [single] => single
            .parse::<EdgeId>()
            .map_err(|_| "Usage: unlink <cause> <effect> | unlink <edge-id>".to_string())?,
        [from, to, ..] => {
            let from_id = resolve(editor, bindings, from)?;
            let to_id = resolve(editor, bindings, to)?;
            editor
                .graph()
                .edges_between(from_id, to_id)
                .next()
                .map(|e| e.id)
                .ok_or_else(|| format!("No link from {} to {}", from, to))?
        }
        [] => return Err("Usage: unlink <cause> <effect> | unlink <edge-id>".to_string()),
    };
    dispatch(editor, Action::RemoveEdge(edge_id))?;
    Ok("Unlinked".to_string())
}

pub fn execute_rm(editor: &mut Editor, bindings: &Bindings, args: &[String]) -> Result<String, String> {
    expect_args(args, 1, "rm <node> [<node> ...]")?;
    let ids = args
        .iter()
        .map(|r| resolve(editor, bindings, r))
        .collect::<Result<Vec<_>, _>>()?;

    match dispatch(editor, Action::RemoveNodes(ids))? {
        Outcome::NodesRemoved { nodes, edges } => {
            Ok(format!("Removed {} node(s), {} link(s)", nodes, edges))
        }
        other => Ok(format!("{:?}", other)),
    }
}

pub fn execute_move(editor: &mut Editor, bindings: &Bindings, args: &[String]) -> Result<String, String> {
    expect_args(args, 3, "move <node> <x> <y>")?;
    let id = resolve(editor, bindings, &args[0])?;
    let x = parse_number("x", &args[1])?;
    let y = parse_number("y", &args[2])?;
    dispatch(editor, Action::MoveNode { id, x, y })?;
    let node = editor.graph().node(id).ok_or("Node vanished")?;
    Ok(format!("Moved {} to ({}, {})", args[0], node.x, node.y))
}

pub fn execute_set(editor: &mut Editor, bindings: &Bindings, args: &[String]) -> Result<String, String> {
    expect_args(args, 2, "set <node> <key>=<value> ...")?;
    let id = resolve(editor, bindings, &args[0])?;
    let node = editor.graph().node(id).ok_or_else(|| format!("Unknown node: {}", args[0]))?;
    let mut properties = NodeProperties::of(node);

    for token in &args[1..] {
        let (key, value) = key_value(token).ok_or_else(|| format!("Expected key=value, got: {}", token))?;
        match key {
            "title" => properties.title = value.to_string(),
            "description" => properties.description = value.to_string(),
            "weight" => properties.weight = parse_number(key, value)?,
            "severity" => properties.severity = parse_rating(key, value)?,
            "occurrence" => properties.occurrence = parse_rating(key, value)?,
            "detectability" => properties.detectability = parse_rating(key, value)?,
            "category" => properties.category = value.parse().map_err(|e| format!("{}", e))?,
            "color" => properties.color = value.parse().map_err(|e| format!("{}", e))?,
            _ => return Err(format!("Unknown node attribute: {}", key)),
        }
    }

    dispatch(editor, Action::EditNode { id, properties })?;
    let rpn = editor.graph().node(id).map(|n| n.rpn()).unwrap_or_default();
    Ok(format!("Updated {} (rpn={})", args[0], rpn))
}

pub fn execute_paint(editor: &mut Editor, bindings: &Bindings, args: &[String]) -> Result<String, String> {
    expect_args(args, 2, "paint <node> <color>")?;
    let id = resolve(editor, bindings, &args[0])?;
    let color: NodeColor = args[1].parse().map_err(|e| format!("{}", e))?;
    dispatch(editor, Action::Paint { id, color })?;
    Ok(format!("Painted {} {}", args[0], color))
}

// ==================== Analysis ====================

pub fn execute_trace(
    editor: &mut Editor,
    bindings: &Bindings,
    args: &[String],
    roots_only: bool,
) -> Result<String, String> {
    expect_args(args, 1, "trace <node>")?;
    let target = resolve(editor, bindings, &args[0])?;
    let Outcome::Traced(trace) = dispatch(editor, Action::Trace { target })? else {
        return Err("Trace produced no result".to_string());
    };

    let editor: &Editor = editor;
    let names = aliases(bindings);
    let label = |id: NodeId| node_label(editor, &names, id);
    if roots_only {
        Ok(format_root_causes(&trace, label))
    } else {
        Ok(format_trace(&trace, label))
    }
}

pub fn execute_list(editor: &Editor, bindings: &Bindings) -> String {
    let names = aliases(bindings);
    let graph = editor.graph();
    let mut lines = vec![format!("Nodes ({}):", graph.node_count())];
    for node in graph.nodes() {
        let label = names
            .get(&node.id)
            .cloned()
            .unwrap_or_else(|| node.id.to_string());
        lines.push(format_node_line(node, &label, editor.is_highlighted_node(node.id)));
    }
    lines.push(format!("Links ({}):", graph.edge_count()));
    for edge in graph.edges() {
        lines.push(format_edge_line(
            edge,
            &node_label(editor, &names, edge.from),
            &node_label(editor, &names, edge.to),
            editor.is_highlighted_edge(edge.id),
        ));
    }
    lines.join("\n")
}

pub fn execute_show(editor: &Editor, bindings: &Bindings, args: &[String]) -> Result<String, String> {
    expect_args(args, 1, "show <node>")?;
    let id = resolve(editor, bindings, &args[0])?;
    let node = editor.graph().node(id).ok_or_else(|| format!("Unknown node: {}", args[0]))?;
    Ok(format_node_details(node))
}

pub fn execute_audit(editor: &Editor, bindings: &Bindings) -> String {
    let names = aliases(bindings);
    format_audit(&editor.audit(), |id| node_label(editor, &names, id))
}

// ==================== Copy and Paste ====================

/// Returns the clipboard text for the selection.
pub fn execute_copy(editor: &mut Editor, bindings: &Bindings, args: &[String]) -> Result<(String, String), String> {
    expect_args(args, 1, "copy <node> [<node> ...]")?;
    let ids = args
        .iter()
        .map(|r| resolve(editor, bindings, r))
        .collect::<Result<Vec<_>, _>>()?;
    let Outcome::Copied(fragment) = dispatch(editor, Action::Copy(ids))? else {
        return Err("Copy produced no fragment".to_string());
    };
    let text = fragment.to_json().map_err(|e| e.to_string())?;
    let message = format!(
        "Copied {} node(s), {} link(s)",
        fragment.nodes.len(),
        fragment.edges.len()
    );
    Ok((text, message))
}

pub fn execute_paste(editor: &mut Editor, clipboard: Option<&str>) -> Result<String, String> {
    let text = clipboard.ok_or("Clipboard is empty")?;
    let fragment = Fragment::from_json(text).map_err(|e| e.to_string())?;
    match dispatch(editor, Action::Paste(fragment))? {
        Outcome::Pasted { nodes, edges } => Ok(format!(
            "Pasted {} node(s), {} link(s)",
            nodes.len(),
            edges.len()
        )),
        other => Ok(format!("{:?}", other)),
    }
}

// ==================== Rules ====================

pub fn execute_rule(editor: &mut Editor, args: &[String]) -> Result<String, String> {
    match args.first().map(String::as_str) {
        Some("add") => {
            expect_args(args, 3, "rule add <from-category> <to-category> [reason]")?;
            let from: NodeCategory = args[1].parse().map_err(|e| format!("{}", e))?;
            let to: NodeCategory = args[2].parse().map_err(|e| format!("{}", e))?;
            let reason = args[3..].join(" ");
            dispatch(editor, Action::AddRule(ForbiddenRule::new(from, to, reason)))?;
            Ok(format!("Forbidden: {} -> {}", from, to))
        }
        Some("rm") => {
            expect_args(args, 2, "rule rm <index>")?;
            let index: usize = args[1]
                .parse()
                .map_err(|_| format!("Invalid rule index: {}", args[1]))?;
            dispatch(editor, Action::RemoveRule(index))?;
            Ok(format!("Removed rule {}", index))
        }
        Some("list") | None => Ok(format_rules(editor.rules())),
        Some(other) => Err(format!("Unknown rule command: {}", other)),
    }
}

// ==================== Files ====================

pub fn execute_open(editor: &mut Editor, bindings: &mut Bindings, args: &[String]) -> Result<String, String> {
    expect_args(args, 1, "open <path>")?;
    match dispatch(editor, Action::Open(PathBuf::from(&args[0])))? {
        Outcome::Opened { path, nodes, edges } => {
            bindings.clear();
            Ok(format!(
                "Opened {}: {} node(s), {} link(s)",
                path.display(),
                nodes,
                edges
            ))
        }
        other => Ok(format!("{:?}", other)),
    }
}

pub fn execute_save(editor: &mut Editor, args: &[String]) -> Result<String, String> {
    let path = args.first().map(PathBuf::from);
    match dispatch(editor, Action::Save(path))? {
        Outcome::Saved(path) => Ok(format!("Saved {}", path.display())),
        other => Ok(format!("{:?}", other)),
    }
}
