//! Root-cause tracing over edited diagrams.

use cdg_core::{Edge, Node, NodeId};
use cdg_graph::Graph;
use cdg_trace::{CausalTracer, PathEnd, TraceConfig, TraceError};
use cdg_tests::prelude::*;
use pretty_assertions::assert_eq;

mod fishbone {
    use super::*;

    // Two branches meet at the pump; one branch has a feedback loop.
    pub fn scenario() -> Scenario {
        Scenario::new("fishbone")
            .step("power", Op::node("power", "Power dip"), |a| a)
            .step("motor", Op::node("motor", "Motor stalls"), |a| a)
            .step("wear", Op::node("wear", "Impeller wear"), |a| a)
            .step("heat", Op::node("heat", "Overheating"), |a| a)
            .step("pump", Op::node("pump", "Pump fails"), |a| a)
            .step("l1", Op::link("power", "motor"), |a| a)
            .step("l2", Op::link("motor", "pump"), |a| a)
            .step("l3", Op::link("wear", "heat"), |a| a)
            .step("l4", Op::link("heat", "pump"), |a| a)
            .step("l5", Op::link("pump", "heat"), |a| a)
            .step("trace", Op::trace("pump"), |a| {
                a.roots(&["power", "wear"])
                    .paths(2)
                    .truncated(false)
                    .highlighted(&["power", "motor", "wear", "heat", "pump"])
            })
            .step("cut_wear", Op::unlink("wear", "heat"), |a| {
                a.assert_fn(|editor| editor.last_trace().is_none())
            })
            .step("retrace", Op::trace("pump"), |a| a.roots(&["power"]).paths(1))
            .step("trace_loop", Op::trace("heat"), |a| a.roots(&["power"]).paths(1))
    }

    #[test]
    fn test_root_causes_across_branches_and_loops() {
        scenario().run().unwrap();
    }
}

mod isolated_and_removed {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("isolated_and_removed")
            .step("alone", Op::node("alone", "Isolated"), |a| a)
            .step("trace", Op::trace("alone"), |a| a.roots(&[]).paths(1))
            .step("remove", Op::remove(&["alone"]), |a| a.nodes(0))
            .step("trace_removed", Op::trace("alone"), |a| a.error("not found"))
    }

    #[test]
    fn test_isolated_target_has_no_root_causes() {
        scenario().run().unwrap();
    }
}

mod bounded {
    use super::*;

    pub fn scenario() -> Scenario {
        let config = EditorConfig {
            trace: TraceConfig::new(2, 32),
            ..EditorConfig::default()
        };
        Scenario::new("bounded")
            .config(config)
            .step("a", Op::node("a", "A"), |a| a)
            .step("b", Op::node("b", "B"), |a| a)
            .step("c", Op::node("c", "C"), |a| a)
            .step("t", Op::node("t", "Target"), |a| a)
            .step("at", Op::link("a", "t"), |a| a)
            .step("bt", Op::link("b", "t"), |a| a)
            .step("ct", Op::link("c", "t"), |a| a)
            .step("trace", Op::trace("t"), |a| a.paths(2).truncated(true).roots(&["a", "b"]))
    }

    #[test]
    fn test_path_limit_truncates() {
        scenario().run().unwrap();
    }
}

fn chain(len: usize) -> (Graph, Vec<NodeId>) {
    let nodes: Vec<Node> = (0..len).map(|i| Node::new(format!("n{}", i))).collect();
    let ids: Vec<NodeId> = nodes.iter().map(|n| n.id).collect();
    let edges = ids.windows(2).map(|w| Edge::new(w[0], w[1])).collect();
    (Graph::from_parts(nodes, edges, vec![]), ids)
}

#[test]
fn test_depth_limit_reports_frontier() {
    // GIVEN: a chain of 10 nodes
    let (graph, ids) = chain(10);
    let target = ids[9];

    // WHEN: tracing with a depth bound of 4 edges
    let trace = CausalTracer::new(&graph)
        .trace(target, &TraceConfig::new(10, 4))
        .unwrap();

    // THEN: one path cut at depth 4, no root causes, its head is the frontier
    assert_eq!(trace.paths.len(), 1);
    assert_eq!(trace.paths[0].end, PathEnd::DepthLimit);
    assert_eq!(trace.paths[0].nodes, ids[5..].to_vec());
    assert!(trace.root_causes().is_empty());
    assert_eq!(trace.frontier()[0].node, ids[5]);
}

#[test]
fn test_back_edges_do_not_repeat_nodes() {
    // GIVEN: a chain with back edges from every node to the start, fed by one source
    let (mut graph, ids) = chain(6);
    for &id in &ids[1..] {
        graph.insert_edge(Edge::new(id, ids[0])).unwrap();
    }
    let source = Node::new("source");
    let source_id = source.id;
    graph.insert_node(source).unwrap();
    graph.insert_edge(Edge::new(source_id, ids[0])).unwrap();

    // WHEN
    let trace = CausalTracer::new(&graph)
        .trace(ids[5], &TraceConfig::default())
        .unwrap();

    // THEN: the loops add nothing; the one simple chain runs from the source
    assert_eq!(trace.paths.len(), 1);
    let path = &trace.paths[0];
    assert_eq!(path.head(), source_id);
    assert_eq!(path.nodes.last(), Some(&ids[5]));
    assert_eq!(path.len(), 6);
    assert_eq!(trace.root_causes()[0].node, source_id);
}

#[test]
fn test_zero_path_limit_rejected() {
    let (graph, ids) = chain(2);
    let result = CausalTracer::new(&graph).trace(ids[1], &TraceConfig::new(0, 4));
    assert!(matches!(result, Err(TraceError::InvalidBounds { .. })));
}
