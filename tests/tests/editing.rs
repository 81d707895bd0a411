//! Editing scenarios: building, removing and restoring diagrams.

use cdg_tests::prelude::*;

mod build_and_undo {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("build_and_undo")
            .step("add_bearing", Op::node("bearing", "Worn bearing"), |a| {
                a.nodes(1).can_undo(true).can_redo(false)
            })
            .step("add_pump", Op::node("pump", "Pump stops"), |a| a.nodes(2))
            .step("link", Op::link("bearing", "pump"), |a| a.edges(1))
            .step("undo_link", Op::Undo, |a| a.undone().edges(0).can_redo(true))
            .step("undo_pump", Op::Undo, |a| a.undone().nodes(1))
            .step("redo_pump", Op::Redo, |a| a.redone().nodes(2))
            .step("redo_link", Op::Redo, |a| a.redone().edges(1).can_redo(false))
            .step("redo_empty", Op::Redo, |a| a.nothing_to_redo().edges(1))
    }

    #[test]
    fn test_build_then_step_through_history() {
        scenario().run().unwrap();
    }
}

mod remove_restores_links {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("remove_restores_links")
            .step("a", Op::node("a", "Seal wear"), |a| a)
            .step("b", Op::node("b", "Leak"), |a| a)
            .step("c", Op::node("c", "Low pressure"), |a| a)
            .step("ab", Op::link("a", "b"), |a| a)
            .step("bc", Op::link("b", "c"), |a| a)
            .step("remove_middle", Op::remove(&["b"]), |a| a.nodes(2).edges(0))
            .step("undo_remove", Op::Undo, |a| {
                a.undone().nodes(3).edges(2).assert_fn(|editor| {
                    let graph = editor.graph();
                    graph.nodes()[1].title == "Leak" && graph.edges()[0].to == graph.nodes()[1].id
                })
            })
            .step("trace_restored", Op::trace("c"), |a| a.roots(&["a"]).paths(1))
    }

    #[test]
    fn test_remove_node_undo_restores_position_and_links() {
        scenario().run().unwrap();
    }
}

mod new_command_clears_redo {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("new_command_clears_redo")
            .step("a", Op::node("a", "A"), |a| a)
            .step("b", Op::node("b", "B"), |a| a)
            .step("undo", Op::Undo, |a| a.can_redo(true))
            .step("c", Op::node("c", "C"), |a| a.nodes(2).can_redo(false))
            .step("redo", Op::Redo, |a| a.nothing_to_redo().nodes(2))
    }

    #[test]
    fn test_executing_after_undo_discards_redo() {
        scenario().run().unwrap();
    }
}

mod edits_and_errors {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("edits_and_errors")
            .step("a", Op::node("a", "Corrosion"), |a| a)
            .step("b", Op::node("b", "Crack"), |a| a)
            .step("rate", Op::rate("a", 7, 4, 15), |a| {
                a.assert_fn(|editor| editor.graph().nodes()[0].rpn() == 280)
            })
            .step("paint", Op::paint("a", NodeColor::Red), |a| {
                a.assert_fn(|editor| editor.graph().nodes()[0].color == NodeColor::Red)
            })
            .step("move", Op::move_to("b", 41.0, 59.0), |a| {
                // default canvas snaps to a 20 unit grid
                a.assert_fn(|editor| {
                    let node = &editor.graph().nodes()[1];
                    (node.x, node.y) == (40.0, 60.0)
                })
            })
            .step("self_link", Op::link("a", "a"), |a| a.error("itself"))
            .step("unlink_missing", Op::unlink("a", "b"), |a| a.error("no such link"))
            .step("remove_a", Op::remove(&["a"]), |a| a.nodes(1))
            .step("paint_removed", Op::paint("a", NodeColor::Green), |a| {
                a.error_matches("(?i)not found")
            })
            .step("undo_remove", Op::Undo, |a| a.undone().nodes(2))
            .step("undo_move", Op::Undo, |a| {
                a.undone()
                    .assert_fn(|editor| (editor.graph().nodes()[1].x, editor.graph().nodes()[1].y) == (0.0, 0.0))
            })
            .step("undo_paint", Op::Undo, |a| {
                a.undone()
                    .assert_fn(|editor| editor.graph().nodes()[0].color == NodeColor::Green)
            })
            .step("undo_rate", Op::Undo, |a| {
                a.undone().assert_fn(|editor| editor.graph().nodes()[0].rpn() == 1)
            })
    }

    #[test]
    fn test_property_edits_and_refusals() {
        scenario().run().unwrap();
    }
}

mod copy_paste {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("copy_paste")
            .step("a", Op::node("a", "Valve sticks"), |a| a)
            .step("b", Op::node("b", "Overflow"), |a| a)
            .step("c", Op::node("c", "Alarm"), |a| a)
            .step("ab", Op::link("a", "b"), |a| a)
            .step("bc", Op::link("b", "c"), |a| a)
            .step("copy", Op::copy(&["a", "b"]), |a| a.nodes(3).can_redo(false))
            .step("paste", Op::Paste, |a| {
                a.nodes(5).edges(3).assert_fn(|editor| {
                    let graph = editor.graph();
                    graph.nodes_titled("Valve sticks").count() == 2
                        && graph.nodes()[3].id != graph.nodes()[0].id
                })
            })
            .step("undo_pasted_edge", Op::Undo, |a| a.edges(2).nodes(5))
            .step("undo_pasted_b", Op::Undo, |a| a.nodes(4))
            .step("undo_pasted_a", Op::Undo, |a| a.nodes(3))
    }

    #[test]
    fn test_paste_duplicates_internal_links_only() {
        scenario().run().unwrap();
    }
}

#[test]
fn test_unknown_name_is_a_scenario_error() {
    let err = Scenario::new("typo")
        .step("a", Op::node("a", "A"), |a| a)
        .step("link", Op::link("a", "z"), |a| a)
        .run()
        .unwrap_err();
    assert!(matches!(err, ScenarioError::UnknownName { .. }));
}

#[test]
fn test_failed_assertion_is_reported() {
    let err = Scenario::new("wrong_count")
        .step("a", Op::node("a", "A"), |a| a.nodes(2))
        .run()
        .unwrap_err();
    assert!(matches!(err, ScenarioError::AssertionFailed { .. }));
}
