//! Tests for structural repair and drag-drop on whole layouts

mod common;

use common::{
    child_ids, degenerate_count, hsplit, node_key, tab, tool_ids, tool_key, two_panel_root,
    vsplit,
};
use dockyard::geometry::{DropZone, Point, Rect};
use dockyard::messages::{DragMsg, LayoutMsg, Msg, ToolMsg};
use dockyard::model::{DockHostRoot, DockLayoutRoot, DockNode, EventQueue, Orientation};
use dockyard::update::{drop_tool, find_degenerate, normalize, repair, update, DropOutcome};
use dockyard::Cmd;

// ============================================================================
// Structural Repair
// ============================================================================

#[test]
fn test_repair_collapses_chain_of_single_child_splits() {
    // root(H)[ x[1], a(V)[ b(H)[ c(V)[ t[2], empty ] ] ] ]
    let mut root = hsplit(
        "root",
        vec![
            tab("x", &["1"]),
            vsplit("a", vec![hsplit("b", vec![vsplit("c", vec![tab("t", &["2"]), tab("empty", &[])])])]),
        ],
    );
    let start = node_key(&root, "empty");

    let report = repair(&mut root, Some(start), &mut EventQueue::new());
    // empty tab, then c, b and a promoted in turn
    assert_eq!(report.steps.len(), 4);
    assert_eq!(child_ids(&root), vec![Some("x".into()), Some("t".into())]);
    assert_eq!(degenerate_count(&root), 0);
}

#[test]
fn test_repair_terminates_on_every_start_node() {
    let build = || {
        hsplit(
            "root",
            vec![
                tab("e1", &[]),
                vsplit("s", vec![hsplit("s2", vec![]), tab("a", &["1"])]),
                vsplit("s3", vec![tab("e2", &[])]),
                tab("b", &["2"]),
            ],
        )
    };
    for id in ["root", "e1", "s", "s2", "a", "s3", "e2", "b"] {
        let mut root = build();
        let start = node_key(&root, id);
        repair(&mut root, Some(start), &mut EventQueue::new());
        // A single walk may leave other branches degenerate; normalize never does
        normalize(&mut root, &mut EventQueue::new());
        assert!(find_degenerate(&root).is_none(), "start at {}", id);
    }
}

#[test]
fn test_normalize_message_repairs_loaded_tree() {
    let tree = hsplit(
        "root",
        vec![tab("left", &["a"]), vsplit("col", vec![tab("right", &["b"])])],
    );
    let mut root = DockLayoutRoot::from_host(DockHostRoot::new(tree));

    let cmd = update(&mut root, Msg::Layout(LayoutMsg::Normalize));
    assert_eq!(cmd, Some(Cmd::Redraw));
    assert_eq!(
        child_ids(root.root()),
        vec![Some("left".into()), Some("right".into())]
    );
    assert_eq!(degenerate_count(root.root()), 0);
}

/// A key that was never part of any tree
fn node_key_missing() -> dockyard::model::NodeKey {
    let node: DockNode<u32> = tab("scratch", &[]);
    node.key()
}

// ============================================================================
// Drag-Drop Reducer
// ============================================================================

#[test]
fn test_drop_left_in_horizontal_parent_inserts_before_target() {
    let mut root = two_panel_root();
    let tool = tool_key(root.root(), "a");
    let target = node_key(root.root(), "right");

    let outcome = root.drop_tool(tool, target, DropZone::Left).unwrap();
    assert_eq!(outcome, DropOutcome::Inserted);

    let split = root.root().as_split().unwrap();
    assert_eq!(split.len(), 3);
    assert_eq!(tool_ids(&split.children()[1]), vec!["a"]);
    assert_eq!(split.children()[2].key(), target);
    // No nested split
    assert!(split.children().iter().all(DockNode::is_tab));
}

#[test]
fn test_drop_right_in_horizontal_parent_inserts_after_target() {
    let mut root = two_panel_root();
    let tool = tool_key(root.root(), "a");
    let target = node_key(root.root(), "left");

    root.drop_tool(tool, target, DropZone::Right).unwrap();

    let split = root.root().as_split().unwrap();
    assert_eq!(split.children()[0].key(), target);
    assert_eq!(tool_ids(&split.children()[0]), vec!["b"]);
    assert_eq!(tool_ids(&split.children()[1]), vec!["a"]);
}

#[test]
fn test_drop_top_nests_new_group_before_target() {
    let mut root = two_panel_root();
    let tool = tool_key(root.root(), "a");
    let target = node_key(root.root(), "right");

    let outcome = root.drop_tool(tool, target, DropZone::Top).unwrap();
    assert_eq!(outcome, DropOutcome::Nested);

    let split = root.root().as_split().unwrap();
    assert_eq!(split.len(), 2);
    let nested = split.children()[1].as_split().unwrap();
    assert_eq!(nested.orientation(), Orientation::Vertical);
    assert_eq!(nested.len(), 2);
    assert_eq!(tool_ids(&nested.children()[0]), vec!["a"]);
    assert_eq!(nested.children()[1].key(), target);
}

#[test]
fn test_moving_last_tool_out_removes_its_group() {
    let mut root = two_panel_root();
    let tool = tool_key(root.root(), "c");
    let left = node_key(root.root(), "left");
    let right = node_key(root.root(), "right");

    let outcome = root.drop_tool(tool, left, DropZone::Center).unwrap();
    assert_eq!(outcome, DropOutcome::Moved);
    assert!(root.root().node(right).is_none());
    assert!(!root.host().is_node_hooked(right));
    assert_eq!(tool_ids(&root.root().as_split().unwrap().children()[0]), vec!["a", "b", "c"]);
    assert!(root.host().is_tool_hooked(tool));
}

#[test]
fn test_edge_drop_nests_inside_vertical_column() {
    // root(H)[ left[a], col(V)[ mid[b], bottom[c] ] ], drop a on the right of mid
    let tree = hsplit(
        "root",
        vec![
            tab("left", &["a"]),
            vsplit("col", vec![tab("mid", &["b"]), tab("bottom", &["c"])]),
        ],
    );
    let mut root = DockLayoutRoot::from_host(DockHostRoot::new(tree));
    let tool = tool_key(root.root(), "a");
    let mid = node_key(root.root(), "mid");

    let outcome = root.drop_tool(tool, mid, DropZone::Right).unwrap();
    assert_eq!(outcome, DropOutcome::Nested);

    // left is gone; the root keeps its single child
    let split = root.root().as_split().unwrap();
    assert_eq!(split.len(), 1);
    let col = split.children()[0].as_split().unwrap();
    let row = col.children()[0].as_split().unwrap();
    assert_eq!(row.orientation(), Orientation::Horizontal);
    assert_eq!(row.children()[0].key(), mid);
    assert_eq!(tool_ids(&row.children()[1]), vec!["a"]);
}

#[test]
fn test_drop_rejects_stale_target_without_mutation() {
    let mut root = two_panel_root();
    let before = root.layout();
    let tool = tool_key(root.root(), "a");
    let stale = node_key_missing();

    let mut events = EventQueue::new();
    let mut tree = hsplit("copy", vec![tab("x", &["1"])]);
    let copy_tool = tool_key(&tree, "1");
    assert!(drop_tool(&mut tree, copy_tool, stale, DropZone::Left, &mut events).is_err());
    assert!(events.is_empty());

    assert!(root.drop_tool(tool, stale, DropZone::Center).is_err());
    assert_eq!(root.layout(), before);
}

// ============================================================================
// Drag Messages
// ============================================================================

#[test]
fn test_drag_over_bottom_edge_then_drop_nests() {
    let mut root = two_panel_root();
    let tool = tool_key(root.root(), "b");
    let target = node_key(root.root(), "right");
    let bounds = Rect::new(100.0, 0.0, 100.0, 200.0);

    update(&mut root, Msg::start_drag(tool));
    let cmd = update(&mut root, Msg::drag_over(target, bounds, Point::new(150.0, 190.0)));
    assert_eq!(cmd, Some(Cmd::Redraw));
    assert_eq!(
        root.drag().map(|d| d.adorner.zone()),
        Some(DropZone::Bottom)
    );
    assert_eq!(
        root.drag().and_then(|d| d.adorner.highlight_rect()),
        Some(Rect::new(100.0, 100.0, 100.0, 100.0))
    );

    update(&mut root, Msg::Drag(DragMsg::Drop));
    let nested = root.root().as_split().unwrap().children()[1].as_split().unwrap();
    assert_eq!(nested.children()[0].key(), target);
    assert_eq!(tool_ids(&nested.children()[1]), vec!["b"]);
}

#[test]
fn test_removing_tool_by_message_repairs_group() {
    let mut root = two_panel_root();
    let tool = tool_key(root.root(), "c");
    let right = node_key(root.root(), "right");

    assert_eq!(update(&mut root, Msg::Tool(ToolMsg::Remove(tool))), Some(Cmd::Redraw));
    assert!(root.root().node(right).is_none());
    assert!(root.root().tool(tool).is_none());
}
