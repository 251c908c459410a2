//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use dockyard::model::{
    DockHostRoot, DockLayoutRoot, DockNode, NodeKey, Orientation, SplitNode, TabNode, Tool,
    ToolKey,
};

/// Tab group with the given id holding one tool per id, first one selected
pub fn tab(id: &str, tools: &[&str]) -> DockNode<u32> {
    let mut group = TabNode::new().with_id(id);
    let mut first = None;
    for tool_id in tools {
        let tool = Tool::with_id(*tool_id).with_header(tool_id.to_uppercase());
        first.get_or_insert(tool.key());
        group = group.with_tool(tool);
    }
    if let Some(key) = first {
        group = group.with_selection(key);
    }
    group.into()
}

pub fn hsplit(id: &str, children: Vec<DockNode<u32>>) -> DockNode<u32> {
    SplitNode::new(Orientation::Horizontal)
        .with_id(id)
        .with_children(children)
        .into()
}

pub fn vsplit(id: &str, children: Vec<DockNode<u32>>) -> DockNode<u32> {
    SplitNode::new(Orientation::Vertical)
        .with_id(id)
        .with_children(children)
        .into()
}

/// Layout root over `root(H)[ left[a, b], right[c] ]`
pub fn two_panel_root() -> DockLayoutRoot<u32> {
    let tree = hsplit(
        "root",
        vec![tab("left", &["a", "b"]), tab("right", &["c"])],
    );
    DockLayoutRoot::from_host(DockHostRoot::new(tree))
}

pub fn tool_key<C>(root: &DockNode<C>, id: &str) -> ToolKey {
    root.find_tool(id)
        .map(Tool::key)
        .unwrap_or_else(|| panic!("no tool '{}'", id))
}

pub fn node_key<C>(root: &DockNode<C>, id: &str) -> NodeKey {
    root.find_node(id)
        .map(DockNode::key)
        .unwrap_or_else(|| panic!("no node '{}'", id))
}

/// Ids of a split's direct children
pub fn child_ids<C>(node: &DockNode<C>) -> Vec<Option<String>> {
    node.as_split()
        .map(|split| {
            split
                .children()
                .iter()
                .map(|c| c.id().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Tool ids of a tab group, in tab order
pub fn tool_ids<C>(node: &DockNode<C>) -> Vec<String> {
    node.as_tab()
        .map(|tab| tab.tabs().iter().map(|t| t.id().to_string()).collect())
        .unwrap_or_default()
}

/// Reachable non-root nodes that repair would act on
pub fn degenerate_count<C>(root: &DockNode<C>) -> usize {
    let mut count = 0;
    root.visit(&mut |node| {
        if node.key() != root.key() && node.is_degenerate() {
            count += 1;
        }
    });
    count
}

/// Ids of every reachable tool with `is_pinned == false`, sorted
pub fn unpinned_in_tree<C>(root: &DockNode<C>) -> Vec<String> {
    let mut ids: Vec<String> = root
        .tools()
        .into_iter()
        .filter(|t| !t.is_pinned())
        .map(|t| t.id().to_string())
        .collect();
    ids.sort();
    ids
}

pub fn unpinned_in_host<C>(host: &DockHostRoot<C>) -> Vec<String> {
    let mut ids: Vec<String> = host
        .unpinned_tabs()
        .into_iter()
        .map(|t| t.id().to_string())
        .collect();
    ids.sort();
    ids
}
