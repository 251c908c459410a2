//! Structural repair
//!
//! Keeps the tree free of empty tab groups and splits with fewer than two
//! children. Repair walks upward from the node an edit touched, fixing one
//! level at a time, and stops at the first healthy node or at the root.

use crate::model::{DockNode, EventQueue, NodeKey, SplitNode};

/// One fix applied during a repair walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairStep {
    /// An empty tab group was removed from its parent split
    RemovedEmptyTab(NodeKey),
    /// A split with no children was removed from its parent split
    RemovedEmptySplit(NodeKey),
    /// A single-child split was replaced by its child in the parent's slot
    Promoted { split: NodeKey, child: NodeKey },
}

/// What a repair walk did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairReport {
    pub steps: Vec<RepairStep>,
    /// The last node the walk looked at
    pub stopped_at: Option<NodeKey>,
}

impl RepairReport {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    RemoveEmptyTab,
    RemoveEmptySplit,
    Promote(NodeKey),
}

fn rule_for<C>(node: &DockNode<C>) -> Option<Rule> {
    match node {
        DockNode::Tab(tab) if !tab.has_tabs() => Some(Rule::RemoveEmptyTab),
        DockNode::Split(split) => match split.children() {
            [] => Some(Rule::RemoveEmptySplit),
            [only] => Some(Rule::Promote(only.key())),
            _ => None,
        },
        DockNode::Tab(_) => None,
    }
}

/// Repair upward from `start`.
///
/// Each step looks up the parent from the root again, so the walk never
/// holds on to a node the previous step moved. A degenerate root is left
/// as it is.
pub fn repair<C>(
    root: &mut DockNode<C>,
    start: Option<NodeKey>,
    events: &mut EventQueue,
) -> RepairReport {
    let mut report = RepairReport::default();
    let mut current = start;

    while let Some(key) = current {
        report.stopped_at = Some(key);

        let Some(rule) = root.node(key).and_then(rule_for) else {
            break;
        };
        let Some(parent_key) = root.parent_of(key).map(SplitNode::key) else {
            tracing::debug!(%key, ?rule, "degenerate node has no parent, leaving it");
            break;
        };
        let Some(parent) = root.node_mut(parent_key).and_then(DockNode::as_split_mut) else {
            break;
        };
        let Some(index) = parent.position_of(key) else {
            break;
        };

        let step = match rule {
            Rule::RemoveEmptyTab => {
                parent.remove_child(index, events);
                RepairStep::RemovedEmptyTab(key)
            }
            Rule::RemoveEmptySplit => {
                parent.remove_child(index, events);
                RepairStep::RemovedEmptySplit(key)
            }
            Rule::Promote(child) => {
                parent.map_child(index, events, |node| match node {
                    DockNode::Split(split) if split.len() == 1 => {
                        split.into_children().swap_remove(0)
                    }
                    other => other,
                });
                RepairStep::Promoted { split: key, child }
            }
        };
        tracing::debug!(?step, parent = %parent_key, "repaired layout");
        report.steps.push(step);
        current = Some(parent_key);
    }

    report
}

/// Repair every degenerate node below the root until none is left
pub fn normalize<C>(root: &mut DockNode<C>, events: &mut EventQueue) -> RepairReport {
    let mut report = RepairReport::default();

    while let Some(key) = find_degenerate(root) {
        let pass = repair(root, Some(key), events);
        if pass.is_empty() {
            tracing::warn!(%key, "normalize could not repair node");
            break;
        }
        report.steps.extend(pass.steps);
        report.stopped_at = pass.stopped_at;
    }

    report
}

/// Deepest-first search for a degenerate non-root node
pub fn find_degenerate<C>(root: &DockNode<C>) -> Option<NodeKey> {
    fn search<C>(node: &DockNode<C>, is_root: bool) -> Option<NodeKey> {
        if let DockNode::Split(split) = node {
            if let Some(found) = split.children().iter().find_map(|c| search(c, false)) {
                return Some(found);
            }
        }
        (!is_root && node.is_degenerate()).then(|| node.key())
    }
    search(root, true)
}
