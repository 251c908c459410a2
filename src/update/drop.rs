//! Drag-drop reducer
//!
//! Applies the drop of one tool onto a tab group zone: merge into the group
//! (Center), or split the group's slot (edge zones). All preconditions are
//! checked before the first mutation, and structural repair runs on the
//! vacated source group afterwards.

use crate::error::DockError;
use crate::geometry::DropZone;
use crate::model::{
    DockNode, EventQueue, NodeKey, Orientation, SplitNode, TabNode, ToolKey,
};

use super::repair::repair;

/// What a drop did to the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Nothing changed
    Ignored,
    /// Tool moved into the target group
    Moved,
    /// New tab group inserted beside the target in its parent split
    Inserted,
    /// Target slot replaced by a new split holding the target and a new group
    Nested,
}

/// Split orientation that places a new group on the side `zone` names
fn orientation_for(zone: DropZone) -> Orientation {
    match zone {
        DropZone::Left | DropZone::Right => Orientation::Horizontal,
        _ => Orientation::Vertical,
    }
}

fn tab_mut<C>(root: &mut DockNode<C>, key: NodeKey) -> Result<&mut TabNode<C>, DockError> {
    match root.node_mut(key) {
        Some(DockNode::Tab(tab)) => Ok(tab),
        Some(DockNode::Split(_)) => Err(DockError::NotATabNode(key)),
        None => Err(DockError::NodeNotFound(key)),
    }
}

fn split_mut<C>(root: &mut DockNode<C>, key: NodeKey) -> Result<&mut SplitNode<C>, DockError> {
    root.node_mut(key)
        .and_then(DockNode::as_split_mut)
        .ok_or(DockError::NodeNotFound(key))
}

/// Drop `tool` onto `zone` of the tab group `target`.
pub fn drop_tool<C>(
    root: &mut DockNode<C>,
    tool: ToolKey,
    target: NodeKey,
    zone: DropZone,
    events: &mut EventQueue,
) -> Result<DropOutcome, DockError> {
    if zone == DropZone::None {
        return Ok(DropOutcome::Ignored);
    }
    let Some(source) = root.tab_of_tool(tool) else {
        tracing::debug!(%tool, "dragged tool is not in the layout, ignoring drop");
        return Ok(DropOutcome::Ignored);
    };
    if source == target && zone == DropZone::Center {
        return Ok(DropOutcome::Ignored);
    }
    match root.node(target) {
        None => return Err(DockError::NodeNotFound(target)),
        Some(node) if !node.is_tab() => return Err(DockError::NotATabNode(target)),
        Some(_) => {}
    }

    // Edge drops edit the target's parent, so find it before anything moves
    let parent = if zone.is_edge() {
        match root.parent_of(target) {
            Some(parent) => Some(parent.key()),
            None => {
                tracing::error!(%target, ?zone, "drop target has no parent split");
                return Err(DockError::Structure(format!(
                    "tab group {target} has no parent split"
                )));
            }
        }
    } else {
        None
    };

    let Some(moved) = tab_mut(root, source)?.remove_tool(tool, events) else {
        return Ok(DropOutcome::Ignored);
    };

    let outcome = match parent {
        None => {
            let group = tab_mut(root, target)?;
            group.push_tool(moved, events);
            group.select(Some(tool), events);
            DropOutcome::Moved
        }
        Some(parent_key) => {
            let needed = orientation_for(zone);
            let leading = zone.is_leading();
            let new_group: DockNode<C> = TabNode::new().with_tool(moved).with_selection(tool).into();

            let parent = split_mut(root, parent_key)?;
            let index = parent
                .position_of(target)
                .ok_or(DockError::NodeNotFound(target))?;

            if parent.orientation() == needed {
                parent.insert_beside(index, leading, new_group, events);
                DropOutcome::Inserted
            } else {
                parent.map_child(index, events, |target_node| {
                    let (first, second) = if leading {
                        (new_group, target_node)
                    } else {
                        (target_node, new_group)
                    };
                    SplitNode::new(needed)
                        .with_child(first)
                        .with_child(second)
                        .with_sizes(vec![0.5, 0.5])
                        .into()
                });
                DropOutcome::Nested
            }
        }
    };

    let report = repair(root, Some(source), events);
    tracing::debug!(%tool, %target, ?zone, ?outcome, repairs = report.steps.len(), "dropped tool");
    Ok(outcome)
}
