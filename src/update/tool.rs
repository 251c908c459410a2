//! Tool message handlers (selection, pin/close/hover flags)

use crate::commands::Cmd;
use crate::messages::ToolMsg;
use crate::model::{DockLayoutRoot, DockNode, EventQueue, Tool, ToolKey};

/// Handle tool messages
pub fn update_tool<C>(root: &mut DockLayoutRoot<C>, msg: ToolMsg) -> Option<Cmd> {
    match msg {
        ToolMsg::Select(key) => edit_changed(root, |node, events| {
            let Some(tab) = node.tab_of_tool(key) else {
                return;
            };
            if let Some(group) = node.node_mut(tab).and_then(DockNode::as_tab_mut) {
                group.select(Some(key), events);
            }
        }),

        ToolMsg::SetPinned(key, pinned) => edit_tool(root, key, |tool, events| {
            tool.set_pinned(pinned, events);
        }),

        ToolMsg::TogglePinned(key) => edit_tool(root, key, |tool, events| {
            if tool.can_pin() {
                tool.set_pinned(!tool.is_pinned(), events);
            }
        }),

        ToolMsg::ToggleClosed(key) => edit_tool(root, key, |tool, events| {
            if tool.can_close() {
                tool.set_closed(!tool.is_closed(), events);
            }
        }),

        ToolMsg::SetHovered(key, hovered) => edit_tool(root, key, |tool, events| {
            tool.set_hovered(hovered, events);
        }),

        ToolMsg::Remove(key) => {
            let removed = root.remove_tool(key);
            if removed.is_none() {
                tracing::debug!(%key, "remove requested for unknown tool");
            }
            Cmd::redraw_if(removed.is_some())
        }
    }
}

/// Run `f` inside a host edit; redraw if it emitted anything
fn edit_changed<C>(
    root: &mut DockLayoutRoot<C>,
    f: impl FnOnce(&mut DockNode<C>, &mut EventQueue),
) -> Option<Cmd> {
    let changed = root.edit(|node, events| {
        f(node, events);
        !events.is_empty()
    });
    Cmd::redraw_if(changed)
}

fn edit_tool<C>(
    root: &mut DockLayoutRoot<C>,
    key: ToolKey,
    f: impl FnOnce(&mut Tool<C>, &mut EventQueue),
) -> Option<Cmd> {
    edit_changed(root, |node, events| {
        if let Some(tool) = node.tool_mut(key) {
            f(tool, events);
        }
    })
}
