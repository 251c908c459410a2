//! Update functions for the Elm-style architecture
//!
//! Tree algorithms (repair, drop) work on a bare [`DockNode`] and an event
//! queue; the message handlers apply them to a [`DockLayoutRoot`].
//!
//! [`DockNode`]: crate::model::DockNode

mod drag;
pub mod drop;
mod layout;
pub mod repair;
mod tool;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::DockLayoutRoot;

#[cfg(debug_assertions)]
use crate::messages::DragMsg;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use drag::update_drag;
pub use drop::{drop_tool, DropOutcome};
pub use layout::update_layout;
pub use repair::{find_degenerate, normalize, repair, RepairReport, RepairStep};
pub use tool::update_tool;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update<C>(root: &mut DockLayoutRoot<C>, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(root, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(root, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner<C>(root: &mut DockLayoutRoot<C>, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Drag(m) => drag::update_drag(root, m),
        Msg::Tool(m) => tool::update_tool(root, m),
        Msg::Layout(m) => layout::update_layout(root, m),
    }
}

#[cfg(debug_assertions)]
fn update_traced<C>(root: &mut DockLayoutRoot<C>, msg: Msg) -> Option<Cmd> {
    // Pointer moves arrive at frame rate
    let is_noisy = matches!(&msg, Msg::Drag(DragMsg::Move { .. } | DragMsg::Over { .. }));

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let before = root.root().node_count();
    let result = update_inner(root, msg);
    let after = root.root().node_count();
    if before != after {
        debug!(target: "layout", before, after, "node count changed");
    }

    result
}

/// Get a display name for a message type
///
/// Uses Debug formatting to include variant names and arguments.
/// Example outputs:
/// - `Tool::Select(ToolKey(3))`
/// - `Layout::Normalize`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Drag(m) => format!("Drag::{:?}", m),
        Msg::Tool(m) => format!("Tool::{:?}", m),
        Msg::Layout(m) => format!("Layout::{:?}", m),
    }
}
