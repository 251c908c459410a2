//! Message types for the Elm-style architecture
//!
//! Everything a host application does to a dock area arrives as one of these
//! messages and is applied by [`crate::update::update`].

use crate::geometry::{Point, Rect};
use crate::model::{NodeKey, ToolKey};

/// Drag-and-drop of a tool between tab groups
#[derive(Debug, Clone, PartialEq)]
pub enum DragMsg {
    /// A tool tab was picked up
    Start { tool: ToolKey },
    /// Pointer entered (or is over) a tab group
    Over {
        target: NodeKey,
        bounds: Rect,
        pointer: Option<Point>,
    },
    /// Pointer moved within the current target
    Move { pointer: Point },
    /// Pointer left the current target
    Leave,
    /// Tool released over the current target
    Drop,
    /// Drag abandoned (escape, pointer left the window)
    Cancel,
}

/// Per-tool flag changes and removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolMsg {
    /// Make a tool the selected tab of its group
    Select(ToolKey),
    SetPinned(ToolKey, bool),
    /// Flip pinned, if the tool allows pinning
    TogglePinned(ToolKey),
    /// Flip closed, if the tool allows closing
    ToggleClosed(ToolKey),
    SetHovered(ToolKey, bool),
    /// Take the tool out of the layout
    Remove(ToolKey),
}

/// Tree-wide layout messages
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutMsg {
    /// Splitter moved: new weights for a split's children
    ResizeSplit { split: NodeKey, sizes: Vec<f64> },
    /// Repair every degenerate node below the root
    Normalize,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Drag-and-drop messages
    Drag(DragMsg),
    /// Tool messages (selection, flags)
    Tool(ToolMsg),
    /// Layout messages (sizes, repair)
    Layout(LayoutMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn start_drag(tool: ToolKey) -> Self {
        Msg::Drag(DragMsg::Start { tool })
    }

    pub fn drag_over(target: NodeKey, bounds: Rect, pointer: Point) -> Self {
        Msg::Drag(DragMsg::Over {
            target,
            bounds,
            pointer: Some(pointer),
        })
    }

    pub fn select_tool(tool: ToolKey) -> Self {
        Msg::Tool(ToolMsg::Select(tool))
    }
}
