//! Live tree <-> persisted layout
//!
//! `build_layout` snapshots everything persistent about the live tree;
//! `build_view_model` rebuilds a fresh host root whose tools all carry a
//! [`ToolContext::Loading`] placeholder until the application re-attaches them.

use crate::error::DockError;
use crate::model::{DockHostRoot, DockNode, SplitNode, TabNode, Tool, ToolContext};

use super::{
    DockLayout, DockLayoutNode, DockLayoutSplit, DockLayoutTab, DockLayoutTool,
    CURRENT_MAJOR_VERSION, CURRENT_MINOR_VERSION,
};

/// Header for a restored tool whose layout entry had none
pub const LOADING_HEADER: &str = "Loading...";

/// Snapshot the host's tree as a versioned layout
pub fn build_layout<C>(host: &DockHostRoot<C>) -> DockLayout {
    DockLayout {
        major_version: CURRENT_MAJOR_VERSION,
        minor_version: CURRENT_MINOR_VERSION,
        root_node: Some(layout_node(host.root())),
    }
}

fn layout_node<C>(node: &DockNode<C>) -> DockLayoutNode {
    match node {
        DockNode::Split(split) => DockLayoutNode::Split(DockLayoutSplit {
            id: split.id().map(str::to_string),
            orientation: split.orientation(),
            children: split.children().iter().map(layout_node).collect(),
            sizes: split.sizes().to_vec(),
        }),
        DockNode::Tab(tab) => DockLayoutNode::Tab(DockLayoutTab {
            id: tab.id().map(str::to_string),
            selected_id: tab.selected().map(|t| t.id().to_string()),
            tools: tab.tabs().iter().map(layout_tool).collect(),
        }),
    }
}

fn layout_tool<C>(tool: &Tool<C>) -> DockLayoutTool {
    DockLayoutTool {
        id: tool.id().to_string(),
        header: Some(tool.header().to_string()),
        can_close: tool.can_close(),
        can_pin: tool.can_pin(),
        is_closed: tool.is_closed(),
        is_pinned: tool.is_pinned(),
        title: tool.title().map(str::to_string),
    }
}

/// Rebuild a live host root from a persisted layout.
///
/// Fails before building anything when the layout has no root node or was
/// written with an unsupported major version. The minor version is ignored.
pub fn build_view_model<C>(layout: &DockLayout) -> Result<DockHostRoot<C>, DockError> {
    let Some(root) = &layout.root_node else {
        return Err(DockError::MissingRootNode);
    };
    if layout.major_version != CURRENT_MAJOR_VERSION {
        return Err(DockError::UnsupportedVersion {
            major: layout.major_version,
            minor: layout.minor_version,
        });
    }

    let node = view_model_node(root);
    tracing::debug!(nodes = node.node_count(), "rebuilt layout tree");
    Ok(DockHostRoot::new(node))
}

fn view_model_node<C>(node: &DockLayoutNode) -> DockNode<C> {
    match node {
        DockLayoutNode::Split(split) => SplitNode::new(split.orientation)
            .with_optional_id(split.id.clone())
            .with_sizes(split.sizes.clone())
            .with_children(split.children.iter().map(view_model_node))
            .into(),
        DockLayoutNode::Tab(tab) => {
            let mut group = TabNode::new().with_optional_id(tab.id.clone());
            let mut selected = None;
            for entry in &tab.tools {
                let tool = view_model_tool(entry);
                if tab.selected_id.as_deref() == Some(entry.id.as_str()) {
                    selected = Some(tool.key());
                }
                group = group.with_tool(tool);
            }
            if let Some(key) = selected {
                group = group.with_selection(key);
            }
            group.into()
        }
    }
}

fn view_model_tool<C>(entry: &DockLayoutTool) -> Tool<C> {
    Tool::with_id(entry.id.clone())
        .with_header(entry.header.as_deref().unwrap_or(LOADING_HEADER))
        .with_title(entry.title.clone())
        .with_can_close(entry.can_close)
        .with_can_pin(entry.can_pin)
        .with_closed(entry.is_closed)
        .with_pinned(entry.is_pinned)
        .with_context(ToolContext::Loading)
}
