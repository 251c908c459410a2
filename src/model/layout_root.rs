//! Layout persistence root
//!
//! [`DockLayoutRoot`] is the application-facing owner of a dock area: the live
//! host root, the insert policy for new tools, the layout manager used to save
//! and load, and any drag in progress. Loading a layout merges the tools of
//! the outgoing tree into the incoming one by id, so application contexts
//! survive a layout switch and tools the layout doesn't know about are kept.

use std::collections::HashSet;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::DockConfig;
use crate::error::DockError;
use crate::geometry::DropZone;
use crate::layout::{build_layout, build_view_model, DockLayout, JsonLayoutManager, LayoutManager};
use crate::update::{drop_tool, normalize, repair, DropOutcome, RepairReport};

use super::drag::DragSession;
use super::events::EventQueue;
use super::host::DockHostRoot;
use super::node::{DockNode, NodeKey, Orientation, SplitNode, TabNode};
use super::tool::{Tool, ToolContext, ToolKey, DEFAULT_HEADER};

/// Where a new tool goes when its parent can't be found
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertPolicy {
    /// New tab group at the front of the root split
    CreateFirst,
    /// New tab group at the back of the root split
    #[default]
    CreateLast,
    /// Refuse with [`DockError::ParentNotFound`]
    Error,
}

/// Application-facing owner of a dock area
#[derive(Debug)]
pub struct DockLayoutRoot<C> {
    host: DockHostRoot<C>,
    insert_policy: InsertPolicy,
    layout_manager: Box<dyn LayoutManager>,
    drag: Option<DragSession>,
}

impl<C> Default for DockLayoutRoot<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> DockLayoutRoot<C> {
    /// Empty horizontal root split
    pub fn new() -> Self {
        Self::from_host(DockHostRoot::default())
    }

    /// Horizontal root split with one empty, named tab group per panel id
    pub fn with_panels<I, S>(panels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let split = SplitNode::new(Orientation::Horizontal)
            .with_children(panels.into_iter().map(|id| DockNode::Tab(TabNode::new().with_id(id))));
        Self::from_host(DockHostRoot::new(split.into()))
    }

    pub fn from_host(host: DockHostRoot<C>) -> Self {
        Self {
            host,
            insert_policy: InsertPolicy::default(),
            layout_manager: Box::new(JsonLayoutManager::default()),
            drag: None,
        }
    }

    /// Apply configured insert policy and JSON formatting
    pub fn from_config(config: &DockConfig) -> Self {
        let mut root = Self::new();
        root.insert_policy = config.insert_policy;
        root.layout_manager = Box::new(JsonLayoutManager::new(config.pretty_json));
        root
    }

    pub fn with_insert_policy(mut self, policy: InsertPolicy) -> Self {
        self.insert_policy = policy;
        self
    }

    pub fn host(&self) -> &DockHostRoot<C> {
        &self.host
    }

    pub fn root(&self) -> &DockNode<C> {
        self.host.root()
    }

    /// Mutate the live tree through the host root
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut DockNode<C>, &mut EventQueue) -> R) -> R {
        self.host.edit(f)
    }

    pub fn insert_policy(&self) -> InsertPolicy {
        self.insert_policy
    }

    pub fn set_insert_policy(&mut self, policy: InsertPolicy) {
        self.insert_policy = policy;
    }

    pub fn layout_manager(&self) -> &dyn LayoutManager {
        self.layout_manager.as_ref()
    }

    pub fn set_layout_manager(&mut self, manager: Box<dyn LayoutManager>) {
        self.layout_manager = manager;
    }

    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub(crate) fn drag_mut(&mut self) -> Option<&mut DragSession> {
        self.drag.as_mut()
    }

    pub(crate) fn set_drag(&mut self, drag: Option<DragSession>) -> Option<DragSession> {
        std::mem::replace(&mut self.drag, drag)
    }

    // ------------------------------------------------------------------------
    // Tree operations
    // ------------------------------------------------------------------------

    /// Drop a tool onto a zone of a tab group
    pub fn drop_tool(
        &mut self,
        tool: ToolKey,
        target: NodeKey,
        zone: DropZone,
    ) -> Result<DropOutcome, DockError> {
        self.host
            .edit(|root, events| drop_tool(root, tool, target, zone, events))
    }

    /// Take a tool out of the layout and repair its former group
    pub fn remove_tool(&mut self, key: ToolKey) -> Option<Tool<C>> {
        self.host.edit(|root, events| {
            let tab = root.tab_of_tool(key)?;
            let removed = root
                .node_mut(tab)
                .and_then(DockNode::as_tab_mut)
                .and_then(|group| group.remove_tool(key, events));
            repair(root, Some(tab), events);
            removed
        })
    }

    /// Repair every degenerate node below the root
    pub fn normalize(&mut self) -> RepairReport {
        self.host.edit(normalize)
    }

    // ------------------------------------------------------------------------
    // Tools
    // ------------------------------------------------------------------------

    /// Attach `context` to the tool with `id`, creating the tool if needed.
    ///
    /// An existing tool keeps its place; its header is replaced only by a
    /// non-empty `header`. A new tool goes into the node with id
    /// `default_parent` (appended to a tab group, or wrapped in a new tab
    /// group in a split), falling back to the root per the insert policy.
    pub fn create_or_update_tool(
        &mut self,
        id: &str,
        header: Option<&str>,
        context: C,
        default_parent: Option<&str>,
    ) -> Result<&Tool<C>, DockError> {
        if id.trim().is_empty() {
            return Err(DockError::invalid_argument(
                "id",
                "tool id must not be empty or whitespace",
            ));
        }
        let header = header.filter(|h| !h.trim().is_empty());

        let key = match self.root().find_tool(id).map(Tool::key) {
            Some(key) => {
                self.host.edit(|root, events| {
                    if let Some(tool) = root.tool_mut(key) {
                        if let Some(header) = header {
                            tool.set_header(header, events);
                        }
                        tool.set_context(ToolContext::Attached(context), events);
                    }
                });
                key
            }
            None => {
                let tool = Tool::with_id(id)
                    .with_header(header.unwrap_or(DEFAULT_HEADER))
                    .with_attached(context);
                self.insert_tool(tool, default_parent)?
            }
        };

        self.root().tool(key).ok_or(DockError::ToolNotFound(key))
    }

    /// Insert a detached tool under the node with id `anchor`
    fn insert_tool(&mut self, mut tool: Tool<C>, anchor: Option<&str>) -> Result<ToolKey, DockError> {
        let parent = anchor
            .filter(|id| !id.is_empty())
            .and_then(|id| self.root().find_node(id))
            .map(DockNode::key);
        if parent.is_none() && self.insert_policy == InsertPolicy::Error {
            tracing::warn!(tool = tool.id(), ?anchor, "no parent node for new tool");
            return Err(DockError::ParentNotFound(anchor.map(str::to_string)));
        }

        let policy = self.insert_policy;
        let key = tool.key();
        tool.mark_selected(false);

        self.host.edit(|root, events| {
            let parent = parent.unwrap_or_else(|| root.key());
            match root.node_mut(parent) {
                Some(DockNode::Tab(tab)) => {
                    tab.push_tool(tool, events);
                    if tab.selected_key().is_none() {
                        tab.select(Some(key), events);
                    }
                }
                Some(DockNode::Split(split)) => {
                    let group = TabNode::new().with_tool(tool).with_selection(key).into();
                    if policy == InsertPolicy::CreateFirst {
                        split.insert_child(0, group, events);
                    } else {
                        split.push_child(group, events);
                    }
                }
                None => return Err(DockError::NodeNotFound(parent)),
            }
            Ok(())
        })?;

        tracing::debug!(%key, ?anchor, ?policy, "inserted tool");
        Ok(key)
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    /// Snapshot the current layout
    pub fn layout(&self) -> DockLayout {
        build_layout(&self.host)
    }

    pub fn save_layout(&self, writer: &mut dyn Write) -> Result<(), DockError> {
        self.layout_manager.save(&self.layout(), writer)
    }

    pub fn save_layout_to_path(&self, path: impl AsRef<Path>) -> Result<(), DockError> {
        self.layout_manager.save_to_path(&self.layout(), path.as_ref())
    }

    pub fn load_layout(&mut self, reader: &mut dyn Read) -> Result<bool, DockError> {
        let layout = self.layout_manager.load(reader)?;
        self.apply_layout(&layout)
    }

    pub fn load_layout_from_path(&mut self, path: impl AsRef<Path>) -> Result<bool, DockError> {
        let layout = self.layout_manager.load_from_path(path.as_ref())?;
        self.apply_layout(&layout)
    }

    /// Install `layout` and merge the outgoing tree's tools into it.
    ///
    /// A tool whose id exists in the new tree hands its context over; any
    /// other tool is re-inserted as it was, anchored at its former tab group
    /// id. Nothing is removed. On error the current tree is untouched.
    pub fn apply_layout(&mut self, layout: &DockLayout) -> Result<bool, DockError> {
        let incoming: DockHostRoot<C> = build_view_model(layout)?;
        if self.insert_policy == InsertPolicy::Error {
            self.check_orphan_anchors(incoming.root())?;
        }

        if self.set_drag(None).is_some() {
            tracing::debug!("layout load cancelled drag in progress");
        }
        let outgoing = std::mem::replace(&mut self.host, incoming);

        let mut merged = 0usize;
        let mut reinserted = 0usize;
        for (anchor, mut tool) in outgoing.into_root().into_tab_tools() {
            match self.root().find_tool(tool.id()).map(Tool::key) {
                Some(key) => {
                    let context = tool.take_context();
                    self.host.edit(|root, events| {
                        if let Some(target) = root.tool_mut(key) {
                            target.set_context(context, events);
                        }
                    });
                    merged += 1;
                }
                None => {
                    self.insert_tool(tool, anchor.as_deref())?;
                    reinserted += 1;
                }
            }
        }

        tracing::info!(merged, reinserted, "applied layout");
        Ok(true)
    }

    /// Under `InsertPolicy::Error`, every tool the incoming tree lacks must
    /// find its former tab group id there.
    fn check_orphan_anchors(&self, incoming: &DockNode<C>) -> Result<(), DockError> {
        let mut placed: HashSet<&str> = HashSet::new();
        for tab in self.root().tab_nodes() {
            for tool in tab.tabs() {
                if incoming.find_tool(tool.id()).is_some() || !placed.insert(tool.id()) {
                    continue;
                }
                let anchored = tab
                    .id()
                    .filter(|id| !id.is_empty())
                    .is_some_and(|id| incoming.find_node(id).is_some());
                if !anchored {
                    tracing::warn!(tool = tool.id(), anchor = ?tab.id(), "layout load refused");
                    return Err(DockError::ParentNotFound(tab.id().map(str::to_string)));
                }
            }
        }
        Ok(())
    }
}
