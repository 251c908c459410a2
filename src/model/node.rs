//! Layout tree - split containers and tab groups
//!
//! The tree is a closed sum type: a [`DockNode`] is either a [`SplitNode`]
//! arranging children side by side, or a [`TabNode`] holding [`Tool`] leaves.
//! Structural mutators publish change events into an [`EventQueue`] so the
//! owning host root can keep its subscriptions in step with the tree.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use super::events::{Entity, EventQueue, Property};
use super::tool::{Tool, ToolKey};

// ============================================================================
// Identifiers
// ============================================================================

static NEXT_NODE_KEY: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(u64);

impl NodeKey {
    pub(crate) fn next() -> Self {
        Self(NEXT_NODE_KEY.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Direction a split arranges its children in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Children arranged left-to-right
    #[default]
    Horizontal,
    /// Children arranged top-to-bottom
    Vertical,
}

// ============================================================================
// Split container
// ============================================================================

/// A container that splits space between children
#[derive(Debug)]
pub struct SplitNode<C> {
    key: NodeKey,
    id: Option<String>,
    orientation: Orientation,
    children: Vec<DockNode<C>>,
    /// Star weights per child slot. May be shorter or longer than `children`.
    sizes: Vec<f64>,
}

impl<C> SplitNode<C> {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            key: NodeKey::next(),
            id: None,
            orientation,
            children: Vec::new(),
            sizes: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_optional_id(mut self, id: Option<String>) -> Self {
        self.id = id;
        self
    }

    pub fn with_child(mut self, child: impl Into<DockNode<C>>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = DockNode<C>>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_sizes(mut self, sizes: Vec<f64>) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn key(&self) -> NodeKey {
        self.key
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn children(&self) -> &[DockNode<C>] {
        &self.children
    }

    pub fn sizes(&self) -> &[f64] {
        &self.sizes
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Index of the direct child with this key
    pub fn position_of(&self, key: NodeKey) -> Option<usize> {
        self.children.iter().position(|c| c.key() == key)
    }

    pub fn set_orientation(&mut self, orientation: Orientation, events: &mut EventQueue) {
        if self.orientation != orientation {
            self.orientation = orientation;
            events.property(Entity::Node(self.key), Property::Orientation);
        }
    }

    pub fn set_sizes(&mut self, sizes: Vec<f64>, events: &mut EventQueue) {
        if self.sizes != sizes {
            self.sizes = sizes;
            events.property(Entity::Node(self.key), Property::Sizes);
        }
    }

    pub fn push_child(&mut self, child: DockNode<C>, events: &mut EventQueue) {
        let index = self.children.len();
        self.insert_child(index, child, events);
    }

    /// Insert at `index`, clamped to the number of children
    pub fn insert_child(&mut self, index: usize, child: DockNode<C>, events: &mut EventQueue) {
        let index = index.min(self.children.len());
        let key = child.key();
        self.children.insert(index, child);
        events.children_changed(self.key, vec![key], Vec::new());
    }

    /// Insert next to the child at `target`, before it when `leading`.
    ///
    /// When the target slot carries a weight, the weight is shared equally
    /// between the target and the new sibling. Returns the new child's index.
    pub(crate) fn insert_beside(
        &mut self,
        target: usize,
        leading: bool,
        child: DockNode<C>,
        events: &mut EventQueue,
    ) -> usize {
        let index = if leading { target } else { target + 1 };
        if let Some(weight) = self.sizes.get(target).copied() {
            let half = weight / 2.0;
            self.sizes[target] = half;
            self.sizes.insert(index, half);
            events.property(Entity::Node(self.key), Property::Sizes);
        }
        self.insert_child(index, child, events);
        index
    }

    /// Remove the child at `index`, dropping its slot weight if it has one.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_child(&mut self, index: usize, events: &mut EventQueue) -> DockNode<C> {
        let child = self.children.remove(index);
        if index < self.sizes.len() {
            self.sizes.remove(index);
            events.property(Entity::Node(self.key), Property::Sizes);
        }
        events.children_changed(self.key, Vec::new(), vec![child.key()]);
        child
    }

    /// Put `child` into slot `index`, keeping the slot weight. Returns the
    /// node that was there.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn replace_child(
        &mut self,
        index: usize,
        child: DockNode<C>,
        events: &mut EventQueue,
    ) -> DockNode<C> {
        let added = child.key();
        let old = std::mem::replace(&mut self.children[index], child);
        events.children_changed(self.key, vec![added], vec![old.key()]);
        old
    }

    /// Rebuild slot `index` from its current occupant, keeping the slot weight.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub(crate) fn map_child(
        &mut self,
        index: usize,
        events: &mut EventQueue,
        f: impl FnOnce(DockNode<C>) -> DockNode<C>,
    ) {
        let old = std::mem::replace(&mut self.children[index], DockNode::Tab(TabNode::new()));
        let removed = old.key();
        let new = f(old);
        let added = new.key();
        self.children[index] = new;
        events.children_changed(self.key, vec![added], vec![removed]);
    }

    pub(crate) fn into_children(self) -> Vec<DockNode<C>> {
        self.children
    }
}

// ============================================================================
// Tab group
// ============================================================================

/// A group of tools shown one at a time behind a tab strip
#[derive(Debug)]
pub struct TabNode<C> {
    key: NodeKey,
    id: Option<String>,
    tabs: Vec<Tool<C>>,
    selected: Option<ToolKey>,
}

impl<C> Default for TabNode<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> TabNode<C> {
    pub fn new() -> Self {
        Self {
            key: NodeKey::next(),
            id: None,
            tabs: Vec::new(),
            selected: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_optional_id(mut self, id: Option<String>) -> Self {
        self.id = id;
        self
    }

    pub fn with_tool(mut self, tool: Tool<C>) -> Self {
        self.tabs.push(tool);
        self
    }

    /// Select the tool with this key while building a detached group
    pub fn with_selection(mut self, key: ToolKey) -> Self {
        if self.position_of(key).is_some() {
            self.selected = Some(key);
            for tool in &mut self.tabs {
                tool.mark_selected(tool.key() == key);
            }
        }
        self
    }

    pub fn key(&self) -> NodeKey {
        self.key
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn tabs(&self) -> &[Tool<C>] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn has_tabs(&self) -> bool {
        !self.tabs.is_empty()
    }

    /// The tab strip is only worth showing with two or more tools
    pub fn should_show_tab_strip(&self) -> bool {
        self.tabs.len() >= 2
    }

    /// Tools docked in place (pinned and not closed)
    pub fn pinned_tabs(&self) -> impl Iterator<Item = &Tool<C>> {
        self.tabs.iter().filter(|t| t.is_pinned() && !t.is_closed())
    }

    pub fn selected(&self) -> Option<&Tool<C>> {
        self.selected.and_then(|key| self.tool(key))
    }

    pub fn selected_key(&self) -> Option<ToolKey> {
        self.selected
    }

    pub fn position_of(&self, key: ToolKey) -> Option<usize> {
        self.tabs.iter().position(|t| t.key() == key)
    }

    pub fn tool(&self, key: ToolKey) -> Option<&Tool<C>> {
        self.tabs.iter().find(|t| t.key() == key)
    }

    pub fn tool_mut(&mut self, key: ToolKey) -> Option<&mut Tool<C>> {
        self.tabs.iter_mut().find(|t| t.key() == key)
    }

    pub fn push_tool(&mut self, tool: Tool<C>, events: &mut EventQueue) {
        let index = self.tabs.len();
        self.insert_tool(index, tool, events);
    }

    /// Insert at `index`, clamped to the number of tools
    pub fn insert_tool(&mut self, index: usize, tool: Tool<C>, events: &mut EventQueue) {
        let before = self.tabs.len();
        let index = index.min(before);
        let key = tool.key();
        self.tabs.insert(index, tool);
        events.tabs_changed(self.key, vec![key], Vec::new());
        self.emit_derived(before, events);
    }

    /// Remove a tool from the group.
    ///
    /// If it was selected, the tool now at the same position becomes selected
    /// (clamped to the last tab), or nothing when the group is empty.
    pub fn remove_tool(&mut self, key: ToolKey, events: &mut EventQueue) -> Option<Tool<C>> {
        let index = self.position_of(key)?;
        let before = self.tabs.len();
        let mut tool = self.tabs.remove(index);
        tool.set_selected(false, events);

        if self.selected == Some(key) {
            let next = if self.tabs.is_empty() {
                None
            } else {
                Some(self.tabs[index.min(self.tabs.len() - 1)].key())
            };
            self.select(next, events);
        }

        events.tabs_changed(self.key, Vec::new(), vec![key]);
        self.emit_derived(before, events);
        Some(tool)
    }

    /// Make `key` the selected tool (or clear the selection).
    ///
    /// Returns false when the key is not one of this group's tools.
    pub fn select(&mut self, key: Option<ToolKey>, events: &mut EventQueue) -> bool {
        if let Some(key) = key {
            if self.position_of(key).is_none() {
                return false;
            }
        }
        for tool in &mut self.tabs {
            tool.set_selected(Some(tool.key()) == key, events);
        }
        if self.selected != key {
            self.selected = key;
            events.property(Entity::Node(self.key), Property::Selected);
        }
        true
    }

    fn emit_derived(&self, before: usize, events: &mut EventQueue) {
        let entity = Entity::Node(self.key);
        let after = self.tabs.len();
        if (before == 0) != (after == 0) {
            events.property(entity, Property::HasTabs);
        }
        if (before >= 2) != (after >= 2) {
            events.property(entity, Property::ShouldShowTabStrip);
        }
        events.property(entity, Property::PinnedTabs);
    }
}

// ============================================================================
// Node
// ============================================================================

/// A node in the layout tree
#[derive(Debug)]
pub enum DockNode<C> {
    Split(SplitNode<C>),
    Tab(TabNode<C>),
}

impl<C> From<SplitNode<C>> for DockNode<C> {
    fn from(split: SplitNode<C>) -> Self {
        DockNode::Split(split)
    }
}

impl<C> From<TabNode<C>> for DockNode<C> {
    fn from(tab: TabNode<C>) -> Self {
        DockNode::Tab(tab)
    }
}

impl<C> DockNode<C> {
    pub fn key(&self) -> NodeKey {
        match self {
            DockNode::Split(split) => split.key,
            DockNode::Tab(tab) => tab.key,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            DockNode::Split(split) => split.id(),
            DockNode::Tab(tab) => tab.id(),
        }
    }

    pub fn is_tab(&self) -> bool {
        matches!(self, DockNode::Tab(_))
    }

    pub fn as_split(&self) -> Option<&SplitNode<C>> {
        match self {
            DockNode::Split(split) => Some(split),
            DockNode::Tab(_) => None,
        }
    }

    pub fn as_split_mut(&mut self) -> Option<&mut SplitNode<C>> {
        match self {
            DockNode::Split(split) => Some(split),
            DockNode::Tab(_) => None,
        }
    }

    pub fn as_tab(&self) -> Option<&TabNode<C>> {
        match self {
            DockNode::Tab(tab) => Some(tab),
            DockNode::Split(_) => None,
        }
    }

    pub fn as_tab_mut(&mut self) -> Option<&mut TabNode<C>> {
        match self {
            DockNode::Tab(tab) => Some(tab),
            DockNode::Split(_) => None,
        }
    }

    /// Empty tab group, or a split with fewer than two children
    pub fn is_degenerate(&self) -> bool {
        match self {
            DockNode::Split(split) => split.children.len() < 2,
            DockNode::Tab(tab) => tab.tabs.is_empty(),
        }
    }

    // ------------------------------------------------------------------------
    // Lookups by persisted id
    // ------------------------------------------------------------------------

    /// First tool with this id, depth-first in child order
    pub fn find_tool(&self, id: &str) -> Option<&Tool<C>> {
        match self {
            DockNode::Tab(tab) => tab.tabs.iter().find(|t| t.id() == id),
            DockNode::Split(split) => split.children.iter().find_map(|c| c.find_tool(id)),
        }
    }

    pub fn find_tool_mut(&mut self, id: &str) -> Option<&mut Tool<C>> {
        match self {
            DockNode::Tab(tab) => tab.tabs.iter_mut().find(|t| t.id() == id),
            DockNode::Split(split) => split
                .children
                .iter_mut()
                .find_map(|c| c.find_tool_mut(id)),
        }
    }

    /// First node with this id, checking a node before its children
    pub fn find_node(&self, id: &str) -> Option<&DockNode<C>> {
        if self.id() == Some(id) {
            return Some(self);
        }
        match self {
            DockNode::Split(split) => split.children.iter().find_map(|c| c.find_node(id)),
            DockNode::Tab(_) => None,
        }
    }

    // ------------------------------------------------------------------------
    // Lookups by key
    // ------------------------------------------------------------------------

    pub fn node(&self, key: NodeKey) -> Option<&DockNode<C>> {
        if self.key() == key {
            return Some(self);
        }
        match self {
            DockNode::Split(split) => split.children.iter().find_map(|c| c.node(key)),
            DockNode::Tab(_) => None,
        }
    }

    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut DockNode<C>> {
        if self.key() == key {
            return Some(self);
        }
        match self {
            DockNode::Split(split) => split.children.iter_mut().find_map(|c| c.node_mut(key)),
            DockNode::Tab(_) => None,
        }
    }

    pub fn contains_node(&self, key: NodeKey) -> bool {
        self.node(key).is_some()
    }

    /// The split whose children directly contain `key`
    pub fn parent_of(&self, key: NodeKey) -> Option<&SplitNode<C>> {
        match self {
            DockNode::Split(split) => {
                if split.children.iter().any(|c| c.key() == key) {
                    Some(split)
                } else {
                    split.children.iter().find_map(|c| c.parent_of(key))
                }
            }
            DockNode::Tab(_) => None,
        }
    }

    /// Key of the tab group holding the tool
    pub fn tab_of_tool(&self, key: ToolKey) -> Option<NodeKey> {
        match self {
            DockNode::Tab(tab) => tab.position_of(key).map(|_| tab.key),
            DockNode::Split(split) => split.children.iter().find_map(|c| c.tab_of_tool(key)),
        }
    }

    pub fn tool(&self, key: ToolKey) -> Option<&Tool<C>> {
        match self {
            DockNode::Tab(tab) => tab.tool(key),
            DockNode::Split(split) => split.children.iter().find_map(|c| c.tool(key)),
        }
    }

    pub fn tool_mut(&mut self, key: ToolKey) -> Option<&mut Tool<C>> {
        match self {
            DockNode::Tab(tab) => tab.tool_mut(key),
            DockNode::Split(split) => split.children.iter_mut().find_map(|c| c.tool_mut(key)),
        }
    }

    // ------------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------------

    /// Visit every node, parent before children
    pub fn visit<'a>(&'a self, f: &mut dyn FnMut(&'a DockNode<C>)) {
        f(self);
        if let DockNode::Split(split) = self {
            for child in &split.children {
                child.visit(f);
            }
        }
    }

    /// Every reachable tool, depth-first
    pub fn tools(&self) -> Vec<&Tool<C>> {
        let mut tools = Vec::new();
        self.visit(&mut |node| {
            if let DockNode::Tab(tab) = node {
                tools.extend(tab.tabs.iter());
            }
        });
        tools
    }

    pub fn tab_nodes(&self) -> Vec<&TabNode<C>> {
        let mut tabs = Vec::new();
        self.visit(&mut |node| {
            if let DockNode::Tab(tab) = node {
                tabs.push(tab);
            }
        });
        tabs
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.visit(&mut |_| count += 1);
        count
    }

    /// Consume the tree into its tools, each paired with its tab group's id
    pub fn into_tab_tools(self) -> Vec<(Option<String>, Tool<C>)> {
        let mut out = Vec::new();
        self.collect_tab_tools(&mut out);
        out
    }

    fn collect_tab_tools(self, out: &mut Vec<(Option<String>, Tool<C>)>) {
        match self {
            DockNode::Tab(tab) => {
                let id = tab.id;
                out.extend(tab.tabs.into_iter().map(|tool| (id.clone(), tool)));
            }
            DockNode::Split(split) => {
                for child in split.children {
                    child.collect_tab_tools(out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::events::DockEvent;

    fn tab(id: &str, tools: &[&str]) -> TabNode<()> {
        tools
            .iter()
            .fold(TabNode::new().with_id(id), |tab, t| tab.with_tool(Tool::with_id(*t)))
    }

    fn sample() -> DockNode<()> {
        SplitNode::new(Orientation::Horizontal)
            .with_id("root")
            .with_child(tab("left", &["explorer", "search"]))
            .with_child(
                SplitNode::new(Orientation::Vertical)
                    .with_id("right")
                    .with_child(tab("editor", &["main"]))
                    .with_child(tab("bottom", &["terminal", "search"])),
            )
            .into()
    }

    #[test]
    fn test_find_tool_returns_first_in_depth_first_order() {
        let root = sample();
        let found = root.find_tool("search").map(Tool::key);
        let left = root.find_node("left").and_then(DockNode::as_tab);
        assert_eq!(found, left.and_then(|t| t.tabs().get(1)).map(Tool::key));
        assert!(root.find_tool("missing").is_none());
    }

    #[test]
    fn test_find_node_checks_self_before_children() {
        let root = sample();
        assert_eq!(root.find_node("root").map(DockNode::key), Some(root.key()));
        assert!(root.find_node("bottom").is_some_and(DockNode::is_tab));
    }

    #[test]
    fn test_parent_of_and_tab_of_tool() {
        let root = sample();
        let bottom = root.find_node("bottom").map(DockNode::key).unwrap();
        let right = root.find_node("right").map(DockNode::key).unwrap();
        assert_eq!(root.parent_of(bottom).map(SplitNode::key), Some(right));
        assert!(root.parent_of(root.key()).is_none());

        let terminal = root.find_tool("terminal").map(Tool::key).unwrap();
        assert_eq!(root.tab_of_tool(terminal), Some(bottom));
    }

    #[test]
    fn test_remove_selected_tool_reselects_same_index() {
        let mut events = EventQueue::new();
        let mut group = tab("g", &["a", "b", "c"]);
        let b = group.tabs()[1].key();
        let c = group.tabs()[2].key();
        group.select(Some(b), &mut events);

        let removed = group.remove_tool(b, &mut events).unwrap();
        assert!(!removed.is_selected());
        assert_eq!(group.selected_key(), Some(c));
        assert!(group.tabs()[1].is_selected());

        // Removing the last tab clamps to the new last one
        group.remove_tool(c, &mut events);
        assert_eq!(group.selected().map(Tool::id), Some("a"));
    }

    #[test]
    fn test_select_marks_exactly_one_tool() {
        let mut events = EventQueue::new();
        let mut group = tab("g", &["a", "b"]);
        let a = group.tabs()[0].key();
        let b = group.tabs()[1].key();

        assert!(group.select(Some(a), &mut events));
        assert!(group.select(Some(b), &mut events));
        let flags: Vec<bool> = group.tabs().iter().map(Tool::is_selected).collect();
        assert_eq!(flags, vec![false, true]);

        assert!(!group.select(Some(ToolKey::next()), &mut events));
        assert_eq!(group.selected_key(), Some(b));
    }

    #[test]
    fn test_remove_child_drops_slot_weight() {
        let mut events = EventQueue::new();
        let mut split: SplitNode<()> = SplitNode::new(Orientation::Horizontal)
            .with_child(tab("a", &["1"]))
            .with_child(tab("b", &["2"]))
            .with_sizes(vec![1.0, 3.0]);
        let first = split.children()[0].key();

        let removed = split.remove_child(0, &mut events);
        assert_eq!(removed.id(), Some("a"));
        assert_eq!(split.sizes(), &[3.0]);

        let split_key = split.key();
        assert!(events.iter().any(|e| *e
            == DockEvent::ChildrenChanged {
                split: split_key,
                added: Vec::new(),
                removed: vec![first],
            }));
    }

    #[test]
    fn test_insert_beside_shares_target_weight() {
        let mut events = EventQueue::new();
        let mut split: SplitNode<()> = SplitNode::new(Orientation::Horizontal)
            .with_child(tab("a", &["1"]))
            .with_child(tab("b", &["2"]))
            .with_sizes(vec![1.0, 3.0]);

        let index = split.insert_beside(1, false, tab("c", &["3"]).into(), &mut events);
        assert_eq!(index, 2);
        assert_eq!(split.sizes(), &[1.0, 1.5, 1.5]);

        // No weight for the target slot: sizes stay as they are
        let mut bare: SplitNode<()> =
            SplitNode::new(Orientation::Vertical).with_child(tab("a", &["1"]));
        bare.insert_beside(0, true, tab("b", &["2"]).into(), &mut events);
        assert!(bare.sizes().is_empty());
        assert_eq!(bare.children()[0].id(), Some("b"));
    }

    #[test]
    fn test_into_tab_tools_keeps_anchor_ids() {
        let pairs = sample().into_tab_tools();
        let flat: Vec<(Option<&str>, &str)> = pairs
            .iter()
            .map(|(anchor, tool)| (anchor.as_deref(), tool.id()))
            .collect();
        assert_eq!(
            flat,
            vec![
                (Some("left"), "explorer"),
                (Some("left"), "search"),
                (Some("editor"), "main"),
                (Some("bottom"), "terminal"),
                (Some("bottom"), "search"),
            ]
        );
    }
}
