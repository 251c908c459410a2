//! Host root - owner of the live layout tree
//!
//! The host root holds the top-level [`DockNode`] and a subscription table
//! mirroring everything reachable from it. Edits go through [`DockHostRoot::edit`];
//! when the closure returns, queued events are flushed in order: structural
//! events hook entering subtrees (read from the live tree) and unhook leaving
//! ones (read from the mirror), pin changes update the derived unpinned list,
//! and everything that concerns a hooked entity is buffered for the host
//! application.

use std::collections::HashMap;
use std::hash::Hash;

use super::events::{DockEvent, Entity, EventQueue, Notifications, Property};
use super::node::{DockNode, NodeKey, Orientation, SplitNode};
use super::tool::{Tool, ToolKey};

/// Subscription table keyed by entity
#[derive(Debug, Default)]
struct HookTable {
    /// Hooked tool -> the tab group it was hooked under
    tools: HashMap<ToolKey, NodeKey>,
    /// Hooked tab group -> its tools at hook time (kept current by events)
    tabs: HashMap<NodeKey, Vec<ToolKey>>,
    /// Hooked split -> its children at hook time (kept current by events)
    splits: HashMap<NodeKey, Vec<NodeKey>>,
}

impl HookTable {
    fn is_hooked(&self, entity: Entity) -> bool {
        match entity {
            Entity::Tool(key) => self.tools.contains_key(&key),
            Entity::Node(key) => self.tabs.contains_key(&key) || self.splits.contains_key(&key),
            Entity::Host => true,
        }
    }

    /// Same hooks, ignoring mirror order
    fn same_as(&self, other: &HookTable) -> bool {
        self.tools == other.tools
            && same_members(&self.tabs, &other.tabs)
            && same_members(&self.splits, &other.splits)
    }
}

fn same_members<K: Eq + Hash, V: Ord + Clone>(
    a: &HashMap<K, Vec<V>>,
    b: &HashMap<K, Vec<V>>,
) -> bool {
    let sorted = |v: &Vec<V>| {
        let mut v = v.clone();
        v.sort();
        v
    };
    a.len() == b.len()
        && a
            .iter()
            .all(|(k, v)| b.get(k).is_some_and(|w| sorted(v) == sorted(w)))
}

/// Derived list of tools that are not pinned in place
#[derive(Debug, Default)]
struct Unpinned {
    keys: Vec<ToolKey>,
}

impl Unpinned {
    fn add(&mut self, key: ToolKey) -> bool {
        if self.keys.contains(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    fn remove(&mut self, key: ToolKey) -> bool {
        let before = self.keys.len();
        self.keys.retain(|k| *k != key);
        before != self.keys.len()
    }
}

/// Owner of the live layout tree and its subscriptions
#[derive(Debug)]
pub struct DockHostRoot<C> {
    root: DockNode<C>,
    hooks: HookTable,
    unpinned: Unpinned,
    notifications: Notifications,
}

impl<C> Default for DockHostRoot<C> {
    fn default() -> Self {
        Self::new(SplitNode::new(Orientation::Horizontal).into())
    }
}

impl<C> DockHostRoot<C> {
    pub fn new(root: DockNode<C>) -> Self {
        let mut host = Self {
            root,
            hooks: HookTable::default(),
            unpinned: Unpinned::default(),
            notifications: Notifications::default(),
        };
        let key = host.root.key();
        host.hook_node(key);
        host
    }

    pub fn root(&self) -> &DockNode<C> {
        &self.root
    }

    pub fn into_root(self) -> DockNode<C> {
        self.root
    }

    /// Mutate the tree, then flush the published events.
    ///
    /// Overwriting the top-level node inside `f` counts as a root
    /// replacement: the old tree is unhooked and the new one hooked before
    /// the queue is flushed.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut DockNode<C>, &mut EventQueue) -> R) -> R {
        let mut events = EventQueue::new();
        let before = self.root.key();
        let result = f(&mut self.root, &mut events);
        if self.root.key() != before {
            tracing::debug!(old = %before, new = %self.root.key(), "root replaced during edit");
            self.rehook_root(before);
        }
        self.flush(&mut events);
        result
    }

    /// Swap in a new top-level node. Every hook of the old tree is released
    /// before the new tree is hooked. Returns the old node.
    pub fn replace_root(&mut self, root: DockNode<C>) -> DockNode<C> {
        let old_key = self.root.key();
        let old = std::mem::replace(&mut self.root, root);
        self.rehook_root(old_key);
        old
    }

    /// Release the tree that was hooked under `old_key` and hook the current root
    fn rehook_root(&mut self, old_key: NodeKey) {
        self.unhook_node(old_key);
        debug_assert!(
            self.hooks.tools.is_empty() && self.hooks.tabs.is_empty() && self.hooks.splits.is_empty()
        );
        let new_key = self.root.key();
        self.hook_node(new_key);
        self.notify(DockEvent::PropertyChanged {
            entity: Entity::Host,
            property: Property::UnpinnedTabs,
        });
    }

    // ------------------------------------------------------------------------
    // Derived state
    // ------------------------------------------------------------------------

    /// Reachable tools with `is_pinned == false`, in the order they were hooked
    pub fn unpinned_tabs(&self) -> Vec<&Tool<C>> {
        self.unpinned
            .keys
            .iter()
            .filter_map(|key| self.root.tool(*key))
            .collect()
    }

    pub fn unpinned_keys(&self) -> &[ToolKey] {
        &self.unpinned.keys
    }

    pub fn should_show_unpinned_tabs(&self) -> bool {
        !self.unpinned.keys.is_empty()
    }

    pub fn is_tool_hooked(&self, key: ToolKey) -> bool {
        self.hooks.is_hooked(Entity::Tool(key))
    }

    pub fn is_node_hooked(&self, key: NodeKey) -> bool {
        self.hooks.is_hooked(Entity::Node(key))
    }

    pub fn hooked_tool_count(&self) -> usize {
        self.hooks.tools.len()
    }

    /// Drain notifications buffered for the host application
    pub fn take_notifications(&mut self) -> Vec<DockEvent> {
        self.notifications.take()
    }

    // ------------------------------------------------------------------------
    // Flush
    // ------------------------------------------------------------------------

    fn flush(&mut self, events: &mut EventQueue) {
        for event in events.drain() {
            if !self.hooks.is_hooked(event.entity()) {
                tracing::trace!(?event, "dropping event for unhooked entity");
                continue;
            }
            match &event {
                DockEvent::TabsChanged {
                    tab,
                    added,
                    removed,
                } => {
                    for key in removed {
                        if let Some(mirror) = self.hooks.tabs.get_mut(tab) {
                            mirror.retain(|k| k != key);
                        }
                        self.unhook_tool(*key);
                    }
                    for key in added {
                        if let Some(mirror) = self.hooks.tabs.get_mut(tab) {
                            if !mirror.contains(key) {
                                mirror.push(*key);
                            }
                        }
                        self.hook_tool(*tab, *key);
                    }
                }
                DockEvent::ChildrenChanged {
                    split,
                    added,
                    removed,
                } => {
                    for key in removed {
                        if let Some(mirror) = self.hooks.splits.get_mut(split) {
                            mirror.retain(|k| k != key);
                        }
                        self.unhook_node(*key);
                    }
                    for key in added {
                        if let Some(mirror) = self.hooks.splits.get_mut(split) {
                            if !mirror.contains(key) {
                                mirror.push(*key);
                            }
                        }
                        self.hook_node(*key);
                    }
                }
                DockEvent::PropertyChanged {
                    entity: Entity::Tool(key),
                    property: Property::IsPinned,
                } => self.refresh_pinned(*key),
                DockEvent::PropertyChanged { .. } => {}
            }
            self.notify(event);
        }

        debug_assert!(
            self.hooks_in_sync(),
            "hook table or unpinned list out of sync with the layout tree"
        );
    }

    fn notify(&mut self, event: DockEvent) {
        self.notifications.push(event);
    }

    fn unpinned_changed(&mut self, was_empty: bool) {
        self.notify(DockEvent::PropertyChanged {
            entity: Entity::Host,
            property: Property::UnpinnedTabs,
        });
        if was_empty != self.unpinned.keys.is_empty() {
            self.notify(DockEvent::PropertyChanged {
                entity: Entity::Host,
                property: Property::ShouldShowUnpinnedTabs,
            });
        }
    }

    fn refresh_pinned(&mut self, key: ToolKey) {
        let Some(pinned) = self.root.tool(key).map(Tool::is_pinned) else {
            return;
        };
        let was_empty = self.unpinned.keys.is_empty();
        let changed = if pinned {
            self.unpinned.remove(key)
        } else {
            self.unpinned.add(key)
        };
        if changed {
            self.unpinned_changed(was_empty);
        }
    }

    // ------------------------------------------------------------------------
    // Hook / unhook
    // ------------------------------------------------------------------------

    /// Hook the subtree rooted at `key` as it currently is in the live tree
    fn hook_node(&mut self, key: NodeKey) {
        let Some(node) = self.root.node(key) else {
            tracing::debug!(%key, "node left the tree before it could be hooked");
            return;
        };
        let was_empty = self.unpinned.keys.is_empty();
        let mut changed = false;
        hook_subtree(node, &mut self.hooks, &mut self.unpinned, &mut changed);
        if changed {
            self.unpinned_changed(was_empty);
        }
    }

    fn hook_tool(&mut self, tab: NodeKey, key: ToolKey) {
        let Some(pinned) = self.root.tool(key).map(Tool::is_pinned) else {
            tracing::debug!(%key, "tool left the tree before it could be hooked");
            return;
        };
        self.hooks.tools.insert(key, tab);
        if !pinned {
            let was_empty = self.unpinned.keys.is_empty();
            if self.unpinned.add(key) {
                self.unpinned_changed(was_empty);
            }
        }
    }

    /// Unhook a subtree using the mirror table, never the live tree
    fn unhook_node(&mut self, key: NodeKey) {
        if let Some(children) = self.hooks.splits.remove(&key) {
            for child in children {
                self.unhook_node(child);
            }
        }
        if let Some(tools) = self.hooks.tabs.remove(&key) {
            for tool in tools {
                self.unhook_tool(tool);
            }
        }
    }

    fn unhook_tool(&mut self, key: ToolKey) {
        if self.hooks.tools.remove(&key).is_none() {
            return;
        }
        let was_empty = self.unpinned.keys.is_empty();
        if self.unpinned.remove(key) {
            self.unpinned_changed(was_empty);
        }
    }

    /// Whether the hook table and the unpinned list match what a fresh hook
    /// of the live tree would produce (unpinned order aside)
    fn hooks_in_sync(&self) -> bool {
        let mut expected = HookTable::default();
        let mut reachable = Unpinned::default();
        let mut changed = false;
        hook_subtree(&self.root, &mut expected, &mut reachable, &mut changed);

        let mut unpinned = self.unpinned.keys.clone();
        unpinned.sort();
        reachable.keys.sort();
        let in_sync = expected.same_as(&self.hooks) && unpinned == reachable.keys;
        if !in_sync {
            tracing::error!(
                hooked_tools = self.hooks.tools.len(),
                reachable_tools = expected.tools.len(),
                unpinned = self.unpinned.keys.len(),
                reachable_unpinned = reachable.keys.len(),
                "hook table out of sync with the layout tree"
            );
        }
        in_sync
    }
}

fn hook_subtree<C>(
    node: &DockNode<C>,
    hooks: &mut HookTable,
    unpinned: &mut Unpinned,
    changed: &mut bool,
) {
    match node {
        DockNode::Tab(tab) => {
            let keys: Vec<ToolKey> = tab.tabs().iter().map(Tool::key).collect();
            for tool in tab.tabs() {
                hooks.tools.insert(tool.key(), tab.key());
                if !tool.is_pinned() {
                    *changed |= unpinned.add(tool.key());
                }
            }
            hooks.tabs.insert(tab.key(), keys);
        }
        DockNode::Split(split) => {
            let keys: Vec<NodeKey> = split.children().iter().map(DockNode::key).collect();
            hooks.splits.insert(split.key(), keys);
            for child in split.children() {
                hook_subtree(child, hooks, unpinned, changed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::TabNode;

    fn host() -> DockHostRoot<()> {
        DockHostRoot::new(
            SplitNode::new(Orientation::Horizontal)
                .with_child(
                    TabNode::new()
                        .with_id("left")
                        .with_tool(Tool::with_id("a"))
                        .with_tool(Tool::with_id("b").with_pinned(false)),
                )
                .with_child(TabNode::new().with_id("right").with_tool(Tool::with_id("c")))
                .into(),
        )
    }

    #[test]
    fn test_sync_check_catches_unpublished_change() {
        let mut host = host();
        assert!(host.hooks_in_sync());

        // Bypass edit() so nothing is published
        host.root = TabNode::new()
            .with_tool(Tool::with_id("x").with_pinned(false))
            .into();
        assert!(!host.hooks_in_sync());
    }

    #[test]
    fn test_new_hooks_whole_tree() {
        let host = host();
        assert_eq!(host.hooked_tool_count(), 3);
        let ids: Vec<&str> = host.unpinned_tabs().iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["b"]);
        assert!(host.should_show_unpinned_tabs());
    }

    #[test]
    fn test_pin_toggle_updates_unpinned() {
        let mut host = host();
        let c = host.root().find_tool("c").map(Tool::key).unwrap();

        host.edit(|root, events| {
            if let Some(tool) = root.tool_mut(c) {
                tool.set_pinned(false, events);
            }
        });
        assert_eq!(host.unpinned_keys().len(), 2);
        assert_eq!(host.unpinned_keys()[1], c);

        host.edit(|root, events| {
            if let Some(tool) = root.tool_mut(c) {
                tool.set_pinned(true, events);
            }
        });
        assert_eq!(host.unpinned_keys().len(), 1);
    }

    #[test]
    fn test_removed_tool_is_unhooked() {
        let mut host = host();
        let b = host.root().find_tool("b").map(Tool::key).unwrap();
        let left = host.root().find_node("left").map(DockNode::key).unwrap();

        let removed = host.edit(|root, events| {
            root.node_mut(left)
                .and_then(DockNode::as_tab_mut)
                .and_then(|tab| tab.remove_tool(b, events))
        });
        let mut removed = removed.unwrap();
        assert!(!host.is_tool_hooked(b));
        assert!(host.unpinned_keys().is_empty());
        assert!(!host.should_show_unpinned_tabs());

        // Mutating the detached tool reaches nobody
        let mut events = EventQueue::new();
        removed.set_pinned(true, &mut events);
        host.take_notifications();
        host.edit(|_, queue| {
            for event in events.drain() {
                if let DockEvent::PropertyChanged { entity, property } = event {
                    queue.property(entity, property);
                }
            }
        });
        assert!(host.take_notifications().is_empty());
    }

    #[test]
    fn test_replace_root_drops_old_hooks() {
        let mut host = host();
        let old_tools: Vec<ToolKey> = host.root().tools().iter().map(|t| t.key()).collect();

        let old = host.replace_root(
            TabNode::new()
                .with_tool(Tool::with_id("z").with_pinned(false))
                .into(),
        );
        assert_eq!(old.tools().len(), 3);
        for key in old_tools {
            assert!(!host.is_tool_hooked(key));
        }
        assert_eq!(host.hooked_tool_count(), 1);
        let ids: Vec<&str> = host.unpinned_tabs().iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["z"]);
    }

    #[test]
    fn test_subtree_added_by_split_is_hooked() {
        let mut host = host();
        let root_key = host.root().key();

        host.edit(|root, events| {
            if let Some(split) = root.node_mut(root_key).and_then(DockNode::as_split_mut) {
                split.push_child(
                    TabNode::new()
                        .with_tool(Tool::with_id("d").with_pinned(false))
                        .into(),
                    events,
                );
            }
        });
        let d = host.root().find_tool("d").map(Tool::key).unwrap();
        assert!(host.is_tool_hooked(d));
        assert_eq!(host.unpinned_keys().last(), Some(&d));
    }
}
