//! Change notifications for the layout tree
//!
//! Every mutator on a live node or tool publishes a [`DockEvent`] into an
//! [`EventQueue`]. The owning [`DockHostRoot`](super::DockHostRoot) drains the
//! queue after each edit and routes events to whatever it has hooked, keyed by
//! entity and property. Events for entities nobody hooked are dropped.

use std::collections::VecDeque;

use super::node::NodeKey;
use super::tool::ToolKey;

/// Maximum number of notifications buffered for the host application
pub const NOTIFICATION_CAPACITY: usize = 256;

/// The thing a change happened to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Node(NodeKey),
    Tool(ToolKey),
    /// The host root wrapper itself (derived unpinned state)
    Host,
}

/// Named property that changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    // Tool
    Header,
    Title,
    Context,
    IsPinned,
    IsHovered,
    IsClosed,
    CanClose,
    CanPin,
    IsVisible,
    IsSelected,
    // Tab group
    Selected,
    HasTabs,
    ShouldShowTabStrip,
    PinnedTabs,
    // Split
    Orientation,
    Sizes,
    // Host root
    UnpinnedTabs,
    ShouldShowUnpinnedTabs,
}

/// A single change notification
#[derive(Debug, Clone, PartialEq)]
pub enum DockEvent {
    PropertyChanged { entity: Entity, property: Property },
    /// Tools entered or left a tab group's `tabs`
    TabsChanged {
        tab: NodeKey,
        added: Vec<ToolKey>,
        removed: Vec<ToolKey>,
    },
    /// Nodes entered or left a split's `children`
    ChildrenChanged {
        split: NodeKey,
        added: Vec<NodeKey>,
        removed: Vec<NodeKey>,
    },
}

impl DockEvent {
    pub fn entity(&self) -> Entity {
        match self {
            DockEvent::PropertyChanged { entity, .. } => *entity,
            DockEvent::TabsChanged { tab, .. } => Entity::Node(*tab),
            DockEvent::ChildrenChanged { split, .. } => Entity::Node(*split),
        }
    }

    /// Check for a property change on a given entity
    pub fn is_property(&self, entity: Entity, property: Property) -> bool {
        matches!(self, DockEvent::PropertyChanged { entity: e, property: p } if *e == entity && *p == property)
    }
}

/// Outbox that tree mutators publish into
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<DockEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn property(&mut self, entity: Entity, property: Property) {
        self.events
            .push(DockEvent::PropertyChanged { entity, property });
    }

    pub(crate) fn tabs_changed(&mut self, tab: NodeKey, added: Vec<ToolKey>, removed: Vec<ToolKey>) {
        self.events.push(DockEvent::TabsChanged {
            tab,
            added,
            removed,
        });
    }

    pub(crate) fn children_changed(
        &mut self,
        split: NodeKey,
        added: Vec<NodeKey>,
        removed: Vec<NodeKey>,
    ) {
        self.events.push(DockEvent::ChildrenChanged {
            split,
            added,
            removed,
        });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DockEvent> {
        self.events.iter()
    }

    /// Take all queued events in publication order
    pub fn drain(&mut self) -> std::vec::Drain<'_, DockEvent> {
        self.events.drain(..)
    }
}

/// Bounded buffer of notifications for the host application (oldest dropped)
#[derive(Debug, Default)]
pub(crate) struct Notifications {
    buffer: VecDeque<DockEvent>,
}

impl Notifications {
    pub(crate) fn push(&mut self, event: DockEvent) {
        if self.buffer.len() == NOTIFICATION_CAPACITY {
            self.buffer.pop_front();
        }
        self.buffer.push_back(event);
    }

    pub(crate) fn take(&mut self) -> Vec<DockEvent> {
        self.buffer.drain(..).collect()
    }
}
