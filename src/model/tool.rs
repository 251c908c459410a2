//! Tool - the leaf of the layout tree
//!
//! A tool is one dockable pane. It carries the persisted identity and flags
//! plus an opaque, non-persisted application context.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::events::{Entity, EventQueue, Property};

/// Header shown for a tool that was never given one
pub const DEFAULT_HEADER: &str = "Untitled";

static NEXT_TOOL_KEY: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToolKey(u64);

impl ToolKey {
    pub(crate) fn next() -> Self {
        Self(NEXT_TOOL_KEY.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ToolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tool#{}", self.0)
    }
}

/// Application context attached to a tool
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ToolContext<C> {
    /// No context was ever supplied
    #[default]
    Detached,
    /// Rebuilt from a persisted layout; waiting for the application to attach
    Loading,
    Attached(C),
}

impl<C> ToolContext<C> {
    pub fn is_attached(&self) -> bool {
        matches!(self, ToolContext::Attached(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ToolContext::Loading)
    }

    pub fn as_attached(&self) -> Option<&C> {
        match self {
            ToolContext::Attached(context) => Some(context),
            _ => None,
        }
    }
}

/// A dockable pane
#[derive(Debug)]
pub struct Tool<C> {
    key: ToolKey,
    id: String,
    header: String,
    title: Option<String>,
    context: ToolContext<C>,
    is_pinned: bool,
    is_hovered: bool,
    is_closed: bool,
    can_close: bool,
    can_pin: bool,
    is_selected: bool,
}

impl<C> Default for Tool<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Tool<C> {
    /// New pinned tool with a random id and the default header
    pub fn new() -> Self {
        Self::with_id(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            key: ToolKey::next(),
            id: id.into(),
            header: DEFAULT_HEADER.to_string(),
            title: None,
            context: ToolContext::Detached,
            is_pinned: true,
            is_hovered: false,
            is_closed: false,
            can_close: true,
            can_pin: true,
            is_selected: false,
        }
    }

    // ------------------------------------------------------------------------
    // Construction (before the tool joins a live tree)
    // ------------------------------------------------------------------------

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn with_context(mut self, context: ToolContext<C>) -> Self {
        self.context = context;
        self
    }

    pub fn with_attached(self, context: C) -> Self {
        self.with_context(ToolContext::Attached(context))
    }

    pub fn with_pinned(mut self, pinned: bool) -> Self {
        self.is_pinned = pinned;
        self
    }

    pub fn with_closed(mut self, closed: bool) -> Self {
        self.is_closed = closed;
        self
    }

    pub fn with_can_close(mut self, can_close: bool) -> Self {
        self.can_close = can_close;
        self
    }

    pub fn with_can_pin(mut self, can_pin: bool) -> Self {
        self.can_pin = can_pin;
        self
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn key(&self) -> ToolKey {
        self.key
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn context(&self) -> &ToolContext<C> {
        &self.context
    }

    pub fn is_pinned(&self) -> bool {
        self.is_pinned
    }

    pub fn is_hovered(&self) -> bool {
        self.is_hovered
    }

    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    pub fn can_close(&self) -> bool {
        self.can_close
    }

    pub fn can_pin(&self) -> bool {
        self.can_pin
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    /// Shown when open and either pinned in place or hovered from its stub
    pub fn is_visible(&self) -> bool {
        !self.is_closed && (self.is_pinned || self.is_hovered)
    }

    // ------------------------------------------------------------------------
    // Live mutation
    // ------------------------------------------------------------------------

    fn emit(&self, events: &mut EventQueue, property: Property) {
        events.property(Entity::Tool(self.key), property);
    }

    pub fn set_header(&mut self, header: impl Into<String>, events: &mut EventQueue) {
        let header = header.into();
        if self.header != header {
            self.header = header;
            self.emit(events, Property::Header);
        }
    }

    pub fn set_title(&mut self, title: Option<String>, events: &mut EventQueue) {
        if self.title != title {
            self.title = title;
            self.emit(events, Property::Title);
        }
    }

    /// Replace the context. Always notifies; contexts are not comparable.
    pub fn set_context(&mut self, context: ToolContext<C>, events: &mut EventQueue) {
        self.context = context;
        self.emit(events, Property::Context);
    }

    pub(crate) fn take_context(&mut self) -> ToolContext<C> {
        std::mem::take(&mut self.context)
    }

    pub fn set_pinned(&mut self, pinned: bool, events: &mut EventQueue) {
        if self.is_pinned != pinned {
            self.is_pinned = pinned;
            self.emit(events, Property::IsPinned);
            self.emit(events, Property::IsVisible);
        }
    }

    pub fn set_hovered(&mut self, hovered: bool, events: &mut EventQueue) {
        if self.is_hovered != hovered {
            self.is_hovered = hovered;
            self.emit(events, Property::IsHovered);
            self.emit(events, Property::IsVisible);
        }
    }

    pub fn set_closed(&mut self, closed: bool, events: &mut EventQueue) {
        if self.is_closed != closed {
            self.is_closed = closed;
            self.emit(events, Property::IsClosed);
            self.emit(events, Property::IsVisible);
        }
    }

    pub fn set_can_close(&mut self, can_close: bool, events: &mut EventQueue) {
        if self.can_close != can_close {
            self.can_close = can_close;
            self.emit(events, Property::CanClose);
        }
    }

    pub fn set_can_pin(&mut self, can_pin: bool, events: &mut EventQueue) {
        if self.can_pin != can_pin {
            self.can_pin = can_pin;
            self.emit(events, Property::CanPin);
        }
    }

    pub(crate) fn set_selected(&mut self, selected: bool, events: &mut EventQueue) {
        if self.is_selected != selected {
            self.is_selected = selected;
            self.emit(events, Property::IsSelected);
        }
    }

    /// Builder-time selection flag, for trees assembled outside a host
    pub(crate) fn mark_selected(&mut self, selected: bool) {
        self.is_selected = selected;
    }
}
