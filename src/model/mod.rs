//! Dock model - the layout tree and its owners
//!
//! Leaf-first: [`Tool`] leaves live in [`TabNode`] groups, arranged by
//! [`SplitNode`] containers. A [`DockHostRoot`] owns a live tree and keeps
//! derived state in step with it; a [`DockLayoutRoot`] adds persistence,
//! insert policy and drag state on top.

pub mod drag;
pub mod events;
pub mod host;
pub mod layout_root;
pub mod node;
pub mod tool;

pub use drag::{DragSession, DropAdorner};
pub use events::{DockEvent, Entity, EventQueue, Property, NOTIFICATION_CAPACITY};
pub use host::DockHostRoot;
pub use layout_root::{DockLayoutRoot, InsertPolicy};
pub use node::{DockNode, NodeKey, Orientation, SplitNode, TabNode};
pub use tool::{Tool, ToolContext, ToolKey, DEFAULT_HEADER};
