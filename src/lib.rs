//! Dockyard - docking-panel layout core
//!
//! This crate provides the tree model, structural repair, drag-drop reducer
//! and JSON persistence for IDE-style docking panels, driven through an
//! Elm-style message/update layer.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod messages;
pub mod model;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::DockConfig;
pub use error::DockError;
pub use geometry::{classify, DropZone, Point, Rect};
pub use layout::{DockLayout, JsonLayoutManager, LayoutManager};
pub use messages::Msg;
pub use model::{DockHostRoot, DockLayoutRoot, DockNode, InsertPolicy, SplitNode, TabNode, Tool};
pub use update::{update, DropOutcome};
