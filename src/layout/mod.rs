//! Persisted layout
//!
//! The flat, versioned shape a layout takes on disk, plus the converter to and
//! from the live tree and the pluggable [`LayoutManager`] that reads and writes
//! it. Contexts and derived state are never persisted.

mod converter;
mod manager;

use serde::{Deserialize, Deserializer, Serialize};

use crate::model::Orientation;

pub use converter::{build_layout, build_view_model, LOADING_HEADER};
pub use manager::{JsonLayoutManager, LayoutManager};

/// Layout format major version written by this crate
pub const CURRENT_MAJOR_VERSION: i32 = 1;
/// Layout format minor version written by this crate
pub const CURRENT_MINOR_VERSION: i32 = 0;

/// A saved arrangement of the whole dock area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockLayout {
    #[serde(default = "default_major_version", deserialize_with = "major_or_default")]
    pub major_version: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub minor_version: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_node: Option<DockLayoutNode>,
}

impl Default for DockLayout {
    fn default() -> Self {
        Self {
            major_version: CURRENT_MAJOR_VERSION,
            minor_version: CURRENT_MINOR_VERSION,
            root_node: None,
        }
    }
}

/// A persisted node, discriminated by `$type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "$type", rename_all = "camelCase")]
pub enum DockLayoutNode {
    Split(DockLayoutSplit),
    Tab(DockLayoutTab),
}

impl DockLayoutNode {
    pub fn id(&self) -> Option<&str> {
        match self {
            DockLayoutNode::Split(split) => split.id.as_deref(),
            DockLayoutNode::Tab(tab) => tab.id.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockLayoutSplit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub orientation: Orientation,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<DockLayoutNode>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sizes: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockLayoutTab {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tools: Vec<DockLayoutTool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockLayoutTool {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(default = "default_true", deserialize_with = "true_if_null")]
    pub can_close: bool,
    #[serde(default = "default_true", deserialize_with = "true_if_null")]
    pub can_pin: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_closed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_pinned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Default for DockLayoutTool {
    fn default() -> Self {
        Self {
            id: String::new(),
            header: None,
            can_close: true,
            can_pin: true,
            is_closed: false,
            is_pinned: false,
            title: None,
        }
    }
}

// ============================================================================
// Read defaults (explicit nulls read like absent fields)
// ============================================================================

fn default_true() -> bool {
    true
}

fn default_major_version() -> i32 {
    CURRENT_MAJOR_VERSION
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn true_if_null<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

fn major_or_default<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i32>::deserialize(deserializer)?.unwrap_or(CURRENT_MAJOR_VERSION))
}
