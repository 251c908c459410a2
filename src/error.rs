//! Error types for layout edits and persistence

use thiserror::Error;

use crate::model::{NodeKey, ToolKey};

/// Errors produced by the dock layout core
///
/// All failures are synchronous and local to the call that raised them.
/// None of the operations that return a `DockError` leave a partially edited tree.
#[derive(Debug, Error)]
pub enum DockError {
    /// A required input was empty or malformed (tool id, path, ...)
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// A persisted layout without a root node
    #[error("layout has no root node")]
    MissingRootNode,

    /// Persisted layout written by an incompatible major version
    #[error("unsupported layout version {major}.{minor}")]
    UnsupportedVersion { major: i32, minor: i32 },

    /// Insert policy `Error` and the requested parent could not be resolved
    #[error("parent node {} could not be found", .0.as_deref().unwrap_or("<none>"))]
    ParentNotFound(Option<String>),

    /// No node with this key is reachable from the root
    #[error("node {0} is not part of the layout")]
    NodeNotFound(NodeKey),

    /// The node exists but is a split where a tab group was required
    #[error("node {0} is not a tab group")]
    NotATabNode(NodeKey),

    /// No tool with this key is reachable from the root
    #[error("tool {0} is not part of the layout")]
    ToolNotFound(ToolKey),

    /// The tree violates a structural invariant (e.g. a tab group below the
    /// root without a parent split)
    #[error("layout invariant violated: {0}")]
    Structure(String),

    /// The persisted document deserialized to nothing (`null`)
    #[error("could not deserialize a dock layout from the input")]
    EmptyLayout,

    /// Malformed persisted data, propagated unchanged
    #[error(transparent)]
    Parse(#[from] serde_json::Error),

    /// Underlying I/O failure at the persistence boundary
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DockError {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_not_found_message_names_parent() {
        let err = DockError::ParentNotFound(Some("left-panel".to_string()));
        assert_eq!(err.to_string(), "parent node left-panel could not be found");

        let err = DockError::ParentNotFound(None);
        assert_eq!(err.to_string(), "parent node <none> could not be found");
    }

    #[test]
    fn test_parse_error_is_transparent() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let expected = parse.to_string();
        let err = DockError::from(parse);
        assert_eq!(err.to_string(), expected);
    }
}
