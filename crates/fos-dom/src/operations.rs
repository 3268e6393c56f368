//! DOM Node Operations
//!
//! Error type shared by every tree and element mutation.

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Handle does not refer to a node of this document
    #[error("Node not found: {0:?}")]
    NotFound(NodeId),

    /// Inserting a node into itself or one of its descendants, or into a leaf
    #[error("Hierarchy request error")]
    HierarchyRequest,

    /// Operation requires a different kind of node
    #[error("Invalid node type: expected {expected}")]
    InvalidNodeType { expected: &'static str },

    /// Reference node is not a child of the given parent
    #[error("Node is not a child")]
    NotAChild,

    /// Assignment to a property the element only exposes for reading
    #[error("Cannot assign to read only property '{0}'")]
    ReadOnlyProperty(String),
}
