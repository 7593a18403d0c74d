//! Error types for the access graph

use crate::types::NodeKey;
use thiserror::Error;

/// Access graph errors
///
/// Lookups never fail: unknown nodes produce `None` or an empty result.
/// The only data error is a containment relation that is not a tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphError {
    /// A node has more than one incoming containment edge
    #[error(
        "Multiple parents found for {node}: [{}]. Tree structure expected for containment edges",
        format_keys(.parents)
    )]
    StructuralViolation {
        /// The node whose parent is ambiguous
        node: NodeKey,
        /// Every conflicting parent, in edge insertion order
        parents: Vec<NodeKey>,
    },

    /// String tag that names no declared node or edge kind
    #[error("Unknown kind: {0}")]
    UnknownKind(String),

    /// Resolver configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GraphError {
    /// Whether this error reports a malformed containment hierarchy
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::StructuralViolation { .. })
    }
}

fn format_keys(keys: &[NodeKey]) -> String {
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for access graph operations
pub type Result<T> = std::result::Result<T, GraphError>;
