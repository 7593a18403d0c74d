//! # Access Graph
//!
//! Cloud-resource access modeled as a directed, typed graph of identities and
//! resources.
//!
//! ## Features
//!
//! - **Graph store** with `(kind, id)` node identity and adjacency indices
//! - **Hierarchy resolution**: ancestor chains with multiple-parent detection,
//!   descendant expansion with a concurrent cache
//! - **Effective permissions**: direct grants inherited down the containment
//!   hierarchy, with optional group membership expansion
//!
//! ## Example
//!
//! ```rust
//! use accessgraph::{AccessGraph, Edge, HierarchyResolver, Node, NodeKind, PermissionResolver};
//!
//! let org = Node::new(NodeKind::Organization, "1066060271767");
//! let folder = Node::new(NodeKind::Folder, "767216091627");
//! let project = Node::new(NodeKind::Project, "185023072868");
//! let ron = Node::new(NodeKind::User, "ron@test.authomize.com");
//!
//! let mut graph = AccessGraph::new();
//! graph.insert_edge(Edge::containment(org.clone(), folder.clone()));
//! graph.insert_edge(Edge::containment(folder.clone(), project.clone()));
//! graph.insert_edge(Edge::grant(ron.clone(), folder.clone(), "roles/owner"));
//!
//! let hierarchy = HierarchyResolver::new(&graph);
//! assert_eq!(hierarchy.ancestors(&project)?, vec![&folder, &org]);
//!
//! let permissions = PermissionResolver::new(&graph).effective_permissions(&ron);
//! assert_eq!(permissions.len(), 2);
//! # Ok::<(), accessgraph::GraphError>(())
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod hierarchy;
pub mod permissions;
pub mod types;

// Re-export commonly used types
pub use config::{GrantIdentity, GraphConfig, MembershipMode, ResolverConfig};
pub use error::{GraphError, Result};
pub use graph::AccessGraph;
pub use hierarchy::{CacheStats, HierarchyResolver};
pub use permissions::{EffectivePermission, PermissionResolver};
pub use types::{
    Attributes, Direction, Edge, EdgeKind, Node, NodeCategory, NodeKey, NodeKind, ROLE_ATTRIBUTE,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
