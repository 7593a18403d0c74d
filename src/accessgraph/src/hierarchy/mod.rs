//! Containment hierarchy resolution
//!
//! Resolves the ancestor chain of a resource (with detection of nodes that
//! have more than one parent) and the set of resources below it. Descendant
//! sets are memoized per resolver.
//!
//! # Examples
//!
//! ```
//! use accessgraph::{AccessGraph, Edge, Node, NodeKind};
//! use accessgraph::hierarchy::HierarchyResolver;
//!
//! let mut graph = AccessGraph::new();
//! graph.insert_edge(Edge::containment(
//!     Node::new(NodeKind::Organization, "org"),
//!     Node::new(NodeKind::Project, "billing"),
//! ));
//!
//! let resolver = HierarchyResolver::new(&graph);
//! let chain = resolver.ancestors_by_id(NodeKind::Project, "billing").unwrap();
//! assert_eq!(chain[0].id(), "org");
//! ```

mod resolver;


pub use resolver::{CacheStats, HierarchyResolver};
