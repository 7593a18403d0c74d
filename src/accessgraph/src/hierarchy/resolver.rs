//! Hierarchy resolver over containment edges
//!
//! Walks the containment tree upward (ancestors) and downward (descendants).
//! Both walks are iterative with explicit state so deep hierarchies cannot
//! exhaust the call stack.

use crate::config::ResolverConfig;
use crate::error::{GraphError, Result};
use crate::graph::AccessGraph;
use crate::types::{EdgeKind, Node, NodeKey, NodeKind};
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{trace, warn};

/// Statistics about descendant cache usage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
    /// Total number of entries in cache
    pub entries: usize,
}

impl CacheStats {
    /// Calculates the cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Resolves ancestor chains and descendant sets in a borrowed graph
///
/// The resolver borrows the graph immutably, so the graph cannot change while
/// the resolver (and its cache) is alive. It is `Sync` and can be shared by
/// reader threads.
///
/// # Examples
///
/// ```
/// use accessgraph::{AccessGraph, Edge, HierarchyResolver, Node, NodeKind};
///
/// let org = Node::new(NodeKind::Organization, "org");
/// let folder = Node::new(NodeKind::Folder, "folder");
/// let project = Node::new(NodeKind::Project, "project");
///
/// let mut graph = AccessGraph::new();
/// graph.insert_edge(Edge::containment(org.clone(), folder.clone()));
/// graph.insert_edge(Edge::containment(folder.clone(), project.clone()));
///
/// let resolver = HierarchyResolver::new(&graph);
/// let chain = resolver.ancestors(&project).unwrap();
/// assert_eq!(chain, vec![&folder, &org]);
/// assert_eq!(resolver.descendants(&org).len(), 2);
/// ```
#[derive(Debug)]
pub struct HierarchyResolver<'g> {
    graph: &'g AccessGraph,

    /// Edge kind forming the tree
    containment_kind: EdgeKind,

    /// Whether descendant walks are memoized
    enable_cache: bool,

    /// Descendants by start node
    descendant_cache: DashMap<NodeKey, Arc<Vec<&'g Node>>>,

    /// Cache statistics
    stats: DashMap<&'static str, usize>,
}

impl<'g> HierarchyResolver<'g> {
    /// Creates a resolver with the default configuration
    pub fn new(graph: &'g AccessGraph) -> Self {
        Self::with_config(graph, &ResolverConfig::default())
    }

    /// Creates a resolver using the containment kind and cache setting of `config`
    pub fn with_config(graph: &'g AccessGraph, config: &ResolverConfig) -> Self {
        Self {
            graph,
            containment_kind: config.containment_kind,
            enable_cache: config.enable_cache,
            descendant_cache: DashMap::new(),
            stats: DashMap::new(),
        }
    }

    /// Like [`with_config`](Self::with_config), validating the configuration first
    pub fn try_with_config(graph: &'g AccessGraph, config: &ResolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(graph, config))
    }

    /// Graph this resolver reads from
    pub fn graph(&self) -> &'g AccessGraph {
        self.graph
    }

    /// Edge kind walked as containment
    pub fn containment_kind(&self) -> EdgeKind {
        self.containment_kind
    }

    /// Ancestors of `node`, nearest parent first and root last
    ///
    /// Unknown nodes and roots have no ancestors. If the walk reaches a node
    /// it has already passed through, that node closes the chain.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::StructuralViolation`] if any node on the chain has
    /// more than one parent. No partial chain is returned.
    pub fn ancestors<K: AsRef<NodeKey> + ?Sized>(&self, node: &K) -> Result<Vec<&'g Node>> {
        let Some(start) = self.graph.node(node.as_ref()) else {
            return Ok(Vec::new());
        };

        let mut ancestors = Vec::new();
        let mut visited: HashSet<&NodeKey> = HashSet::from([start.key()]);
        let mut current = start.key();

        loop {
            let mut parents = self.graph.incoming_of(current, self.containment_kind);

            let parent = match (parents.next(), parents.next()) {
                (None, _) => break,
                (Some(edge), None) => &edge.source,
                (Some(first), Some(second)) => {
                    let parents: Vec<NodeKey> = [first, second]
                        .into_iter()
                        .chain(parents)
                        .map(|edge| edge.source.key().clone())
                        .collect();

                    warn!(
                        "Multiple parents found for {}: {} parents over {}",
                        current,
                        parents.len(),
                        self.containment_kind
                    );

                    return Err(GraphError::StructuralViolation {
                        node: current.clone(),
                        parents,
                    });
                }
            };

            ancestors.push(parent);

            if !visited.insert(parent.key()) {
                warn!(
                    "Containment cycle through {} while resolving ancestors of {}",
                    parent, start
                );
                break;
            }

            current = parent.key();
        }

        Ok(ancestors)
    }

    /// Ancestors of the node with the given kind and id
    ///
    /// An unknown node yields an empty chain.
    pub fn ancestors_by_id(&self, kind: NodeKind, id: &str) -> Result<Vec<&'g Node>> {
        match self.graph.find_node(kind, id) {
            Some(node) => self.ancestors(node),
            None => Ok(Vec::new()),
        }
    }

    /// Top of the containment chain of `node`
    ///
    /// A root is its own root. Returns `None` for unknown nodes.
    pub fn root_of<K: AsRef<NodeKey> + ?Sized>(&self, node: &K) -> Result<Option<&'g Node>> {
        let Some(start) = self.graph.node(node.as_ref()) else {
            return Ok(None);
        };

        Ok(Some(self.ancestors(start)?.pop().unwrap_or(start)))
    }

    /// Every node reachable from `node` over containment edges
    ///
    /// The start node is never included and each node appears once. Order is
    /// depth-first discovery order, children in edge insertion order. Leaves
    /// and unknown nodes yield an empty sequence.
    ///
    /// This walk does not check the tree invariant.
    pub fn descendants<K: AsRef<NodeKey> + ?Sized>(&self, node: &K) -> Vec<&'g Node> {
        let key = node.as_ref();

        if !self.enable_cache {
            return self.descendants_uncached(key);
        }

        if let Some(cached) = self.descendant_cache.get(key) {
            self.increment_stat("hits");
            trace!("Descendant cache hit for {}", key);
            return cached.value().to_vec();
        }
        self.increment_stat("misses");

        let descendants = self.descendants_uncached(key);
        self.descendant_cache
            .insert(key.clone(), Arc::new(descendants.clone()));

        descendants
    }

    fn descendants_uncached(&self, key: &NodeKey) -> Vec<&'g Node> {
        let Some(start) = self.graph.node(key) else {
            return Vec::new();
        };

        let mut descendants = Vec::new();
        let mut visited: HashSet<&NodeKey> = HashSet::from([start.key()]);
        let mut stack = vec![start];

        while let Some(current) = stack.pop() {
            for edge in self.graph.outgoing_of(current.key(), self.containment_kind) {
                let child = &edge.destination;
                if visited.insert(child.key()) {
                    descendants.push(child);
                    stack.push(child);
                }
            }
        }

        descendants
    }

    /// Returns cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.get_stat("hits"),
            misses: self.get_stat("misses"),
            entries: self.descendant_cache.len(),
        }
    }

    /// Clears cached descendant sets and statistics
    pub fn clear_cache(&self) {
        self.descendant_cache.clear();
        self.stats.clear();
    }

    /// Increments a statistic counter
    fn increment_stat(&self, key: &'static str) {
        self.stats
            .entry(key)
            .and_modify(|count| *count += 1)
            .or_insert(1);
    }

    /// Gets a statistic value
    fn get_stat(&self, key: &'static str) -> usize {
        self.stats.get(key).map(|v| *v).unwrap_or(0)
    }
}
