//! Graph store with adjacency indices
//!
//! The store owns every node and edge. Nodes live in insertion order and are
//! indexed by [`NodeKey`]; edges live in insertion order and are indexed by their
//! identity key plus two adjacency lists (outgoing by source, incoming by
//! destination). Nothing is ever removed, so positions stay valid for the
//! lifetime of the store.

use crate::config::GraphConfig;
use crate::types::{Direction, Edge, EdgeKey, EdgeKind, Node, NodeKey, NodeKind};
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Directed, typed graph of identities and resources
///
/// # Example
///
/// ```rust
/// use accessgraph::{AccessGraph, Edge, EdgeKind, Node, NodeKind};
///
/// let mut graph = AccessGraph::new();
/// let org = Node::new(NodeKind::Organization, "1066060271767");
/// let folder = Node::new(NodeKind::Folder, "767216091627");
///
/// graph.insert_edge(Edge::containment(org.clone(), folder));
///
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.outgoing_edges(&org, Some(EdgeKind::Containment)).len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AccessGraph {
    config: GraphConfig,

    /// Canonical node instances in insertion order
    nodes: Vec<Node>,

    /// Position of each node in `nodes`
    node_index: HashMap<NodeKey, usize>,

    /// Edges in insertion order
    edges: Vec<Edge>,

    /// Identity keys of stored edges
    edge_keys: HashSet<EdgeKey>,

    /// Positions in `edges`, by source node
    outgoing: HashMap<NodeKey, Vec<usize>>,

    /// Positions in `edges`, by destination node
    incoming: HashMap<NodeKey, Vec<usize>>,
}

impl AccessGraph {
    /// Create an empty graph keying grant edges by role
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with the given configuration
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Configuration the graph was built with
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Insert a node if no node with the same key exists
    ///
    /// Returns `true` if the node was added. An existing node keeps its
    /// attributes.
    pub fn insert_node(&mut self, node: Node) -> bool {
        if self.node_index.contains_key(node.key()) {
            trace!("Node {} already present", node);
            return false;
        }

        let key = node.key().clone();
        self.node_index.insert(key.clone(), self.nodes.len());
        self.outgoing.entry(key.clone()).or_default();
        self.incoming.entry(key).or_default();
        self.nodes.push(node);
        true
    }

    /// Insert an edge, adding missing endpoints first
    ///
    /// Returns `true` if the edge was added. The stored edge refers to the
    /// canonical endpoint instances held by the graph.
    pub fn insert_edge(&mut self, mut edge: Edge) -> bool {
        self.insert_node(edge.source.clone());
        self.insert_node(edge.destination.clone());

        let key = EdgeKey::new(&edge, self.config.keys_by_role());
        if !self.edge_keys.insert(key) {
            trace!("{} already present", edge);
            return false;
        }

        edge.source = self.canonical(edge.source.key()).clone();
        edge.destination = self.canonical(edge.destination.key()).clone();

        let position = self.edges.len();
        self.outgoing
            .entry(edge.source.key().clone())
            .or_default()
            .push(position);
        self.incoming
            .entry(edge.destination.key().clone())
            .or_default()
            .push(position);
        self.edges.push(edge);
        true
    }

    /// Look up a node by kind and id
    pub fn find_node(&self, kind: NodeKind, id: &str) -> Option<&Node> {
        self.node(&NodeKey::new(kind, id))
    }

    /// Look up a node by key
    pub fn node(&self, key: &NodeKey) -> Option<&Node> {
        self.node_index.get(key).map(|&idx| &self.nodes[idx])
    }

    /// Whether a node with this key exists
    pub fn contains_node<K: AsRef<NodeKey> + ?Sized>(&self, node: &K) -> bool {
        self.node_index.contains_key(node.as_ref())
    }

    /// Outgoing edges of `node`, optionally restricted to one kind
    ///
    /// Unknown nodes have no edges.
    pub fn outgoing_edges<K: AsRef<NodeKey> + ?Sized>(
        &self,
        node: &K,
        kind: Option<EdgeKind>,
    ) -> Vec<&Edge> {
        self.edges_from(&self.outgoing, node.as_ref(), kind).collect()
    }

    /// Incoming edges of `node`, optionally restricted to one kind
    pub fn incoming_edges<K: AsRef<NodeKey> + ?Sized>(
        &self,
        node: &K,
        kind: Option<EdgeKind>,
    ) -> Vec<&Edge> {
        self.edges_from(&self.incoming, node.as_ref(), kind).collect()
    }

    /// Nodes adjacent to `node` in the given direction
    ///
    /// Duplicates are collapsed by node identity; the result keeps first-seen
    /// order, outgoing neighbors before incoming ones.
    pub fn neighbors<K: AsRef<NodeKey> + ?Sized>(
        &self,
        node: &K,
        kind: Option<EdgeKind>,
        direction: Direction,
    ) -> Vec<&Node> {
        let key = node.as_ref();
        let mut seen: HashSet<&NodeKey> = HashSet::new();
        let mut neighbors = Vec::new();

        if direction.includes_outgoing() {
            for edge in self.edges_from(&self.outgoing, key, kind) {
                if seen.insert(edge.destination.key()) {
                    neighbors.push(self.canonical(edge.destination.key()));
                }
            }
        }

        if direction.includes_incoming() {
            for edge in self.edges_from(&self.incoming, key, kind) {
                if seen.insert(edge.source.key()) {
                    neighbors.push(self.canonical(edge.source.key()));
                }
            }
        }

        neighbors
    }

    /// Number of distinct nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// All edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Whether the graph holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn edges_from<'a>(
        &'a self,
        index: &'a HashMap<NodeKey, Vec<usize>>,
        key: &NodeKey,
        kind: Option<EdgeKind>,
    ) -> impl Iterator<Item = &'a Edge> + 'a {
        index
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(move |&idx| &self.edges[idx])
            .filter(move |edge| kind.map_or(true, |k| edge.kind == k))
    }

    pub(crate) fn outgoing_of<'a>(
        &'a self,
        key: &NodeKey,
        kind: EdgeKind,
    ) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges_from(&self.outgoing, key, Some(kind))
    }

    pub(crate) fn incoming_of<'a>(
        &'a self,
        key: &NodeKey,
        kind: EdgeKind,
    ) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges_from(&self.incoming, key, Some(kind))
    }

    /// Canonical instance of a node known to be stored
    fn canonical(&self, key: &NodeKey) -> &Node {
        &self.nodes[self.node_index[key]]
    }
}

impl Extend<Node> for AccessGraph {
    fn extend<I: IntoIterator<Item = Node>>(&mut self, iter: I) {
        for node in iter {
            self.insert_node(node);
        }
    }
}

impl Extend<Edge> for AccessGraph {
    fn extend<I: IntoIterator<Item = Edge>>(&mut self, iter: I) {
        for edge in iter {
            self.insert_edge(edge);
        }
    }
}

impl FromIterator<Edge> for AccessGraph {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}
