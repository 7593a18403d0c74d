//! Effective permission resolution
//!
//! Expands every grant held by an identity down the containment hierarchy.
//! Membership edges are followed only when the resolver is configured to
//! expand them.

use super::types::EffectivePermission;
use crate::config::{MembershipMode, ResolverConfig};
use crate::error::Result;
use crate::graph::AccessGraph;
use crate::hierarchy::HierarchyResolver;
use crate::types::{EdgeKind, Node, NodeKey, NodeKind};
use std::collections::HashSet;
use tracing::debug;

/// Resolves the permissions an identity holds, including inherited ones
///
/// # Example
///
/// ```rust
/// use accessgraph::{AccessGraph, Edge, Node, NodeKind, PermissionResolver};
///
/// let alice = Node::new(NodeKind::User, "alice@example.com");
/// let folder = Node::new(NodeKind::Folder, "engineering");
/// let project = Node::new(NodeKind::Project, "api");
///
/// let mut graph = AccessGraph::new();
/// graph.insert_edge(Edge::containment(folder.clone(), project));
/// graph.insert_edge(Edge::grant(alice.clone(), folder, "roles/viewer"));
///
/// let resolver = PermissionResolver::new(&graph);
/// let perms = resolver.effective_permissions(&alice);
///
/// assert_eq!(perms[0].as_tuple(), ("engineering", "folder", "roles/viewer"));
/// assert_eq!(perms[1].as_tuple(), ("api", "project", "roles/viewer"));
/// ```
#[derive(Debug)]
pub struct PermissionResolver<'g> {
    graph: &'g AccessGraph,

    /// Descendant expansion (and its cache)
    hierarchy: HierarchyResolver<'g>,

    /// Edge kind carrying roles
    grant_kind: EdgeKind,

    /// Edge kind linking members to groups
    membership_kind: EdgeKind,

    /// Whether group grants reach members
    membership_mode: MembershipMode,
}

impl<'g> PermissionResolver<'g> {
    /// Create a resolver with the default configuration
    pub fn new(graph: &'g AccessGraph) -> Self {
        Self::with_config(graph, &ResolverConfig::default())
    }

    /// Create a resolver with a custom configuration
    pub fn with_config(graph: &'g AccessGraph, config: &ResolverConfig) -> Self {
        Self {
            graph,
            hierarchy: HierarchyResolver::with_config(graph, config),
            grant_kind: config.grant_kind,
            membership_kind: config.membership_kind,
            membership_mode: config.membership_mode,
        }
    }

    /// Like [`with_config`](Self::with_config), validating the configuration first
    pub fn try_with_config(graph: &'g AccessGraph, config: &ResolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(graph, config))
    }

    /// The hierarchy resolver used for descendant expansion
    pub fn hierarchy(&self) -> &HierarchyResolver<'g> {
        &self.hierarchy
    }

    /// Whether `identity` exists in the graph
    ///
    /// An empty permission list does not tell an unknown identity apart from
    /// one without grants; this does.
    pub fn is_known_identity<K: AsRef<NodeKey> + ?Sized>(&self, identity: &K) -> bool {
        self.graph.contains_node(identity)
    }

    /// All permissions `identity` holds
    ///
    /// For each grant edge in insertion order, the granted resource comes first,
    /// followed by each of its descendants with the same role. Entries are not
    /// deduplicated. Unknown identities have no permissions.
    ///
    /// With [`MembershipMode::Expand`], the permissions of every group the
    /// identity reaches over membership edges follow its own.
    pub fn effective_permissions<K: AsRef<NodeKey> + ?Sized>(
        &self,
        identity: &K,
    ) -> Vec<EffectivePermission> {
        let Some(identity) = self.graph.node(identity.as_ref()) else {
            debug!("No permissions for unknown identity {}", identity.as_ref());
            return Vec::new();
        };

        let mut permissions = self.granted_to(identity);

        if self.membership_mode == MembershipMode::Expand {
            for group in self.groups_of(identity) {
                permissions.extend(self.granted_to(group));
            }
        }

        debug!(
            "Resolved {} effective permissions for {}",
            permissions.len(),
            identity
        );

        permissions
    }

    /// Permissions of the identity with the given kind and id
    pub fn effective_permissions_by_id(
        &self,
        kind: NodeKind,
        id: &str,
    ) -> Vec<EffectivePermission> {
        match self.graph.find_node(kind, id) {
            Some(identity) => self.effective_permissions(identity),
            None => Vec::new(),
        }
    }

    /// Direct grants of `identity` expanded down the hierarchy
    fn granted_to(&self, identity: &Node) -> Vec<EffectivePermission> {
        let mut permissions = Vec::new();

        for edge in self.graph.outgoing_of(identity.key(), self.grant_kind) {
            let role = edge.role().unwrap_or_default();
            let resource = &edge.destination;

            permissions.push(EffectivePermission::on(resource, role));
            permissions.extend(
                self.hierarchy
                    .descendants(resource)
                    .into_iter()
                    .map(|descendant| EffectivePermission::on(descendant, role)),
            );
        }

        permissions
    }

    /// Groups reachable from `identity` over membership edges, each once
    fn groups_of(&self, identity: &'g Node) -> Vec<&'g Node> {
        let mut groups = Vec::new();
        let mut visited: HashSet<&NodeKey> = HashSet::from([identity.key()]);
        let mut stack = vec![identity];

        while let Some(current) = stack.pop() {
            for edge in self.graph.outgoing_of(current.key(), self.membership_kind) {
                let group = &edge.destination;
                if visited.insert(group.key()) {
                    groups.push(group);
                    stack.push(group);
                }
            }
        }

        groups
    }
}
