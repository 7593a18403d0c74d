//! Core graph types: kinds, node identity, nodes, edges

use crate::error::GraphError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Auxiliary metadata carried by nodes and edges, never interpreted by the core
pub type Attributes = HashMap<String, String>;

/// Attribute holding the role of a grant edge
pub const ROLE_ATTRIBUTE: &str = "role";

/// Declares a closed kind enum together with its lookup table.
///
/// Each row is `Variant => ("tag", info)`. The tag is the stable string form used
/// by `Display`, `FromStr` and serde; `info` is the per-kind data read through
/// `Self::info`. Adding a kind means adding one row.
macro_rules! kind_table {
    (
        $(#[$enum_meta:meta])*
        pub enum $name:ident => $info:ty {
            $( $(#[$meta:meta])* $variant:ident => ($tag:literal, $value:expr) ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$meta])*
                #[serde(rename = $tag)]
                $variant,
            )+
        }

        impl $name {
            /// Every declared kind, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            const TABLE: &'static [(&'static str, $info)] = &[$(($tag, $value)),+];

            /// Stable string tag of this kind
            pub fn as_str(self) -> &'static str {
                Self::TABLE[self as usize].0
            }

            fn info(self) -> $info {
                Self::TABLE[self as usize].1
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = GraphError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::TABLE
                    .iter()
                    .position(|(tag, _)| *tag == s)
                    .map(|idx| Self::ALL[idx])
                    .ok_or_else(|| GraphError::UnknownKind(s.to_string()))
            }
        }
    };
}

/// Broad classification of node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    /// Something that can hold a grant (user, group, ...)
    Identity,
    /// Something a grant is held on (folder, project, ...)
    Resource,
}

kind_table! {
    /// Node kind
    pub enum NodeKind => NodeCategory {
        User => ("user", NodeCategory::Identity),
        ServiceAccount => ("service_account", NodeCategory::Identity),
        Group => ("group", NodeCategory::Identity),
        Domain => ("domain", NodeCategory::Identity),
        Organization => ("organization", NodeCategory::Resource),
        Folder => ("folder", NodeCategory::Resource),
        Project => ("project", NodeCategory::Resource),
        Bucket => ("bucket", NodeCategory::Resource),
        BillingAccount => ("billing_account", NodeCategory::Resource),
    }
}

impl NodeKind {
    /// Category of this kind
    pub fn category(self) -> NodeCategory {
        self.info()
    }

    /// Whether nodes of this kind are identities
    pub fn is_identity(self) -> bool {
        self.category() == NodeCategory::Identity
    }

    /// Whether nodes of this kind are resources
    pub fn is_resource(self) -> bool {
        self.category() == NodeCategory::Resource
    }
}

kind_table! {
    /// Edge kind
    ///
    /// The table column is the attribute that distinguishes otherwise identical
    /// edges of this kind when the graph keys edges by role.
    pub enum EdgeKind => Option<&'static str> {
        /// Parent to child in the resource hierarchy
        Containment => ("parent_child", None),
        /// Identity holds a role on a resource
        Grant => ("permission", Some(ROLE_ATTRIBUTE)),
        /// User is a member of a group
        Membership => ("member", None),
    }
}

impl EdgeKind {
    /// Attribute that is part of this kind's identity under role keying
    pub fn keyed_attribute(self) -> Option<&'static str> {
        self.info()
    }
}

/// Which side of a node's adjacency a neighbor query looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Destinations of outgoing edges
    #[default]
    Outgoing,
    /// Sources of incoming edges
    Incoming,
    /// Both of the above
    Both,
}

impl Direction {
    pub(crate) fn includes_outgoing(self) -> bool {
        matches!(self, Self::Outgoing | Self::Both)
    }

    pub(crate) fn includes_incoming(self) -> bool {
        matches!(self, Self::Incoming | Self::Both)
    }
}

/// Identity of a node: ids are unique only within a kind
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeKey {
    /// Node kind
    pub kind: NodeKind,
    /// Identifier, unique within `kind`
    pub id: String,
}

impl NodeKey {
    /// Create a new key
    pub fn new(kind: NodeKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.id)
    }
}

impl AsRef<NodeKey> for NodeKey {
    fn as_ref(&self) -> &NodeKey {
        self
    }
}

/// Identity or resource in the graph
///
/// Equality and hashing look at the key only; attributes never distinguish nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    #[serde(flatten)]
    key: NodeKey,

    /// Auxiliary metadata (display name, labels, ...)
    #[serde(default)]
    pub attributes: Attributes,
}

impl Node {
    /// Create a node with no attributes
    pub fn new(kind: NodeKind, id: impl Into<String>) -> Self {
        Self {
            key: NodeKey::new(kind, id),
            attributes: Attributes::new(),
        }
    }

    /// Add an attribute to the node
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Identity key of the node
    pub fn key(&self) -> &NodeKey {
        &self.key
    }

    /// Kind of the node
    pub fn kind(&self) -> NodeKind {
        self.key.kind
    }

    /// Identifier, unique within the node's kind
    pub fn id(&self) -> &str {
        &self.key.id
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl AsRef<NodeKey> for Node {
    fn as_ref(&self) -> &NodeKey {
        &self.key
    }
}

impl Borrow<NodeKey> for Node {
    fn borrow(&self) -> &NodeKey {
        &self.key
    }
}

impl From<NodeKey> for Node {
    fn from(key: NodeKey) -> Self {
        Self {
            key,
            attributes: Attributes::new(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.key.fmt(f)
    }
}

/// Directed, typed relationship between two nodes
///
/// Equality and hashing follow edge identity: endpoints, kind, and the
/// kind's keyed attribute (`role` for grants). Other attributes are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Source node (parent, grantee or member)
    pub source: Node,

    /// Destination node (child, granted resource or group)
    pub destination: Node,

    /// Edge kind
    pub kind: EdgeKind,

    /// Edge metadata; grant edges carry `role`
    #[serde(default)]
    pub attributes: Attributes,
}

impl Edge {
    /// Create an edge with no attributes
    pub fn new(source: Node, destination: Node, kind: EdgeKind) -> Self {
        Self {
            source,
            destination,
            kind,
            attributes: Attributes::new(),
        }
    }

    /// Containment edge from `parent` to `child`
    pub fn containment(parent: Node, child: Node) -> Self {
        Self::new(parent, child, EdgeKind::Containment)
    }

    /// Grant edge giving `identity` the `role` on `resource`
    pub fn grant(identity: Node, resource: Node, role: impl Into<String>) -> Self {
        Self::new(identity, resource, EdgeKind::Grant).with_attribute(ROLE_ATTRIBUTE, role)
    }

    /// Membership edge from `member` to `group`
    pub fn membership(member: Node, group: Node) -> Self {
        Self::new(member, group, EdgeKind::Membership)
    }

    /// Add an attribute to the edge
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Role carried by this edge, if any
    pub fn role(&self) -> Option<&str> {
        self.attributes.get(ROLE_ATTRIBUTE).map(String::as_str)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        EdgeKey::new(self, true) == EdgeKey::new(other, true)
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        EdgeKey::new(self, true).hash(state);
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Edge({} -> {}, type={})",
            self.source.id(),
            self.destination.id(),
            self.kind
        )
    }
}

/// Identity of an edge inside the store
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct EdgeKey {
    source: NodeKey,
    destination: NodeKey,
    kind: EdgeKind,
    /// Value of the kind's keyed attribute when the graph keys by it
    discriminator: Option<String>,
}

impl EdgeKey {
    pub(crate) fn new(edge: &Edge, keyed: bool) -> Self {
        let discriminator = if keyed {
            edge.kind
                .keyed_attribute()
                .and_then(|attr| edge.attributes.get(attr).cloned())
        } else {
            None
        };

        Self {
            source: edge.source.key().clone(),
            destination: edge.destination.key().clone(),
            kind: edge.kind,
            discriminator,
        }
    }
}
