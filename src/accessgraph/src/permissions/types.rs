//! Effective permission type

use crate::types::{Node, NodeKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A role an identity holds on a resource, directly or through inheritance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectivePermission {
    /// Id of the resource the role applies to
    pub resource_id: String,

    /// Kind of that resource
    pub resource_kind: NodeKind,

    /// Role, exactly as carried by the grant edge
    pub role: String,
}

impl EffectivePermission {
    /// Create a permission entry
    pub fn new(
        resource_id: impl Into<String>,
        resource_kind: NodeKind,
        role: impl Into<String>,
    ) -> Self {
        Self {
            resource_id: resource_id.into(),
            resource_kind,
            role: role.into(),
        }
    }

    pub(crate) fn on(resource: &Node, role: &str) -> Self {
        Self::new(resource.id(), resource.kind(), role)
    }

    /// `(resource_id, resource_kind, role)` with the kind as its string tag
    pub fn as_tuple(&self) -> (&str, &str, &str) {
        (&self.resource_id, self.resource_kind.as_str(), &self.role)
    }
}

impl fmt::Display for EffectivePermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.resource_id, self.resource_kind, self.role)
    }
}
