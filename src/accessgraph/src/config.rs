//! Graph and resolver configuration

use crate::error::{GraphError, Result};
use crate::types::EdgeKind;
use serde::{Deserialize, Serialize};

/// How grant edges between the same identity and resource are told apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantIdentity {
    /// `(source, destination, kind, role)`: distinct roles on one resource coexist
    #[default]
    ByRole,
    /// `(source, destination, kind)`: a second grant with another role is dropped
    ByEndpoints,
}

/// Whether permission resolution follows membership edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipMode {
    /// Only the identity's own grants count
    #[default]
    Ignore,
    /// Groups reachable over membership edges contribute their permissions
    Expand,
}

/// Graph store configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Edge identity rule for grant edges
    pub grant_identity: GrantIdentity,
}

impl GraphConfig {
    /// Configuration reproducing endpoint-only edge identity
    pub fn by_endpoints() -> Self {
        Self {
            grant_identity: GrantIdentity::ByEndpoints,
        }
    }

    pub(crate) fn keys_by_role(&self) -> bool {
        self.grant_identity == GrantIdentity::ByRole
    }
}

/// Hierarchy and permission resolver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Edge kind forming the resource tree
    pub containment_kind: EdgeKind,

    /// Edge kind carrying roles from identities to resources
    pub grant_kind: EdgeKind,

    /// Edge kind linking members to groups
    pub membership_kind: EdgeKind,

    /// Membership projection for permission resolution
    pub membership_mode: MembershipMode,

    /// Memoize descendant walks
    pub enable_cache: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            containment_kind: EdgeKind::Containment,
            grant_kind: EdgeKind::Grant,
            membership_kind: EdgeKind::Membership,
            membership_mode: MembershipMode::Ignore,
            enable_cache: true,
        }
    }
}

impl ResolverConfig {
    /// Parse a configuration from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| GraphError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Enable membership projection
    pub fn with_membership_mode(mut self, mode: MembershipMode) -> Self {
        self.membership_mode = mode;
        self
    }

    /// Toggle the descendant cache
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.enable_cache = enabled;
        self
    }

    /// Reject configurations where one edge kind plays two roles
    pub fn validate(&self) -> Result<()> {
        if self.containment_kind == self.grant_kind {
            return Err(GraphError::InvalidConfig(format!(
                "containment and grant edge kinds must differ (both '{}')",
                self.grant_kind
            )));
        }

        if self.membership_kind == self.containment_kind || self.membership_kind == self.grant_kind
        {
            return Err(GraphError::InvalidConfig(format!(
                "membership edge kind '{}' is already used for containment or grants",
                self.membership_kind
            )));
        }

        Ok(())
    }
}
