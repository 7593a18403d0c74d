//! Effective permissions
//!
//! Composes direct grant edges with descendant expansion over the
//! containment hierarchy. A grant on a folder is a grant on everything below
//! it, with the role carried over unchanged.

mod resolver;
mod types;


pub use resolver::PermissionResolver;
pub use types::EffectivePermission;
