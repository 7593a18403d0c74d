//! Graph store
//!
//! Holds identities, resources and the typed edges between them, with
//! adjacency indices for constant-time node lookup and degree-bounded edge
//! lookup. Insertion is idempotent and infallible; there is no removal.

mod store;


pub use store::AccessGraph;
