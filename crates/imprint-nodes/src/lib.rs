//! # Imprint Nodes - Ownership & Delegation Graph
//!
//! Maintains a forest of nodes. Each node has an owning account, an optional
//! parent, an optional group node, and a set of delegated controller
//! addresses. Every other subsystem answers "may this actor manage that
//! resource?" through this crate's authorization predicate.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Node ids assigned monotonically from 1 | `NodeRegistry::create_node` |
//! | Parent/group must exist at creation | `NodeRegistry::create_node` |
//! | Authorization is a fixed two-hop lookup, O(1) | `NodeRegistry::is_authorized_*` |
//! | Owner changes are two-phase with a pending recipient | `start_node_owner_transfer` / `complete_node_owner_transfer` |
//! | Nodes are never destroyed | no removal path exists |
//!
//! The authorization predicate never walks the graph recursively: it checks
//! the node's owner, the group node's owner, and the two controller sets,
//! so delegation cycles cannot cause unbounded traversal.

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod registry;

pub use adapters::SharedNodeAuthority;
pub use domain::node::{CreateNode, Node};
pub use errors::NodeError;
pub use events::NodeEvent;
pub use ports::NodeAuthority;
pub use registry::NodeRegistry;
