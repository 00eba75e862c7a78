//! # Driving Ports (API - Inbound)
//!
//! The authorization interface issuance containers depend on. Containers
//! consume this port rather than the concrete registry so tests can
//! substitute permissive or denying authorities.

use imprint_types::{Address, NodeId};

/// Address-level authorization query against the node graph.
pub trait NodeAuthority: Send + Sync {
    /// True iff `address` may manage `node`: it resolves to the node's
    /// owner or the group node's owner, or it is a controller of either.
    fn is_authorized_address_for_node(&self, node: NodeId, address: Address) -> bool;
}

// =============================================================================
// TESTS
// =============================================================================
