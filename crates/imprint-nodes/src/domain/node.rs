//! # Node Entity
//!
//! A node is the unit of authorization: an entry in the ownership forest
//! with an owning account, an optional parent, and an optional group node
//! acting as a secondary authorization anchor.

use imprint_types::{AccountId, Address, NodeId};
use serde::{Deserialize, Serialize};

/// An entry in the ownership/delegation forest.
///
/// A node's owner need not match its parent's or group's owner; the group
/// node is an independent authorization anchor. Controller delegations are
/// tracked by the registry, not on the entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Registry-assigned id, starting at 1.
    pub id: NodeId,
    /// Caller-chosen type tag. Never zero.
    pub node_type: u16,
    /// Owning account, if any.
    pub owner: Option<AccountId>,
    /// Parent node, if any.
    pub parent: Option<NodeId>,
    /// Group node, if any. A secondary authorization anchor independent of
    /// the parent.
    pub group_node: Option<NodeId>,
}

/// Parameters for creating a node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNode {
    /// Type tag for the new node. Must be non-zero.
    pub node_type: u16,
    /// Owning account. Must match the caller's account when set.
    pub owner: Option<AccountId>,
    /// Parent node. Must exist and be manageable by the caller when set.
    pub parent: Option<NodeId>,
    /// Group node. Must exist and be manageable by the caller when set.
    pub group_node: Option<NodeId>,
    /// Addresses registered as controllers of the new node.
    pub initial_controllers: Vec<Address>,
    /// Metadata carried on the creation event.
    pub metadata: String,
}

impl Default for CreateNode {
    fn default() -> Self {
        Self {
            node_type: 1,
            owner: None,
            parent: None,
            group_node: None,
            initial_controllers: Vec::new(),
            metadata: String::new(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
