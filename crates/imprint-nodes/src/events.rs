//! # Event Schema
//!
//! Typed journal entries emitted by every mutating node-graph operation.

use imprint_types::{AccountId, Address, NodeId};
use serde::{Deserialize, Serialize};

/// Events emitted by the node registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeEvent {
    /// A node was created.
    NodeCreated {
        /// The assigned node id.
        id: NodeId,
        /// Type tag.
        node_type: u16,
        /// Initial owner, if any.
        owner: Option<AccountId>,
        /// Parent node, if any.
        parent: Option<NodeId>,
        /// Group node, if any.
        group_node: Option<NodeId>,
        /// Metadata carried on the event only.
        metadata: String,
    },

    /// A two-phase owner transfer was started, or canceled when
    /// `to_account` is `None`.
    NodeOwnerTransferStarted {
        /// The node being transferred.
        node_id: NodeId,
        /// Pending recipient account, or `None` for a cancellation.
        to_account: Option<AccountId>,
    },

    /// A pending owner transfer was completed by its recipient.
    NodeOwnerTransferCompleted {
        /// The transferred node.
        node_id: NodeId,
        /// The new owner.
        new_owner: AccountId,
    },

    /// A node's owner was removed.
    NodeOwnerRemoved {
        /// The affected node.
        node_id: NodeId,
    },

    /// A node's parent was reassigned.
    NodeParentSet {
        /// The affected node.
        node_id: NodeId,
        /// The new parent, if any.
        parent: Option<NodeId>,
    },

    /// A node's group node was reassigned.
    NodeGroupNodeSet {
        /// The affected node.
        node_id: NodeId,
        /// The new group node, if any.
        group_node: Option<NodeId>,
    },

    /// A controller delegation changed.
    NodeControllerSet {
        /// The affected node.
        node_id: NodeId,
        /// The controller address.
        controller: Address,
        /// Whether the address is now a controller.
        enabled: bool,
    },

    /// A pure signal broadcast for a node. No state change.
    NodeBroadcast {
        /// The node broadcast against.
        node_id: NodeId,
        /// The broadcasting address.
        sender: Address,
        /// Broadcast topic.
        topic: String,
        /// Broadcast message.
        message: String,
    },
}
