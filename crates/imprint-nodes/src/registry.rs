//! # Node Registry
//!
//! The ownership/delegation forest and its authorization predicate.

use crate::domain::node::{CreateNode, Node};
use crate::errors::NodeError;
use crate::events::NodeEvent;
use imprint_accounts::ports::AccountResolver;
use imprint_types::{AccountId, Address, NodeId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

/// The node registry.
///
/// Nodes are assigned monotonically from 1 and never destroyed. Controller
/// delegations and pending two-phase transfers are tracked alongside the
/// entities.
pub struct NodeRegistry {
    /// Identity resolution port.
    resolver: Arc<dyn AccountResolver>,
    /// All nodes; id N lives at index N-1.
    nodes: Vec<Node>,
    /// Delegated controller addresses per node.
    controllers: HashSet<(NodeId, Address)>,
    /// Pending recipient of a two-phase owner transfer, per node.
    pending_transfers: HashMap<NodeId, AccountId>,
    /// Journal of emitted events.
    events: Vec<NodeEvent>,
}

impl NodeRegistry {
    /// Creates a registry resolving identities through `resolver`.
    #[must_use]
    pub fn new(resolver: Arc<dyn AccountResolver>) -> Self {
        Self {
            resolver,
            nodes: Vec::new(),
            controllers: HashSet::new(),
            pending_transfers: HashMap::new(),
            events: Vec::new(),
        }
    }

    // =========================================================================
    // AUTHORIZATION PREDICATE
    // =========================================================================

    /// True iff `account` owns `node` or owns `node`'s group node.
    ///
    /// Fixed two-hop lookup; controller delegations are address-scoped and
    /// only consulted by [`Self::is_authorized_address_for_node`].
    #[must_use]
    pub fn is_authorized_account_for_node(&self, account: AccountId, node: NodeId) -> bool {
        let Some(entry) = self.node(node) else {
            return false;
        };
        if entry.owner == Some(account) {
            return true;
        }
        if let Some(group) = entry.group_node {
            if let Some(group_entry) = self.node(group) {
                if group_entry.owner == Some(account) {
                    return true;
                }
            }
        }
        false
    }

    /// True iff `address` may manage `node`: its resolved account passes the
    /// ownership hops, or the address is a controller of the node or of the
    /// node's group node.
    #[must_use]
    pub fn is_authorized_address_for_node(&self, node: NodeId, address: Address) -> bool {
        let Some(entry) = self.node(node) else {
            return false;
        };
        if self.controllers.contains(&(node, address)) {
            return true;
        }
        if let Some(group) = entry.group_node {
            if self.controllers.contains(&(group, address)) {
                return true;
            }
        }
        if let Some(account) = self.resolver.resolve(address) {
            return self.is_authorized_account_for_node(account, node);
        }
        false
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Creates a node.
    ///
    /// # Errors
    ///
    /// - [`NodeError::InvalidNodeCreate`] on a zero node type or a
    ///   parent/group reference to a node that does not exist
    /// - [`NodeError::NoAccount`] if the caller is unregistered
    /// - [`NodeError::NotAuthorizedForNode`] if the requested owner is not
    ///   the caller's account, or the caller is not authorized over the
    ///   requested parent or group
    pub fn create_node(&mut self, caller: Address, params: CreateNode) -> Result<NodeId, NodeError> {
        if params.node_type == 0 {
            return Err(NodeError::InvalidNodeCreate);
        }
        let account = self
            .resolver
            .resolve(caller)
            .ok_or(NodeError::NoAccount(caller))?;
        if let Some(owner) = params.owner {
            if owner != account {
                return Err(NodeError::NotAuthorizedForNode);
            }
        }
        for anchor in [params.parent, params.group_node].into_iter().flatten() {
            if self.node(anchor).is_none() {
                return Err(NodeError::InvalidNodeCreate);
            }
            if !self.is_authorized_address_for_node(anchor, caller) {
                return Err(NodeError::NotAuthorizedForNode);
            }
        }

        let id = NodeId::new(self.nodes.len() as u64 + 1);
        self.nodes.push(Node {
            id,
            node_type: params.node_type,
            owner: params.owner,
            parent: params.parent,
            group_node: params.group_node,
        });
        self.events.push(NodeEvent::NodeCreated {
            id,
            node_type: params.node_type,
            owner: params.owner,
            parent: params.parent,
            group_node: params.group_node,
            metadata: params.metadata,
        });
        for controller in params.initial_controllers {
            self.controllers.insert((id, controller));
            self.events.push(NodeEvent::NodeControllerSet {
                node_id: id,
                controller,
                enabled: true,
            });
        }
        info!(%id, owner = ?params.owner, "node created");
        Ok(id)
    }

    /// Starts (or, with `to = None`, cancels) a two-phase owner transfer.
    /// Ownership is unchanged until the recipient completes.
    ///
    /// # Errors
    ///
    /// - [`NodeError::NoAccount`] if the caller is unregistered
    /// - [`NodeError::NotAuthorizedForNode`] unless the caller is authorized
    ///   over `node`
    pub fn start_node_owner_transfer(
        &mut self,
        caller: Address,
        node: NodeId,
        to: Option<AccountId>,
    ) -> Result<(), NodeError> {
        self.resolver
            .resolve(caller)
            .ok_or(NodeError::NoAccount(caller))?;
        if !self.is_authorized_address_for_node(node, caller) {
            return Err(NodeError::NotAuthorizedForNode);
        }
        match to {
            Some(account) => {
                self.pending_transfers.insert(node, account);
            }
            None => {
                self.pending_transfers.remove(&node);
            }
        }
        self.events.push(NodeEvent::NodeOwnerTransferStarted {
            node_id: node,
            to_account: to,
        });
        debug!(%node, ?to, "node owner transfer started");
        Ok(())
    }

    /// Completes a pending owner transfer. Must be invoked by the pending
    /// recipient's resolved account.
    ///
    /// # Errors
    ///
    /// - [`NodeError::NoAccount`] if the caller is unregistered
    /// - [`NodeError::NotAuthorizedForNode`] unless the caller's account is
    ///   the pending recipient
    pub fn complete_node_owner_transfer(
        &mut self,
        caller: Address,
        node: NodeId,
    ) -> Result<(), NodeError> {
        let account = self
            .resolver
            .resolve(caller)
            .ok_or(NodeError::NoAccount(caller))?;
        if self.pending_transfers.get(&node) != Some(&account) {
            return Err(NodeError::NotAuthorizedForNode);
        }
        self.pending_transfers.remove(&node);
        if let Some(entry) = self.nodes.get_mut(node.value() as usize - 1) {
            entry.owner = Some(account);
        }
        self.events.push(NodeEvent::NodeOwnerTransferCompleted {
            node_id: node,
            new_owner: account,
        });
        info!(%node, %account, "node owner transfer completed");
        Ok(())
    }

    /// Removes the node's owner. Controllers are unaffected.
    ///
    /// # Errors
    ///
    /// [`NodeError::NotAuthorizedForNode`] unless the caller is authorized.
    pub fn remove_node_owner(&mut self, caller: Address, node: NodeId) -> Result<(), NodeError> {
        if !self.is_authorized_address_for_node(node, caller) {
            return Err(NodeError::NotAuthorizedForNode);
        }
        if let Some(entry) = self.nodes.get_mut(node.value() as usize - 1) {
            entry.owner = None;
        }
        self.events.push(NodeEvent::NodeOwnerRemoved { node_id: node });
        info!(%node, "node owner removed");
        Ok(())
    }

    /// Reassigns the node's group node.
    ///
    /// # Errors
    ///
    /// [`NodeError::NotAuthorizedForNode`] unless the caller is authorized
    /// over both the node and the new group.
    pub fn set_node_group_node(
        &mut self,
        caller: Address,
        node: NodeId,
        new_group: Option<NodeId>,
    ) -> Result<(), NodeError> {
        if !self.is_authorized_address_for_node(node, caller) {
            return Err(NodeError::NotAuthorizedForNode);
        }
        if let Some(group) = new_group {
            if !self.is_authorized_address_for_node(group, caller) {
                return Err(NodeError::NotAuthorizedForNode);
            }
        }
        if let Some(entry) = self.nodes.get_mut(node.value() as usize - 1) {
            entry.group_node = new_group;
        }
        self.events.push(NodeEvent::NodeGroupNodeSet {
            node_id: node,
            group_node: new_group,
        });
        debug!(%node, ?new_group, "node group set");
        Ok(())
    }

    /// Reassigns the node's parent.
    ///
    /// # Errors
    ///
    /// [`NodeError::NotAuthorizedForNode`] unless the caller is authorized
    /// over both the node and the new parent.
    pub fn set_parent_node(
        &mut self,
        caller: Address,
        node: NodeId,
        new_parent: Option<NodeId>,
    ) -> Result<(), NodeError> {
        if !self.is_authorized_address_for_node(node, caller) {
            return Err(NodeError::NotAuthorizedForNode);
        }
        if let Some(parent) = new_parent {
            if !self.is_authorized_address_for_node(parent, caller) {
                return Err(NodeError::NotAuthorizedForNode);
            }
        }
        if let Some(entry) = self.nodes.get_mut(node.value() as usize - 1) {
            entry.parent = new_parent;
        }
        self.events.push(NodeEvent::NodeParentSet {
            node_id: node,
            parent: new_parent,
        });
        debug!(%node, ?new_parent, "node parent set");
        Ok(())
    }

    /// Grants or revokes a controller delegation on the node.
    ///
    /// # Errors
    ///
    /// [`NodeError::NotAuthorizedForNode`] unless the caller is authorized.
    pub fn set_controller(
        &mut self,
        caller: Address,
        node: NodeId,
        controller: Address,
        enabled: bool,
    ) -> Result<(), NodeError> {
        if !self.is_authorized_address_for_node(node, caller) {
            return Err(NodeError::NotAuthorizedForNode);
        }
        if enabled {
            self.controllers.insert((node, controller));
        } else {
            self.controllers.remove(&(node, controller));
        }
        self.events.push(NodeEvent::NodeControllerSet {
            node_id: node,
            controller,
            enabled,
        });
        debug!(%node, %controller, enabled, "node controller set");
        Ok(())
    }

    /// Emits a broadcast event for the node. Pure signaling; no state change.
    ///
    /// # Errors
    ///
    /// [`NodeError::NotAuthorizedForNode`] unless the caller is authorized.
    pub fn broadcast(
        &mut self,
        caller: Address,
        node: NodeId,
        topic: &str,
        message: &str,
    ) -> Result<(), NodeError> {
        if !self.is_authorized_address_for_node(node, caller) {
            return Err(NodeError::NotAuthorizedForNode);
        }
        self.events.push(NodeEvent::NodeBroadcast {
            node_id: node,
            sender: caller,
            topic: topic.to_owned(),
            message: message.to_owned(),
        });
        debug!(%node, topic, "node broadcast");
        Ok(())
    }

    // =========================================================================
    // READ VIEWS
    // =========================================================================

    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        let index = id.value().checked_sub(1)?;
        self.nodes.get(usize::try_from(index).ok()?)
    }

    /// The node's owner, if the node exists and has one.
    #[must_use]
    pub fn owner_of(&self, node: NodeId) -> Option<AccountId> {
        self.node(node).and_then(|n| n.owner)
    }

    /// The node's parent, if the node exists and has one.
    #[must_use]
    pub fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    /// The node's group node, if the node exists and has one.
    #[must_use]
    pub fn group_node_of(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.group_node)
    }

    /// The pending recipient of a two-phase transfer, if any.
    #[must_use]
    pub fn pending_node_owner_transfer(&self, node: NodeId) -> Option<AccountId> {
        self.pending_transfers.get(&node).copied()
    }

    /// Total nodes ever created.
    #[must_use]
    pub fn total_node_count(&self) -> u64 {
        self.nodes.len() as u64
    }

    /// The emitted event journal.
    #[must_use]
    pub fn events(&self) -> &[NodeEvent] {
        &self.events
    }

    /// Drains and returns the emitted event journal.
    pub fn take_events(&mut self) -> Vec<NodeEvent> {
        std::mem::take(&mut self.events)
    }
}

// =============================================================================
// TESTS
// =============================================================================
