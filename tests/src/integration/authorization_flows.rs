//! # Authorization Flows
//!
//! Account and node-graph choreography across the live registries.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{addr, Protocol};
    use imprint_accounts::errors::AccountError;
    use imprint_accounts::events::AccountEvent;
    use imprint_nodes::domain::node::CreateNode;
    use imprint_nodes::errors::NodeError;
    use imprint_types::{AccountId, NodeId};

    // =========================================================================
    // IDENTITY
    // =========================================================================

    /// After a successful registration, a second registration for the same
    /// address always fails.
    #[test]
    fn test_account_uniqueness() {
        let protocol = Protocol::new();
        let id = protocol.register(addr(1));
        assert_eq!(id, AccountId::new(1));
        assert_eq!(
            protocol
                .accounts
                .write()
                .unwrap()
                .create_account(addr(1), addr(1), ""),
            Err(AccountError::AccountAlreadyExists(addr(1)))
        );
    }

    #[test]
    fn test_account_transfer_vacates_and_rebinds() {
        let protocol = Protocol::new();
        let id = protocol.register(addr(1));
        protocol
            .accounts
            .write()
            .unwrap()
            .transfer_account(addr(1), addr(2))
            .unwrap();

        let accounts = protocol.accounts.read().unwrap();
        assert_eq!(accounts.unsafe_resolve_id(addr(1)), None);
        assert_eq!(accounts.resolve_id(addr(2)), Ok(id));
    }

    #[test]
    fn test_trusted_issuer_gating() {
        let protocol = Protocol::with_account_registry_owner(Some(addr(9)));
        protocol
            .accounts
            .write()
            .unwrap()
            .set_account_issuer(addr(9), addr(1), true)
            .unwrap();

        // The issuer registers on behalf of another address.
        protocol
            .accounts
            .write()
            .unwrap()
            .create_account(addr(1), addr(2), "")
            .unwrap();
        assert_eq!(
            protocol
                .accounts
                .write()
                .unwrap()
                .create_account(addr(3), addr(3), ""),
            Err(AccountError::NotAuthorizedAccountIssuer(addr(3)))
        );
    }

    /// A transferred account keeps its node authorizations; the vacated
    /// address loses them.
    #[test]
    fn test_account_transfer_carries_node_authorization() {
        let protocol = Protocol::new();
        let id = protocol.register(addr(1));
        let node = protocol.create_node(addr(1), id);

        protocol
            .accounts
            .write()
            .unwrap()
            .transfer_account(addr(1), addr(2))
            .unwrap();

        let nodes = protocol.nodes.read().unwrap();
        assert!(!nodes.is_authorized_address_for_node(node, addr(1)));
        assert!(nodes.is_authorized_address_for_node(node, addr(2)));
    }

    // =========================================================================
    // NODE GRAPH
    // =========================================================================

    /// Two-step transfer safety: only the pending recipient's resolved
    /// account may complete, and canceling voids the pending transfer.
    #[test]
    fn test_two_step_transfer_safety() {
        let protocol = Protocol::new();
        let a1 = protocol.register(addr(1));
        let a2 = protocol.register(addr(2));
        protocol.register(addr(3));
        let node = protocol.create_node(addr(1), a1);

        protocol
            .nodes
            .write()
            .unwrap()
            .start_node_owner_transfer(addr(1), node, Some(a2))
            .unwrap();

        // Anyone but the recipient fails.
        for stranger in [addr(1), addr(3)] {
            assert_eq!(
                protocol
                    .nodes
                    .write()
                    .unwrap()
                    .complete_node_owner_transfer(stranger, node),
                Err(NodeError::NotAuthorizedForNode)
            );
        }

        // Cancel, then even the recipient fails.
        protocol
            .nodes
            .write()
            .unwrap()
            .start_node_owner_transfer(addr(1), node, None)
            .unwrap();
        assert_eq!(
            protocol
                .nodes
                .write()
                .unwrap()
                .complete_node_owner_transfer(addr(2), node),
            Err(NodeError::NotAuthorizedForNode)
        );
        assert_eq!(protocol.nodes.read().unwrap().owner_of(node), Some(a1));
    }

    /// Authorization monotonicity: delegating controllers on unrelated
    /// nodes never changes an existing authorization result.
    #[test]
    fn test_authorization_monotonicity() {
        let protocol = Protocol::new();
        let a1 = protocol.register(addr(1));
        let a2 = protocol.register(addr(2));
        let mine = protocol.create_node(addr(1), a1);
        let theirs = protocol.create_node(addr(2), a2);

        let before = protocol
            .nodes
            .read()
            .unwrap()
            .is_authorized_address_for_node(mine, addr(1));
        assert!(before);

        for controller in 10..20 {
            protocol
                .nodes
                .write()
                .unwrap()
                .set_controller(addr(2), theirs, addr(controller), true)
                .unwrap();
        }
        assert!(protocol
            .nodes
            .read()
            .unwrap()
            .is_authorized_address_for_node(mine, addr(1)));
        assert!(!protocol
            .nodes
            .read()
            .unwrap()
            .is_authorized_address_for_node(mine, addr(15)));
    }

    /// Group-node delegation: a controller of the group manages the member
    /// node, and re-anchoring the group revokes that path.
    #[test]
    fn test_group_delegation_follows_reanchoring() {
        let protocol = Protocol::new();
        let a1 = protocol.register(addr(1));
        let group = protocol.create_node(addr(1), a1);
        let other_group = protocol.create_node(addr(1), a1);
        let member = protocol
            .nodes
            .write()
            .unwrap()
            .create_node(
                addr(1),
                CreateNode {
                    owner: Some(a1),
                    group_node: Some(group),
                    ..CreateNode::default()
                },
            )
            .unwrap();

        protocol
            .nodes
            .write()
            .unwrap()
            .set_controller(addr(1), group, addr(5), true)
            .unwrap();
        assert!(protocol
            .nodes
            .read()
            .unwrap()
            .is_authorized_address_for_node(member, addr(5)));

        protocol
            .nodes
            .write()
            .unwrap()
            .set_node_group_node(addr(1), member, Some(other_group))
            .unwrap();
        assert!(!protocol
            .nodes
            .read()
            .unwrap()
            .is_authorized_address_for_node(member, addr(5)));
    }

    #[test]
    fn test_node_events_reconstruct_lifecycle() {
        let protocol = Protocol::new();
        let a1 = protocol.register(addr(1));
        let a2 = protocol.register(addr(2));
        let node = protocol.create_node(addr(1), a1);
        {
            let mut nodes = protocol.nodes.write().unwrap();
            nodes
                .start_node_owner_transfer(addr(1), node, Some(a2))
                .unwrap();
            nodes.complete_node_owner_transfer(addr(2), node).unwrap();
            nodes.remove_node_owner(addr(2), node).unwrap();
        }

        use imprint_nodes::events::NodeEvent;
        let events = protocol.nodes.write().unwrap().take_events();
        assert!(matches!(
            events[0],
            NodeEvent::NodeCreated { id, owner, .. } if id == node && owner == Some(a1)
        ));
        assert!(matches!(
            events[1],
            NodeEvent::NodeOwnerTransferStarted { to_account, .. } if to_account == Some(a2)
        ));
        assert!(matches!(
            events[2],
            NodeEvent::NodeOwnerTransferCompleted { new_owner, .. } if new_owner == a2
        ));
        assert!(matches!(events[3], NodeEvent::NodeOwnerRemoved { node_id } if node_id == node));
    }

    #[test]
    fn test_account_broadcast_event() {
        let protocol = Protocol::new();
        let id = protocol.register(addr(1));
        protocol
            .accounts
            .write()
            .unwrap()
            .broadcast(addr(1), "release", "out now")
            .unwrap();
        assert!(matches!(
            protocol.accounts.read().unwrap().events().last(),
            Some(AccountEvent::AccountBroadcast { account_id, .. }) if *account_id == id
        ));
    }

    /// The scenario pinned in the design notes: account 1, node 1, both
    /// first of their registries.
    #[test]
    fn test_genesis_numbering() {
        let protocol = Protocol::new();
        let id = protocol.register(addr(1));
        assert_eq!(id, AccountId::new(1));
        let node = protocol.create_node(addr(1), id);
        assert_eq!(node, NodeId::new(1));
        assert_eq!(protocol.nodes.read().unwrap().total_node_count(), 1);
        assert_eq!(protocol.accounts.read().unwrap().total_account_count(), 1);
    }
}
