//! # Membership Flows
//!
//! The non-transferable variant running over the live node graph.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{addr, Protocol};
    use imprint_memberships::domain::membership::{MembershipMint, MembershipMintWithProof};
    use imprint_memberships::domain::merkle::MerkleTree;
    use imprint_memberships::errors::MembershipError;
    use imprint_memberships::factory::CreateMemberships;
    use imprint_memberships::memberships::Memberships;
    use imprint_types::{Clock, SequenceId, TokenId};

    fn create_memberships(protocol: &mut Protocol, caller: imprint_types::Address) -> Memberships {
        let id = protocol.register(caller);
        let node = protocol.create_node(caller, id);
        protocol
            .memberships_factory
            .create_memberships(
                caller,
                CreateMemberships {
                    name: "Crew".to_owned(),
                    symbol: "CREW".to_owned(),
                    base_uri: "ipfs://crew/".to_owned(),
                    metadata: String::new(),
                    control_node: node,
                    owner: caller,
                },
            )
            .unwrap()
    }

    fn mint(to: imprint_types::Address) -> MembershipMint {
        MembershipMint {
            to,
            sequence_id: SequenceId::new(0),
        }
    }

    #[test]
    fn test_roster_lifecycle_over_live_graph() {
        let mut protocol = Protocol::new();
        let mut memberships = create_memberships(&mut protocol, addr(1));

        memberships
            .batch_mint_and_burn(addr(1), &[mint(addr(2)), mint(addr(3))], &[])
            .unwrap();
        assert_eq!(memberships.total_supply(), 2);

        // A stranger on the node graph cannot administer the roster.
        protocol.register(addr(4));
        assert_eq!(
            memberships.batch_mint_and_burn(addr(4), &[mint(addr(5))], &[]),
            Err(MembershipError::NotAuthorized)
        );

        // A controller delegated on the control node can.
        protocol
            .nodes
            .write()
            .unwrap()
            .set_controller(addr(1), memberships.control_node(), addr(4), true)
            .unwrap();
        memberships
            .batch_mint_and_burn(addr(4), &[mint(addr(5))], &[TokenId::new(1)])
            .unwrap();
        assert_eq!(memberships.total_supply(), 2);
        assert_eq!(memberships.total_minted(), 3);
        assert_eq!(memberships.balance_of(addr(2)), 0);
        assert_eq!(memberships.balance_of(addr(5)), 1);
    }

    #[test]
    fn test_allow_list_self_mint_flow() {
        let mut protocol = Protocol::new();
        let mut memberships = create_memberships(&mut protocol, addr(1));

        let entries = [
            (addr(2), SequenceId::new(1)),
            (addr(3), SequenceId::new(1)),
            (addr(4), SequenceId::new(1)),
        ];
        let tree = MerkleTree::from_entries(&entries);
        memberships
            .set_membership_list_root(addr(1), tree.root())
            .unwrap();

        let proofs: Vec<MembershipMintWithProof> = entries
            .iter()
            .enumerate()
            .map(|(i, (to, sequence_id))| MembershipMintWithProof {
                to: *to,
                sequence_id: *sequence_id,
                proof: tree.proof(i),
            })
            .collect();

        // Submitted by an address that is neither admin nor member.
        memberships.mint_memberships(&proofs).unwrap();
        assert_eq!(memberships.total_supply(), 3);

        // Replaying the same proofs fails: everyone is a member already.
        assert_eq!(
            memberships.mint_memberships(&proofs),
            Err(MembershipError::InvalidMint)
        );
    }

    #[test]
    fn test_membership_timestamps_use_ambient_clock() {
        let mut protocol = Protocol::new();
        let mut memberships = create_memberships(&mut protocol, addr(1));

        protocol.clock.advance(500);
        memberships
            .batch_mint_and_burn(addr(1), &[mint(addr(2))], &[])
            .unwrap();
        let record = memberships.token(TokenId::new(1)).unwrap();
        assert_eq!(record.mint_timestamp, protocol.clock.now());
    }

    #[test]
    fn test_non_transferability_end_to_end() {
        let mut protocol = Protocol::new();
        let mut memberships = create_memberships(&mut protocol, addr(1));
        memberships
            .batch_mint_and_burn(addr(1), &[mint(addr(2))], &[])
            .unwrap();

        assert_eq!(
            memberships.transfer_membership(addr(2), addr(3), TokenId::new(1)),
            Err(MembershipError::TransferNotAllowed)
        );
        // The admin path still moves it.
        memberships
            .admin_transfer_from(addr(1), addr(2), addr(3), TokenId::new(1))
            .unwrap();
        assert_eq!(memberships.owner_of(TokenId::new(1)), Some(addr(3)));
        // The new holder may burn.
        memberships
            .burn_membership(addr(3), TokenId::new(1))
            .unwrap();
        assert_eq!(memberships.total_supply(), 0);
    }
}
