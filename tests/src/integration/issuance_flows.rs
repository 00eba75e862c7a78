//! # Issuance Flows
//!
//! Factory, collection, and engine wired over the live node graph.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{addr, eth, Protocol, GENESIS};
    use imprint_collection::domain::sequence::SequenceData;
    use imprint_collection::errors::CollectionError;
    use imprint_drop_engine::domain::context::{Caller, Payment};
    use imprint_drop_engine::domain::drop::DropData;
    use imprint_drop_engine::errors::DropEngineError;
    use imprint_types::{Clock, SequenceId, TokenId, U256, SECONDS_PER_DAY};

    fn sequence(protocol: &Protocol) -> SequenceData {
        SequenceData {
            drop_node: imprint_types::NodeId::new(1),
            engine: protocol.engine_addr,
            sealed_before: 0,
            sealed_after: 0,
            max_supply: 0,
            minted: 0,
        }
    }

    /// End-to-end scenario: register an account, anchor a node, deploy a
    /// collection, configure a free sequence, mint three records.
    #[test]
    fn test_free_mint_scenario() {
        let mut protocol = Protocol::new();
        let id = protocol.register(addr(1));
        let node = protocol.create_node(addr(1), id);
        let mut collection = protocol.create_collection(addr(1), node);

        let configured_at = protocol.clock.now();
        let seq = sequence(&protocol);
        let sequence_id = collection
            .configure_sequence(
                addr(1),
                seq,
                &protocol.engine_dyn(),
                &serde_json::to_value(DropData::default()).unwrap(),
            )
            .unwrap();
        assert_eq!(sequence_id, SequenceId::new(1));

        protocol.clock.advance(60);
        for _ in 0..3 {
            protocol
                .engine
                .write()
                .unwrap()
                .mint(
                    Caller::eoa(addr(1)),
                    &mut collection,
                    sequence_id,
                    1,
                    Payment::none(addr(1)),
                )
                .unwrap();
        }

        assert_eq!(collection.sequence(sequence_id).unwrap().minted, 3);
        assert_eq!(collection.balance_of(addr(1)), 3);
        for token in 1..=3u64 {
            let record = collection.token(TokenId::new(token)).unwrap();
            assert!(record.mint_timestamp >= configured_at);
        }
    }

    /// Sequence sealed after 60 seconds; minting 120 seconds later fails.
    #[test]
    fn test_seal_window_scenario() {
        let mut protocol = Protocol::new();
        let id = protocol.register(addr(1));
        let node = protocol.create_node(addr(1), id);
        let mut collection = protocol.create_collection(addr(1), node);

        let mut seq = sequence(&protocol);
        seq.sealed_after = protocol.clock.now() + 60;
        let sequence_id = collection
            .configure_sequence(
                addr(1),
                seq,
                &protocol.engine_dyn(),
                &serde_json::to_value(DropData::default()).unwrap(),
            )
            .unwrap();

        protocol.clock.advance(120);
        assert_eq!(
            protocol.engine.write().unwrap().mint(
                Caller::eoa(addr(1)),
                &mut collection,
                sequence_id,
                1,
                Payment::none(addr(1)),
            ),
            Err(DropEngineError::Collection(
                CollectionError::SequenceIsSealed
            ))
        );
    }

    /// Supply cap: exactly `k` mints succeed, the `k+1`-th fails.
    #[test]
    fn test_supply_cap_exact() {
        let mut protocol = Protocol::new();
        let id = protocol.register(addr(1));
        let node = protocol.create_node(addr(1), id);
        let mut collection = protocol.create_collection(addr(1), node);

        let k = 4u64;
        let mut seq = sequence(&protocol);
        seq.max_supply = k;
        let sequence_id = collection
            .configure_sequence(
                addr(1),
                seq,
                &protocol.engine_dyn(),
                &serde_json::to_value(DropData::default()).unwrap(),
            )
            .unwrap();

        for _ in 0..k {
            protocol
                .engine
                .write()
                .unwrap()
                .mint(
                    Caller::eoa(addr(1)),
                    &mut collection,
                    sequence_id,
                    1,
                    Payment::none(addr(1)),
                )
                .unwrap();
        }
        assert_eq!(
            protocol.engine.write().unwrap().mint(
                Caller::eoa(addr(1)),
                &mut collection,
                sequence_id,
                1,
                Payment::none(addr(1)),
            ),
            Err(DropEngineError::Collection(
                CollectionError::SequenceSupplyExhausted
            ))
        );
        assert_eq!(collection.sequence(sequence_id).unwrap().minted, k);
    }

    /// Payment exactness: underpayment fails, overpayment refunds the
    /// difference, and no value is created or destroyed.
    #[test]
    fn test_payment_exactness() {
        let mut protocol = Protocol::new();
        let id = protocol.register(addr(1));
        let node = protocol.create_node(addr(1), id);
        let mut collection = protocol.create_collection(addr(1), node);

        let price = eth(10);
        let quantity = 3u16;
        let mut seq = sequence(&protocol);
        seq.max_supply = 100;
        let sequence_id = collection
            .configure_sequence(
                addr(1),
                seq,
                &protocol.engine_dyn(),
                &serde_json::to_value(DropData {
                    price,
                    royalty_bps: 500,
                    revenue_recipient: Some(addr(9)),
                    max_records_per_transaction: 10,
                    ..DropData::default()
                })
                .unwrap(),
            )
            .unwrap();

        // Underpay: p*q - 1.
        let underpay = price * U256::from(quantity) - U256::from(1);
        assert!(matches!(
            protocol.engine.write().unwrap().mint(
                Caller::eoa(addr(1)),
                &mut collection,
                sequence_id,
                quantity,
                Payment::new(addr(1), underpay),
            ),
            Err(DropEngineError::IncorrectPaymentAmount { .. })
        ));

        // Overpay: refund exactly the excess.
        let overpay = price * U256::from(quantity) + eth(7);
        protocol
            .engine
            .write()
            .unwrap()
            .mint(
                Caller::eoa(addr(1)),
                &mut collection,
                sequence_id,
                quantity,
                Payment::new(addr(1), overpay),
            )
            .unwrap();
        let bank = protocol.bank.read().unwrap();
        assert_eq!(bank.balance_of(addr(9)), price * U256::from(quantity));
        assert_eq!(bank.balance_of(addr(1)), eth(7));
    }

    /// Decay floor: the price is non-increasing as time advances and equals
    /// the floor exactly from the stop time on.
    #[test]
    fn test_decay_floor_property() {
        let mut protocol = Protocol::new();
        let id = protocol.register(addr(1));
        let node = protocol.create_node(addr(1), id);
        let mut collection = protocol.create_collection(addr(1), node);

        let stop = GENESIS + 10 * SECONDS_PER_DAY;
        let sequence_id = collection
            .configure_sequence(
                addr(1),
                sequence(&protocol),
                &protocol.engine_dyn(),
                &serde_json::to_value(DropData {
                    price: eth(10),
                    royalty_bps: 100,
                    revenue_recipient: Some(addr(9)),
                    decay_stop_timestamp: stop,
                    price_decay_per_day: eth(2),
                    ..DropData::default()
                })
                .unwrap(),
            )
            .unwrap();

        let collection_addr = collection.collection_address();
        let mut last = protocol
            .engine
            .read()
            .unwrap()
            .current_price(collection_addr, sequence_id)
            .unwrap();
        assert_eq!(last, eth(30));

        for _ in 0..40 {
            protocol.clock.advance(SECONDS_PER_DAY / 2);
            let next = protocol
                .engine
                .read()
                .unwrap()
                .current_price(collection_addr, sequence_id)
                .unwrap();
            assert!(next <= last);
            assert!(next >= eth(10));
            last = next;
        }
        // 20 half-days past genesis: at the stop, and beyond it, the floor.
        assert_eq!(last, eth(10));
        protocol.clock.advance(30 * SECONDS_PER_DAY);
        assert_eq!(
            protocol
                .engine
                .read()
                .unwrap()
                .current_price(collection_addr, sequence_id)
                .unwrap(),
            eth(10)
        );
    }

    /// Configuring a second sequence never affects the first.
    #[test]
    fn test_sequences_are_independent() {
        let mut protocol = Protocol::new();
        let id = protocol.register(addr(1));
        let node = protocol.create_node(addr(1), id);
        let mut collection = protocol.create_collection(addr(1), node);

        let first = collection
            .configure_sequence(
                addr(1),
                sequence(&protocol),
                &protocol.engine_dyn(),
                &serde_json::to_value(DropData::default()).unwrap(),
            )
            .unwrap();
        protocol
            .engine
            .write()
            .unwrap()
            .mint(
                Caller::eoa(addr(1)),
                &mut collection,
                first,
                1,
                Payment::none(addr(1)),
            )
            .unwrap();
        let first_state = collection.sequence(first).unwrap().clone();

        let mut seq = sequence(&protocol);
        seq.max_supply = 7;
        collection
            .configure_sequence(
                addr(1),
                seq,
                &protocol.engine_dyn(),
                &serde_json::to_value(DropData {
                    price: eth(1),
                    revenue_recipient: Some(addr(9)),
                    ..DropData::default()
                })
                .unwrap(),
            )
            .unwrap();
        assert_eq!(collection.sequence(first).unwrap(), &first_state);
    }

    /// Unauthorized actors cannot deploy collections or configure
    /// sequences on nodes they do not manage.
    #[test]
    fn test_issuance_authorization_boundaries() {
        let mut protocol = Protocol::new();
        let a1 = protocol.register(addr(1));
        protocol.register(addr(2));
        let node = protocol.create_node(addr(1), a1);

        assert!(matches!(
            protocol.collection_factory.create_collection(
                addr(2),
                imprint_collection::factory::CreateCollection {
                    name: String::new(),
                    symbol: String::new(),
                    contract_uri: String::new(),
                    metadata: String::new(),
                    control_node: node,
                    owner: addr(2),
                },
            ),
            Err(CollectionError::NotAuthorized)
        ));

        let mut collection = protocol.create_collection(addr(1), node);
        assert!(matches!(
            collection.configure_sequence(
                addr(2),
                sequence(&protocol),
                &protocol.engine_dyn(),
                &serde_json::to_value(DropData::default()).unwrap(),
            ),
            Err(CollectionError::NotAuthorized)
        ));
    }

    /// A controller delegated on the control node can configure sequences
    /// without owning anything.
    #[test]
    fn test_controller_can_configure() {
        let mut protocol = Protocol::new();
        let id = protocol.register(addr(1));
        let node = protocol.create_node(addr(1), id);
        let mut collection = protocol.create_collection(addr(1), node);

        protocol
            .nodes
            .write()
            .unwrap()
            .set_controller(addr(1), node, addr(5), true)
            .unwrap();
        collection
            .configure_sequence(
                addr(5),
                sequence(&protocol),
                &protocol.engine_dyn(),
                &serde_json::to_value(DropData::default()).unwrap(),
            )
            .unwrap();
    }

    /// Mint events carry enough to reconstruct the purchase.
    #[test]
    fn test_purchase_events() {
        let mut protocol = Protocol::new();
        let id = protocol.register(addr(1));
        let node = protocol.create_node(addr(1), id);
        let mut collection = protocol.create_collection(addr(1), node);
        let sequence_id = collection
            .configure_sequence(
                addr(1),
                sequence(&protocol),
                &protocol.engine_dyn(),
                &serde_json::to_value(DropData {
                    price: eth(5),
                    revenue_recipient: Some(addr(9)),
                    max_records_per_transaction: 4,
                    ..DropData::default()
                })
                .unwrap(),
            )
            .unwrap();
        protocol
            .engine
            .write()
            .unwrap()
            .mint(
                Caller::eoa(addr(2)),
                &mut collection,
                sequence_id,
                2,
                Payment::new(addr(2), eth(10)),
            )
            .unwrap();

        use imprint_drop_engine::events::DropEngineEvent;
        let events = protocol.engine.write().unwrap().take_events();
        assert!(events.iter().any(|e| matches!(
            e,
            DropEngineEvent::RecordsPurchased { payer, token_ids, amount, .. }
                if *payer == addr(2) && token_ids.len() == 2 && *amount == eth(10)
        )));

        use imprint_collection::events::CollectionEvent;
        assert_eq!(
            collection
                .events()
                .iter()
                .filter(|e| matches!(e, CollectionEvent::RecordMinted { .. }))
                .count(),
            2
        );
    }
}
