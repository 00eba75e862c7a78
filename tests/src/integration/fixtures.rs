//! # Test Fixtures
//!
//! The full protocol stack wired together: account registry, node
//! registry, manual clock, in-memory bank, drop engine, and both
//! factories.

use imprint_accounts::adapters::SharedAccountResolver;
use imprint_accounts::registry::AccountRegistry;
use imprint_collection::collection::Collection;
use imprint_collection::factory::{CollectionFactory, CreateCollection};
use imprint_collection::ports::SequenceEngine;
use imprint_drop_engine::adapters::InMemoryBank;
use imprint_drop_engine::engine::DropEngine;
use imprint_memberships::factory::MembershipsFactory;
use imprint_nodes::adapters::SharedNodeAuthority;
use imprint_nodes::domain::node::CreateNode;
use imprint_nodes::registry::NodeRegistry;
use imprint_types::{AccountId, Address, ManualClock, NodeId, U256};
use std::sync::{Arc, RwLock};

/// Start-of-scenario timestamp; an arbitrary fixed point in time.
pub const GENESIS: u64 = 1_700_000_000;

/// A deterministic test actor address.
pub fn addr(n: u64) -> Address {
    Address::from_low_u64(n)
}

/// `milli` thousandths of an 18-decimal currency unit.
pub fn eth(milli: u64) -> U256 {
    U256::from(milli) * U256::exp10(15)
}

/// The full protocol stack.
pub struct Protocol {
    pub accounts: Arc<RwLock<AccountRegistry>>,
    pub nodes: Arc<RwLock<NodeRegistry>>,
    pub clock: Arc<ManualClock>,
    pub bank: Arc<RwLock<InMemoryBank>>,
    pub engine: Arc<RwLock<DropEngine>>,
    pub engine_addr: Address,
    pub collection_factory: CollectionFactory,
    pub memberships_factory: MembershipsFactory,
}

impl Protocol {
    /// Wires up a fresh stack with no accounts or nodes.
    pub fn new() -> Self {
        Self::with_account_registry_owner(None)
    }

    /// Wires up a fresh stack whose account registry has an administrative
    /// owner (for trusted-issuer scenarios).
    pub fn with_account_registry_owner(owner: Option<Address>) -> Self {
        let clock = Arc::new(ManualClock::new(GENESIS));
        let accounts = Arc::new(RwLock::new(AccountRegistry::new(owner)));
        let nodes = Arc::new(RwLock::new(NodeRegistry::new(Arc::new(
            SharedAccountResolver::new(accounts.clone()),
        ))));
        let authority = Arc::new(SharedNodeAuthority::new(nodes.clone()));
        let bank = Arc::new(RwLock::new(InMemoryBank::new()));
        let engine_addr = addr(0xE0);
        let engine = Arc::new(RwLock::new(DropEngine::new(
            engine_addr,
            addr(0xFE),
            bank.clone(),
            clock.clone(),
        )));
        let collection_factory = CollectionFactory::new(authority.clone(), clock.clone());
        let memberships_factory = MembershipsFactory::new(authority, clock.clone());
        Self {
            accounts,
            nodes,
            clock,
            bank,
            engine,
            engine_addr,
            collection_factory,
            memberships_factory,
        }
    }

    /// Registers an account bound to `address`.
    pub fn register(&self, address: Address) -> AccountId {
        self.accounts
            .write()
            .unwrap()
            .create_account(address, address, "")
            .unwrap()
    }

    /// Creates a node owned by `owner`'s account.
    pub fn create_node(&self, caller: Address, owner: AccountId) -> NodeId {
        self.nodes
            .write()
            .unwrap()
            .create_node(
                caller,
                CreateNode {
                    owner: Some(owner),
                    ..CreateNode::default()
                },
            )
            .unwrap()
    }

    /// Creates a collection controlled by `control_node`.
    pub fn create_collection(&mut self, caller: Address, control_node: NodeId) -> Collection {
        self.collection_factory
            .create_collection(
                caller,
                CreateCollection {
                    name: "Test".to_owned(),
                    symbol: "TEST".to_owned(),
                    contract_uri: "ipfs://contract".to_owned(),
                    metadata: String::new(),
                    control_node,
                    owner: caller,
                },
            )
            .unwrap()
    }

    /// The engine as the collection-facing trait object.
    pub fn engine_dyn(&self) -> Arc<RwLock<dyn SequenceEngine>> {
        self.engine.clone()
    }
}

impl Default for Protocol {
    fn default() -> Self {
        Self::new()
    }
}
