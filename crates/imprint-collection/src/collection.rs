//! # Collection
//!
//! The issuance container itself: one-time initialization, sequence
//! configuration through the engine seam, the engine-only mint path, and
//! pure read projections.

use crate::domain::sequence::SequenceData;
use crate::domain::token::TokenRecord;
use crate::errors::CollectionError;
use crate::events::CollectionEvent;
use crate::ports::SequenceEngine;
use imprint_nodes::ports::NodeAuthority;
use imprint_types::{Address, Clock, NodeId, SequenceId, TokenId, U256};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

/// One-time initialization parameters for a collection.
#[derive(Clone, Debug)]
pub struct CollectionInit {
    /// Administrative owner address (marketplace-facing, not authorization).
    pub owner: Address,
    /// The controlling node the collection is permanently bound to.
    pub control_node: NodeId,
    /// Collection-level metadata, carried on events and views.
    pub metadata: String,
    /// Collection name.
    pub name: String,
    /// Collection symbol.
    pub symbol: String,
    /// Collection-level presentation document reference.
    pub contract_uri: String,
}

/// An issuance container bound to one controlling node.
///
/// Instances are produced by [`crate::factory::CollectionFactory`] (or
/// constructed blank and initialized directly). The shared template from
/// [`Collection::template`] is born in the terminal initialized state so it
/// can never be operated.
pub struct Collection {
    initialized: bool,
    address: Address,
    owner: Address,
    control_node: NodeId,
    metadata: String,
    name: String,
    symbol: String,
    contract_uri: String,
    authority: Option<Arc<dyn NodeAuthority>>,
    clock: Option<Arc<dyn Clock>>,
    sequences: Vec<SequenceData>,
    engines: Vec<Arc<RwLock<dyn SequenceEngine>>>,
    tokens: Vec<TokenRecord>,
    balances: HashMap<Address, u64>,
    events: Vec<CollectionEvent>,
}

impl Collection {
    /// Creates a blank instance awaiting [`Collection::init`].
    #[must_use]
    pub fn new_uninitialized(address: Address) -> Self {
        Self {
            initialized: false,
            address,
            owner: Address::ZERO,
            control_node: NodeId::new(0),
            metadata: String::new(),
            name: String::new(),
            symbol: String::new(),
            contract_uri: String::new(),
            authority: None,
            clock: None,
            sequences: Vec::new(),
            engines: Vec::new(),
            tokens: Vec::new(),
            balances: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// Creates the shared implementation template: already initialized, no
    /// authority attached. `init` fails on it and every guarded operation
    /// denies authorization, so direct use is impossible.
    #[must_use]
    pub fn template() -> Self {
        Self {
            initialized: true,
            ..Self::new_uninitialized(Address::ZERO)
        }
    }

    /// Initializes the instance exactly once.
    ///
    /// # Errors
    ///
    /// [`CollectionError::AlreadyInitialized`] on a second call or on the
    /// shared template.
    pub fn init(
        &mut self,
        params: CollectionInit,
        authority: Arc<dyn NodeAuthority>,
        clock: Arc<dyn Clock>,
    ) -> Result<(), CollectionError> {
        if self.initialized {
            return Err(CollectionError::AlreadyInitialized);
        }
        self.initialized = true;
        self.owner = params.owner;
        self.control_node = params.control_node;
        self.metadata = params.metadata;
        self.name = params.name;
        self.symbol = params.symbol;
        self.contract_uri = params.contract_uri;
        self.authority = Some(authority);
        self.clock = Some(clock);
        info!(collection = %self.address, control_node = %self.control_node, "collection initialized");
        Ok(())
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Configures a new sequence anchored to `sequence.drop_node`.
    ///
    /// The engine payload is validated by the bound engine before anything
    /// is persisted; an engine rejection aborts the whole configuration.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::NotAuthorized`] unless the caller is authorized
    ///   over the drop node
    /// - [`CollectionError::InvalidSequenceConfig`] on a non-zero submitted
    ///   mint counter, inverted or equal seal bounds, a close bound in the
    ///   past, or an engine binding mismatch
    /// - [`CollectionError::Engine`] when the engine rejects `engine_data`
    pub fn configure_sequence(
        &mut self,
        caller: Address,
        sequence: SequenceData,
        engine: &Arc<RwLock<dyn SequenceEngine>>,
        engine_data: &serde_json::Value,
    ) -> Result<SequenceId, CollectionError> {
        if !self.is_authorized(caller, sequence.drop_node) {
            return Err(CollectionError::NotAuthorized);
        }
        if sequence.minted != 0 {
            return Err(CollectionError::InvalidSequenceConfig);
        }
        if sequence.sealed_before != 0
            && sequence.sealed_after != 0
            && sequence.sealed_before >= sequence.sealed_after
        {
            return Err(CollectionError::InvalidSequenceConfig);
        }
        if sequence.sealed_after != 0 && sequence.sealed_after < self.now() {
            return Err(CollectionError::InvalidSequenceConfig);
        }
        if engine.read().unwrap().engine_address() != sequence.engine {
            return Err(CollectionError::InvalidSequenceConfig);
        }

        let sequence_id = SequenceId::new(
            u16::try_from(self.sequences.len() + 1)
                .map_err(|_| CollectionError::InvalidSequenceConfig)?,
        );
        engine.write().unwrap().configure_sequence(
            self.address,
            sequence_id,
            &sequence,
            engine_data,
        )?;

        self.events.push(CollectionEvent::SequenceConfigured {
            sequence_id,
            drop_node: sequence.drop_node,
            engine: sequence.engine,
        });
        self.sequences.push(sequence);
        self.engines.push(engine.clone());
        info!(collection = %self.address, %sequence_id, "sequence configured");
        Ok(sequence_id)
    }

    /// Checks that `engine` may mint `quantity` records from the sequence
    /// right now, without mutating anything. The engine-side mint path uses
    /// this to validate a whole purchase before settling payment.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::InvalidMintRequest`] on an unknown sequence or a
    ///   non-engine caller
    /// - [`CollectionError::SequenceIsSealed`] outside the mint window
    /// - [`CollectionError::SequenceSupplyExhausted`] beyond the supply cap
    pub fn ensure_mintable(
        &self,
        engine: Address,
        sequence_id: SequenceId,
        quantity: u64,
    ) -> Result<(), CollectionError> {
        let sequence = self
            .sequence(sequence_id)
            .ok_or(CollectionError::InvalidMintRequest)?;
        if sequence.engine != engine {
            return Err(CollectionError::InvalidMintRequest);
        }
        if sequence.is_sealed_at(self.now()) {
            return Err(CollectionError::SequenceIsSealed);
        }
        if sequence.max_supply != 0 && sequence.minted + quantity > sequence.max_supply {
            return Err(CollectionError::SequenceSupplyExhausted);
        }
        Ok(())
    }

    /// Mints one record from the sequence to `to`. Engine-only entry point.
    ///
    /// # Errors
    ///
    /// As [`Collection::ensure_mintable`] with `quantity = 1`.
    pub fn mint_record(
        &mut self,
        caller: Address,
        to: Address,
        sequence_id: SequenceId,
    ) -> Result<TokenId, CollectionError> {
        self.ensure_mintable(caller, sequence_id, 1)?;
        let now = self.now();

        let index = usize::from(sequence_id.value() - 1);
        let sequence = &mut self.sequences[index];
        sequence.minted += 1;
        let edition_number = sequence.minted;

        let token_id = TokenId::new(self.tokens.len() as u64 + 1);
        self.tokens.push(TokenRecord {
            owner: to,
            sequence_id,
            edition_number,
            mint_timestamp: now,
        });
        *self.balances.entry(to).or_insert(0) += 1;
        self.events.push(CollectionEvent::RecordMinted {
            token_id,
            sequence_id,
            to,
            edition_number,
            mint_timestamp: now,
        });
        debug!(collection = %self.address, %token_id, %sequence_id, "record minted");
        Ok(token_id)
    }

    /// Sets the administrative owner address.
    ///
    /// # Errors
    ///
    /// [`CollectionError::NotAuthorized`] unless the caller is the current
    /// owner.
    pub fn set_owner(&mut self, caller: Address, owner: Address) -> Result<(), CollectionError> {
        // A zero owner (blank or template instance) admits no one.
        if self.owner.is_zero() || caller != self.owner {
            return Err(CollectionError::NotAuthorized);
        }
        self.owner = owner;
        self.events.push(CollectionEvent::OwnerSet { owner });
        info!(collection = %self.address, %owner, "collection owner set");
        Ok(())
    }

    /// Transfers a record held by the caller.
    ///
    /// # Errors
    ///
    /// [`CollectionError::InvalidTransfer`] on a zero destination, an
    /// unknown token, or a caller that does not hold the token.
    pub fn transfer_record(
        &mut self,
        caller: Address,
        to: Address,
        token_id: TokenId,
    ) -> Result<(), CollectionError> {
        if to.is_zero() {
            return Err(CollectionError::InvalidTransfer);
        }
        let index = usize::try_from(token_id.value().checked_sub(1).ok_or(CollectionError::InvalidTransfer)?)
            .map_err(|_| CollectionError::InvalidTransfer)?;
        let token = self
            .tokens
            .get_mut(index)
            .ok_or(CollectionError::InvalidTransfer)?;
        if token.owner != caller {
            return Err(CollectionError::InvalidTransfer);
        }
        token.owner = to;
        if let Some(balance) = self.balances.get_mut(&caller) {
            *balance -= 1;
        }
        *self.balances.entry(to).or_insert(0) += 1;
        self.events.push(CollectionEvent::RecordTransferred {
            token_id,
            from: caller,
            to,
        });
        debug!(collection = %self.address, %token_id, "record transferred");
        Ok(())
    }

    // =========================================================================
    // READ VIEWS
    // =========================================================================

    /// The collection's actor address.
    #[must_use]
    pub fn collection_address(&self) -> Address {
        self.address
    }

    /// The administrative owner address.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// The controlling node.
    #[must_use]
    pub fn control_node(&self) -> NodeId {
        self.control_node
    }

    /// Collection name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Collection symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Collection-level presentation document reference.
    #[must_use]
    pub fn contract_uri(&self) -> &str {
        &self.contract_uri
    }

    /// Looks up a sequence by collection-scoped id.
    #[must_use]
    pub fn sequence(&self, id: SequenceId) -> Option<&SequenceData> {
        let index = id.value().checked_sub(1)?;
        self.sequences.get(usize::from(index))
    }

    /// Number of configured sequences.
    #[must_use]
    pub fn sequence_count(&self) -> u16 {
        u16::try_from(self.sequences.len()).unwrap_or(u16::MAX)
    }

    /// Looks up a token record by id.
    #[must_use]
    pub fn token(&self, id: TokenId) -> Option<&TokenRecord> {
        let index = id.value().checked_sub(1)?;
        self.tokens.get(usize::try_from(index).ok()?)
    }

    /// Current holder of a token, if it exists.
    #[must_use]
    pub fn owner_of(&self, id: TokenId) -> Option<Address> {
        self.token(id).map(|t| t.owner)
    }

    /// Number of records held by `address`.
    #[must_use]
    pub fn balance_of(&self, address: Address) -> u64 {
        self.balances.get(&address).copied().unwrap_or(0)
    }

    /// Total records minted.
    #[must_use]
    pub fn total_supply(&self) -> u64 {
        self.tokens.len() as u64
    }

    /// Presentation document for a token, rendered by its sequence's
    /// engine.
    #[must_use]
    pub fn token_uri(&self, id: TokenId) -> Option<String> {
        let token = self.token(id)?;
        let index = usize::from(token.sequence_id.value() - 1);
        let sequence = self.sequences.get(index)?;
        let engine = self.engines.get(index)?;
        Some(engine.read().unwrap().token_uri(
            self.address,
            token.sequence_id,
            token,
            sequence.max_supply,
        ))
    }

    /// Royalty recipient and amount for a sale of `sale_price`, per the
    /// engine-side drop record. `(None, 0)` for unknown tokens.
    #[must_use]
    pub fn royalty_info(&self, id: TokenId, sale_price: U256) -> (Option<Address>, U256) {
        let Some(token) = self.token(id) else {
            return (None, U256::zero());
        };
        let index = usize::from(token.sequence_id.value() - 1);
        let Some(engine) = self.engines.get(index) else {
            return (None, U256::zero());
        };
        engine
            .read()
            .unwrap()
            .royalty_info(self.address, token.sequence_id, sale_price)
    }

    /// The emitted event journal.
    #[must_use]
    pub fn events(&self) -> &[CollectionEvent] {
        &self.events
    }

    /// Drains and returns the emitted event journal.
    pub fn take_events(&mut self) -> Vec<CollectionEvent> {
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // INTERNAL
    // =========================================================================

    fn is_authorized(&self, caller: Address, node: NodeId) -> bool {
        self.authority
            .as_ref()
            .is_some_and(|a| a.is_authorized_address_for_node(node, caller))
    }

    fn now(&self) -> u64 {
        match &self.clock {
            Some(clock) => clock.now(),
            None => 0,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
