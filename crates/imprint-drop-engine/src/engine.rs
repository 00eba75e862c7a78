//! # Drop Engine
//!
//! The issuance engine: drop records keyed by `(collection, sequence)`,
//! price computation, payment settlement with protocol-fee skim, the
//! permissioned-mint alternate path, and fee administration.

use crate::domain::context::{Caller, CallerKind, Payment};
use crate::domain::drop::{self, DropData};
use crate::errors::DropEngineError;
use crate::events::DropEngineEvent;
use crate::ports::{FundsGateway, Transfer};
use imprint_collection::collection::Collection;
use imprint_collection::domain::sequence::SequenceData;
use imprint_collection::domain::token::TokenRecord;
use imprint_collection::ports::{EngineError, SequenceEngine};
use imprint_types::{bps_share, Address, Clock, SequenceId, TokenId, U256, MAX_BPS};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

/// The issuance engine.
///
/// Stateless with respect to any one collection's internals: everything the
/// engine knows is in its composite-key drop map, so one engine serves any
/// number of collections.
pub struct DropEngine {
    /// The engine's actor address; collections admit mints from it.
    address: Address,
    /// Administrative owner; receives swept fees.
    owner: Address,
    /// Current protocol fee in basis points. Snapshotted per drop at
    /// configuration time.
    primary_sale_fee_bps: u16,
    /// Drop records keyed by (collection address, sequence id).
    drops: HashMap<(Address, SequenceId), DropData>,
    /// Protocol fees retained and not yet swept to the owner.
    accrued_fees: U256,
    /// External value ledger.
    funds: Arc<RwLock<dyn FundsGateway>>,
    /// Ambient time source.
    clock: Arc<dyn Clock>,
    /// Journal of emitted events.
    events: Vec<DropEngineEvent>,
}

impl DropEngine {
    /// Creates an engine.
    #[must_use]
    pub fn new(
        address: Address,
        owner: Address,
        funds: Arc<RwLock<dyn FundsGateway>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            address,
            owner,
            primary_sale_fee_bps: 0,
            drops: HashMap::new(),
            accrued_fees: U256::zero(),
            funds,
            clock,
            events: Vec::new(),
        }
    }

    // =========================================================================
    // MINTING
    // =========================================================================

    /// Public mint: settles payment and mints `quantity` records to the
    /// caller.
    ///
    /// Runs validate → settle → commit. Every check (including the
    /// collection's window and supply checks for the full quantity) happens
    /// before any value moves; the settlement is all-or-nothing; the commit
    /// cannot fail. A failing path therefore leaves no partial state.
    ///
    /// # Errors
    ///
    /// - [`DropEngineError::InvalidMintRequest`] when no drop is configured
    /// - [`DropEngineError::MinterMustBeEOA`] for forwarded callers unless
    ///   the drop allows them
    /// - [`DropEngineError::InvalidMintAmount`] on zero quantity or above
    ///   the per-call limit
    /// - [`DropEngineError::PublicMintNotActive`] when a mint authority is
    ///   set
    /// - [`DropEngineError::IncorrectPaymentAmount`] on underpayment
    /// - [`DropEngineError::Collection`] when the window is closed or the
    ///   supply cap would be exceeded
    /// - [`DropEngineError::CouldNotTransferEth`] when the refund or
    ///   revenue leg is rejected
    pub fn mint(
        &mut self,
        caller: Caller,
        collection: &mut Collection,
        sequence_id: SequenceId,
        quantity: u16,
        payment: Payment,
    ) -> Result<Vec<TokenId>, DropEngineError> {
        let key = (collection.collection_address(), sequence_id);
        let drop = self
            .drops
            .get(&key)
            .ok_or(DropEngineError::InvalidMintRequest)?
            .clone();

        if caller.kind == CallerKind::Contract && !drop.allow_contract_mints {
            return Err(DropEngineError::MinterMustBeEOA);
        }
        if quantity == 0 || quantity > drop.max_records_per_transaction {
            return Err(DropEngineError::InvalidMintAmount);
        }
        if drop.mint_authority.is_some() {
            return Err(DropEngineError::PublicMintNotActive);
        }

        let unit_price = drop::current_price(&drop, self.clock.now());
        let total = unit_price * U256::from(quantity);
        if payment.amount < total {
            return Err(DropEngineError::IncorrectPaymentAmount {
                expected: total,
                actual: payment.amount,
            });
        }
        collection.ensure_mintable(self.address, sequence_id, u64::from(quantity))?;

        // Settle before committing anything: refund leg, then revenue leg
        // net of the frozen fee snapshot.
        let refund = payment.amount - total;
        let fee = bps_share(total, drop.primary_sale_fee_bps);
        let forward = total - fee;
        let mut transfers = Vec::with_capacity(2);
        if !refund.is_zero() {
            transfers.push(Transfer {
                to: payment.payer,
                amount: refund,
            });
        }
        if let Some(recipient) = drop.revenue_recipient {
            if !forward.is_zero() {
                transfers.push(Transfer {
                    to: recipient,
                    amount: forward,
                });
            }
        }
        self.funds
            .write()
            .unwrap()
            .settle(&transfers)
            .map_err(|_| DropEngineError::CouldNotTransferEth)?;

        // Commit: cannot fail after ensure_mintable.
        self.accrued_fees += fee;
        let mut token_ids = Vec::with_capacity(usize::from(quantity));
        for _ in 0..quantity {
            token_ids.push(collection.mint_record(self.address, caller.address, sequence_id)?);
        }
        self.events.push(DropEngineEvent::RecordsPurchased {
            collection: key.0,
            sequence_id,
            payer: payment.payer,
            token_ids: token_ids.clone(),
            amount: total,
            fee,
        });
        info!(collection = %key.0, %sequence_id, quantity, %total, "records purchased");
        Ok(token_ids)
    }

    /// Permissioned mint: the drop's mint authority mints directly to `to`,
    /// bypassing payment, caller, and quantity checks. Seal window and
    /// supply cap still apply.
    ///
    /// # Errors
    ///
    /// - [`DropEngineError::InvalidMintRequest`] when no drop is configured
    /// - [`DropEngineError::NotMintAuthority`] unless the caller is the
    ///   drop's mint authority
    /// - [`DropEngineError::Collection`] when the window is closed or the
    ///   supply is exhausted
    pub fn permissioned_mint(
        &mut self,
        caller: Address,
        collection: &mut Collection,
        sequence_id: SequenceId,
        to: Address,
    ) -> Result<TokenId, DropEngineError> {
        let key = (collection.collection_address(), sequence_id);
        let drop = self
            .drops
            .get(&key)
            .ok_or(DropEngineError::InvalidMintRequest)?;
        if drop.mint_authority != Some(caller) {
            return Err(DropEngineError::NotMintAuthority);
        }

        let token_id = collection.mint_record(self.address, to, sequence_id)?;
        self.events.push(DropEngineEvent::PermissionedMint {
            collection: key.0,
            sequence_id,
            to,
            token_id,
        });
        debug!(collection = %key.0, %sequence_id, %to, "permissioned mint");
        Ok(token_id)
    }

    /// Clears the drop's mint authority, re-enabling public mint.
    ///
    /// # Errors
    ///
    /// - [`DropEngineError::InvalidMintRequest`] when no drop is configured
    /// - [`DropEngineError::NotMintAuthority`] unless the caller is the
    ///   drop's mint authority
    pub fn clear_mint_authority(
        &mut self,
        caller: Address,
        collection: Address,
        sequence_id: SequenceId,
    ) -> Result<(), DropEngineError> {
        let drop = self
            .drops
            .get_mut(&(collection, sequence_id))
            .ok_or(DropEngineError::InvalidMintRequest)?;
        if drop.mint_authority != Some(caller) {
            return Err(DropEngineError::NotMintAuthority);
        }
        drop.mint_authority = None;
        self.events.push(DropEngineEvent::MintAuthorityCleared {
            collection,
            sequence_id,
        });
        info!(%collection, %sequence_id, "mint authority cleared");
        Ok(())
    }

    // =========================================================================
    // FEE ADMINISTRATION
    // =========================================================================

    /// Sets the protocol fee for future drop configurations. Existing drops
    /// keep their snapshot.
    ///
    /// # Errors
    ///
    /// - [`DropEngineError::Unauthorized`] unless the caller is the owner
    /// - [`DropEngineError::InvalidPrimarySaleFee`] above 10000 bps
    pub fn set_primary_sale_fee_bps(
        &mut self,
        caller: Address,
        bps: u16,
    ) -> Result<(), DropEngineError> {
        if caller != self.owner {
            return Err(DropEngineError::Unauthorized);
        }
        if bps > MAX_BPS {
            return Err(DropEngineError::InvalidPrimarySaleFee);
        }
        self.primary_sale_fee_bps = bps;
        self.events.push(DropEngineEvent::PrimarySaleFeeSet { bps });
        info!(bps, "primary sale fee set");
        Ok(())
    }

    /// Sweeps all accrued fees to the current owner. Permissionless; a
    /// rejected sweep leaves the balance intact for a later retry.
    ///
    /// # Errors
    ///
    /// [`DropEngineError::CouldNotTransferEth`] when the owner rejects the
    /// transfer.
    pub fn transfer_fees_to_owner(&mut self) -> Result<U256, DropEngineError> {
        let amount = self.accrued_fees;
        if amount.is_zero() {
            return Ok(amount);
        }
        self.funds
            .write()
            .unwrap()
            .settle(&[Transfer {
                to: self.owner,
                amount,
            }])
            .map_err(|_| DropEngineError::CouldNotTransferEth)?;
        self.accrued_fees = U256::zero();
        self.events.push(DropEngineEvent::FeesTransferred {
            to: self.owner,
            amount,
        });
        info!(to = %self.owner, %amount, "fees transferred to owner");
        Ok(amount)
    }

    /// Hands the engine's administration (and future fee sweeps) to
    /// `new_owner`.
    ///
    /// # Errors
    ///
    /// [`DropEngineError::Unauthorized`] unless the caller is the owner.
    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), DropEngineError> {
        if caller != self.owner {
            return Err(DropEngineError::Unauthorized);
        }
        self.owner = new_owner;
        self.events
            .push(DropEngineEvent::OwnershipTransferred { new_owner });
        info!(%new_owner, "engine ownership transferred");
        Ok(())
    }

    // =========================================================================
    // READ VIEWS
    // =========================================================================

    /// The drop record for a sequence, if configured.
    #[must_use]
    pub fn drop_record(&self, collection: Address, sequence_id: SequenceId) -> Option<&DropData> {
        self.drops.get(&(collection, sequence_id))
    }

    /// Current price of one record, if the sequence is configured.
    #[must_use]
    pub fn current_price(&self, collection: Address, sequence_id: SequenceId) -> Option<U256> {
        self.drops
            .get(&(collection, sequence_id))
            .map(|d| drop::current_price(d, self.clock.now()))
    }

    /// Current protocol fee in basis points.
    #[must_use]
    pub fn primary_sale_fee_bps(&self) -> u16 {
        self.primary_sale_fee_bps
    }

    /// Fees retained and not yet swept.
    #[must_use]
    pub fn accrued_fees(&self) -> U256 {
        self.accrued_fees
    }

    /// The administrative owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// The emitted event journal.
    #[must_use]
    pub fn events(&self) -> &[DropEngineEvent] {
        &self.events
    }

    /// Drains and returns the emitted event journal.
    pub fn take_events(&mut self) -> Vec<DropEngineEvent> {
        std::mem::take(&mut self.events)
    }
}

impl SequenceEngine for DropEngine {
    fn engine_address(&self) -> Address {
        self.address
    }

    fn configure_sequence(
        &mut self,
        collection: Address,
        sequence_id: SequenceId,
        sequence: &SequenceData,
        engine_data: &serde_json::Value,
    ) -> Result<(), EngineError> {
        let drop: DropData = serde_json::from_value(engine_data.clone())
            .map_err(|err| EngineError::InvalidConfiguration(err.to_string()))?;
        drop::validate_drop(&drop, sequence, self.clock.now(), self.primary_sale_fee_bps)?;

        self.events.push(DropEngineEvent::DropConfigured {
            collection,
            sequence_id,
            price: drop.price,
            royalty_bps: drop.royalty_bps,
        });
        self.drops.insert((collection, sequence_id), drop);
        info!(%collection, %sequence_id, "drop configured");
        Ok(())
    }

    fn royalty_info(
        &self,
        collection: Address,
        sequence_id: SequenceId,
        sale_price: U256,
    ) -> (Option<Address>, U256) {
        match self.drops.get(&(collection, sequence_id)) {
            Some(drop) => (
                drop.revenue_recipient,
                bps_share(sale_price, drop.royalty_bps),
            ),
            None => (None, U256::zero()),
        }
    }

    fn token_uri(
        &self,
        collection: Address,
        sequence_id: SequenceId,
        token: &TokenRecord,
        max_supply: u64,
    ) -> String {
        let _ = collection;
        // Open editions carry no "/N" suffix.
        let edition = if max_supply == 0 {
            token.edition_number.to_string()
        } else {
            format!("{}/{}", token.edition_number, max_supply)
        };
        serde_json::json!({
            "name": format!("Record {edition}"),
            "sequence_id": sequence_id.value(),
            "attributes": [
                { "trait_type": "Record Edition", "value": edition },
            ],
        })
        .to_string()
    }
}

// =============================================================================
// TESTS
// =============================================================================
