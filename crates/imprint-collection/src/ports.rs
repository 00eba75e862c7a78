//! # Driven Ports (SPI - Outbound)
//!
//! The engine seam. A collection validates its own sequence invariants,
//! then hands the opaque engine payload across this port before persisting
//! anything. Engines key their state by `(collection, sequence_id)` so one
//! engine instance serves many collections.

use crate::domain::sequence::SequenceData;
use crate::domain::token::TokenRecord;
use imprint_types::{Address, SequenceId, U256};
use thiserror::Error;

/// Rejection returned by an engine refusing a sequence configuration.
///
/// These are permanent: the engine writes no partial state when rejecting.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Royalty basis points above 10000.
    #[error("invalid royalty bps")]
    InvalidRoyaltyBps,

    /// Price and revenue recipient are inconsistent: a priced drop needs a
    /// recipient, a free drop must not name one (unless price decay makes
    /// the current price non-zero).
    #[error("invalid price or recipient")]
    InvalidPriceOrRecipient,

    /// Decay fields are not both-zero/both-set, or the decay stop falls
    /// outside the mint window or in the past.
    #[error("invalid price decay configuration")]
    InvalidPriceDecayConfig,

    /// The submitted fee snapshot does not match the engine's current
    /// protocol fee.
    #[error("invalid primary sale fee")]
    InvalidPrimarySaleFee,

    /// Any other engine-specific rejection, including an undecodable
    /// payload.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// An issuance engine attached to sequences of one or more collections.
pub trait SequenceEngine: Send + Sync {
    /// The engine's actor address. Collections admit mints for a sequence
    /// only from this address.
    fn engine_address(&self) -> Address;

    /// Validates and stores engine-side state for a sequence being
    /// configured. Called by the collection before the sequence is
    /// persisted; an error aborts the whole configuration.
    ///
    /// # Errors
    ///
    /// Any [`EngineError`]; the engine must leave no partial state behind.
    fn configure_sequence(
        &mut self,
        collection: Address,
        sequence_id: SequenceId,
        sequence: &SequenceData,
        engine_data: &serde_json::Value,
    ) -> Result<(), EngineError>;

    /// Royalty recipient and amount for a sale of `sale_price`.
    fn royalty_info(
        &self,
        collection: Address,
        sequence_id: SequenceId,
        sale_price: U256,
    ) -> (Option<Address>, U256) {
        let _ = (collection, sequence_id, sale_price);
        (None, U256::zero())
    }

    /// Presentation document for one minted record.
    fn token_uri(
        &self,
        collection: Address,
        sequence_id: SequenceId,
        token: &TokenRecord,
        max_supply: u64,
    ) -> String {
        let _ = (collection, sequence_id, token, max_supply);
        String::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
