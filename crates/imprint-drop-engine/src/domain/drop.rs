//! # Drop Record
//!
//! The engine-side pricing record for one sequence, its configuration-time
//! validation, and the price-decay math.

use imprint_collection::domain::sequence::SequenceData;
use imprint_collection::ports::EngineError;
use imprint_types::{Address, U256, MAX_BPS, SECONDS_PER_DAY};
use serde::{Deserialize, Serialize};

/// Engine-side pricing record for one sequence.
///
/// Submitted as the opaque engine payload at configuration time and stored
/// verbatim once validated. `primary_sale_fee_bps` snapshots the engine's
/// protocol fee and is immune to later fee changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropData {
    /// Floor price per record.
    pub price: U256,
    /// Royalty basis points, at most 10000.
    pub royalty_bps: u16,
    /// Recipient of primary-sale revenue. Required iff revenue can be
    /// non-zero.
    pub revenue_recipient: Option<Address>,
    /// When linear decay stops and the price reaches the floor. Zero = no
    /// decay.
    pub decay_stop_timestamp: u64,
    /// Price reduction per day of decay. Zero = no decay.
    pub price_decay_per_day: U256,
    /// Snapshot of the engine's protocol fee at configuration time.
    pub primary_sale_fee_bps: u16,
    /// Whether forwarded (contract) callers may mint.
    pub allow_contract_mints: bool,
    /// Per-call mint limit.
    pub max_records_per_transaction: u16,
    /// When set, public minting is disabled and only this address may mint.
    pub mint_authority: Option<Address>,
}

impl Default for DropData {
    fn default() -> Self {
        Self {
            price: U256::zero(),
            royalty_bps: 0,
            revenue_recipient: None,
            decay_stop_timestamp: 0,
            price_decay_per_day: U256::zero(),
            primary_sale_fee_bps: 0,
            allow_contract_mints: false,
            max_records_per_transaction: 1,
            mint_authority: None,
        }
    }
}

impl DropData {
    /// True when linear price decay is configured.
    #[must_use]
    pub fn has_decay(&self) -> bool {
        !self.price_decay_per_day.is_zero()
    }
}

/// Validates a drop record against its sequence at configuration time.
///
/// # Errors
///
/// - [`EngineError::InvalidRoyaltyBps`] above 10000 bps
/// - [`EngineError::InvalidPrimarySaleFee`] when the snapshot does not
///   match the engine's current protocol fee
/// - [`EngineError::InvalidPriceDecayConfig`] when the decay fields are not
///   both-zero/both-set, or the stop time is in the past or outside the
///   sequence's mint window
/// - [`EngineError::InvalidPriceOrRecipient`] when price and recipient are
///   inconsistent (decaying drops always require a recipient)
pub fn validate_drop(
    drop: &DropData,
    sequence: &SequenceData,
    now: u64,
    current_fee_bps: u16,
) -> Result<(), EngineError> {
    if drop.royalty_bps > MAX_BPS {
        return Err(EngineError::InvalidRoyaltyBps);
    }
    if drop.primary_sale_fee_bps != current_fee_bps {
        return Err(EngineError::InvalidPrimarySaleFee);
    }

    let stop = drop.decay_stop_timestamp;
    if (stop == 0) != drop.price_decay_per_day.is_zero() {
        return Err(EngineError::InvalidPriceDecayConfig);
    }
    if stop != 0 {
        if stop < now {
            return Err(EngineError::InvalidPriceDecayConfig);
        }
        if sequence.sealed_before != 0 && stop < sequence.sealed_before {
            return Err(EngineError::InvalidPriceDecayConfig);
        }
        if sequence.sealed_after != 0 && stop > sequence.sealed_after {
            return Err(EngineError::InvalidPriceDecayConfig);
        }
    }

    if drop.has_decay() {
        // Decay makes the current price non-zero even at a zero floor, so a
        // recipient is always required.
        if drop.revenue_recipient.is_none() {
            return Err(EngineError::InvalidPriceOrRecipient);
        }
    } else if drop.price.is_zero() != drop.revenue_recipient.is_none() {
        return Err(EngineError::InvalidPriceOrRecipient);
    }

    Ok(())
}

/// Current price of one record at `now`.
///
/// Without decay this is the fixed `price`. With decay the price starts
/// elevated and falls linearly by `price_decay_per_day` until the stop
/// time, after which it equals the floor exactly:
/// `price + price_decay_per_day × (stop − now) / 86400` for `now < stop`.
#[must_use]
pub fn current_price(drop: &DropData, now: u64) -> U256 {
    if !drop.has_decay() || now >= drop.decay_stop_timestamp {
        return drop.price;
    }
    let remaining = drop.decay_stop_timestamp - now;
    drop.price + drop.price_decay_per_day * U256::from(remaining) / U256::from(SECONDS_PER_DAY)
}

// =============================================================================
// TESTS
// =============================================================================
