//! # Event Schema
//!
//! Typed journal entries emitted by the engine's configuration, mint, and
//! fee-administration paths.

use imprint_types::{Address, SequenceId, TokenId, U256};
use serde::{Deserialize, Serialize};

/// Events emitted by the drop engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropEngineEvent {
    /// A drop record was validated and stored for a sequence.
    DropConfigured {
        /// The collection the sequence belongs to.
        collection: Address,
        /// The configured sequence.
        sequence_id: SequenceId,
        /// Floor price per record.
        price: U256,
        /// Royalty basis points.
        royalty_bps: u16,
    },

    /// A public mint settled and committed.
    RecordsPurchased {
        /// The collection minted from.
        collection: Address,
        /// The minting sequence.
        sequence_id: SequenceId,
        /// The paying minter.
        payer: Address,
        /// Minted token ids, in order.
        token_ids: Vec<TokenId>,
        /// Settled amount (price × quantity, after refund).
        amount: U256,
        /// Protocol fee retained out of `amount`.
        fee: U256,
    },

    /// The mint authority minted directly.
    PermissionedMint {
        /// The collection minted from.
        collection: Address,
        /// The minting sequence.
        sequence_id: SequenceId,
        /// The recipient.
        to: Address,
        /// The minted token.
        token_id: TokenId,
    },

    /// A drop's mint authority was cleared, re-enabling public mint.
    MintAuthorityCleared {
        /// The collection the sequence belongs to.
        collection: Address,
        /// The affected sequence.
        sequence_id: SequenceId,
    },

    /// The engine's protocol fee changed (existing drops keep their
    /// snapshot).
    PrimarySaleFeeSet {
        /// New fee in basis points.
        bps: u16,
    },

    /// Accrued fees were swept to the engine owner.
    FeesTransferred {
        /// The receiving owner.
        to: Address,
        /// Swept amount.
        amount: U256,
    },

    /// The engine's administrative owner changed.
    OwnershipTransferred {
        /// The new owner.
        new_owner: Address,
    },
}
