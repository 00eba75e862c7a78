//! # Event Schema
//!
//! Typed journal entries emitted by collections and the factory.

use imprint_types::{Address, NodeId, SequenceId, TokenId};
use serde::{Deserialize, Serialize};

/// Events emitted by collections and their factory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionEvent {
    /// A new collection instance was created and initialized.
    CollectionCreated {
        /// Address assigned to the new collection.
        collection: Address,
        /// The controlling node it is bound to.
        control_node: NodeId,
        /// Collection name.
        name: String,
    },

    /// A sequence was configured.
    SequenceConfigured {
        /// Collection-scoped sequence id.
        sequence_id: SequenceId,
        /// The node the sequence is anchored to.
        drop_node: NodeId,
        /// The engine bound to the sequence.
        engine: Address,
    },

    /// A record was minted.
    RecordMinted {
        /// The assigned token id.
        token_id: TokenId,
        /// The minting sequence.
        sequence_id: SequenceId,
        /// The recipient.
        to: Address,
        /// Position within the sequence.
        edition_number: u64,
        /// Mint time in unix seconds.
        mint_timestamp: u64,
    },

    /// A record changed hands.
    RecordTransferred {
        /// The moved token.
        token_id: TokenId,
        /// Previous holder.
        from: Address,
        /// New holder.
        to: Address,
    },

    /// The administrative owner address changed.
    OwnerSet {
        /// The new owner.
        owner: Address,
    },
}
