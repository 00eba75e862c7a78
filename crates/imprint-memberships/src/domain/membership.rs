//! # Membership Records
//!
//! Per-member state and the batch-operation payloads.

use imprint_types::{Address, SequenceId};
use serde::{Deserialize, Serialize};

/// One held membership.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRecord {
    /// Current holder.
    pub owner: Address,
    /// Operator-chosen sequence tag carried from the mint request.
    pub sequence_id: SequenceId,
    /// Mint time in unix seconds.
    pub mint_timestamp: u64,
}

/// One admin-issued mint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipMint {
    /// The new member.
    pub to: Address,
    /// Operator-chosen sequence tag.
    pub sequence_id: SequenceId,
}

/// One self-service mint with its allow-list inclusion proof.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipMintWithProof {
    /// The new member; must appear in the allow-list.
    pub to: Address,
    /// Operator-chosen sequence tag; part of the proved leaf.
    pub sequence_id: SequenceId,
    /// Merkle inclusion proof for `(to, sequence_id)`.
    pub proof: Vec<[u8; 32]>,
}
