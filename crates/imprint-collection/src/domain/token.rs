//! # Token Record
//!
//! Per-token provenance tracked by the collection.

use imprint_types::{Address, SequenceId};
use serde::{Deserialize, Serialize};

/// Provenance and ownership of one minted record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Current holder.
    pub owner: Address,
    /// The sequence that minted this record.
    pub sequence_id: SequenceId,
    /// Position within the sequence, starting at 1.
    pub edition_number: u64,
    /// Mint time in unix seconds.
    pub mint_timestamp: u64,
}
