//! # Sequence
//!
//! An issuance configuration scoped to one node and one collection, with
//! its own mint window, supply cap, and engine binding.

use imprint_types::{Address, NodeId};
use serde::{Deserialize, Serialize};

/// Sequence configuration and live state.
///
/// Submitted at configuration time with `minted == 0`; afterwards `minted`
/// is advanced only by the engine-only mint path. Zero timestamps mean "no
/// bound"; a zero `max_supply` means an open, unbounded edition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceData {
    /// The node this sequence is anchored to; authorization to configure is
    /// checked against it.
    pub drop_node: NodeId,
    /// Address of the engine that owns this sequence's mint path.
    pub engine: Address,
    /// Minting fails before this time. Zero = no lower bound.
    pub sealed_before: u64,
    /// Minting fails after this time. Zero = no upper bound.
    pub sealed_after: u64,
    /// Supply cap. Zero = unbounded.
    pub max_supply: u64,
    /// Records minted so far. Must be submitted as zero.
    pub minted: u64,
}

impl SequenceData {
    /// True once the supply cap is reached. Unbounded sequences never
    /// exhaust.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.max_supply != 0 && self.minted >= self.max_supply
    }

    /// True iff `now` falls outside the mint window.
    #[must_use]
    pub fn is_sealed_at(&self, now: u64) -> bool {
        if now < self.sealed_before {
            return true;
        }
        self.sealed_after != 0 && now > self.sealed_after
    }
}

// =============================================================================
// TESTS
// =============================================================================
