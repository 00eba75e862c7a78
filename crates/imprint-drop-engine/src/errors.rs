//! # Error Types
//!
//! All error types for the issuance engine's mint and administration paths.
//! Configuration-time rejections travel as
//! [`imprint_collection::ports::EngineError`] through the collection seam.

use imprint_collection::errors::CollectionError;
use imprint_types::U256;
use thiserror::Error;

/// Errors raised by the drop engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DropEngineError {
    /// A forwarded (contract) caller attempted a mint on a drop that only
    /// admits direct callers.
    #[error("minter must be an EOA")]
    MinterMustBeEOA,

    /// Zero quantity, or quantity above the drop's per-call limit.
    #[error("invalid mint amount")]
    InvalidMintAmount,

    /// A mint authority is set for this drop, so public minting is
    /// disabled.
    #[error("public mint not active")]
    PublicMintNotActive,

    /// The invoker is not the drop's mint authority.
    #[error("not mint authority")]
    NotMintAuthority,

    /// Attached payment below the current price times quantity.
    #[error("incorrect payment amount: expected {expected}, got {actual}")]
    IncorrectPaymentAmount {
        /// Required payment.
        expected: U256,
        /// Attached payment.
        actual: U256,
    },

    /// A refund, revenue, or fee-sweep transfer was rejected by its
    /// recipient. The whole attempt is reverted.
    #[error("could not transfer eth")]
    CouldNotTransferEth,

    /// The sequence has no drop record on this engine.
    #[error("invalid mint request")]
    InvalidMintRequest,

    /// Administrative path invoked by a non-owner.
    #[error("unauthorized")]
    Unauthorized,

    /// Protocol fee above 10000 bps.
    #[error("invalid primary sale fee")]
    InvalidPrimarySaleFee,

    /// The collection refused the mint (window, supply, or engine
    /// identity).
    #[error(transparent)]
    Collection(#[from] CollectionError),
}

// =============================================================================
// TESTS
// =============================================================================
