//! # Error Types
//!
//! All error types for the issuance container.

use crate::ports::EngineError;
use thiserror::Error;

/// Errors raised by collections and their factory.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// `init` was invoked on an already-initialized instance (including the
    /// shared template, which is born initialized).
    #[error("already initialized")]
    AlreadyInitialized,

    /// The invoker is not authorized over the relevant control or drop node.
    #[error("not authorized")]
    NotAuthorized,

    /// Structurally invalid sequence configuration: non-zero submitted
    /// mint counter, inverted seal bounds, a close bound in the past, or an
    /// engine binding that does not match the supplied engine.
    #[error("invalid sequence configuration")]
    InvalidSequenceConfig,

    /// The mint path was entered by something other than the sequence's
    /// configured engine, or the sequence does not exist.
    #[error("invalid mint request")]
    InvalidMintRequest,

    /// The sequence's mint window is closed at the current time.
    #[error("sequence is sealed")]
    SequenceIsSealed,

    /// The sequence's supply cap has been reached.
    #[error("sequence supply exhausted")]
    SequenceSupplyExhausted,

    /// Record transfer with a zero destination, an unknown token, or a
    /// sender that does not hold the token.
    #[error("invalid transfer")]
    InvalidTransfer,

    /// The bound engine rejected the configuration payload.
    #[error("engine rejected configuration: {0}")]
    Engine(#[from] EngineError),
}

// =============================================================================
// TESTS
// =============================================================================
