//! # Error Types
//!
//! All error types for the membership variant.

use thiserror::Error;

/// Errors raised by memberships and their factory.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// `init` was invoked on an already-initialized instance (including the
    /// shared template, which is born initialized).
    #[error("already initialized")]
    AlreadyInitialized,

    /// The invoker is not authorized over the control node.
    #[error("not authorized")]
    NotAuthorized,

    /// A mint to an existing member, a duplicate within one batch, a
    /// missing allow-list root, or a failed inclusion proof.
    #[error("invalid mint")]
    InvalidMint,

    /// A burn of an unknown token, a duplicate within one batch, or a
    /// holder burn of a token the caller does not hold.
    #[error("invalid burn")]
    InvalidBurn,

    /// An admin transfer with zero endpoints or a mismatched holder.
    #[error("invalid transfer")]
    InvalidTransfer,

    /// Memberships are non-transferable; standard transfers always fail.
    #[error("transfer not allowed")]
    TransferNotAllowed,
}

// =============================================================================
// TESTS
// =============================================================================
