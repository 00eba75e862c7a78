//! # Error Types
//!
//! All error types for the identity resolver.

use imprint_types::Address;
use thiserror::Error;

/// Errors raised by the account registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// The invoking address has no account.
    #[error("no account for address {0}")]
    NoAccount(Address),

    /// The target address already has an account.
    #[error("account already exists for address {0}")]
    AccountAlreadyExists(Address),

    /// Trusted-issuer mode is active and the invoker is not a designated
    /// issuer.
    #[error("address {0} is not an authorized account issuer")]
    NotAuthorizedAccountIssuer(Address),

    /// Administrative path invoked by a non-owner.
    #[error("unauthorized")]
    Unauthorized,
}

// =============================================================================
// TESTS
// =============================================================================
