//! # Driven Ports (SPI - Outbound)
//!
//! External value movement. The engine never holds third-party funds
//! in-flight: each mint produces one settlement (refund leg + revenue leg)
//! that the gateway applies all-or-nothing, so a rejected recipient reverts
//! the whole attempt.

use imprint_types::{Address, U256};
use thiserror::Error;

/// One credit leg of a settlement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transfer {
    /// Recipient of the funds.
    pub to: Address,
    /// Amount to credit.
    pub amount: U256,
}

/// Failure of a settlement. The gateway must leave all balances untouched
/// when returning this.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FundsError {
    /// A recipient refused the funds.
    #[error("transfer of {amount} to {to} was rejected")]
    Rejected {
        /// The refusing recipient.
        to: Address,
        /// The rejected amount.
        amount: U256,
    },
}

/// Applies settlements against the external value ledger.
pub trait FundsGateway: Send + Sync {
    /// Applies every transfer, or none of them.
    ///
    /// # Errors
    ///
    /// [`FundsError::Rejected`] if any recipient refuses; no balance may
    /// change in that case.
    fn settle(&mut self, transfers: &[Transfer]) -> Result<(), FundsError>;
}

// =============================================================================
// TESTS
// =============================================================================
