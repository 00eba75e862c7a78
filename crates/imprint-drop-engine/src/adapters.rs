//! # Adapters
//!
//! In-memory funds gateway for tests and single-process deployments.

use crate::ports::{FundsError, FundsGateway, Transfer};
use imprint_types::{Address, U256};
use std::collections::{HashMap, HashSet};

/// In-memory value ledger.
///
/// Tracks credited balances per address. Addresses marked rejecting refuse
/// every transfer, standing in for recipients whose receiving path is
/// broken.
#[derive(Debug, Default)]
pub struct InMemoryBank {
    balances: HashMap<Address, U256>,
    rejecting: HashSet<Address>,
}

impl InMemoryBank {
    /// Creates an empty bank.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credited balance of `address`.
    #[must_use]
    pub fn balance_of(&self, address: Address) -> U256 {
        self.balances.get(&address).copied().unwrap_or_default()
    }

    /// Credits `address` directly, outside any settlement.
    pub fn deposit(&mut self, address: Address, amount: U256) {
        *self.balances.entry(address).or_default() += amount;
    }

    /// Marks `address` as refusing (or accepting) transfers.
    pub fn set_rejecting(&mut self, address: Address, rejecting: bool) {
        if rejecting {
            self.rejecting.insert(address);
        } else {
            self.rejecting.remove(&address);
        }
    }
}

impl FundsGateway for InMemoryBank {
    fn settle(&mut self, transfers: &[Transfer]) -> Result<(), FundsError> {
        // All-or-nothing: check every leg before crediting any.
        for transfer in transfers {
            if self.rejecting.contains(&transfer.to) {
                return Err(FundsError::Rejected {
                    to: transfer.to,
                    amount: transfer.amount,
                });
            }
        }
        for transfer in transfers {
            *self.balances.entry(transfer.to).or_default() += transfer.amount;
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
