//! # Mint Call Context
//!
//! Who is minting, how they arrived, and what value they attached.

use imprint_types::{Address, U256};
use serde::{Deserialize, Serialize};

/// How the minting call reached the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallerKind {
    /// A direct, externally-originated call.
    Eoa,
    /// A call forwarded through another program.
    Contract,
}

/// The minting actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    /// The actor's address.
    pub address: Address,
    /// How the call arrived. Contract callers are rejected unless the drop
    /// allows them.
    pub kind: CallerKind,
}

impl Caller {
    /// A direct, externally-originated caller.
    #[must_use]
    pub const fn eoa(address: Address) -> Self {
        Self {
            address,
            kind: CallerKind::Eoa,
        }
    }

    /// A caller forwarding through another program.
    #[must_use]
    pub const fn contract(address: Address) -> Self {
        Self {
            address,
            kind: CallerKind::Contract,
        }
    }
}

/// Value attached to a mint call. The payer receives any overpayment
/// refund.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Who attached the value (and receives refunds).
    pub payer: Address,
    /// Attached amount.
    pub amount: U256,
}

impl Payment {
    /// A payment of `amount` from `payer`.
    #[must_use]
    pub fn new(payer: Address, amount: U256) -> Self {
        Self { payer, amount }
    }

    /// A zero-value payment from `payer`, for free drops.
    #[must_use]
    pub fn none(payer: Address) -> Self {
        Self {
            payer,
            amount: U256::zero(),
        }
    }
}
