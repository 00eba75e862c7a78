//! # Event Schema
//!
//! Typed journal entries emitted by every mutating registry operation.
//! Observers (and the test suites) reconstruct state from these.

use imprint_types::{AccountId, Address};
use serde::{Deserialize, Serialize};

/// Events emitted by the account registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountEvent {
    /// A new account was created.
    AccountCreated {
        /// The assigned account id.
        id: AccountId,
        /// The address the account is bound to.
        subject: Address,
        /// Caller-supplied metadata, carried on the event only.
        metadata: String,
    },

    /// An account moved to a new address; the old address is vacated.
    AccountTransferred {
        /// The moved account id.
        id: AccountId,
        /// The address the account is now bound to.
        new_address: Address,
    },

    /// An issuer designation changed.
    AccountIssuerSet {
        /// The issuer address.
        issuer: Address,
        /// Whether the address may now issue accounts.
        enabled: bool,
    },

    /// A pure signal broadcast by an account holder. No state change.
    AccountBroadcast {
        /// The broadcasting account.
        account_id: AccountId,
        /// Broadcast topic.
        topic: String,
        /// Broadcast message.
        message: String,
    },
}
