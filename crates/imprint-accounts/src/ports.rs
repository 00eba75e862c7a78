//! # Driving Ports (API - Inbound)
//!
//! The resolution interface downstream subsystems depend on. The node graph
//! consumes this port rather than the concrete registry so tests can
//! substitute fixed resolvers.

use imprint_types::{AccountId, Address};

/// Non-failing identity resolution.
pub trait AccountResolver: Send + Sync {
    /// Resolves an address to its account id, or `None` when unregistered.
    fn resolve(&self, address: Address) -> Option<AccountId>;
}

// =============================================================================
// TESTS
// =============================================================================
