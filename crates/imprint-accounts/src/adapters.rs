//! # Adapters
//!
//! Shared-ownership wrapper implementing the resolution port over a live
//! registry, for wiring subsystems together in one process.

use crate::ports::AccountResolver;
use crate::registry::AccountRegistry;
use imprint_types::{AccountId, Address};
use std::sync::{Arc, RwLock};

/// An [`AccountResolver`] backed by a shared [`AccountRegistry`].
#[derive(Clone)]
pub struct SharedAccountResolver {
    registry: Arc<RwLock<AccountRegistry>>,
}

impl SharedAccountResolver {
    /// Wraps a shared registry handle.
    #[must_use]
    pub fn new(registry: Arc<RwLock<AccountRegistry>>) -> Self {
        Self { registry }
    }
}

impl AccountResolver for SharedAccountResolver {
    fn resolve(&self, address: Address) -> Option<AccountId> {
        self.registry.read().unwrap().unsafe_resolve_id(address)
    }
}

// =============================================================================
// TESTS
// =============================================================================
