//! # Adapters
//!
//! Authorization-port implementations over the live registry.

use crate::ports::NodeAuthority;
use crate::registry::NodeRegistry;
use imprint_types::{Address, NodeId};
use std::sync::{Arc, RwLock};

impl NodeAuthority for NodeRegistry {
    fn is_authorized_address_for_node(&self, node: NodeId, address: Address) -> bool {
        NodeRegistry::is_authorized_address_for_node(self, node, address)
    }
}

/// A [`NodeAuthority`] backed by a shared [`NodeRegistry`].
#[derive(Clone)]
pub struct SharedNodeAuthority {
    registry: Arc<RwLock<NodeRegistry>>,
}

impl SharedNodeAuthority {
    /// Wraps a shared registry handle.
    #[must_use]
    pub fn new(registry: Arc<RwLock<NodeRegistry>>) -> Self {
        Self { registry }
    }
}

impl NodeAuthority for SharedNodeAuthority {
    fn is_authorized_address_for_node(&self, node: NodeId, address: Address) -> bool {
        self.registry
            .read()
            .unwrap()
            .is_authorized_address_for_node(node, address)
    }
}

// =============================================================================
// TESTS
// =============================================================================
