//! # Collection Factory
//!
//! Produces independent, initialized collection instances for callers
//! authorized over the intended control node. The shared implementation
//! template is kept in its terminal initialized state so it can never be
//! operated directly.

use crate::collection::{Collection, CollectionInit};
use crate::errors::CollectionError;
use crate::events::CollectionEvent;
use imprint_nodes::ports::NodeAuthority;
use imprint_types::{Address, Clock, NodeId};
use std::sync::Arc;
use tracing::info;

/// Parameters for creating a collection.
#[derive(Clone, Debug)]
pub struct CreateCollection {
    /// Collection name.
    pub name: String,
    /// Collection symbol.
    pub symbol: String,
    /// Collection-level presentation document reference.
    pub contract_uri: String,
    /// Collection-level metadata.
    pub metadata: String,
    /// The controlling node the new collection is bound to.
    pub control_node: NodeId,
    /// Administrative owner address of the new collection.
    pub owner: Address,
}

/// Factory for collection instances.
pub struct CollectionFactory {
    authority: Arc<dyn NodeAuthority>,
    clock: Arc<dyn Clock>,
    template: Collection,
    created: u64,
    events: Vec<CollectionEvent>,
}

impl CollectionFactory {
    /// Creates a factory wired to an authorization source and clock.
    #[must_use]
    pub fn new(authority: Arc<dyn NodeAuthority>, clock: Arc<dyn Clock>) -> Self {
        Self {
            authority,
            clock,
            template: Collection::template(),
            created: 0,
            events: Vec::new(),
        }
    }

    /// The shared implementation template. Born initialized; unusable.
    #[must_use]
    pub fn implementation(&self) -> &Collection {
        &self.template
    }

    /// Number of collections created by this factory.
    #[must_use]
    pub fn total_created(&self) -> u64 {
        self.created
    }

    /// Creates and initializes a new collection instance.
    ///
    /// # Errors
    ///
    /// [`CollectionError::NotAuthorized`] unless the caller is authorized
    /// over `params.control_node`.
    pub fn create_collection(
        &mut self,
        caller: Address,
        params: CreateCollection,
    ) -> Result<Collection, CollectionError> {
        if !self
            .authority
            .is_authorized_address_for_node(params.control_node, caller)
        {
            return Err(CollectionError::NotAuthorized);
        }

        self.created += 1;
        let address = derive_collection_address(self.created);
        let mut collection = Collection::new_uninitialized(address);
        collection.init(
            CollectionInit {
                owner: params.owner,
                control_node: params.control_node,
                metadata: params.metadata,
                name: params.name.clone(),
                symbol: params.symbol,
                contract_uri: params.contract_uri,
            },
            self.authority.clone(),
            self.clock.clone(),
        )?;

        self.events.push(CollectionEvent::CollectionCreated {
            collection: address,
            control_node: params.control_node,
            name: params.name,
        });
        info!(%address, control_node = %params.control_node, "collection created");
        Ok(collection)
    }

    /// The emitted event journal.
    #[must_use]
    pub fn events(&self) -> &[CollectionEvent] {
        &self.events
    }
}

/// Derives a fresh, non-colliding actor address for the `index`-th
/// collection produced by a factory.
fn derive_collection_address(index: u64) -> Address {
    let mut bytes = [0u8; 20];
    bytes[0] = 0xC0;
    bytes[12..].copy_from_slice(&index.to_be_bytes());
    Address::new(bytes)
}

// =============================================================================
// TESTS
// =============================================================================
