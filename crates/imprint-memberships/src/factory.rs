//! # Memberships Factory
//!
//! Produces independent, initialized memberships instances for callers
//! authorized over the intended control node, mirroring the collection
//! factory's lifecycle and template poisoning.

use crate::errors::MembershipError;
use crate::events::MembershipEvent;
use crate::memberships::{Memberships, MembershipsInit};
use imprint_nodes::ports::NodeAuthority;
use imprint_types::{Address, Clock, NodeId};
use std::sync::Arc;
use tracing::info;

/// Parameters for creating a memberships instance.
#[derive(Clone, Debug)]
pub struct CreateMemberships {
    /// Instance name.
    pub name: String,
    /// Instance symbol.
    pub symbol: String,
    /// Base URI prefixed to token ids.
    pub base_uri: String,
    /// Instance-level metadata.
    pub metadata: String,
    /// The controlling node the new instance is bound to.
    pub control_node: NodeId,
    /// Administrative owner address of the new instance.
    pub owner: Address,
}

/// Factory for memberships instances.
pub struct MembershipsFactory {
    authority: Arc<dyn NodeAuthority>,
    clock: Arc<dyn Clock>,
    template: Memberships,
    created: u64,
    events: Vec<MembershipEvent>,
}

impl MembershipsFactory {
    /// Creates a factory wired to an authorization source and clock.
    #[must_use]
    pub fn new(authority: Arc<dyn NodeAuthority>, clock: Arc<dyn Clock>) -> Self {
        Self {
            authority,
            clock,
            template: Memberships::template(),
            created: 0,
            events: Vec::new(),
        }
    }

    /// The shared implementation template. Born initialized; unusable.
    #[must_use]
    pub fn implementation(&self) -> &Memberships {
        &self.template
    }

    /// Number of instances created by this factory.
    #[must_use]
    pub fn total_created(&self) -> u64 {
        self.created
    }

    /// Creates and initializes a new memberships instance.
    ///
    /// # Errors
    ///
    /// [`MembershipError::NotAuthorized`] unless the caller is authorized
    /// over `params.control_node`.
    pub fn create_memberships(
        &mut self,
        caller: Address,
        params: CreateMemberships,
    ) -> Result<Memberships, MembershipError> {
        if !self
            .authority
            .is_authorized_address_for_node(params.control_node, caller)
        {
            return Err(MembershipError::NotAuthorized);
        }

        self.created += 1;
        let address = derive_memberships_address(self.created);
        let mut memberships = Memberships::new_uninitialized(address);
        memberships.init(
            MembershipsInit {
                owner: params.owner,
                control_node: params.control_node,
                metadata: params.metadata,
                name: params.name.clone(),
                symbol: params.symbol,
                base_uri: params.base_uri,
            },
            self.authority.clone(),
            self.clock.clone(),
        )?;

        self.events.push(MembershipEvent::MembershipsCreated {
            memberships: address,
            control_node: params.control_node,
            name: params.name,
        });
        info!(%address, control_node = %params.control_node, "memberships created");
        Ok(memberships)
    }

    /// The emitted event journal.
    #[must_use]
    pub fn events(&self) -> &[MembershipEvent] {
        &self.events
    }
}

/// Derives a fresh, non-colliding actor address for the `index`-th
/// instance produced by a factory.
fn derive_memberships_address(index: u64) -> Address {
    let mut bytes = [0u8; 20];
    bytes[0] = 0xAB;
    bytes[12..].copy_from_slice(&index.to_be_bytes());
    Address::new(bytes)
}

// =============================================================================
// TESTS
// =============================================================================
