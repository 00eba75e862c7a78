//! # Memberships
//!
//! The non-transferable membership container: admin batch operations,
//! allow-listed self-mint, holder burn, and admin-only transfers.

use crate::domain::membership::{MembershipMint, MembershipMintWithProof, MembershipRecord};
use crate::domain::merkle::{leaf_hash, verify_proof};
use crate::errors::MembershipError;
use crate::events::MembershipEvent;
use imprint_nodes::ports::NodeAuthority;
use imprint_types::{Address, Clock, NodeId, TokenId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

/// One-time initialization parameters for a memberships instance.
#[derive(Clone, Debug)]
pub struct MembershipsInit {
    /// Administrative owner address (marketplace-facing, not authorization).
    pub owner: Address,
    /// The controlling node the instance is permanently bound to.
    pub control_node: NodeId,
    /// Instance-level metadata.
    pub metadata: String,
    /// Instance name.
    pub name: String,
    /// Instance symbol.
    pub symbol: String,
    /// Base URI prefixed to token ids in presentation documents.
    pub base_uri: String,
}

/// A non-transferable membership roster bound to one controlling node.
pub struct Memberships {
    initialized: bool,
    address: Address,
    owner: Address,
    control_node: NodeId,
    metadata: String,
    name: String,
    symbol: String,
    base_uri: String,
    authority: Option<Arc<dyn NodeAuthority>>,
    clock: Option<Arc<dyn Clock>>,
    membership_list_root: Option<[u8; 32]>,
    tokens: HashMap<TokenId, MembershipRecord>,
    balances: HashMap<Address, u64>,
    total_minted: u64,
    events: Vec<MembershipEvent>,
}

impl Memberships {
    /// Creates a blank instance awaiting [`Memberships::init`].
    #[must_use]
    pub fn new_uninitialized(address: Address) -> Self {
        Self {
            initialized: false,
            address,
            owner: Address::ZERO,
            control_node: NodeId::new(0),
            metadata: String::new(),
            name: String::new(),
            symbol: String::new(),
            base_uri: String::new(),
            authority: None,
            clock: None,
            membership_list_root: None,
            tokens: HashMap::new(),
            balances: HashMap::new(),
            total_minted: 0,
            events: Vec::new(),
        }
    }

    /// Creates the shared implementation template: already initialized, no
    /// authority attached, so it can never be operated.
    #[must_use]
    pub fn template() -> Self {
        Self {
            initialized: true,
            ..Self::new_uninitialized(Address::ZERO)
        }
    }

    /// Initializes the instance exactly once.
    ///
    /// # Errors
    ///
    /// [`MembershipError::AlreadyInitialized`] on a second call or on the
    /// shared template.
    pub fn init(
        &mut self,
        params: MembershipsInit,
        authority: Arc<dyn NodeAuthority>,
        clock: Arc<dyn Clock>,
    ) -> Result<(), MembershipError> {
        if self.initialized {
            return Err(MembershipError::AlreadyInitialized);
        }
        self.initialized = true;
        self.owner = params.owner;
        self.control_node = params.control_node;
        self.metadata = params.metadata;
        self.name = params.name;
        self.symbol = params.symbol;
        self.base_uri = params.base_uri;
        self.authority = Some(authority);
        self.clock = Some(clock);
        info!(memberships = %self.address, control_node = %self.control_node, "memberships initialized");
        Ok(())
    }

    // =========================================================================
    // ADMIN OPERATIONS
    // =========================================================================

    /// Sets the administrative owner address.
    ///
    /// # Errors
    ///
    /// [`MembershipError::NotAuthorized`] unless the caller is authorized
    /// over the control node.
    pub fn set_owner(&mut self, caller: Address, owner: Address) -> Result<(), MembershipError> {
        self.require_admin(caller)?;
        self.owner = owner;
        self.events.push(MembershipEvent::OwnerSet { owner });
        Ok(())
    }

    /// Sets the allow-list root for self-service mints.
    ///
    /// # Errors
    ///
    /// [`MembershipError::NotAuthorized`] unless the caller is authorized.
    pub fn set_membership_list_root(
        &mut self,
        caller: Address,
        root: [u8; 32],
    ) -> Result<(), MembershipError> {
        self.require_admin(caller)?;
        self.membership_list_root = Some(root);
        self.events.push(MembershipEvent::MembershipListRootSet { root });
        info!(memberships = %self.address, "membership list root set");
        Ok(())
    }

    /// Mints and burns memberships in one atomic batch. Mints apply before
    /// burns, so a batch cannot mint to an address that already holds a
    /// membership, even one burned later in the same batch.
    ///
    /// # Errors
    ///
    /// - [`MembershipError::NotAuthorized`] unless the caller is authorized
    /// - [`MembershipError::InvalidMint`] on a mint to an existing member
    ///   or a duplicate recipient within the batch
    /// - [`MembershipError::InvalidBurn`] on an unknown or duplicate burn
    ///
    /// On error, no part of the batch is applied.
    pub fn batch_mint_and_burn(
        &mut self,
        caller: Address,
        mints: &[MembershipMint],
        burns: &[TokenId],
    ) -> Result<(), MembershipError> {
        self.require_admin(caller)?;
        self.validate_batch(mints.iter().map(|m| m.to), burns)?;
        self.apply_batch(mints, burns);
        Ok(())
    }

    /// Swaps the allow-list root and applies a mint/burn batch in one
    /// atomic call, for roster rotations.
    ///
    /// # Errors
    ///
    /// As [`Memberships::batch_mint_and_burn`]; the root is not changed on
    /// error.
    pub fn update_memberships(
        &mut self,
        caller: Address,
        root: [u8; 32],
        mints: &[MembershipMint],
        burns: &[TokenId],
    ) -> Result<(), MembershipError> {
        self.require_admin(caller)?;
        self.validate_batch(mints.iter().map(|m| m.to), burns)?;
        self.membership_list_root = Some(root);
        self.events.push(MembershipEvent::MembershipListRootSet { root });
        self.apply_batch(mints, burns);
        Ok(())
    }

    /// Moves a membership between addresses, bypassing the transfer ban.
    ///
    /// # Errors
    ///
    /// - [`MembershipError::NotAuthorized`] unless the caller is authorized
    /// - [`MembershipError::InvalidTransfer`] on zero endpoints, an unknown
    ///   token, or a `from` that does not hold the token
    pub fn admin_transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        token_id: TokenId,
    ) -> Result<(), MembershipError> {
        self.require_admin(caller)?;
        if from.is_zero() || to.is_zero() {
            return Err(MembershipError::InvalidTransfer);
        }
        let record = self
            .tokens
            .get_mut(&token_id)
            .ok_or(MembershipError::InvalidTransfer)?;
        if record.owner != from {
            return Err(MembershipError::InvalidTransfer);
        }
        record.owner = to;
        if let Some(balance) = self.balances.get_mut(&from) {
            *balance -= 1;
        }
        *self.balances.entry(to).or_insert(0) += 1;
        self.events.push(MembershipEvent::MembershipAdminTransfer {
            token_id,
            from,
            to,
        });
        debug!(memberships = %self.address, %token_id, "admin transfer");
        Ok(())
    }

    // =========================================================================
    // PERMISSIONLESS OPERATIONS
    // =========================================================================

    /// Mints memberships for allow-listed addresses. Callable by anyone;
    /// recipients come from the proofs, not the caller.
    ///
    /// # Errors
    ///
    /// [`MembershipError::InvalidMint`] when no root is set, a proof fails,
    /// a recipient already holds a membership, or a recipient repeats
    /// within the batch. On error, nothing is applied.
    pub fn mint_memberships(
        &mut self,
        mints: &[MembershipMintWithProof],
    ) -> Result<(), MembershipError> {
        let root = self
            .membership_list_root
            .ok_or(MembershipError::InvalidMint)?;
        for mint in mints {
            if !verify_proof(root, leaf_hash(mint.to, mint.sequence_id), &mint.proof) {
                return Err(MembershipError::InvalidMint);
            }
        }
        self.validate_batch(mints.iter().map(|m| m.to), &[])?;
        for mint in mints {
            self.mint_one(mint.to, mint.sequence_id);
        }
        Ok(())
    }

    /// Burns the caller's own membership.
    ///
    /// # Errors
    ///
    /// [`MembershipError::InvalidBurn`] unless the caller holds the token.
    pub fn burn_membership(
        &mut self,
        caller: Address,
        token_id: TokenId,
    ) -> Result<(), MembershipError> {
        let record = self
            .tokens
            .get(&token_id)
            .ok_or(MembershipError::InvalidBurn)?;
        if record.owner != caller {
            return Err(MembershipError::InvalidBurn);
        }
        self.burn_one(token_id);
        Ok(())
    }

    /// Standard transfer entry point. Memberships are non-transferable.
    ///
    /// # Errors
    ///
    /// Always [`MembershipError::TransferNotAllowed`].
    pub fn transfer_membership(
        &mut self,
        caller: Address,
        to: Address,
        token_id: TokenId,
    ) -> Result<(), MembershipError> {
        let _ = (caller, to, token_id);
        Err(MembershipError::TransferNotAllowed)
    }

    // =========================================================================
    // READ VIEWS
    // =========================================================================

    /// The instance's actor address.
    #[must_use]
    pub fn memberships_address(&self) -> Address {
        self.address
    }

    /// The administrative owner address.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// The controlling node.
    #[must_use]
    pub fn control_node(&self) -> NodeId {
        self.control_node
    }

    /// Instance name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Instance symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The current allow-list root, if set.
    #[must_use]
    pub fn membership_list_root(&self) -> Option<[u8; 32]> {
        self.membership_list_root
    }

    /// A held membership record.
    #[must_use]
    pub fn token(&self, token_id: TokenId) -> Option<&MembershipRecord> {
        self.tokens.get(&token_id)
    }

    /// Current holder of a token, if it exists.
    #[must_use]
    pub fn owner_of(&self, token_id: TokenId) -> Option<Address> {
        self.tokens.get(&token_id).map(|r| r.owner)
    }

    /// Number of memberships held by `address` (0 or 1).
    #[must_use]
    pub fn balance_of(&self, address: Address) -> u64 {
        self.balances.get(&address).copied().unwrap_or(0)
    }

    /// Live memberships (minted minus burned).
    #[must_use]
    pub fn total_supply(&self) -> u64 {
        self.tokens.len() as u64
    }

    /// Memberships ever minted; burns do not decrease this.
    #[must_use]
    pub fn total_minted(&self) -> u64 {
        self.total_minted
    }

    /// Presentation document reference for a token.
    #[must_use]
    pub fn token_uri(&self, token_id: TokenId) -> Option<String> {
        self.tokens
            .get(&token_id)
            .map(|_| format!("{}{}", self.base_uri, token_id))
    }

    /// The emitted event journal.
    #[must_use]
    pub fn events(&self) -> &[MembershipEvent] {
        &self.events
    }

    /// Drains and returns the emitted event journal.
    pub fn take_events(&mut self) -> Vec<MembershipEvent> {
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // INTERNAL
    // =========================================================================

    fn require_admin(&self, caller: Address) -> Result<(), MembershipError> {
        let authorized = self
            .authority
            .as_ref()
            .is_some_and(|a| a.is_authorized_address_for_node(self.control_node, caller));
        if authorized {
            Ok(())
        } else {
            Err(MembershipError::NotAuthorized)
        }
    }

    /// Validates a whole batch before anything is applied: mints must go to
    /// fresh, non-repeating addresses; burns must name distinct existing
    /// tokens.
    fn validate_batch(
        &self,
        mints: impl Iterator<Item = Address>,
        burns: &[TokenId],
    ) -> Result<(), MembershipError> {
        let mut recipients = HashSet::new();
        for to in mints {
            if self.balance_of(to) != 0 || !recipients.insert(to) {
                return Err(MembershipError::InvalidMint);
            }
        }
        let mut burned = HashSet::new();
        for token_id in burns {
            if !self.tokens.contains_key(token_id) || !burned.insert(*token_id) {
                return Err(MembershipError::InvalidBurn);
            }
        }
        Ok(())
    }

    fn apply_batch(&mut self, mints: &[MembershipMint], burns: &[TokenId]) {
        for mint in mints {
            self.mint_one(mint.to, mint.sequence_id);
        }
        for token_id in burns {
            self.burn_one(*token_id);
        }
    }

    fn mint_one(&mut self, to: Address, sequence_id: imprint_types::SequenceId) {
        self.total_minted += 1;
        let token_id = TokenId::new(self.total_minted);
        let mint_timestamp = self.now();
        self.tokens.insert(
            token_id,
            MembershipRecord {
                owner: to,
                sequence_id,
                mint_timestamp,
            },
        );
        *self.balances.entry(to).or_insert(0) += 1;
        self.events.push(MembershipEvent::MembershipCreated {
            token_id,
            to,
            sequence_id,
            mint_timestamp,
        });
        debug!(memberships = %self.address, %token_id, %to, "membership created");
    }

    fn burn_one(&mut self, token_id: TokenId) {
        if let Some(record) = self.tokens.remove(&token_id) {
            if let Some(balance) = self.balances.get_mut(&record.owner) {
                *balance -= 1;
            }
            self.events.push(MembershipEvent::MembershipBurned { token_id });
            debug!(memberships = %self.address, %token_id, "membership burned");
        }
    }

    fn now(&self) -> u64 {
        match &self.clock {
            Some(clock) => clock.now(),
            None => 0,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
