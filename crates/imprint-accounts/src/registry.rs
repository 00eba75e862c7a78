//! # Account Registry
//!
//! The identity resolver itself: an in-memory map from address to account
//! id, with trusted-issuer gating and two-sided transfer checks.

use crate::errors::AccountError;
use crate::events::AccountEvent;
use imprint_types::{AccountId, Address};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// The account registry.
///
/// Accounts are assigned monotonically from 1. The registry never reuses or
/// destroys an id; transferring an account vacates the old address.
#[derive(Debug, Default)]
pub struct AccountRegistry {
    /// Administrative owner, allowed to designate issuers. `None` disables
    /// issuer administration entirely.
    admin_owner: Option<Address>,
    /// Designated account issuers. Trusted-issuer mode is active iff this
    /// set is non-empty.
    issuers: HashSet<Address>,
    /// Address -> account id.
    ids_by_address: HashMap<Address, AccountId>,
    /// Total accounts ever created (also the last assigned id).
    total_count: u64,
    /// Journal of emitted events.
    events: Vec<AccountEvent>,
}

impl AccountRegistry {
    /// Creates a registry with an optional administrative owner.
    #[must_use]
    pub fn new(admin_owner: Option<Address>) -> Self {
        Self {
            admin_owner,
            ..Self::default()
        }
    }

    /// Creates an account for `subject`.
    ///
    /// # Errors
    ///
    /// - [`AccountError::AccountAlreadyExists`] if `subject` already resolves
    /// - [`AccountError::NotAuthorizedAccountIssuer`] if trusted-issuer mode
    ///   is active and `caller` is not a designated issuer
    pub fn create_account(
        &mut self,
        caller: Address,
        subject: Address,
        metadata: &str,
    ) -> Result<AccountId, AccountError> {
        if self.ids_by_address.contains_key(&subject) {
            return Err(AccountError::AccountAlreadyExists(subject));
        }
        if !self.issuers.is_empty() && !self.issuers.contains(&caller) {
            return Err(AccountError::NotAuthorizedAccountIssuer(caller));
        }

        self.total_count += 1;
        let id = AccountId::new(self.total_count);
        self.ids_by_address.insert(subject, id);
        self.events.push(AccountEvent::AccountCreated {
            id,
            subject,
            metadata: metadata.to_owned(),
        });
        info!(%id, %subject, "account created");
        Ok(id)
    }

    /// Resolves an address to its account id.
    ///
    /// # Errors
    ///
    /// [`AccountError::NoAccount`] if the address is unregistered. Use
    /// [`Self::unsafe_resolve_id`] for the non-failing variant.
    pub fn resolve_id(&self, address: Address) -> Result<AccountId, AccountError> {
        self.unsafe_resolve_id(address)
            .ok_or(AccountError::NoAccount(address))
    }

    /// Resolves an address to its account id, or `None` when unregistered.
    #[must_use]
    pub fn unsafe_resolve_id(&self, address: Address) -> Option<AccountId> {
        self.ids_by_address.get(&address).copied()
    }

    /// Moves the caller's account to `new_address`, vacating the caller's.
    ///
    /// # Errors
    ///
    /// - [`AccountError::NoAccount`] if the caller is unregistered
    /// - [`AccountError::AccountAlreadyExists`] if `new_address` is taken
    pub fn transfer_account(
        &mut self,
        caller: Address,
        new_address: Address,
    ) -> Result<(), AccountError> {
        let id = self.resolve_id(caller)?;
        if self.ids_by_address.contains_key(&new_address) {
            return Err(AccountError::AccountAlreadyExists(new_address));
        }

        self.ids_by_address.remove(&caller);
        self.ids_by_address.insert(new_address, id);
        self.events.push(AccountEvent::AccountTransferred { id, new_address });
        info!(%id, %new_address, "account transferred");
        Ok(())
    }

    /// Designates or revokes an account issuer.
    ///
    /// # Errors
    ///
    /// [`AccountError::Unauthorized`] unless `caller` is the administrative
    /// owner.
    pub fn set_account_issuer(
        &mut self,
        caller: Address,
        issuer: Address,
        enabled: bool,
    ) -> Result<(), AccountError> {
        if self.admin_owner != Some(caller) {
            return Err(AccountError::Unauthorized);
        }
        if enabled {
            self.issuers.insert(issuer);
        } else {
            self.issuers.remove(&issuer);
        }
        self.events.push(AccountEvent::AccountIssuerSet { issuer, enabled });
        debug!(%issuer, enabled, "account issuer set");
        Ok(())
    }

    /// Emits a broadcast event tagged with the caller's account id. Pure
    /// signaling; no state change.
    ///
    /// # Errors
    ///
    /// [`AccountError::NoAccount`] if the caller is unregistered.
    pub fn broadcast(
        &mut self,
        caller: Address,
        topic: &str,
        message: &str,
    ) -> Result<(), AccountError> {
        let account_id = self.resolve_id(caller)?;
        self.events.push(AccountEvent::AccountBroadcast {
            account_id,
            topic: topic.to_owned(),
            message: message.to_owned(),
        });
        debug!(%account_id, topic, "account broadcast");
        Ok(())
    }

    /// Total accounts ever created.
    #[must_use]
    pub fn total_account_count(&self) -> u64 {
        self.total_count
    }

    /// The emitted event journal.
    #[must_use]
    pub fn events(&self) -> &[AccountEvent] {
        &self.events
    }

    /// Drains and returns the emitted event journal.
    pub fn take_events(&mut self) -> Vec<AccountEvent> {
        std::mem::take(&mut self.events)
    }
}

// =============================================================================
// TESTS
// =============================================================================
