//! # Imprint Accounts - Identity Resolver
//!
//! Maps external addresses to stable integer account identifiers. At most
//! one non-zero account per address; accounts are created by
//! self-registration (or by designated issuers in trusted-issuer mode),
//! moved by two-sided transfer, and never destroyed — only vacated.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | One account per address | `AccountRegistry::create_account`, `transfer_account` |
//! | Ids assigned monotonically from 1 | `AccountRegistry::create_account` |
//! | Issuer gating when trusted-issuer mode is active | `AccountRegistry::create_account` |
//! | Issuer administration restricted to the admin owner | `AccountRegistry::set_account_issuer` |
//!
//! ## Usage Example
//!
//! ```
//! use imprint_accounts::AccountRegistry;
//! use imprint_types::Address;
//!
//! let mut registry = AccountRegistry::new(None);
//! let alice = Address::from_low_u64(1);
//! let id = registry.create_account(alice, alice, "").unwrap();
//! assert_eq!(registry.resolve_id(alice).unwrap(), id);
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod adapters;
pub mod errors;
pub mod events;
pub mod ports;
pub mod registry;

pub use adapters::SharedAccountResolver;
pub use errors::AccountError;
pub use events::AccountEvent;
pub use ports::AccountResolver;
pub use registry::AccountRegistry;
