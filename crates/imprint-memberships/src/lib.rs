//! # Imprint Memberships - Non-Transferable Issuance
//!
//! A restricted issuance flavor on the same authorization substrate as
//! collections: admins (anyone authorized over the control node) batch-mint
//! and batch-burn membership records, members self-mint against a
//! Keccak-256 Merkle allow-list, and holders may burn their own record.
//! Normal transfers are disabled; only admins move records.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | At most one membership per address | `Memberships::batch_mint_and_burn`, `mint_memberships` |
//! | Token ids are monotonic, never reused after burns | `Memberships` mint paths |
//! | Standard transfers always fail | `Memberships::transfer_membership` |
//! | `init` succeeds exactly once; templates are poisoned | `Memberships::init` / `template` |
//! | Batches apply fully or not at all | validate-then-commit in every batch path |

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod domain;
pub mod errors;
pub mod events;
pub mod factory;
pub mod memberships;

pub use domain::membership::{MembershipMint, MembershipMintWithProof, MembershipRecord};
pub use domain::merkle::MerkleTree;
pub use errors::MembershipError;
pub use events::MembershipEvent;
pub use factory::{CreateMemberships, MembershipsFactory};
pub use memberships::{Memberships, MembershipsInit};
