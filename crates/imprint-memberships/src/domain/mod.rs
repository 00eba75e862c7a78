//! # Memberships Domain
//!
//! Membership records and the allow-list Merkle tree.

pub mod membership;
pub mod merkle;
