//! # Imprint Drop Engine - Issuance Engine
//!
//! Validates sequence-level pricing configuration, computes the current
//! price (fixed or linearly decaying), enforces per-transaction limits and
//! caller gating, and settles payment with an optional protocol-fee skim
//! and overpayment refund.
//!
//! Engine state is keyed by `(collection address, sequence id)` in one
//! composite-key map, so a single engine instance serves any number of
//! collections without knowing their internals.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Configuration rejections write no partial state | `DropEngine::configure_sequence` |
//! | The fee snapshot is frozen at configuration time | `domain::drop::validate_drop` |
//! | Current price never falls below the floor price | `domain::drop::current_price` |
//! | A failed external transfer reverts the whole mint | `DropEngine::mint` settles before committing |
//! | Overpayment is refunded, never retained | `DropEngine::mint` |
//!
//! ## Settlement Ordering
//!
//! Every mint runs validate → settle → commit: all checks (including the
//! collection's seal-window and supply checks for the full quantity) happen
//! first, then the refund and revenue legs settle atomically through the
//! [`ports::FundsGateway`], and only then are counters advanced and records
//! minted. The commit stage cannot fail, so no failing path leaves partial
//! state behind.

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod adapters;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod events;
pub mod ports;

pub use adapters::InMemoryBank;
pub use domain::context::{Caller, CallerKind, Payment};
pub use domain::drop::DropData;
pub use engine::DropEngine;
pub use errors::DropEngineError;
pub use events::DropEngineEvent;
pub use ports::{FundsError, FundsGateway, Transfer};
