//! # Monetary Arithmetic
//!
//! 256-bit amounts and basis-point math. All splits round down; the
//! remainder always stays with the residual leg so no value is created or
//! destroyed by a split.

// Re-export U256 from primitive-types for 256-bit arithmetic
pub use primitive_types::U256;

/// Basis-point denominator: 10000 bps = 100%.
pub const MAX_BPS: u16 = 10_000;

/// Computes the `bps` share of `amount`, rounding down.
///
/// Callers take `amount - bps_share(amount, bps)` as the residual leg, so
/// the two legs always sum to `amount` exactly.
#[must_use]
pub fn bps_share(amount: U256, bps: u16) -> U256 {
    amount * U256::from(bps) / U256::from(MAX_BPS)
}

// =============================================================================
// TESTS
// =============================================================================
