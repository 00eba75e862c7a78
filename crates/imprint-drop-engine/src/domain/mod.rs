//! # Drop Engine Domain
//!
//! Pricing records, price math, and mint-call context.

pub mod context;
pub mod drop;
