//! # Integration Flows
//!
//! Cross-subsystem choreography: every flow here runs the real account
//! registry, node registry, factory, collection, and engine wired together
//! the way a deployment wires them.

pub mod fixtures;

mod authorization_flows;
mod issuance_flows;
mod membership_flows;
