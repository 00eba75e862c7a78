//! # Error Types
//!
//! All error types for the node graph.

use imprint_types::Address;
use thiserror::Error;

/// Errors raised by the node registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// The invoking address has no account.
    #[error("no account for address {0}")]
    NoAccount(Address),

    /// Structurally invalid creation request: zero node type, or a
    /// parent/group reference to a node that does not exist.
    #[error("invalid node create")]
    InvalidNodeCreate,

    /// The invoker is not authorized to manage the node in question.
    #[error("not authorized for node")]
    NotAuthorizedForNode,
}

// =============================================================================
// TESTS
// =============================================================================
