//! # Identifiers
//!
//! Registry-assigned identifier newtypes. Each owning registry assigns ids
//! monotonically starting at 1; absence is always `Option::None` rather than
//! a reserved zero value.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_newtype {
    ($(#[$doc:meta])* $name:ident, $inner:ty) => {
        $(#[$doc])*
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize,
        )]
        pub struct $name(pub $inner);

        impl $name {
            /// Creates an identifier from its raw value.
            #[must_use]
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            /// Returns the raw value.
            #[must_use]
            pub const fn value(&self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }
    };
}

id_newtype!(
    /// A stable account identifier bound to exactly one address at a time.
    AccountId,
    u64
);

id_newtype!(
    /// An entry in the ownership/delegation forest.
    NodeId,
    u64
);

id_newtype!(
    /// An issuance configuration scoped to one collection.
    SequenceId,
    u16
);

id_newtype!(
    /// A minted record, globally numbered within its collection.
    TokenId,
    u64
);

// =============================================================================
// TESTS
// =============================================================================
