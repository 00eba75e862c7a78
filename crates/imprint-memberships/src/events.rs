//! # Event Schema
//!
//! Typed journal entries emitted by membership mutations.

use imprint_types::{Address, NodeId, SequenceId, TokenId};
use serde::{Deserialize, Serialize};

/// Events emitted by memberships and their factory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipEvent {
    /// A new memberships instance was created and initialized.
    MembershipsCreated {
        /// Address assigned to the new instance.
        memberships: Address,
        /// The controlling node it is bound to.
        control_node: NodeId,
        /// Instance name.
        name: String,
    },

    /// A membership was minted.
    MembershipCreated {
        /// The assigned token id.
        token_id: TokenId,
        /// The new member.
        to: Address,
        /// Operator-chosen sequence tag.
        sequence_id: SequenceId,
        /// Mint time in unix seconds.
        mint_timestamp: u64,
    },

    /// A membership was burned.
    MembershipBurned {
        /// The burned token.
        token_id: TokenId,
    },

    /// The allow-list root changed.
    MembershipListRootSet {
        /// The new root.
        root: [u8; 32],
    },

    /// An admin moved a membership between addresses.
    MembershipAdminTransfer {
        /// The moved token.
        token_id: TokenId,
        /// Previous holder.
        from: Address,
        /// New holder.
        to: Address,
    },

    /// The administrative owner address changed.
    OwnerSet {
        /// The new owner.
        owner: Address,
    },
}
