//! # Allow-List Merkle Tree
//!
//! Keccak-256 Merkle tree over `(address, sequence-id)` leaves with
//! sorted-pair interior hashing, so proofs need no left/right flags. The
//! same construction is used by operators building roots off-process and by
//! the verification path here.

use imprint_types::{Address, SequenceId};
use sha3::{Digest, Keccak256};

/// Keccak-256 of `data`.
#[must_use]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Leaf hash for one allow-list entry: `keccak256(address ‖ sequence_id)`.
#[must_use]
pub fn leaf_hash(address: Address, sequence_id: SequenceId) -> [u8; 32] {
    let mut data = [0u8; 22];
    data[..20].copy_from_slice(address.as_bytes());
    data[20..].copy_from_slice(&sequence_id.value().to_be_bytes());
    keccak256(&data)
}

/// Interior hash: `keccak256(min(a,b) ‖ max(a,b))`.
fn pair_hash(a: [u8; 32], b: [u8; 32]) -> [u8; 32] {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut data = [0u8; 64];
    data[..32].copy_from_slice(&lo);
    data[32..].copy_from_slice(&hi);
    keccak256(&data)
}

/// Verifies an inclusion proof of `leaf` against `root`.
#[must_use]
pub fn verify_proof(root: [u8; 32], leaf: [u8; 32], proof: &[[u8; 32]]) -> bool {
    let mut hash = leaf;
    for sibling in proof {
        hash = pair_hash(hash, *sibling);
    }
    hash == root
}

/// A Merkle tree over a fixed leaf set. Odd nodes are promoted unpaired to
/// the next layer.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    layers: Vec<Vec<[u8; 32]>>,
}

impl MerkleTree {
    /// Builds a tree from pre-hashed leaves. Must be non-empty.
    #[must_use]
    pub fn from_leaves(leaves: Vec<[u8; 32]>) -> Self {
        assert!(!leaves.is_empty(), "merkle tree needs at least one leaf");
        let mut layers = vec![leaves];
        while layers.last().map_or(0, Vec::len) > 1 {
            let previous = layers.last().map_or(&[][..], Vec::as_slice);
            let mut next = Vec::with_capacity(previous.len().div_ceil(2));
            for pair in previous.chunks(2) {
                match pair {
                    [a, b] => next.push(pair_hash(*a, *b)),
                    [a] => next.push(*a),
                    _ => unreachable!(),
                }
            }
            layers.push(next);
        }
        Self { layers }
    }

    /// Builds a tree over allow-list entries.
    #[must_use]
    pub fn from_entries(entries: &[(Address, SequenceId)]) -> Self {
        Self::from_leaves(
            entries
                .iter()
                .map(|(address, sequence_id)| leaf_hash(*address, *sequence_id))
                .collect(),
        )
    }

    /// The tree root.
    #[must_use]
    pub fn root(&self) -> [u8; 32] {
        self.layers.last().and_then(|l| l.first()).copied().unwrap_or([0u8; 32])
    }

    /// Inclusion proof for the leaf at `index`.
    #[must_use]
    pub fn proof(&self, index: usize) -> Vec<[u8; 32]> {
        let mut proof = Vec::new();
        let mut position = index;
        for layer in &self.layers[..self.layers.len() - 1] {
            let sibling = position ^ 1;
            if let Some(hash) = layer.get(sibling) {
                proof.push(*hash);
            }
            position /= 2;
        }
        proof
    }
}

// =============================================================================
// TESTS
// =============================================================================
