//! Membership and non-membership verification.

use ethereum_types::H256;
use log::trace;
use rollup_common::{hash, leaf_digest, node_digest, LEAF_PREFIX, NODE_PREFIX, ZERO_HASH};

use crate::bits::{get_bit_at_from_msb, MAX_DEPTH};
use crate::proof::{ProofError, ProofResult, SparseMerkleProof};

/// Byte length of a leaf's `path || value_hash` payload.
const LEAF_DATA_LEN: usize = 64;

/// A node recomputed while folding a proof: its digest and the exact hash
/// preimage (domain prefix included).
///
/// Callers that persist tree nodes can write these as `hash -> data` entries;
/// [`verify_proof`] itself has no storage side effect.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Update {
    /// The node digest.
    pub hash: H256,
    /// The digest's preimage: `0x00 || path || value_hash` for the leaf,
    /// `0x01 || left || right` for each internal node.
    pub data: Vec<u8>,
}

/// Digest and prefixed preimage of the leaf holding `value_hash` at `path`.
fn leaf_node(path: &H256, value_hash: &H256) -> (H256, Vec<u8>) {
    let mut payload = Vec::with_capacity(LEAF_DATA_LEN);
    payload.extend_from_slice(path.as_bytes());
    payload.extend_from_slice(value_hash.as_bytes());
    let digest = leaf_digest(&payload);

    let mut preimage = Vec::with_capacity(1 + LEAF_DATA_LEN);
    preimage.push(LEAF_PREFIX);
    preimage.extend_from_slice(&payload);
    (digest, preimage)
}

/// Verifies `proof` against `root` for the pair `(key, value)`.
///
/// An empty `value` claims that no leaf exists at `key`:
/// - with empty [`SparseMerkleProof::non_membership_leaf_data`], the path is
///   vacant and the fold starts at the zero sentinel;
/// - otherwise that data names the unrelated leaf occupying the path. If its
///   path equals `key` the claim contradicts itself and the proof verifies
///   `false`.
///
/// A non-empty `value` claims membership: the fold starts at the digest of
/// the leaf `(key, hash(value))`.
///
/// Side node `i` (0 = deepest) pairs with bit `len - 1 - i` of `key`, read
/// MSB-first; a set bit makes the accumulated digest the right child. Every
/// node recomputed along the way is returned as an [`Update`] for callers
/// that persist state.
///
/// Returns `(computed_root == root, updates)`. Structural defects are
/// [`ProofError`]s raised before folding.
pub fn verify_proof(
    proof: &SparseMerkleProof,
    root: H256,
    key: H256,
    value: &[u8],
) -> ProofResult<(bool, Vec<Update>)> {
    if proof.side_nodes.len() > MAX_DEPTH {
        return Err(ProofError::TooManySideNodes(proof.side_nodes.len()));
    }

    let mut updates = Vec::with_capacity(proof.side_nodes.len() + 1);
    let mut current = if value.is_empty() {
        match proof.non_membership_leaf_data.len() {
            0 => ZERO_HASH,
            LEAF_DATA_LEN => {
                let actual_path = H256::from_slice(&proof.non_membership_leaf_data[..32]);
                let value_hash = H256::from_slice(&proof.non_membership_leaf_data[32..]);
                if actual_path == key {
                    // A leaf *does* exist at this key; the claim refutes
                    // itself.
                    trace!("non-membership proof names a leaf at the claimed key {:x}", key);
                    return Ok((false, Vec::new()));
                }
                let (digest, preimage) = leaf_node(&actual_path, &value_hash);
                updates.push(Update {
                    hash: digest,
                    data: preimage,
                });
                digest
            }
            len => return Err(ProofError::MalformedLeafData(len)),
        }
    } else {
        let value_hash = hash(value);
        let (digest, preimage) = leaf_node(&key, &value_hash);
        updates.push(Update {
            hash: digest,
            data: preimage,
        });
        digest
    };

    let depth = proof.side_nodes.len();
    for (i, side) in proof.side_nodes.iter().enumerate() {
        // Side node 0 is the deepest sibling, steered by the bit
        // `depth - 1 - i` positions down from the key's MSB.
        let (left, right) = if get_bit_at_from_msb(key.as_bytes(), depth - 1 - i) {
            (side, &current)
        } else {
            (&current, side)
        };

        let digest = node_digest(left, right);
        let mut preimage = Vec::with_capacity(65);
        preimage.push(NODE_PREFIX);
        preimage.extend_from_slice(left.as_bytes());
        preimage.extend_from_slice(right.as_bytes());
        updates.push(Update {
            hash: digest,
            data: preimage,
        });
        current = digest;
    }

    Ok((current == root, updates))
}
