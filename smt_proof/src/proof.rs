//! Proof structures and the compact transport form.

use ethereum_types::H256;
use rollup_common::ZERO_HASH;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bits::MAX_DEPTH;

/// Stores the result of proof operations. Returns a [`ProofError`] upon
/// failure.
pub type ProofResult<T> = Result<T, ProofError>;

/// An error type for structurally defective proofs. Raised before any
/// folding begins; a proof that folds to the wrong root is not an error but
/// a negative verification outcome.
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
pub enum ProofError {
    /// More side nodes than the tree has levels.
    #[error("proof carries {0} side nodes; the maximum tree depth is {MAX_DEPTH}")]
    TooManySideNodes(usize),

    /// Non-membership leaf data that is neither empty nor a `path ||
    /// value_hash` pair.
    #[error("non-membership leaf data must be empty or exactly 64 bytes, got {0}")]
    MalformedLeafData(usize),

    /// A compact proof whose bit mask disagrees with its side-node counts.
    #[error(
        "compact proof shape mismatch: bit mask has {mask_len} entries ({retained} set) \
         against {num_side_nodes} claimed positions and {side_nodes} retained side nodes"
    )]
    ProofShapeMismatch {
        /// Length of the bit mask.
        mask_len: usize,
        /// Number of set mask bits.
        retained: usize,
        /// The claimed original side-node count.
        num_side_nodes: usize,
        /// Side nodes actually present.
        side_nodes: usize,
    },
}

/// A verification-ready sparse Merkle proof.
///
/// Produced off-core by a prover and consumed once by
/// [`crate::verify::verify_proof`]; there is no stored lifecycle.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct SparseMerkleProof {
    /// Sibling digests along the path, deepest (leaf-level) first.
    pub side_nodes: Vec<H256>,
    /// Empty when the non-membership path is vacant; otherwise the 64-byte
    /// `path || value_hash` of the unrelated leaf occupying it.
    pub non_membership_leaf_data: Vec<u8>,
    /// Opaque sibling payload, carried through compaction untouched.
    pub sibling_data: Vec<u8>,
}

/// The wire-efficient form of [`SparseMerkleProof`]: all-zero side nodes are
/// omitted and recorded in a bit mask instead.
///
/// Invariants: `bit_mask.len() == num_side_nodes`, and the number of set
/// mask bits equals `side_nodes.len()`. [`decompact_proof`] rejects anything
/// else.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct SparseCompactMerkleProof {
    /// The non-zero side nodes only, order preserved.
    pub side_nodes: Vec<H256>,
    /// As in [`SparseMerkleProof::non_membership_leaf_data`].
    pub non_membership_leaf_data: Vec<u8>,
    /// One flag per original position: `true` = retained in `side_nodes`,
    /// `false` = was the zero sentinel and was omitted.
    pub bit_mask: Vec<bool>,
    /// The original side-node count.
    pub num_side_nodes: usize,
    /// As in [`SparseMerkleProof::sibling_data`].
    pub sibling_data: Vec<u8>,
}

/// Drops zero-sentinel side nodes from `proof`, recording their positions in
/// the bit mask. Order-preserving and lossless.
pub fn compact_proof(proof: &SparseMerkleProof) -> ProofResult<SparseCompactMerkleProof> {
    if proof.side_nodes.len() > MAX_DEPTH {
        return Err(ProofError::TooManySideNodes(proof.side_nodes.len()));
    }

    let mut side_nodes = Vec::new();
    let mut bit_mask = Vec::with_capacity(proof.side_nodes.len());
    for side in &proof.side_nodes {
        if *side == ZERO_HASH {
            bit_mask.push(false);
        } else {
            bit_mask.push(true);
            side_nodes.push(*side);
        }
    }

    Ok(SparseCompactMerkleProof {
        side_nodes,
        non_membership_leaf_data: proof.non_membership_leaf_data.clone(),
        num_side_nodes: bit_mask.len(),
        bit_mask,
        sibling_data: proof.sibling_data.clone(),
    })
}

/// Reconstructs the full proof from its compact form. Exact inverse of
/// [`compact_proof`].
pub fn decompact_proof(compact: &SparseCompactMerkleProof) -> ProofResult<SparseMerkleProof> {
    if compact.num_side_nodes > MAX_DEPTH {
        return Err(ProofError::TooManySideNodes(compact.num_side_nodes));
    }
    let retained = compact.bit_mask.iter().filter(|b| **b).count();
    if compact.bit_mask.len() != compact.num_side_nodes || retained != compact.side_nodes.len() {
        return Err(ProofError::ProofShapeMismatch {
            mask_len: compact.bit_mask.len(),
            retained,
            num_side_nodes: compact.num_side_nodes,
            side_nodes: compact.side_nodes.len(),
        });
    }

    let mut packed = compact.side_nodes.iter();
    let side_nodes = compact
        .bit_mask
        .iter()
        .map(|&kept| {
            if kept {
                // Counted above, so the iterator cannot run dry.
                *packed.next().unwrap_or(&ZERO_HASH)
            } else {
                ZERO_HASH
            }
        })
        .collect();

    Ok(SparseMerkleProof {
        side_nodes,
        non_membership_leaf_data: compact.non_membership_leaf_data.clone(),
        sibling_data: compact.sibling_data.clone(),
    })
}
