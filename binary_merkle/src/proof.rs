//! Pure verification, append, and update folds over `(root, proof)` pairs.
//!
//! Nothing here touches an arena: every function is a deterministic,
//! side-effect-free computation, safe to run concurrently on arbitrary
//! threads. Proofs are sibling digests ordered leaf to root.

use ethereum_types::H256;
use rollup_common::{leaf_digest, node_digest};
use thiserror::Error;

/// Stores the result of proof operations. Returns a [`TreeError`] upon
/// failure.
pub type TreeResult<T> = Result<T, TreeError>;

/// An error type for dense-tree proof operations.
///
/// All variants are *shape* rejections, raised before any folding begins. A
/// structurally valid proof whose folded root simply disagrees with the
/// claimed root is not an error: [`verify`] reports it as `Ok(false)`.
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
pub enum TreeError {
    /// The leaf index does not address a leaf of the claimed tree.
    #[error("leaf index {leaf_index} is out of range for a tree of {leaf_count} leaves")]
    LeafIndexOutOfRange {
        /// The offending index.
        leaf_index: u64,
        /// The claimed number of leaves.
        leaf_count: u64,
    },

    /// The proof length disagrees with the path implied by the claimed leaf
    /// count.
    #[error("proof carries {got} side nodes but the addressed path requires {expected}")]
    ProofLengthMismatch {
        /// Side nodes supplied.
        got: usize,
        /// Side nodes the path requires.
        expected: usize,
    },

    /// The operation is meaningless over a tree with no leaves.
    #[error("operation requires a non-empty tree")]
    EmptyTree,
}

/// Largest power of two strictly below `leaf_count`.
///
/// This is the left/right split point of the root: pair-and-promote
/// construction yields exactly the tree obtained by splitting the leaf range
/// here and recursing. Requires `leaf_count >= 2`.
const fn split_point(leaf_count: u64) -> u64 {
    1 << (63 - (leaf_count - 1).leading_zeros())
}

/// Number of siblings on the path from `leaf_index` to the root of a tree
/// with `leaf_count` leaves.
///
/// With odd-node promotion the path length is not uniform across leaves: in a
/// 3-leaf tree the promoted third leaf pairs only once, so its path length is
/// 1 while the other two have 2.
pub fn path_length(leaf_index: u64, leaf_count: u64) -> TreeResult<usize> {
    if leaf_index >= leaf_count {
        return Err(TreeError::LeafIndexOutOfRange {
            leaf_index,
            leaf_count,
        });
    }
    Ok(path_length_inner(leaf_index, leaf_count))
}

fn path_length_inner(leaf_index: u64, leaf_count: u64) -> usize {
    if leaf_count <= 1 {
        return 0;
    }
    let split = split_point(leaf_count);
    if leaf_index < split {
        1 + path_length_inner(leaf_index, split)
    } else {
        1 + path_length_inner(leaf_index - split, leaf_count - split)
    }
}

/// Folds a leaf digest up to a root. `proof.len()` must already equal the
/// path length for `(leaf_index, leaf_count)`.
fn fold(leaf_hash: H256, proof: &[H256], leaf_index: u64, leaf_count: u64) -> H256 {
    if leaf_count <= 1 {
        debug_assert!(proof.is_empty());
        return leaf_hash;
    }
    let split = split_point(leaf_count);
    let (rest, top) = proof.split_at(proof.len() - 1);
    if leaf_index < split {
        node_digest(&fold(leaf_hash, rest, leaf_index, split), &top[0])
    } else {
        node_digest(
            &top[0],
            &fold(leaf_hash, rest, leaf_index - split, leaf_count - split),
        )
    }
}

/// Verifies that `leaf_data` sits at `leaf_index` in the tree of
/// `leaf_count` leaves committed to by `root`.
///
/// Shape mismatches (bad index, wrong proof length) are [`TreeError`]s;
/// a root mismatch is the non-exceptional `Ok(false)`.
pub fn verify<T: AsRef<[u8]>>(
    root: H256,
    leaf_data: T,
    proof: &[H256],
    leaf_index: u64,
    leaf_count: u64,
) -> TreeResult<bool> {
    if leaf_count == 0 {
        return Err(TreeError::EmptyTree);
    }
    let expected = path_length(leaf_index, leaf_count)?;
    if proof.len() != expected {
        return Err(TreeError::ProofLengthMismatch {
            got: proof.len(),
            expected,
        });
    }
    let computed = fold(
        leaf_digest(leaf_data.as_ref()),
        proof,
        leaf_index,
        leaf_count,
    );
    Ok(computed == root)
}

/// Computes the root of the tree obtained by appending `new_leaf_data` to a
/// tree of `leaf_count` leaves, without reconstruction.
///
/// `proof` is the merge frontier: the roots of the complete subtrees in the
/// current tree's binary leaf-count decomposition, deepest first — exactly
/// `leaf_count.count_ones()` digests (see
/// [`MerkleTree::append_frontier`](crate::tree::MerkleTree::append_frontier)).
/// The appended leaf is the rightmost leaf of the new tree, so every frontier
/// node folds in on the left. A malformed frontier is rejected rather than
/// folded into a wrong root.
pub fn append<T: AsRef<[u8]>>(
    leaf_count: u64,
    new_leaf_data: T,
    proof: &[H256],
) -> TreeResult<H256> {
    let expected = leaf_count.count_ones() as usize;
    if proof.len() != expected {
        return Err(TreeError::ProofLengthMismatch {
            got: proof.len(),
            expected,
        });
    }
    let mut digest = leaf_digest(new_leaf_data.as_ref());
    for side in proof {
        digest = node_digest(side, &digest);
    }
    Ok(digest)
}

/// Computes the root of the tree obtained by replacing the leaf at
/// `leaf_index` with `new_data`, given that leaf's sibling path.
///
/// The proof must have been produced (and, if it crossed a trust boundary,
/// verified) against the current root; this function only refolds it with
/// the replacement leaf digest.
pub fn update<T: AsRef<[u8]>>(
    leaf_index: u64,
    new_data: T,
    proof: &[H256],
    leaf_count: u64,
) -> TreeResult<H256> {
    if leaf_count == 0 {
        return Err(TreeError::EmptyTree);
    }
    let expected = path_length(leaf_index, leaf_count)?;
    if proof.len() != expected {
        return Err(TreeError::ProofLengthMismatch {
            got: proof.len(),
            expected,
        });
    }
    Ok(fold(
        leaf_digest(new_data.as_ref()),
        proof,
        leaf_index,
        leaf_count,
    ))
}
