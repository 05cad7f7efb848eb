//! Arena-backed construction and proof generation.

use ethereum_types::H256;
use log::trace;
use rollup_common::{leaf_digest, node_digest, EMPTY_ROOT};
use serde::{Deserialize, Serialize};

use crate::node::TreeNode;
use crate::proof::{TreeError, TreeResult};

/// A dense Merkle tree over an ordered leaf list, held in a flat node arena.
///
/// The arena is append-only: construction pushes all leaves first, then
/// internal nodes layer by layer, and an index is never reassigned. Growing
/// the underlying leaf set is done through the pure folds in
/// [`crate::proof`] plus a fresh [`construct`](Self::construct) by whichever
/// indexer maintains the leaves; the arena itself is immutable once built.
///
/// Reads (root, proofs, frontier) may run concurrently; anything that
/// replaces the tree requires the caller's single-writer discipline.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MerkleTree {
    nodes: Vec<TreeNode>,
    leaf_count: u64,
    root_index: Option<usize>,
}

impl MerkleTree {
    /// Builds the tree for `leaves`, hashing each leaf and then pairing
    /// adjacent nodes per layer. An unpaired trailing node is promoted
    /// unchanged to the next layer — never paired with itself.
    pub fn construct<T: AsRef<[u8]>>(leaves: &[T]) -> Self {
        let mut nodes: Vec<TreeNode> = leaves
            .iter()
            .map(|l| TreeNode::leaf(leaf_digest(l.as_ref()), l.as_ref().to_vec()))
            .collect();
        let leaf_count = nodes.len() as u64;
        if nodes.is_empty() {
            return Self {
                nodes,
                leaf_count,
                root_index: None,
            };
        }

        let mut layer: Vec<usize> = (0..nodes.len()).collect();
        while layer.len() > 1 {
            let mut next = Vec::with_capacity(layer.len() / 2 + 1);
            for pair in layer.chunks(2) {
                match *pair {
                    [l, r] => {
                        let idx = nodes.len();
                        let hash = node_digest(&nodes[l].hash, &nodes[r].hash);
                        nodes.push(TreeNode::internal(hash, l, r));
                        nodes[l].parent = Some(idx);
                        nodes[r].parent = Some(idx);
                        next.push(idx);
                    }
                    // Odd one out: promoted, not duplicated.
                    [l] => next.push(l),
                    _ => unreachable!("chunks(2) yields one- or two-element slices"),
                }
            }
            layer = next;
        }

        trace!(
            "constructed dense tree: {} leaves, {} arena nodes",
            leaf_count,
            nodes.len()
        );
        Self {
            nodes,
            leaf_count,
            root_index: Some(layer[0]),
        }
    }

    /// The committed root. [`EMPTY_ROOT`] for a tree with no leaves.
    pub fn root(&self) -> H256 {
        match self.root_index {
            Some(i) => self.nodes[i].hash,
            None => EMPTY_ROOT,
        }
    }

    /// Number of leaves this tree was constructed over.
    pub const fn leaf_count(&self) -> u64 {
        self.leaf_count
    }

    /// The full node arena. Leaves occupy indices `[0, leaf_count)`.
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Inclusion proof for the leaf at `leaf_index`: sibling digests ordered
    /// leaf to root, one per pairing on the leaf's path. A promoted node
    /// contributes no sibling at the layer it skips.
    pub fn proof(&self, leaf_index: u64) -> TreeResult<Vec<H256>> {
        if leaf_index >= self.leaf_count {
            return Err(TreeError::LeafIndexOutOfRange {
                leaf_index,
                leaf_count: self.leaf_count,
            });
        }
        let mut proof = Vec::new();
        let mut idx = leaf_index as usize;
        while let Some(p) = self.nodes[idx].parent {
            let sibling = match (self.nodes[p].left, self.nodes[p].right) {
                (Some(l), Some(r)) if l == idx => r,
                (Some(l), Some(r)) => {
                    debug_assert_eq!(r, idx);
                    l
                }
                _ => unreachable!("internal node with a missing child link"),
            };
            proof.push(self.nodes[sibling].hash);
            idx = p;
        }
        Ok(proof)
    }

    /// The merge frontier consumed by [`crate::proof::append`]: roots of the
    /// complete subtrees in the leaf count's binary decomposition, deepest
    /// (smallest) first.
    pub fn append_frontier(&self) -> Vec<H256> {
        let mut blocks = Vec::new();
        let mut offset = 0u64;
        let mut remaining = self.leaf_count;
        while remaining > 0 {
            let size = 1u64 << (63 - remaining.leading_zeros());
            blocks.push((offset, size));
            offset += size;
            remaining -= size;
        }

        let mut frontier = Vec::with_capacity(blocks.len());
        for (offset, size) in blocks.into_iter().rev() {
            // The block root is the size.log2()-th ancestor of the block's
            // rightmost leaf; adjacent pairing keeps that whole climb inside
            // the block.
            let mut idx = (offset + size - 1) as usize;
            for _ in 0..size.trailing_zeros() {
                idx = self.nodes[idx]
                    .parent
                    .expect("complete subtree missing an ancestor");
            }
            frontier.push(self.nodes[idx].hash);
        }
        frontier
    }
}

/// Computes the root for `leaves` without any arena or link bookkeeping.
///
/// Identical to `MerkleTree::construct(leaves).root()` for every input, and
/// what a block producer uses when only the commitment is needed.
pub fn root_from_leaves<T: AsRef<[u8]>>(leaves: &[T]) -> H256 {
    if leaves.is_empty() {
        return EMPTY_ROOT;
    }
    let mut layer: Vec<H256> = leaves.iter().map(|l| leaf_digest(l.as_ref())).collect();
    while layer.len() > 1 {
        let next = layer
            .chunks(2)
            .map(|pair| match *pair {
                [l, r] => node_digest(&l, &r),
                [l] => l,
                _ => unreachable!("chunks(2) yields one- or two-element slices"),
            })
            .collect();
        layer = next;
    }
    layer[0]
}
