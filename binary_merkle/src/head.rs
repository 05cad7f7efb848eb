//! The persistent projection of an evolving tree.

use ethereum_types::H256;
use log::trace;
use rollup_common::EMPTY_ROOT;
use serde::{Deserialize, Serialize};

use crate::proof::{self, TreeResult};

/// The committed state of an evolving dense tree: its root and leaf count.
///
/// This is all a block-commitment store persists. Appends and updates go
/// through the pure folds in [`crate::proof`]; the node arena lives with
/// whichever external indexer maintains the full leaf set and serves proof
/// requests. Mutation requires single-writer discipline; the type is plain
/// `Copy` data, so readers clone a snapshot and proceed lock-free.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct TreeHead {
    /// Current committed root.
    pub root: H256,
    /// Number of committed leaves; incremented by every append.
    pub leaf_count: u64,
}

impl Default for TreeHead {
    fn default() -> Self {
        Self {
            root: EMPTY_ROOT,
            leaf_count: 0,
        }
    }
}

impl TreeHead {
    /// Appends one leaf, given the current merge frontier (see
    /// [`crate::tree::MerkleTree::append_frontier`]). The frontier must be
    /// authenticated by the caller against `self.root`; this method only
    /// checks its shape.
    pub fn append(&mut self, data: &[u8], frontier: &[H256]) -> TreeResult<H256> {
        let root = proof::append(self.leaf_count, data, frontier)?;
        self.root = root;
        self.leaf_count += 1;
        trace!("appended leaf {}: new root {:x}", self.leaf_count - 1, root);
        Ok(root)
    }

    /// Replaces the leaf at `leaf_index`, given its sibling path against the
    /// current root.
    pub fn update(&mut self, leaf_index: u64, data: &[u8], path: &[H256]) -> TreeResult<H256> {
        let root = proof::update(leaf_index, data, path, self.leaf_count)?;
        self.root = root;
        trace!("updated leaf {}: new root {:x}", leaf_index, root);
        Ok(root)
    }
}
