//! The flat, append-only node arena backing a constructed tree.

use ethereum_types::H256;
use serde::{Deserialize, Serialize};

/// A single node in the arena.
///
/// Links are arena indices rather than references; `None` is the "no link"
/// sentinel. Leaves occupy indices `[0, leaf_count)`; internal nodes are
/// appended after them, layer by layer, so an index also encodes creation
/// order and is stable across appends.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Index of the left child. `None` for leaves.
    pub left: Option<usize>,
    /// Index of the right child. `None` for leaves.
    pub right: Option<usize>,
    /// Index of the parent. `None` for the root, and for a promoted node
    /// until it is finally paired at a higher layer.
    pub parent: Option<usize>,
    /// `leaf_digest(data)` for leaves, `node_digest(left, right)` for
    /// internal nodes.
    pub hash: H256,
    /// Raw leaf payload. Internal nodes carry no data.
    pub data: Option<Vec<u8>>,
}

impl TreeNode {
    pub(crate) fn leaf(hash: H256, data: Vec<u8>) -> Self {
        Self {
            left: None,
            right: None,
            parent: None,
            hash,
            data: Some(data),
        }
    }

    pub(crate) fn internal(hash: H256, left: usize, right: usize) -> Self {
        Self {
            left: Some(left),
            right: Some(right),
            parent: None,
            hash,
            data: None,
        }
    }

    /// Whether this node is a leaf.
    pub const fn is_leaf(&self) -> bool {
        self.data.is_some()
    }
}
