//! Dense (binary) Merkle tree engine for rollup block commitments.
//!
//! A tree is built bottom-up over an ordered, densely packed leaf list. At
//! each layer adjacent nodes are paired with [`rollup_common::node_digest`];
//! an unpaired trailing node is promoted unchanged to the next layer rather
//! than paired with itself, so `root([a, b, c])` is
//! `node(node(leaf(a), leaf(b)), leaf(c))`.
//!
//! Construction produces a flat node arena ([`tree::MerkleTree`]) from which
//! inclusion proofs are generated; verification, append, and leaf update are
//! pure folds in [`proof`] that need no arena at all, which is what lets a
//! block-commitment store persist nothing but a [`head::TreeHead`].

#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]

pub mod head;
pub mod node;
pub mod proof;
pub mod tree;

#[cfg(test)]
pub(crate) mod testing_utils;
#[cfg(test)]
mod tree_test;
