//! Stateless sparse Merkle proof verification and compaction.
//!
//! A sparse Merkle tree is a conceptually full binary tree over the 256-bit
//! key space in which every unpopulated subtree collapses to the all-zero
//! sentinel digest. This crate owns no tree state at all: verification and
//! compaction are pure functions over proof structures and a caller-supplied
//! root, so callers may run them on any thread with no coordination.

#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]

pub mod bits;
pub mod proof;
pub mod verify;
