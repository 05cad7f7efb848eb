use ethereum_types::H256;
use sha2::{Digest, Sha256};

/// Domain-separation prefix for leaf digests.
pub const LEAF_PREFIX: u8 = 0x00;

/// Domain-separation prefix for internal-node digests.
pub const NODE_PREFIX: u8 = 0x01;

/// The all-zero digest. In a sparse tree it stands in for every empty
/// subtree, whatever its height.
pub const ZERO_HASH: H256 = H256([0u8; 32]);

/// The root of a dense Merkle tree with no leaves.
/// 0xe3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855
pub const EMPTY_ROOT: H256 = H256([
    227, 176, 196, 66, 152, 252, 28, 20, 154, 251, 244, 200, 153, 111, 185, 36, 39, 174, 65, 228,
    100, 155, 147, 76, 164, 149, 153, 27, 120, 82, 184, 85,
]);

/// Returns `sha256(data)`.
pub fn hash(data: &[u8]) -> H256 {
    H256(Sha256::digest(data).into())
}

/// Returns `sha256(0x00 || data)`, the digest of a leaf holding `data`.
///
/// The prefix byte keeps leaf digests and internal-node digests in disjoint
/// domains, so no byte string can hash as both.
pub fn leaf_digest(data: &[u8]) -> H256 {
    let mut hasher = Sha256::new();
    hasher.update([LEAF_PREFIX]);
    hasher.update(data);
    H256(hasher.finalize().into())
}

/// Returns `sha256(0x01 || left || right)`, the digest of an internal node.
pub fn node_digest(left: &H256, right: &H256) -> H256 {
    let mut hasher = Sha256::new();
    hasher.update([NODE_PREFIX]);
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    H256(hasher.finalize().into())
}

#[test]
fn test_empty_root() {
    assert_eq!(EMPTY_ROOT, hash(&[]));
}

#[test]
fn test_empty_root_vector() {
    use hex_literal::hex;

    assert_eq!(
        EMPTY_ROOT,
        H256(hex!(
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        ))
    );
}

#[test]
fn test_leaf_and_node_domains_are_disjoint() {
    let l = ZERO_HASH;
    let r = ZERO_HASH;
    let mut preimage = Vec::with_capacity(64);
    preimage.extend_from_slice(l.as_bytes());
    preimage.extend_from_slice(r.as_bytes());

    // Same 64 bytes hashed as a leaf and as a node must disagree.
    assert_ne!(leaf_digest(&preimage), node_digest(&l, &r));
    // And neither matches the bare hash.
    assert_ne!(leaf_digest(&preimage), hash(&preimage));
}
