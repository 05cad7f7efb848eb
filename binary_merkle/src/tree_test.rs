use ethereum_types::H256;
use rollup_common::{leaf_digest, node_digest, EMPTY_ROOT};

use crate::head::TreeHead;
use crate::proof::{append, path_length, update, verify, TreeError};
use crate::testing_utils::{common_setup, generate_n_random_leaves};
use crate::tree::{root_from_leaves, MerkleTree};

#[test]
fn empty_tree_commits_to_the_empty_root() {
    common_setup();

    let leaves: Vec<Vec<u8>> = vec![];
    assert_eq!(root_from_leaves(&leaves), EMPTY_ROOT);
    assert_eq!(MerkleTree::construct(&leaves).root(), EMPTY_ROOT);
}

#[test]
fn single_leaf_root_is_the_leaf_hash() {
    common_setup();

    let leaves = vec![b"lone leaf".to_vec()];
    let tree = MerkleTree::construct(&leaves);

    assert_eq!(tree.root(), leaf_digest(b"lone leaf"));
    // Zero-depth path: the proof is empty and still verifies.
    let proof = tree.proof(0).unwrap();
    assert!(proof.is_empty());
    assert!(verify(tree.root(), &leaves[0], &proof, 0, 1).unwrap());
}

#[test]
fn three_leaves_promote_the_odd_one_out() {
    common_setup();

    let (a, b, c) = (&b"a"[..], &b"b"[..], &b"c"[..]);
    let expected = node_digest(&node_digest(&leaf_digest(a), &leaf_digest(b)), &leaf_digest(c));

    assert_eq!(root_from_leaves(&[a, b, c]), expected);

    // Duplicating the trailing leaf instead of promoting it is a different
    // (wrong) root.
    let duplicated = node_digest(
        &node_digest(&leaf_digest(a), &leaf_digest(b)),
        &node_digest(&leaf_digest(c), &leaf_digest(c)),
    );
    assert_ne!(root_from_leaves(&[a, b, c]), duplicated);
}

#[test]
fn hash_only_root_matches_full_construction() {
    common_setup();

    for n in 0..=16 {
        let leaves = generate_n_random_leaves(n, 0xC0FFEE + n as u64);
        assert_eq!(
            root_from_leaves(&leaves),
            MerkleTree::construct(&leaves).root(),
            "mismatch at {} leaves",
            n
        );
    }
}

#[test]
fn roots_are_reproducible() {
    common_setup();

    let leaves = generate_n_random_leaves(13, 42);
    let r1 = root_from_leaves(&leaves);
    let r2 = root_from_leaves(&leaves);
    let r3 = MerkleTree::construct(&leaves).root();
    assert_eq!(r1, r2);
    assert_eq!(r1, r3);
}

#[test]
fn arena_links_and_hashes_are_consistent() {
    common_setup();

    let leaves = generate_n_random_leaves(11, 7);
    let tree = MerkleTree::construct(&leaves);
    let nodes = tree.nodes();

    for (i, leaf) in nodes.iter().take(leaves.len()).enumerate() {
        assert!(leaf.is_leaf());
        assert_eq!(leaf.data.as_deref(), Some(leaves[i].as_slice()));
        assert_eq!(leaf.hash, leaf_digest(&leaves[i]));
    }
    for node in nodes.iter().skip(leaves.len()) {
        assert!(!node.is_leaf());
        let (l, r) = (node.left.unwrap(), node.right.unwrap());
        assert_eq!(node.hash, node_digest(&nodes[l].hash, &nodes[r].hash));
    }
}

#[test]
fn proofs_verify_for_every_leaf_of_every_size() {
    common_setup();

    for n in 1..=16u64 {
        let leaves = generate_n_random_leaves(n as usize, n);
        let tree = MerkleTree::construct(&leaves);
        let root = tree.root();

        for i in 0..n {
            let proof = tree.proof(i).unwrap();
            assert_eq!(proof.len(), path_length(i, n).unwrap());
            assert!(
                verify(root, &leaves[i as usize], &proof, i, n).unwrap(),
                "leaf {} of {} failed to verify",
                i,
                n
            );
        }
    }
}

#[test]
fn any_flipped_sibling_bit_breaks_verification() {
    common_setup();

    let n = 9u64;
    let leaves = generate_n_random_leaves(n as usize, 0xBEEF);
    let tree = MerkleTree::construct(&leaves);
    let root = tree.root();

    for i in 0..n {
        let proof = tree.proof(i).unwrap();
        for side in 0..proof.len() {
            for bit in [0usize, 131, 255] {
                let mut corrupted = proof.clone();
                corrupted[side].0[bit / 8] ^= 1 << (bit % 8);
                assert!(
                    !verify(root, &leaves[i as usize], &corrupted, i, n).unwrap(),
                    "corrupted side {} bit {} of leaf {} still verified",
                    side,
                    bit,
                    i
                );
            }
        }
    }
}

#[test]
fn verification_rejects_malformed_shapes() {
    common_setup();

    let leaves = generate_n_random_leaves(6, 3);
    let tree = MerkleTree::construct(&leaves);
    let root = tree.root();
    let proof = tree.proof(2).unwrap();

    // Truncated and padded proofs are rejected before folding.
    assert_eq!(
        verify(root, &leaves[2], &proof[..proof.len() - 1], 2, 6),
        Err(TreeError::ProofLengthMismatch {
            got: proof.len() - 1,
            expected: proof.len(),
        })
    );
    let mut padded = proof.clone();
    padded.push(H256::repeat_byte(0xAB));
    assert!(matches!(
        verify(root, &leaves[2], &padded, 2, 6),
        Err(TreeError::ProofLengthMismatch { .. })
    ));

    // Out-of-range index and empty tree.
    assert_eq!(
        verify(root, &leaves[2], &proof, 6, 6),
        Err(TreeError::LeafIndexOutOfRange {
            leaf_index: 6,
            leaf_count: 6,
        })
    );
    assert_eq!(
        verify(root, &leaves[2], &proof, 0, 0),
        Err(TreeError::EmptyTree)
    );
    assert!(matches!(
        tree.proof(6),
        Err(TreeError::LeafIndexOutOfRange { .. })
    ));
}

#[test]
fn append_matches_reconstruction() {
    common_setup();

    for n in 0..=16usize {
        let mut leaves = generate_n_random_leaves(n, 0xA11CE + n as u64);
        let tree = MerkleTree::construct(&leaves);
        let frontier = tree.append_frontier();

        let appended = append(n as u64, b"the new leaf", &frontier).unwrap();

        leaves.push(b"the new leaf".to_vec());
        assert_eq!(
            appended,
            root_from_leaves(&leaves),
            "append diverged from reconstruction at {} leaves",
            n
        );
    }
}

#[test]
fn append_rejects_a_malformed_frontier() {
    common_setup();

    let leaves = generate_n_random_leaves(5, 1);
    let tree = MerkleTree::construct(&leaves);
    let mut frontier = tree.append_frontier();
    frontier.pop();

    // 5 = 0b101, so the frontier must hold exactly two digests.
    assert_eq!(
        append(5, b"x", &frontier),
        Err(TreeError::ProofLengthMismatch {
            got: 1,
            expected: 2,
        })
    );
}

#[test]
fn update_matches_reconstruction() {
    common_setup();

    for n in 1..=12u64 {
        let leaves = generate_n_random_leaves(n as usize, 0xD00D + n);
        let tree = MerkleTree::construct(&leaves);

        for i in 0..n {
            let proof = tree.proof(i).unwrap();
            let updated = update(i, b"replacement", &proof, n).unwrap();

            let mut modified = leaves.clone();
            modified[i as usize] = b"replacement".to_vec();
            assert_eq!(updated, root_from_leaves(&modified));
        }
    }
}

#[test]
fn tree_head_tracks_appends_and_updates() {
    common_setup();

    let leaves = generate_n_random_leaves(8, 0xFACE);
    let mut head = TreeHead::default();
    assert_eq!(head.root, EMPTY_ROOT);

    // Grow the head one leaf at a time, deriving each frontier from the
    // indexer's view of the committed prefix.
    for (i, leaf) in leaves.iter().enumerate() {
        let frontier = MerkleTree::construct(&leaves[..i]).append_frontier();
        head.append(leaf, &frontier).unwrap();
        assert_eq!(head.leaf_count, i as u64 + 1);
        assert_eq!(head.root, root_from_leaves(&leaves[..=i]));
    }

    // Then rewrite one committed leaf in place.
    let tree = MerkleTree::construct(&leaves);
    let proof = tree.proof(3).unwrap();
    head.update(3, b"rewritten", &proof).unwrap();

    let mut modified = leaves;
    modified[3] = b"rewritten".to_vec();
    assert_eq!(head.root, root_from_leaves(&modified));
    assert_eq!(head.leaf_count, 8);
}

/// The block data flow end to end: encoded transactions are the leaves, the
/// committed root authenticates them, and a proven leaf decodes back to the
/// exact transaction.
#[test]
fn committed_transaction_bytes_round_trip() {
    use tx_codec::types::{Input, Output, Transaction, Witness};

    common_setup();

    let txs: Vec<Transaction> = (0..5)
        .map(|i| Transaction::Script {
            gas_price: 100 + i,
            gas_limit: 1_000_000,
            maturity: 0,
            script: vec![0x90, i as u8],
            script_data: vec![],
            inputs: vec![Input::Coin {
                utxo_id: H256::repeat_byte(i as u8),
                owner: H256::repeat_byte(0x11),
                amount: 500 * i,
                color: H256::zero(),
                witness_index: 0,
                maturity: 0,
                predicate: vec![],
                predicate_data: vec![],
            }],
            outputs: vec![Output::Change {
                to: H256::repeat_byte(0x22),
                amount: 500 * i,
                color_index: 0,
            }],
            witnesses: vec![Witness {
                data: vec![0xAA; 64],
            }],
        })
        .collect();

    let leaves: Vec<Vec<u8>> = txs.iter().map(|tx| tx.encode().unwrap()).collect();
    let tree = MerkleTree::construct(&leaves);
    let root = tree.root();

    let proof = tree.proof(3).unwrap();
    assert!(verify(root, &leaves[3], &proof, 3, 5).unwrap());

    let (decoded, consumed) = Transaction::decode(&leaves[3]).unwrap();
    assert_eq!(consumed, leaves[3].len());
    assert_eq!(decoded, txs[3]);
}
