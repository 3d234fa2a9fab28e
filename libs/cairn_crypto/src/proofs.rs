//! Generation and verification of Merkle proofs of inclusion.
//!
//! Verification is a pure fold over the proof steps; it never touches the
//! tree that produced the proof, so a party holding only the root can check
//! inclusion (SPV-style). Both failure outcomes are ordinary values: a
//! proof that cannot be checked at all is `MalformedProof`, a proof that
//! folds cleanly to the wrong root is `RootMismatch`.

use serde::{Deserialize, Serialize};

use crate::{
    hashing::HashFunction,
    merkle::{MerkleError, MerkleNode, MerkleTree},
    serialization::WireSerialize,
    types::StdByteArray,
};

/// Which side of the parent a recorded sibling occupies.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Hash, PartialEq, Eq)]
pub enum SiblingSide {
    Left,
    Right,
}

/// One rung of a proof: the sibling's digest, the side it sits on, and the
/// tree level at which the fold happens (leaf level first).
#[derive(Debug, Clone, Deserialize, Serialize, Hash, PartialEq, Eq)]
pub struct ProofStep {
    pub hash: StdByteArray,
    pub side: SiblingSide,
    pub level: usize,
}

/// A compact inclusion proof for one data item.
///
/// Folding `data_hash` through `steps` in order reconstructs `root` iff the
/// item is genuinely included and untampered.
#[derive(Debug, Clone, Deserialize, Serialize, Hash, PartialEq, Eq)]
pub struct MerkleProof {
    /// The original item being proven.
    pub data_item: Vec<u8>,
    /// Digest of `data_item`.
    pub data_hash: StdByteArray,
    /// Sibling digests in leaf-to-root order.
    pub steps: Vec<ProofStep>,
    /// The root this proof claims to reconstruct.
    pub root: StdByteArray,
    /// Index of the item in the original input list.
    pub data_index: usize,
}

impl WireSerialize for MerkleProof {}

/// Verification outcomes that are not success. Neither is exceptional
/// control flow; a verifier may call `verify_inclusion` speculatively on
/// untrusted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofError {
    /// The proof is structurally impossible to check.
    MalformedProof(String),
    /// The fold completed but did not reproduce the expected root.
    RootMismatch,
}

impl std::fmt::Display for ProofError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProofError::MalformedProof(reason) => write!(f, "Malformed proof: {reason}"),
            ProofError::RootMismatch => write!(f, "Proof did not reconstruct the expected root"),
        }
    }
}

impl std::error::Error for ProofError {}

/// Generates a proof of inclusion for `item` against a built tree.
///
/// The root-to-leaf path is located by structural descent (left subtree
/// first), not by hash lookup: odd-count duplicates share their hash with
/// the original, and sidedness is decided by node identity along the path.
///
/// # Errors
///
/// * `MerkleError::ItemNotFound` if `item` does not match any original
///   input byte-for-byte.
pub fn generate_proof_of_inclusion(
    tree: &MerkleTree,
    item: &[u8],
    hasher: &mut impl HashFunction,
) -> Result<MerkleProof, MerkleError> {
    let path = tree.find_path(item).ok_or(MerkleError::ItemNotFound)?;

    hasher.update(item);
    let data_hash = hasher.digest().expect("hashing failed");
    let data_index = path.last().expect("path is never empty").index();

    let mut steps = Vec::with_capacity(path.len().saturating_sub(1));
    // walk the path leaf -> root, recording the sibling at each parent
    for i in (1..path.len()).rev() {
        let current = path[i];
        let MerkleNode::Internal { left, right, .. } = path[i - 1] else {
            unreachable!("interior of a root-to-leaf path is internal");
        };
        let is_left_child = std::ptr::eq(left.as_ref(), current);
        let (sibling, side) = if is_left_child {
            (right, SiblingSide::Right)
        } else {
            (left, SiblingSide::Left)
        };
        steps.push(ProofStep {
            hash: sibling.hash(),
            side,
            level: current.level(),
        });
    }

    Ok(MerkleProof {
        data_item: item.to_vec(),
        data_hash,
        steps,
        root: tree.root_hash(),
        data_index,
    })
}

/// Verifies a proof of inclusion against an expected root.
///
/// Pure: depends only on the proof contents and `expected_root`. Folds
/// `data_hash` upward, placing the recorded sibling on the side it occupied
/// during construction.
pub fn verify_inclusion(
    proof: &MerkleProof,
    expected_root: StdByteArray,
    hasher: &mut impl HashFunction,
) -> Result<(), ProofError> {
    if proof.steps.is_empty() && proof.data_hash != proof.root {
        return Err(ProofError::MalformedProof(
            "empty step list for a non-trivial tree".into(),
        ));
    }

    let mut current = proof.data_hash;
    for step in &proof.steps {
        match step.side {
            SiblingSide::Left => {
                hasher.update(step.hash);
                hasher.update(current);
            }
            SiblingSide::Right => {
                hasher.update(current);
                hasher.update(step.hash);
            }
        }
        current = hasher.digest().map_err(|e| {
            ProofError::MalformedProof(format!("digest failed while folding: {e}"))
        })?;
    }

    if current == expected_root {
        Ok(())
    } else {
        Err(ProofError::RootMismatch)
    }
}

impl MerkleProof {
    /// Convenience wrapper collapsing the verification result to a bool.
    pub fn is_valid_for(&self, expected_root: StdByteArray, hasher: &mut impl HashFunction) -> bool {
        verify_inclusion(self, expected_root, hasher).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::{DefaultHash, Hashable};

    fn items(strs: &[&str]) -> Vec<Vec<u8>> {
        strs.iter().map(|s| s.as_bytes().to_vec()).collect()
    }

    fn build(strs: &[&str]) -> MerkleTree {
        MerkleTree::build(&items(strs), &mut DefaultHash::new()).unwrap()
    }

    #[test]
    fn test_every_item_verifies() {
        let names = ["tx1", "tx2", "tx3", "tx4", "tx5"];
        let tree = build(&names);
        let root = tree.root_hash();
        for name in names {
            let proof =
                generate_proof_of_inclusion(&tree, name.as_bytes(), &mut DefaultHash::new())
                    .unwrap();
            assert!(proof.is_valid_for(root, &mut DefaultHash::new()), "{name}");
        }
    }

    #[test]
    fn test_unknown_item_is_not_found() {
        let tree = build(&["a", "b", "c"]);
        let result = generate_proof_of_inclusion(&tree, b"zzz", &mut DefaultHash::new());
        assert_eq!(result.unwrap_err(), MerkleError::ItemNotFound);
    }

    #[test]
    fn test_three_item_proof_for_duplicated_leaf() {
        // leaves: h(a) h(b) h(c); level 1: H(h(a)+h(b)), H(h(c)+h(c))
        let tree = build(&["a", "b", "c"]);
        let proof =
            generate_proof_of_inclusion(&tree, b"c", &mut DefaultHash::new()).unwrap();

        assert_eq!(proof.data_index, 2);
        assert_eq!(proof.steps.len(), 2);

        let mut hasher = DefaultHash::new();
        let hc = "c".hash(&mut hasher).unwrap();
        // first step: c's right sibling is its own duplicate
        assert_eq!(proof.steps[0].hash, hc);
        assert_eq!(proof.steps[0].side, SiblingSide::Right);
        assert_eq!(proof.steps[0].level, 2);

        let ha = "a".hash(&mut hasher).unwrap();
        let hb = "b".hash(&mut hasher).unwrap();
        hasher.update(ha);
        hasher.update(hb);
        let hab = hasher.digest().unwrap();
        // second step: the left sibling at level 1
        assert_eq!(proof.steps[1].hash, hab);
        assert_eq!(proof.steps[1].side, SiblingSide::Left);
        assert_eq!(proof.steps[1].level, 1);

        assert!(proof.is_valid_for(tree.root_hash(), &mut DefaultHash::new()));
    }

    #[test]
    fn test_swapped_data_hash_is_root_mismatch() {
        let tree = build(&["a", "b", "c", "d"]);
        let mut proof =
            generate_proof_of_inclusion(&tree, b"a", &mut DefaultHash::new()).unwrap();
        // unrelated item's hash, steps untouched
        proof.data_hash = "intruder".hash(&mut DefaultHash::new()).unwrap();

        let result = verify_inclusion(&proof, tree.root_hash(), &mut DefaultHash::new());
        assert_eq!(result.unwrap_err(), ProofError::RootMismatch);
    }

    #[test]
    fn test_empty_steps_for_nontrivial_tree_is_malformed() {
        let tree = build(&["a", "b", "c", "d"]);
        let mut proof =
            generate_proof_of_inclusion(&tree, b"a", &mut DefaultHash::new()).unwrap();
        proof.steps.clear();

        let result = verify_inclusion(&proof, tree.root_hash(), &mut DefaultHash::new());
        assert!(matches!(result, Err(ProofError::MalformedProof(_))));
    }

    #[test]
    fn test_single_leaf_proof_has_no_steps() {
        let tree = build(&["solo"]);
        let proof =
            generate_proof_of_inclusion(&tree, b"solo", &mut DefaultHash::new()).unwrap();
        assert!(proof.steps.is_empty());
        assert_eq!(proof.data_hash, proof.root);
        assert!(proof.is_valid_for(tree.root_hash(), &mut DefaultHash::new()));
    }

    #[test]
    fn test_proof_against_wrong_root_fails() {
        let tree = build(&["a", "b", "c"]);
        let other = build(&["a", "b", "c", "d"]);
        let proof =
            generate_proof_of_inclusion(&tree, b"b", &mut DefaultHash::new()).unwrap();
        assert!(!proof.is_valid_for(other.root_hash(), &mut DefaultHash::new()));
    }

    #[test]
    fn test_proof_wire_round_trip_preserves_digests() {
        let tree = build(&["a", "b", "c"]);
        let proof =
            generate_proof_of_inclusion(&tree, b"b", &mut DefaultHash::new()).unwrap();

        let bytes = proof.serialize_wire().unwrap();
        let decoded = MerkleProof::deserialize_wire(&bytes).unwrap();
        assert_eq!(decoded, proof);
        assert!(decoded.is_valid_for(tree.root_hash(), &mut DefaultHash::new()));
    }
}
