//! Batch commitment demo: hold a list of items, commit to them with a
//! Merkle root, then hand out inclusion proofs.
//!
//! Unlike `cairn_crypto::merkle`, where a `MerkleTree` value always exists
//! once `build` succeeds, this wrapper models the two-phase workflow of an
//! interactive session: items are staged first, the tree is built on
//! request, and asking for a proof before building is a precondition
//! violation surfaced as `TreeNotBuilt`.

use cairn_crypto::{
    hashing::HashFunction,
    merkle::{MerkleError, MerkleTree},
    proofs::{MerkleProof, generate_proof_of_inclusion},
    types::StdByteArray,
};
use tracing::instrument;

/// A staged batch of items and, once built, the tree committing to them.
#[derive(Debug, Clone)]
pub struct MerkleCommitment {
    items: Vec<Vec<u8>>,
    tree: Option<MerkleTree>,
}

impl MerkleCommitment {
    /// Stages `items` without building anything yet.
    pub fn new(items: impl IntoIterator<Item = impl AsRef<[u8]>>) -> Self {
        MerkleCommitment {
            items: items.into_iter().map(|i| i.as_ref().to_vec()).collect(),
            tree: None,
        }
    }

    /// Builds the tree over the staged items and returns the root.
    ///
    /// Rebuilding is allowed and replaces the previous tree wholesale.
    ///
    /// # Errors
    ///
    /// * `MerkleError::EmptyInput` if no items were staged.
    #[instrument(skip_all, fields(items = self.items.len()))]
    pub fn build(&mut self, hasher: &mut impl HashFunction) -> Result<StdByteArray, MerkleError> {
        let tree = MerkleTree::build(&self.items, hasher)?;
        let root = tree.root_hash();
        self.tree = Some(tree);
        Ok(root)
    }

    /// The committed root.
    ///
    /// # Errors
    ///
    /// * `MerkleError::TreeNotBuilt` if `build` has not been called.
    pub fn root(&self) -> Result<StdByteArray, MerkleError> {
        self.tree
            .as_ref()
            .map(MerkleTree::root_hash)
            .ok_or(MerkleError::TreeNotBuilt)
    }

    /// Generates an inclusion proof for `item` against the built tree.
    ///
    /// # Errors
    ///
    /// * `MerkleError::TreeNotBuilt` if `build` has not been called.
    /// * `MerkleError::ItemNotFound` if `item` is not byte-for-byte equal
    ///   to any staged item.
    pub fn prove(
        &self,
        item: &[u8],
        hasher: &mut impl HashFunction,
    ) -> Result<MerkleProof, MerkleError> {
        let tree = self.tree.as_ref().ok_or(MerkleError::TreeNotBuilt)?;
        generate_proof_of_inclusion(tree, item, hasher)
    }

    /// The built tree, if any.
    pub fn tree(&self) -> Option<&MerkleTree> {
        self.tree.as_ref()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairn_crypto::hashing::DefaultHash;

    #[test]
    fn test_proof_before_build_is_rejected() {
        let commitment = MerkleCommitment::new(["a", "b", "c"]);
        let result = commitment.prove(b"a", &mut DefaultHash::new());
        assert_eq!(result.unwrap_err(), MerkleError::TreeNotBuilt);
        assert_eq!(commitment.root().unwrap_err(), MerkleError::TreeNotBuilt);
    }

    #[test]
    fn test_build_then_prove_verifies() {
        let mut commitment = MerkleCommitment::new(["tx1", "tx2", "tx3"]);
        let root = commitment.build(&mut DefaultHash::new()).unwrap();
        assert_eq!(commitment.root().unwrap(), root);

        let proof = commitment.prove(b"tx2", &mut DefaultHash::new()).unwrap();
        assert!(proof.is_valid_for(root, &mut DefaultHash::new()));
    }

    #[test]
    fn test_unknown_item_still_not_found_after_build() {
        let mut commitment = MerkleCommitment::new(["a", "b"]);
        commitment.build(&mut DefaultHash::new()).unwrap();
        let result = commitment.prove(b"zzz", &mut DefaultHash::new());
        assert_eq!(result.unwrap_err(), MerkleError::ItemNotFound);
    }

    #[test]
    fn test_empty_batch_cannot_build() {
        let mut commitment = MerkleCommitment::new(Vec::<Vec<u8>>::new());
        let result = commitment.build(&mut DefaultHash::new());
        assert_eq!(result.unwrap_err(), MerkleError::EmptyInput);
    }
}
