//! Binary Merkle tree construction over an ordered list of byte items.
//!
//! Nodes are an explicit sum type: a node is either a leaf wrapping one
//! original item, or an internal node owning exactly two children. Odd
//! counts at any level are handled by duplicating the last node as its own
//! right sibling; the duplicate is a distinct node that shares the hash,
//! which matters later because proof generation determines sidedness by
//! node identity, not by hash.
//!
//! Internal hashes combine the raw 32-byte digests of the two children
//! (`H(left.hash ++ right.hash)`), never their hex text.

use crate::types::StdByteArray;

use super::hashing::{HashFunction, Hashable};

/// Errors surfaced by tree construction and proof generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    /// A tree was requested over an empty item list.
    EmptyInput,
    /// A proof was requested before any tree was built.
    TreeNotBuilt,
    /// The item is not byte-for-byte equal to any original input.
    ItemNotFound,
}

impl std::fmt::Display for MerkleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MerkleError::EmptyInput => write!(f, "Cannot build a Merkle tree from an empty item list"),
            MerkleError::TreeNotBuilt => write!(f, "The Merkle tree has not been built yet"),
            MerkleError::ItemNotFound => write!(f, "The item is not present in the tree"),
        }
    }
}

impl std::error::Error for MerkleError {}

/// A node in the Merkle tree. Children are exclusively owned by their
/// parent; duplicated nodes are deep clones, so the tree is a strict
/// ownership tree with no sharing.
///
/// `level` counts from the root (root = 0, leaves = height - 1) and
/// `index` is the position of the node within its level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MerkleNode {
    Leaf {
        hash: StdByteArray,
        data: Vec<u8>,
        level: usize,
        index: usize,
    },
    Internal {
        hash: StdByteArray,
        left: Box<MerkleNode>,
        right: Box<MerkleNode>,
        level: usize,
        index: usize,
    },
}

impl MerkleNode {
    /// The digest stored in this node.
    pub fn hash(&self) -> StdByteArray {
        match self {
            MerkleNode::Leaf { hash, .. } => *hash,
            MerkleNode::Internal { hash, .. } => *hash,
        }
    }

    /// Level of this node, counting from the root at 0.
    pub fn level(&self) -> usize {
        match self {
            MerkleNode::Leaf { level, .. } => *level,
            MerkleNode::Internal { level, .. } => *level,
        }
    }

    /// Position of this node within its level.
    pub fn index(&self) -> usize {
        match self {
            MerkleNode::Leaf { index, .. } => *index,
            MerkleNode::Internal { index, .. } => *index,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, MerkleNode::Leaf { .. })
    }
}

/// An immutable binary hash tree over an ordered item list.
///
/// The tree is built wholesale and never updated incrementally; callers
/// that change the underlying items rebuild from scratch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    root: MerkleNode,
    height: usize,
    leaf_count: usize,
}

/// Tree height for a given leaf count: 1 for a single leaf, otherwise
/// `ceil(log2(n)) + 1`.
pub fn tree_height(leaf_count: usize) -> usize {
    if leaf_count <= 1 {
        return 1;
    }
    (leaf_count as f64).log2().ceil() as usize + 1
}

impl MerkleTree {
    /// Builds a tree from the given ordered items.
    ///
    /// Leaves are hashed left to right; each level is paired left to right,
    /// duplicating the last node when the level has an odd count, until a
    /// single root remains.
    ///
    /// # Errors
    ///
    /// * `MerkleError::EmptyInput` if `items` is empty.
    pub fn build(
        items: &[impl AsRef<[u8]>],
        hasher: &mut impl HashFunction,
    ) -> Result<Self, MerkleError> {
        if items.is_empty() {
            return Err(MerkleError::EmptyInput);
        }

        let height = tree_height(items.len());
        let leaf_level = height - 1;

        let mut current: Vec<MerkleNode> = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let data = item.as_ref().to_vec();
                hasher.update(&data);
                let hash = hasher.digest().expect("hashing failed");
                MerkleNode::Leaf {
                    hash,
                    data,
                    level: leaf_level,
                    index,
                }
            })
            .collect();

        let mut level = leaf_level;
        while current.len() > 1 {
            if current.len() % 2 != 0 {
                // distinct node, same hash
                current.push(current.last().unwrap().clone());
            }
            level -= 1;

            let mut next = Vec::with_capacity(current.len() / 2);
            let mut pairs = current.into_iter();
            let mut index = 0;
            while let (Some(left), Some(right)) = (pairs.next(), pairs.next()) {
                hasher.update(left.hash());
                hasher.update(right.hash());
                let hash = hasher.digest().expect("hashing failed");
                next.push(MerkleNode::Internal {
                    hash,
                    left: Box::new(left),
                    right: Box::new(right),
                    level,
                    index,
                });
                index += 1;
            }
            current = next;
        }

        Ok(MerkleTree {
            root: current.pop().expect("at least one node remains"),
            height,
            leaf_count: items.len(),
        })
    }

    /// The root node of the tree.
    pub fn root(&self) -> &MerkleNode {
        &self.root
    }

    /// The Merkle root digest.
    pub fn root_hash(&self) -> StdByteArray {
        self.root.hash()
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Finds the root-to-leaf path for the first leaf whose data equals
    /// `target`, searching left subtrees before right ones so that the
    /// original node (not an odd-count duplicate) always wins.
    pub(crate) fn find_path<'a>(&'a self, target: &[u8]) -> Option<Vec<&'a MerkleNode>> {
        let mut path = Vec::with_capacity(self.height);
        if descend(&self.root, target, &mut path) {
            Some(path)
        } else {
            None
        }
    }
}

fn descend<'a>(node: &'a MerkleNode, target: &[u8], path: &mut Vec<&'a MerkleNode>) -> bool {
    path.push(node);
    match node {
        MerkleNode::Leaf { data, .. } => {
            if data == target {
                true
            } else {
                path.pop();
                false
            }
        }
        MerkleNode::Internal { left, right, .. } => {
            if descend(left, target, path) || descend(right, target, path) {
                true
            } else {
                path.pop();
                false
            }
        }
    }
}

/// Computes the root a caller would get from `MerkleTree::build` without
/// keeping the tree around.
pub fn compute_root(
    items: &[impl AsRef<[u8]>],
    hasher: &mut impl HashFunction,
) -> Result<StdByteArray, MerkleError> {
    MerkleTree::build(items, hasher).map(|tree| tree.root_hash())
}
