use log::debug;

use crate::error::{Result, WhitelistError};
use crate::hash::{hash_pair, H256};
use crate::proof::MerkleProof;

/// Sorted-pair Keccak Merkle tree.
///
/// Leaves are sorted before building, so the root depends only on the leaf
/// multiset. On a level with an odd node count the last node is promoted to
/// the next level unchanged and contributes no proof element.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    levels: Vec<Vec<H256>>, // levels[0] = sorted leaves, last = [root]
    root: H256,
}

impl MerkleTree {
    /// Build Merkle tree from already hashed leaves
    pub fn from_leaves(mut leaves: Vec<H256>) -> Result<Self> {
        if leaves.is_empty() {
            return Err(WhitelistError::EmptyInput);
        }
        leaves.sort_unstable();

        let mut levels = vec![leaves];
        let mut current = levels[0].clone();
        while current.len() > 1 {
            current = current
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => hash_pair(left, right),
                    [single] => *single,
                    _ => unreachable!("chunks(2) yields one or two nodes"),
                })
                .collect();
            levels.push(current.clone());
        }
        let root = current[0];

        debug!(
            "built merkle tree: {} leaves, depth {}, root {}",
            levels[0].len(),
            levels.len() - 1,
            root
        );

        Ok(Self { levels, root })
    }

    pub fn root(&self) -> H256 {
        self.root
    }

    pub fn leaves(&self) -> &[H256] {
        &self.levels[0]
    }

    pub fn levels(&self) -> &[Vec<H256>] {
        &self.levels
    }

    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of hashing levels above the leaves.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Position of the first occurrence of `leaf` in the sorted leaf level.
    pub fn leaf_index(&self, leaf: &H256) -> Option<usize> {
        let leaves = self.leaves();
        let idx = leaves.partition_point(|l| l < leaf);
        (idx < leaves.len() && leaves[idx] == *leaf).then_some(idx)
    }

    pub fn proof_for_index(&self, index: usize) -> Option<MerkleProof> {
        if index >= self.leaf_count() {
            return None;
        }

        let mut siblings = Vec::with_capacity(self.depth());
        let mut idx = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling_index = idx ^ 1;
            if sibling_index < level.len() {
                siblings.push(level[sibling_index]);
            }
            idx /= 2;
        }
        Some(MerkleProof::new(siblings))
    }

    pub fn proof_for_leaf(&self, leaf: &H256) -> Option<MerkleProof> {
        self.leaf_index(leaf)
            .and_then(|index| self.proof_for_index(index))
    }
}
