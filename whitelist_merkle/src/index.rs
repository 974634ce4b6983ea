use log::{debug, warn};

use crate::address::Address;
use crate::error::{Result, WhitelistError};
use crate::hash::{hash_leaf, H256};
use crate::proof::MerkleProof;
use crate::tree::MerkleTree;

/// Whitelist membership index: the Merkle root to register on-chain and a
/// sibling-hash proof per whitelisted address.
///
/// Immutable once built. Duplicate addresses are kept as redundant leaves.
#[derive(Clone, Debug)]
pub struct WhitelistMerkleIndex {
    addresses: Vec<Address>,
    tree: MerkleTree,
}

impl WhitelistMerkleIndex {
    pub fn build(addresses: &[Address]) -> Result<Self> {
        if addresses.is_empty() {
            return Err(WhitelistError::EmptyInput);
        }

        let leaves: Vec<H256> = addresses.iter().map(hash_leaf).collect();
        let tree = MerkleTree::from_leaves(leaves)?;

        let redundant = tree
            .leaves()
            .windows(2)
            .filter(|pair| pair[0] == pair[1])
            .count();
        if redundant > 0 {
            warn!(
                "whitelist contains {} redundant leaves from duplicate addresses",
                redundant
            );
        }
        debug!(
            "whitelist index ready: {} addresses, root {}",
            addresses.len(),
            tree.root()
        );

        Ok(Self {
            addresses: addresses.to_vec(),
            tree,
        })
    }

    pub fn root(&self) -> H256 {
        self.tree.root()
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.tree.leaf_index(&hash_leaf(address)).is_some()
    }

    /// Proof for `address`, or `NotFound` when it is not whitelisted.
    pub fn proof_for(&self, address: &Address) -> Result<MerkleProof> {
        self.tree
            .proof_for_leaf(&hash_leaf(address))
            .ok_or(WhitelistError::NotFound(*address))
    }

    /// Input addresses in their original order, duplicates included.
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.tree.leaf_count()
    }

    pub fn depth(&self) -> usize {
        self.tree.depth()
    }

    pub fn tree(&self) -> &MerkleTree {
        &self.tree
    }
}

/// Recompute the root from `address` and `proof` and compare it to `root`.
pub fn verify(root: &H256, address: &Address, proof: &MerkleProof) -> bool {
    proof.verify(root, address)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::new([n; 20])
    }

    #[test]
    fn test_build_rejects_empty() {
        assert!(matches!(
            WhitelistMerkleIndex::build(&[]),
            Err(WhitelistError::EmptyInput)
        ));
    }

    #[test]
    fn test_proof_for_member_and_non_member() {
        let index = WhitelistMerkleIndex::build(&[addr(1), addr(2), addr(3)]).unwrap();
        let proof = index.proof_for(&addr(2)).unwrap();
        assert!(verify(&index.root(), &addr(2), &proof));

        let err = index.proof_for(&addr(9)).unwrap_err();
        assert!(err.is_not_found());
        assert!(!index.contains(&addr(9)));
        assert!(index.contains(&addr(1)));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let index = WhitelistMerkleIndex::build(&[addr(1), addr(1), addr(2)]).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.leaf_count(), 3);
        let proof = index.proof_for(&addr(1)).unwrap();
        assert!(verify(&index.root(), &addr(1), &proof));
    }

    #[test]
    fn test_proof_does_not_verify_other_address() {
        let index = WhitelistMerkleIndex::build(&[addr(1), addr(2), addr(3), addr(4)]).unwrap();
        let proof = index.proof_for(&addr(1)).unwrap();
        assert!(!verify(&index.root(), &addr(5), &proof));
    }
}
