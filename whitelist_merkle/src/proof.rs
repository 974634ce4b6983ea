use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::Result;
use crate::hash::{hash_leaf, hash_pair, H256};

/// Merkle proof for whitelist inclusion
///
/// Only sibling hashes are carried, ordered from the leaf level upwards.
/// Left/right position is not needed because parents are hashed as sorted
/// pairs. Serializes as a plain JSON array of `0x` hex strings, the shape the
/// mint call takes as its `bytes32[]` argument.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerkleProof {
    siblings: Vec<H256>,
}

impl MerkleProof {
    pub fn new(siblings: Vec<H256>) -> Self {
        Self { siblings }
    }

    pub fn siblings(&self) -> &[H256] {
        &self.siblings
    }

    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    pub fn into_inner(self) -> Vec<H256> {
        self.siblings
    }

    /// Fold the siblings into `leaf` and return the candidate root.
    pub fn compute_root(&self, leaf: &H256) -> H256 {
        self.siblings
            .iter()
            .fold(*leaf, |current, sibling| hash_pair(&current, sibling))
    }

    /// Verify this proof against a root for an already hashed leaf
    pub fn verify_leaf(&self, root: &H256, leaf: &H256) -> bool {
        self.compute_root(leaf) == *root
    }

    /// Verify this proof against a root for an address
    pub fn verify(&self, root: &H256, address: &Address) -> bool {
        self.verify_leaf(root, &hash_leaf(address))
    }

    pub fn to_hex(&self) -> Vec<String> {
        self.siblings.iter().map(H256::to_hex).collect()
    }

    /// Create proof from hex strings
    pub fn from_hex<S: AsRef<str>>(siblings_hex: &[S]) -> Result<Self> {
        let siblings = siblings_hex
            .iter()
            .map(|s| H256::from_hex(s.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { siblings })
    }
}

impl From<Vec<H256>> for MerkleProof {
    fn from(siblings: Vec<H256>) -> Self {
        Self { siblings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::keccak256;

    #[test]
    fn test_empty_proof_root_is_leaf() {
        let leaf = keccak256(b"leaf");
        let proof = MerkleProof::default();
        assert_eq!(proof.compute_root(&leaf), leaf);
        assert!(proof.verify_leaf(&leaf, &leaf));
    }

    #[test]
    fn test_compute_root_folds_sorted_pairs() {
        let leaf = keccak256(b"a");
        let s1 = keccak256(b"b");
        let s2 = keccak256(b"c");
        let proof = MerkleProof::new(vec![s1, s2]);
        let expected = hash_pair(&hash_pair(&leaf, &s1), &s2);
        assert_eq!(proof.compute_root(&leaf), expected);
    }

    #[test]
    fn test_serializes_as_hex_array() {
        let proof = MerkleProof::new(vec![H256::new([0u8; 32]), H256::new([0xff; 32])]);
        let json = serde_json::to_string(&proof).unwrap();
        assert_eq!(
            json,
            format!("[\"0x{}\",\"0x{}\"]", "00".repeat(32), "ff".repeat(32))
        );
        let back: MerkleProof = serde_json::from_str(&json).unwrap();
        assert_eq!(back, proof);
    }

    #[test]
    fn test_from_hex_rejects_bad_entry() {
        let good = H256::new([7u8; 32]).to_hex();
        assert!(MerkleProof::from_hex(&[good.as_str()]).is_ok());
        assert!(MerkleProof::from_hex(&[good.as_str(), "0xdead"]).is_err());
    }
}
