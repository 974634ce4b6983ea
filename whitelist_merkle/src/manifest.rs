use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::address::Address;
use crate::error::{Result, WhitelistError};
use crate::hash::H256;
use crate::index::WhitelistMerkleIndex;
use crate::proof::MerkleProof;

/// Precomputed proofs for every whitelisted address, so a minting client
/// looks up its proof instead of rebuilding the tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProofManifest {
    pub root: H256,
    pub generated_at: DateTime<Utc>,
    pub leaf_count: usize,
    pub proofs: BTreeMap<Address, MerkleProof>,
}

impl ProofManifest {
    pub fn from_index(index: &WhitelistMerkleIndex) -> Result<Self> {
        let mut proofs = BTreeMap::new();
        for address in index.addresses() {
            if !proofs.contains_key(address) {
                proofs.insert(*address, index.proof_for(address)?);
            }
        }
        Ok(Self {
            root: index.root(),
            generated_at: Utc::now(),
            leaf_count: index.leaf_count(),
            proofs,
        })
    }

    pub fn proof_for(&self, address: &Address) -> Result<&MerkleProof> {
        self.proofs
            .get(address)
            .ok_or(WhitelistError::NotFound(*address))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
