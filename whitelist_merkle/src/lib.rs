pub mod address;
pub mod error;
pub mod hash;
pub mod index;
pub mod manifest;
pub mod proof;
pub mod tree;
pub mod whitelist;

pub use address::Address;
pub use error::{Result, WhitelistError};
pub use hash::{hash_leaf, hash_pair, keccak256, H256};
pub use index::{verify, WhitelistMerkleIndex};
pub use manifest::ProofManifest;
pub use proof::MerkleProof;
pub use tree::MerkleTree;
pub use whitelist::Whitelist;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::address::Address;
    pub use crate::error::{Result, WhitelistError};
    pub use crate::hash::H256;
    pub use crate::index::{verify, WhitelistMerkleIndex};
    pub use crate::proof::MerkleProof;
    pub use crate::whitelist::Whitelist;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
