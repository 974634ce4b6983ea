use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tiny_keccak::{Hasher, Keccak};

use crate::address::Address;
use crate::error::WhitelistError;

pub const HASH_LENGTH: usize = 32;

/// 32-byte Keccak digest. Ordering is lexicographic over the bytes, which is
/// the order sorted-pair hashing relies on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct H256([u8; HASH_LENGTH]);

impl H256 {
    pub const fn new(bytes: [u8; HASH_LENGTH]) -> Self {
        H256(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        &self.0
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8; HASH_LENGTH] {
        &mut self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn from_hex(s: &str) -> Result<Self, WhitelistError> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        if digits.len() != HASH_LENGTH * 2 {
            return Err(WhitelistError::InvalidHash(format!(
                "expected {} hex chars, got {} in '{}'",
                HASH_LENGTH * 2,
                digits.len(),
                trimmed
            )));
        }
        let mut bytes = [0u8; HASH_LENGTH];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| WhitelistError::InvalidHash(format!("'{}': {}", trimmed, e)))?;
        Ok(H256(bytes))
    }
}

impl From<[u8; HASH_LENGTH]> for H256 {
    fn from(bytes: [u8; HASH_LENGTH]) -> Self {
        H256(bytes)
    }
}

impl FromStr for H256 {
    type Err = WhitelistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        H256::from_hex(s)
    }
}

impl fmt::Display for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H256({})", self)
    }
}

impl Serialize for H256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for H256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        H256::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Keccak-256, the same primitive the EVM exposes as `keccak256`.
pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; HASH_LENGTH];
    hasher.finalize(&mut output);
    H256(output)
}

/// Leaf for one whitelisted address: keccak256 over its 20 raw bytes.
pub fn hash_leaf(address: &Address) -> H256 {
    keccak256(address.as_bytes())
}

/// Parent of two nodes under the sorted-pairs rule: the smaller hash goes first.
pub fn hash_pair(a: &H256, b: &H256) -> H256 {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = Keccak::v256();
    hasher.update(first.as_bytes());
    hasher.update(second.as_bytes());
    let mut output = [0u8; HASH_LENGTH];
    hasher.finalize(&mut output);
    H256(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty_vector() {
        assert_eq!(
            keccak256(b"").to_hex(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_hash_pair_is_order_independent() {
        let a = H256::new([1u8; 32]);
        let b = H256::new([2u8; 32]);
        assert_eq!(hash_pair(&a, &b), hash_pair(&b, &a));
    }

    #[test]
    fn test_hash_pair_concatenates_smaller_first() {
        let a = H256::new([1u8; 32]);
        let b = H256::new([2u8; 32]);
        let mut concat = Vec::with_capacity(64);
        concat.extend_from_slice(a.as_bytes());
        concat.extend_from_slice(b.as_bytes());
        assert_eq!(hash_pair(&b, &a), keccak256(&concat));
    }

    #[test]
    fn test_hash_leaf_hashes_raw_bytes() {
        let address = Address::new([0x11; 20]);
        assert_eq!(hash_leaf(&address), keccak256(&[0x11; 20]));
    }

    #[test]
    fn test_hex_roundtrip_and_errors() {
        let h = keccak256(b"abc");
        assert_eq!(H256::from_hex(&h.to_hex()).unwrap(), h);
        assert!(H256::from_hex("0x1234").is_err());
        assert!(H256::from_hex(&format!("0x{}", "g".repeat(64))).is_err());
    }
}
