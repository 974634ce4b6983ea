use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::WhitelistError;

pub const ADDRESS_LENGTH: usize = 20;

/// 20-byte account address, canonically rendered as lowercase `0x` hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Address(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parse an address with or without the `0x` prefix.
    ///
    /// Mixed-case (checksummed) input is accepted; the checksum is not
    /// validated since the leaf only depends on the raw bytes.
    pub fn parse(s: &str) -> Result<Self, WhitelistError> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.len() != ADDRESS_LENGTH * 2 {
            return Err(WhitelistError::InvalidAddress(format!(
                "expected {} hex chars, got {} in '{}'",
                ADDRESS_LENGTH * 2,
                digits.len(),
                trimmed
            )));
        }

        let mut bytes = [0u8; ADDRESS_LENGTH];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| WhitelistError::InvalidAddress(format!("'{}': {}", trimmed, e)))?;
        Ok(Address(bytes))
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Address(bytes)
    }
}

impl FromStr for Address {
    type Err = WhitelistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_and_without_prefix() {
        let a = Address::parse("0x1234567890abcdef1234567890abcdef12345678").unwrap();
        let b = Address::parse("1234567890abcdef1234567890abcdef12345678").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_bytes()[0], 0x12);
        assert_eq!(a.as_bytes()[19], 0x78);
    }

    #[test]
    fn test_checksummed_input_is_canonicalized() {
        let a = Address::parse("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").unwrap();
        assert_eq!(a.to_string(), "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed");
    }

    #[test]
    fn test_invalid_length() {
        let err = Address::parse("0x1234").unwrap_err();
        assert!(matches!(err, WhitelistError::InvalidAddress(_)));
    }

    #[test]
    fn test_invalid_hex() {
        let err = Address::parse("0xzz34567890abcdef1234567890abcdef12345678").unwrap_err();
        assert!(matches!(err, WhitelistError::InvalidAddress(_)));
    }

    #[test]
    fn test_serde_uses_hex_string() {
        let a = Address::new([0xab; 20]);
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "ab".repeat(20)));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }
}
