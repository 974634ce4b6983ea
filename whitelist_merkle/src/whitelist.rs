// Whitelist file loading.
// Format: JSON array of records, each with at least an "address" field.

use log::{info, warn};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::address::Address;
use crate::error::{Result, WhitelistError};

#[derive(Debug, Deserialize)]
struct WhitelistRecord {
    address: String,
}

/// Ordered list of whitelisted addresses as read from the source file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Whitelist {
    addresses: Vec<Address>,
}

impl Whitelist {
    pub fn new(addresses: Vec<Address>) -> Self {
        Self { addresses }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<WhitelistRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let records: Vec<WhitelistRecord> = serde_json::from_reader(reader)?;
        Self::from_records(records)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let whitelist = Self::from_reader(BufReader::new(file))?;
        info!(
            "loaded {} whitelist entries from {}",
            whitelist.len(),
            path.display()
        );
        Ok(whitelist)
    }

    fn from_records(records: Vec<WhitelistRecord>) -> Result<Self> {
        let addresses = records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                Address::parse(&record.address).map_err(|e| {
                    WhitelistError::InvalidAddress(format!("record #{}: {}", i, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let whitelist = Self { addresses };
        let duplicates = whitelist.duplicates();
        if !duplicates.is_empty() {
            warn!("{} addresses appear more than once", duplicates.len());
        }
        Ok(whitelist)
    }

    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Addresses occurring more than once, each listed once in first-seen order.
    pub fn duplicates(&self) -> Vec<Address> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        self.addresses
            .iter()
            .filter(|a| !seen.insert(**a) && reported.insert(**a))
            .copied()
            .collect()
    }

    /// Copy with later repeats removed, keeping first-seen order.
    pub fn deduplicated(&self) -> Self {
        let mut seen = HashSet::new();
        Self {
            addresses: self
                .addresses
                .iter()
                .filter(|a| seen.insert(**a))
                .copied()
                .collect(),
        }
    }
}
