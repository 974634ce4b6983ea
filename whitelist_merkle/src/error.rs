use thiserror::Error;

use crate::address::Address;

pub type Result<T> = std::result::Result<T, WhitelistError>;

#[derive(Error, Debug)]
pub enum WhitelistError {
    #[error("Whitelist is empty: at least one address is required")]
    EmptyInput,

    /// Not whitelisted. Callers report this as "not eligible", never retry it.
    #[error("Address not in whitelist: {0}")]
    NotFound(Address),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid hash: {0}")]
    InvalidHash(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WhitelistError {
    /// True for the membership miss, as opposed to malformed input.
    pub fn is_not_found(&self) -> bool {
        matches!(self, WhitelistError::NotFound(_))
    }
}
