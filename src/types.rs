//! Addresses, amounts and call context

use core::fmt;
use core::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Fixed-point amount, 18 decimals
pub type Amount = u128;

/// 32-byte account identifier, displayed as base58
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 32]);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("invalid base58 address: {0}")]
    InvalidBase58(String),

    #[error("address must be 32 bytes, got {0}")]
    InvalidLength(usize),

    #[error("label must be 1..=32 bytes: {0:?}")]
    InvalidLabel(String),
}

impl Address {
    /// The zero address: "unset" for the pair, never a valid account
    pub const ZERO: Address = Address([0u8; 32]);

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Deterministic address for a human label: the label bytes, right-padded with zeros.
    pub fn from_label(label: &str) -> Result<Self, AddressParseError> {
        let raw = label.as_bytes();
        if raw.is_empty() || raw.len() > 32 {
            return Err(AddressParseError::InvalidLabel(label.to_string()));
        }
        let mut bytes = [0u8; 32];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(Self(bytes))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    /// Accepts base58 or an `@label` shorthand
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(label) = s.strip_prefix('@') {
            return Self::from_label(label);
        }

        let decoded = bs58::decode(s)
            .into_vec()
            .map_err(|e| AddressParseError::InvalidBase58(e.to_string()))?;
        let bytes: [u8; 32] = decoded
            .as_slice()
            .try_into()
            .map_err(|_| AddressParseError::InvalidLength(decoded.len()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// Who is calling, and when (host block time, seconds)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Call {
    pub caller: Address,
    pub now: u64,
}

impl Call {
    pub fn new(caller: Address, now: u64) -> Self {
        Self { caller, now }
    }
}
