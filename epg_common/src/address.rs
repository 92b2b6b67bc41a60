use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

//--------------------------------------       Address        --------------------------------------------------------
/// A lightweight wrapper around a `0x`-prefixed, lowercase hex EVM address.
///
/// The wrapper normalises case on parsing, so two addresses that differ only in checksum casing compare equal.
#[derive(Clone, Debug, Type, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct Address(String);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("'{0}' is not a valid EVM address")]
pub struct AddressParseError(pub String);

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).ok_or_else(|| AddressParseError(s.into()))?;
        if digits.len() != 40 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AddressParseError(s.into()));
        }
        Ok(Self(format!("0x{}", digits.to_ascii_lowercase())))
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Address {
    pub fn from_bytes(bytes: &[u8; 20]) -> Self {
        let mut s = String::with_capacity(42);
        s.push_str("0x");
        for b in bytes {
            s.push_str(&format!("{b:02x}"));
        }
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 40 hex digits without the `0x` prefix.
    pub fn hex_digits(&self) -> &str {
        &self.0[2..]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_and_normalises_case() {
        let addr = "0xDAC17F958D2EE523A2206206994597C13D831EC7".parse::<Address>().unwrap();
        assert_eq!(addr.as_str(), "0xdac17f958d2ee523a2206206994597c13d831ec7");
        assert_eq!(addr.hex_digits().len(), 40);
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!("dac17f958d2ee523a2206206994597c13d831ec7".parse::<Address>().is_err());
        assert!("0x1234".parse::<Address>().is_err());
        assert!("0xzzc17f958d2ee523a2206206994597c13d831ec7".parse::<Address>().is_err());
    }

    #[test]
    fn from_bytes_round_trip() {
        let addr = Address::from_bytes(&[0xee; 20]);
        assert_eq!(addr.as_str(), "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee");
        assert_eq!(addr, addr.as_str().parse().unwrap());
    }
}
