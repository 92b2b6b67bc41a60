//! The closed set of assets the gateway accepts.
//!
//! Every supported asset is registered up front with its decimal scale and, for ERC-20 tokens, its contract address.
//! Order creation rejects unknown symbols, so the reconciliation loop only sees descriptors it can resolve. The
//! registry lookup there is still fallible to cope with configuration drift between restarts (an order stored under
//! a symbol that is no longer configured).
use std::collections::HashMap;

use epg_common::{from_base_units, to_base_units, Address, AmountError, TokenAmount};

/// Whether an asset is the chain's native coin or an ERC-20 token contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetKind {
    Native,
    Erc20 { contract: Address },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDescriptor {
    pub symbol: String,
    /// Number of decimal places in the asset's human representation (18 for ETH/MATIC, 6 for USDT).
    pub decimals: u8,
    pub kind: AssetKind,
}

impl AssetDescriptor {
    pub fn native(symbol: impl Into<String>, decimals: u8) -> Self {
        Self { symbol: symbol.into(), decimals, kind: AssetKind::Native }
    }

    pub fn erc20(symbol: impl Into<String>, decimals: u8, contract: Address) -> Self {
        Self { symbol: symbol.into(), decimals, kind: AssetKind::Erc20 { contract } }
    }

    /// Converts a decimal price string into this asset's smallest units. Exact; never floating point.
    pub fn base_units(&self, amount: &str) -> Result<TokenAmount, AmountError> {
        to_base_units(amount, self.decimals)
    }

    /// Renders a smallest-unit amount as a human decimal string with the symbol, e.g. `12.5 USDT`.
    pub fn display_amount(&self, amount: TokenAmount) -> String {
        format!("{} {}", from_base_units(amount, self.decimals), self.symbol)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    assets: HashMap<String, AssetDescriptor>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, asset: AssetDescriptor) -> &mut Self {
        self.assets.insert(asset.symbol.clone(), asset);
        self
    }

    pub fn with(mut self, asset: AssetDescriptor) -> Self {
        self.register(asset);
        self
    }

    pub fn get(&self, symbol: &str) -> Option<&AssetDescriptor> {
        self.assets.get(symbol)
    }

    pub fn is_supported(&self, symbol: &str) -> bool {
        self.assets.contains_key(symbol)
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.assets.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
