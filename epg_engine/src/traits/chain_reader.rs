use epg_common::{Address, TokenAmount};
use thiserror::Error;

/// Read-only access to a blockchain node.
///
/// All amounts are arbitrary-precision integers in the asset's smallest unit; interpreting them against a decimal
/// scale is the caller's job.
#[allow(async_fn_in_trait)]
pub trait ChainReader {
    /// The node's current block height.
    async fn current_block(&self) -> Result<u64, ChainReaderError>;

    /// The current confirmed balance of the chain's native coin at `address`, in wei.
    async fn native_balance(&self, address: &Address) -> Result<TokenAmount, ChainReaderError>;

    /// The balance of the fungible token at `contract` held by `owner`, as reported by the token contract's balance
    /// query.
    async fn token_balance(&self, contract: &Address, owner: &Address) -> Result<TokenAmount, ChainReaderError>;
}

#[derive(Debug, Clone, Error)]
pub enum ChainReaderError {
    #[error("The blockchain node could not be reached. {0}")]
    Unavailable(String),
    #[error("The blockchain node returned an unusable response. {0}")]
    InvalidResponse(String),
}
