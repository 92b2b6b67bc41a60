//! Adapter between the engine's [`ChainReader`] contract and the JSON-RPC client.
use epg_common::{Address, TokenAmount};
use epg_engine::traits::{ChainReader, ChainReaderError};
use evm_rpc::{EvmRpc, RpcError};

/// Read-only chain access for the reconciler and the order-creation route, backed by an EVM node.
#[derive(Clone)]
pub struct EthereumReader {
    rpc: EvmRpc,
}

impl EthereumReader {
    pub fn new(rpc: EvmRpc) -> Self {
        Self { rpc }
    }
}

fn to_chain_error(e: RpcError) -> ChainReaderError {
    match e {
        RpcError::InvalidResponse(_) | RpcError::EmptyResponse => ChainReaderError::InvalidResponse(e.to_string()),
        _ => ChainReaderError::Unavailable(e.to_string()),
    }
}

impl ChainReader for EthereumReader {
    async fn current_block(&self) -> Result<u64, ChainReaderError> {
        self.rpc.block_number().await.map_err(to_chain_error)
    }

    async fn native_balance(&self, address: &Address) -> Result<TokenAmount, ChainReaderError> {
        self.rpc.native_balance(address).await.map_err(to_chain_error)
    }

    async fn token_balance(&self, contract: &Address, owner: &Address) -> Result<TokenAmount, ChainReaderError> {
        self.rpc.token_balance(contract, owner).await.map_err(to_chain_error)
    }
}
