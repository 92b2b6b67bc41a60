//! A minimal, read-only JSON-RPC client for EVM blockchain nodes.
//!
//! The payment gateway only ever *observes* the chain: it reads the current block height, native-coin balances, and
//! ERC-20 balances (via `eth_call` against the token contract's `balanceOf`). Nothing here signs or submits
//! transactions, and no key material is handled.
mod api;
mod config;
mod error;
pub mod helpers;

pub use api::EvmRpc;
pub use config::NodeConfig;
pub use error::RpcError;
