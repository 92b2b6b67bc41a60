use std::sync::Arc;

use epg_common::{Address, TokenAmount};
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use serde_json::{json, Value};

use crate::{
    config::NodeConfig,
    helpers::{balance_of_calldata, parse_call_word, parse_quantity},
    RpcError,
};

/// A read-only client for an EVM node's JSON-RPC endpoint.
///
/// Cloning is cheap; the underlying HTTP connection pool is shared.
#[derive(Clone)]
pub struct EvmRpc {
    config: NodeConfig,
    client: Arc<Client>,
}

impl EvmRpc {
    pub fn new(config: NodeConfig) -> Result<Self, RpcError> {
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| RpcError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    /// Sends a single JSON-RPC 2.0 request and returns the `result` member of the response.
    pub async fn rpc_call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        trace!("⛓️ Sending RPC request: {body}");
        let response = self
            .client
            .post(self.config.rpc_url.reveal())
            .json(&body)
            .send()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| RpcError::Transport(e.to_string()))?;
            return Err(RpcError::QueryError { status, message });
        }
        let envelope = response.json::<Value>().await.map_err(|e| RpcError::InvalidResponse(e.to_string()))?;
        if let Some(err) = envelope.get("error").filter(|e| !e.is_null()) {
            let code = err["code"].as_i64().unwrap_or_default();
            let message = err["message"].as_str().unwrap_or("unspecified error").to_string();
            return Err(RpcError::Rpc { code, message });
        }
        trace!("⛓️ RPC response: {envelope}");
        match envelope.get("result") {
            Some(result) if !result.is_null() => Ok(result.clone()),
            _ => Err(RpcError::EmptyResponse),
        }
    }

    fn quantity_result(result: Value) -> Result<u128, RpcError> {
        let s = result.as_str().ok_or_else(|| RpcError::InvalidResponse(format!("expected a string, got {result}")))?;
        parse_quantity(s)
    }

    /// The node's current block height (`eth_blockNumber`).
    pub async fn block_number(&self) -> Result<u64, RpcError> {
        let result = self.rpc_call("eth_blockNumber", json!([])).await?;
        let height = Self::quantity_result(result)?;
        u64::try_from(height).map_err(|_| RpcError::InvalidResponse(format!("implausible block height {height}")))
    }

    /// The confirmed native-coin balance of `address`, in wei (`eth_getBalance` at `latest`).
    pub async fn native_balance(&self, address: &Address) -> Result<TokenAmount, RpcError> {
        let result = self.rpc_call("eth_getBalance", json!([address, "latest"])).await?;
        let balance = Self::quantity_result(result)?;
        debug!("⛓️ Native balance of {address}: {balance}");
        Ok(TokenAmount::from(balance))
    }

    /// The ERC-20 balance of `owner` as reported by the token contract at `contract`, in the token's base units.
    ///
    /// This is an `eth_call` against `balanceOf(address)`; no state is modified.
    pub async fn token_balance(&self, contract: &Address, owner: &Address) -> Result<TokenAmount, RpcError> {
        let call = json!([{ "to": contract, "data": balance_of_calldata(owner) }, "latest"]);
        let result = self.rpc_call("eth_call", call).await?;
        let s = result.as_str().ok_or_else(|| RpcError::InvalidResponse(format!("expected a string, got {result}")))?;
        let balance = parse_call_word(s)?;
        debug!("⛓️ Token balance of {owner} at {contract}: {balance}");
        Ok(balance)
    }
}
