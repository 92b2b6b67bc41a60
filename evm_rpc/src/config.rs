use std::time::Duration;

use epg_common::Secret;
use log::*;

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the EVM node.
///
/// Every request carries a hard timeout so that one unresponsive node call cannot stall the caller indefinitely.
/// Hosted RPC endpoints usually embed an API key in the URL, so the URL is a [`Secret`] and never appears in logs.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// The JSON-RPC endpoint of the node, e.g. `https://polygon-rpc.com`.
    pub rpc_url: Secret<String>,
    /// Upper bound on the round-trip time of a single RPC request.
    pub request_timeout: Duration,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self { rpc_url: Secret::new(DEFAULT_RPC_URL.to_string()), request_timeout: DEFAULT_REQUEST_TIMEOUT }
    }
}

impl NodeConfig {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self { rpc_url: Secret::new(rpc_url.into()), ..Default::default() }
    }

    pub fn new_from_env_or_default() -> Self {
        let rpc_url = std::env::var("EPG_RPC_URL").map(Secret::new).unwrap_or_else(|_| {
            warn!("🪛️ EPG_RPC_URL is not set. Using the local node default, {DEFAULT_RPC_URL}.");
            Secret::new(DEFAULT_RPC_URL.to_string())
        });
        let request_timeout = std::env::var("EPG_RPC_TIMEOUT")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| warn!("🪛️ Invalid configuration value for EPG_RPC_TIMEOUT. {e}"))
                    .ok()
            })
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        Self { rpc_url, request_timeout }
    }
}
