use std::time::Duration;

use epg_engine::assets::{AssetDescriptor, AssetRegistry};
use evm_rpc::NodeConfig;
use log::*;

pub const DEFAULT_EPG_HOST: &str = "127.0.0.1";
pub const DEFAULT_EPG_PORT: u16 = 3001;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/epg_store.db";
/// How often the reconciliation worker checks pending orders against the chain.
pub const DEFAULT_RECONCILE_INTERVAL: Duration = Duration::from_secs(10);
pub const DEFAULT_NATIVE_ASSET: &str = "MATIC:18";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub reconcile_interval: Duration,
    pub node: NodeConfig,
    pub assets: AssetRegistry,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_EPG_HOST.into(),
            port: DEFAULT_EPG_PORT,
            database_url: DEFAULT_DATABASE_URL.into(),
            reconcile_interval: DEFAULT_RECONCILE_INTERVAL,
            node: NodeConfig::default(),
            assets: default_assets(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.into(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = std::env::var("EPG_HOST").ok().unwrap_or_else(|| {
            warn!("🪛️ EPG_HOST is not set. Using the default, {DEFAULT_EPG_HOST}");
            DEFAULT_EPG_HOST.into()
        });
        let port = std::env::var("EPG_PORT")
            .map_err(|_| {
                warn!("🪛️ EPG_PORT is not set. Using the default, {DEFAULT_EPG_PORT}");
            })
            .and_then(|s| {
                s.parse::<u16>().map_err(|e| {
                    error!("🪛️ {s} is not a valid port for EPG_PORT. {e} Using the default, {DEFAULT_EPG_PORT}");
                })
            })
            .unwrap_or(DEFAULT_EPG_PORT);
        let database_url = std::env::var("EPG_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ EPG_DATABASE_URL is not set. Using the default, {DEFAULT_DATABASE_URL}");
            DEFAULT_DATABASE_URL.into()
        });
        let reconcile_interval = std::env::var("EPG_RECONCILE_INTERVAL")
            .map_err(|_| {
                warn!(
                    "🪛️ EPG_RECONCILE_INTERVAL is not set. Using the default, {}s",
                    DEFAULT_RECONCILE_INTERVAL.as_secs()
                );
            })
            .and_then(|s| {
                parse_interval_seconds(&s).map_err(|e| {
                    error!(
                        "🪛️ {s} is not usable for EPG_RECONCILE_INTERVAL. {e} Using the default, {}s",
                        DEFAULT_RECONCILE_INTERVAL.as_secs()
                    );
                })
            })
            .unwrap_or(DEFAULT_RECONCILE_INTERVAL);
        let node = NodeConfig::new_from_env_or_default();
        let assets = assets_from_env();
        Self { host, port, database_url, reconcile_interval, node, assets }
    }
}

fn default_assets() -> AssetRegistry {
    AssetRegistry::new().with(AssetDescriptor::native("MATIC", 18))
}

/// Builds the set of accepted assets from the environment.
///
/// `EPG_NATIVE_ASSET` holds the native coin as `SYMBOL:DECIMALS`, e.g. `MATIC:18`.
/// `EPG_ERC20_ASSETS` holds a comma-separated list of `SYMBOL:CONTRACT:DECIMALS` entries,
/// e.g. `USDT:0xc2132d05d31c914a87c6611c10748aeb04b58e8f:6`. Entries that do not parse are
/// skipped with an error log rather than taking the server down.
pub fn assets_from_env() -> AssetRegistry {
    let mut assets = AssetRegistry::new();
    let native = std::env::var("EPG_NATIVE_ASSET").ok().unwrap_or_else(|| {
        warn!("🪛️ EPG_NATIVE_ASSET is not set. Using the default, {DEFAULT_NATIVE_ASSET}");
        DEFAULT_NATIVE_ASSET.into()
    });
    match parse_native_asset(&native) {
        Ok(desc) => {
            assets.register(desc);
        },
        Err(e) => {
            error!("🪛️ Ignoring EPG_NATIVE_ASSET ({native}). {e}");
        },
    }
    if let Ok(list) = std::env::var("EPG_ERC20_ASSETS") {
        for entry in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match parse_erc20_asset(entry) {
                Ok(desc) => {
                    assets.register(desc);
                },
                Err(e) => {
                    error!("🪛️ Ignoring ERC-20 asset entry ({entry}). {e}");
                },
            }
        }
    } else {
        warn!("🪛️ EPG_ERC20_ASSETS is not set. Only the native asset will be accepted.");
    }
    if assets.is_empty() {
        warn!("🪛️ No assets are configured. Every order creation request will be rejected.");
    } else {
        info!("🪛️ Accepting payments in: {}", assets.symbols().join(", "));
    }
    assets
}

/// The reconciliation timer panics on a zero period, so a zero interval is rejected here along with everything
/// non-numeric.
fn parse_interval_seconds(s: &str) -> Result<Duration, String> {
    let secs = s.parse::<u64>().map_err(|e| format!("Not a valid number of seconds. {e}"))?;
    if secs == 0 {
        return Err("The interval must be at least one second.".to_string());
    }
    Ok(Duration::from_secs(secs))
}

fn parse_native_asset(s: &str) -> Result<AssetDescriptor, String> {
    let (symbol, decimals) = s.split_once(':').ok_or_else(|| "Expected SYMBOL:DECIMALS".to_string())?;
    let decimals = decimals.parse::<u8>().map_err(|e| format!("Invalid decimals. {e}"))?;
    Ok(AssetDescriptor::native(symbol, decimals))
}

fn parse_erc20_asset(s: &str) -> Result<AssetDescriptor, String> {
    let mut parts = s.split(':');
    let (symbol, contract, decimals) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(sym), Some(contract), Some(dec), None) => (sym, contract, dec),
        _ => return Err("Expected SYMBOL:CONTRACT:DECIMALS".to_string()),
    };
    let contract = contract.parse().map_err(|e| format!("Invalid contract address. {e}"))?;
    let decimals = decimals.parse::<u8>().map_err(|e| format!("Invalid decimals. {e}"))?;
    Ok(AssetDescriptor::erc20(symbol, decimals, contract))
}
