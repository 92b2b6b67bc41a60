// Not every test target uses every helper in here.
#![allow(dead_code)]
use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use epg_common::{Address, TokenAmount};
use epg_engine::{
    assets::{AssetDescriptor, AssetRegistry},
    db_types::{NewOrder, Order, OrderStatusType},
    traits::{ChainReader, ChainReaderError, OrderStore, OrderStoreError},
    SqliteDatabase,
};
use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite};

pub const USDT_CONTRACT: &str = "0xdac17f958d2ee523a2206206994597c13d831ec7";

/// Creates a fresh, fully migrated SQLite database at a random path for one test.
pub async fn prepare_test_env() -> SqliteDatabase {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    let url = format!("sqlite://../data/test_store_{}", rand::random::<u64>());
    if let Err(e) = Sqlite::drop_database(&url).await {
        warn!("Error dropping database {url}: {e:?}");
    }
    Sqlite::create_database(&url).await.expect("Error creating database");
    let db = SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating connection to database");
    epg_engine::run_migrations(db.pool()).await.expect("Error running DB migrations");
    info!("🚀️ Test database ready at {url}");
    db
}

pub fn test_assets() -> AssetRegistry {
    let usdt = USDT_CONTRACT.parse().unwrap();
    AssetRegistry::new()
        .with(AssetDescriptor::native("MATIC", 18))
        .with(AssetDescriptor::erc20("USDT", 6, usdt))
}

#[derive(Default)]
struct StubChainState {
    balances: HashMap<Address, TokenAmount>,
    failing: HashSet<Address>,
    height: u64,
}

/// An in-memory chain reader with scriptable balances and per-address failure injection.
#[derive(Clone, Default)]
pub struct StubChain {
    state: Arc<Mutex<StubChainState>>,
    queries: Arc<AtomicUsize>,
}

impl StubChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_balance(&self, address: &Address, amount: TokenAmount) {
        self.state.lock().unwrap().balances.insert(address.clone(), amount);
    }

    pub fn fail_address(&self, address: &Address) {
        self.state.lock().unwrap().failing.insert(address.clone());
    }

    pub fn clear_failure(&self, address: &Address) {
        self.state.lock().unwrap().failing.remove(address);
    }

    /// Total number of balance queries made against this stub.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn lookup(&self, address: &Address) -> Result<TokenAmount, ChainReaderError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        if state.failing.contains(address) {
            return Err(ChainReaderError::Unavailable(format!("injected failure for {address}")));
        }
        Ok(state.balances.get(address).copied().unwrap_or_default())
    }
}

/// An order store whose every query fails, for exercising the tick-abort path. Write attempts are counted so tests
/// can assert that nothing was processed.
#[derive(Clone, Default)]
pub struct OfflineStore {
    mark_paid_calls: Arc<AtomicUsize>,
}

impl OfflineStore {
    pub fn mark_paid_calls(&self) -> usize {
        self.mark_paid_calls.load(Ordering::SeqCst)
    }

    fn offline() -> OrderStoreError {
        OrderStoreError::DatabaseError("the order store is offline".to_string())
    }
}

impl OrderStore for OfflineStore {
    async fn insert_order(&self, _order: NewOrder, _address: Address) -> Result<Order, OrderStoreError> {
        Err(Self::offline())
    }

    async fn fetch_order_by_id(&self, _id: i64) -> Result<Option<Order>, OrderStoreError> {
        Err(Self::offline())
    }

    async fn fetch_orders_by_status(&self, _status: OrderStatusType) -> Result<Vec<Order>, OrderStoreError> {
        Err(Self::offline())
    }

    async fn mark_paid(&self, _id: i64) -> Result<Option<Order>, OrderStoreError> {
        self.mark_paid_calls.fetch_add(1, Ordering::SeqCst);
        Err(Self::offline())
    }
}

impl ChainReader for StubChain {
    async fn current_block(&self) -> Result<u64, ChainReaderError> {
        Ok(self.state.lock().unwrap().height)
    }

    async fn native_balance(&self, address: &Address) -> Result<TokenAmount, ChainReaderError> {
        self.lookup(address)
    }

    async fn token_balance(&self, _contract: &Address, owner: &Address) -> Result<TokenAmount, ChainReaderError> {
        self.lookup(owner)
    }
}
