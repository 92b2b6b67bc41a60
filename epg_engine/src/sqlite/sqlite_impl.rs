//! `SqliteDatabase` is the concrete [`OrderStore`] backend for the payment gateway.
use std::fmt::Debug;

use epg_common::Address;
use log::*;
use sqlx::SqlitePool;

use super::db::{new_pool, orders};
use crate::{
    db_types::{NewOrder, Order, OrderStatusType},
    traits::{OrderStore, OrderStoreError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new connection pool with the given URL and the given maximum number of connections.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Brings the schema up to date. Called on server startup and by the test environment.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), OrderStoreError> {
    sqlx::migrate!("./src/sqlite/migrations")
        .run(pool)
        .await
        .map_err(|e| OrderStoreError::DatabaseError(e.to_string()))?;
    info!("🚀️ Migrations complete");
    Ok(())
}

impl OrderStore for SqliteDatabase {
    async fn insert_order(&self, order: NewOrder, address: Address) -> Result<Order, OrderStoreError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::insert_order(order, address, &mut conn).await?;
        debug!("📝️ Order #{} has been saved in the DB for address {}", order.id, order.address);
        Ok(order)
    }

    async fn fetch_order_by_id(&self, id: i64) -> Result<Option<Order>, OrderStoreError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order_by_id(id, &mut conn).await?;
        Ok(order)
    }

    async fn fetch_orders_by_status(&self, status: OrderStatusType) -> Result<Vec<Order>, OrderStoreError> {
        let mut conn = self.pool.acquire().await?;
        let orders = orders::fetch_orders_by_status(status, &mut conn).await?;
        Ok(orders)
    }

    async fn mark_paid(&self, id: i64) -> Result<Option<Order>, OrderStoreError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::mark_paid(id, &mut conn).await?;
        if let Some(order) = &order {
            debug!("📝️ Order #{} marked as Paid", order.id);
        }
        Ok(order)
    }

    async fn close(&mut self) -> Result<(), OrderStoreError> {
        self.pool.close().await;
        Ok(())
    }
}
