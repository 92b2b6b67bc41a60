use epg_common::Address;
use thiserror::Error;

use crate::db_types::{NewOrder, Order, OrderStatusType};

/// The durable mapping from order id to order record.
///
/// The store is shared with the order-creation side, but the mutation surface is deliberately narrow: the only write
/// the reconciler can perform is the `Pending` → `Paid` transition via [`OrderStore::mark_paid`]. There is no general
/// record update, so immutable fields (`address`, `expected_amount`, `token`) stay immutable by construction.
#[allow(async_fn_in_trait)]
pub trait OrderStore {
    /// Persists a new order. The receiving address must be unique across all orders, ever.
    async fn insert_order(&self, order: NewOrder, address: Address) -> Result<Order, OrderStoreError>;

    /// Point lookup by store-assigned id.
    async fn fetch_order_by_id(&self, id: i64) -> Result<Option<Order>, OrderStoreError>;

    /// All orders currently in the given status, in no particular order.
    async fn fetch_orders_by_status(&self, status: OrderStatusType) -> Result<Vec<Order>, OrderStoreError>;

    /// Idempotently transitions the order to `Paid`.
    ///
    /// Returns the updated record, or `None` (without error) when the order is already paid or does not exist, so
    /// a stale or repeated call can never abort a reconciliation batch.
    async fn mark_paid(&self, id: i64) -> Result<Option<Order>, OrderStoreError>;

    async fn close(&mut self) -> Result<(), OrderStoreError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Error)]
pub enum OrderStoreError {
    #[error("Internal database error: {0}")]
    DatabaseError(String),
    #[error("An order already uses the receiving address {0}")]
    AddressAlreadyInUse(String),
}

impl From<sqlx::Error> for OrderStoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                OrderStoreError::AddressAlreadyInUse(db.message().to_string())
            },
            _ => OrderStoreError::DatabaseError(e.to_string()),
        }
    }
}
