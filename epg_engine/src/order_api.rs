//! The order-creation and status-query API used by the HTTP layer.
use std::fmt::Debug;

use epg_common::AmountError;
use log::*;
use thiserror::Error;

use crate::{
    assets::AssetRegistry,
    db_types::{NewOrder, Order},
    helpers::new_receiving_address,
    traits::{OrderStore, OrderStoreError},
};

#[derive(Debug, Clone, Error)]
pub enum OrderApiError {
    /// The requested token symbol is not in the configured asset set. Rejected here, at creation time, so the
    /// reconciliation loop never has to deal with orders it cannot price.
    #[error("Token '{0}' is not supported by this gateway")]
    UnsupportedToken(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),
    #[error(transparent)]
    Store(#[from] OrderStoreError),
}

pub struct OrderApi<B> {
    db: B,
    assets: AssetRegistry,
}

impl<B> Debug for OrderApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderApi")
    }
}

impl<B> OrderApi<B>
where B: OrderStore
{
    pub fn new(db: B, assets: AssetRegistry) -> Self {
        Self { db, assets }
    }

    pub fn assets(&self) -> &AssetRegistry {
        &self.assets
    }

    /// Creates a new payment order: validates the token and amount, generates a fresh single-use receiving address,
    /// and persists the record in `Pending` status.
    pub async fn create_order(&self, order: NewOrder) -> Result<Order, OrderApiError> {
        let asset =
            self.assets.get(&order.token).ok_or_else(|| OrderApiError::UnsupportedToken(order.token.clone()))?;
        // Validate the price up front; the stored string must convert exactly at this asset's decimal scale
        let expected = asset.base_units(&order.expected_amount)?;
        let address = new_receiving_address();
        let order = self.db.insert_order(order, address).await?;
        info!(
            "📦️ Order #{} created: expecting {} {} ({expected} base units) at {}",
            order.id, order.expected_amount, order.token, order.address
        );
        Ok(order)
    }

    /// Point status lookup. `None` when no order with this id exists.
    pub async fn order_status(&self, id: i64) -> Result<Option<Order>, OrderApiError> {
        let order = self.db.fetch_order_by_id(id).await?;
        Ok(order)
    }
}
