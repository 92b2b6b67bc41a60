use chrono::{DateTime, Utc};
use epg_common::Address;
use epg_engine::db_types::{Order, OrderStatusType};
use serde::{Deserialize, Serialize};

/// Request body for creating a new payment order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPaymentParams {
    /// Decimal price string in the token's human units, e.g. "10.50".
    pub amount: String,
    /// Token symbol, which must be one of the configured assets.
    pub token: String,
}

/// Everything a shopper needs to pay: the order id to poll on and the single-use address to send funds to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOrderResult {
    pub order_id: i64,
    pub address: Address,
    pub amount: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for PaymentOrderResult {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.id,
            address: order.address,
            amount: order.expected_amount,
            token: order.token,
            created_at: order.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusResult {
    pub order_id: i64,
    pub status: OrderStatusType,
    pub address: Address,
    pub amount: String,
    pub token: String,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderStatusResult {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.id,
            status: order.status,
            address: order.address,
            amount: order.expected_amount,
            token: order.token,
            updated_at: order.updated_at,
        }
    }
}
