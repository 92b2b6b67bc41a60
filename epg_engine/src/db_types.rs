use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use epg_common::Address;
use log::error;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

//--------------------------------------   OrderStatusType     -------------------------------------------------------
/// The payment state of an order. The only transition is `Pending` → `Paid`; paid orders never revert and orders are
/// never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum OrderStatusType {
    /// The order has been created and the expected amount has not yet arrived at the receiving address.
    Pending,
    /// The receiving address holds at least the expected amount.
    Paid,
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::Pending => write!(f, "Pending"),
            OrderStatusType::Paid => write!(f, "Paid"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid order status: {0}")]
pub struct StatusConversionError(String);

impl FromStr for OrderStatusType {
    type Err = StatusConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Paid" => Ok(Self::Paid),
            s => Err(StatusConversionError(s.to_string())),
        }
    }
}

impl From<String> for OrderStatusType {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid order status: {value}. But this conversion cannot fail. Defaulting to Pending");
            OrderStatusType::Pending
        })
    }
}

//--------------------------------------        Order       ----------------------------------------------------------
/// A payment order as stored in the database.
///
/// `address` is generated once at creation time and is exclusive to this order; `expected_amount` is an exact decimal
/// string and is immutable. The reconciler only ever touches `status` (and `updated_at`).
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    /// The single-use receiving address for this order.
    pub address: Address,
    /// The price as an exact decimal string, interpreted at the decimal scale of `token`.
    pub expected_amount: String,
    /// The symbol of the asset this order expects, e.g. `MATIC` or `USDT`.
    pub token: String,
    pub status: OrderStatusType,
    /// The chain height when the order was created. Recorded for audit purposes; the reconciler does not use it.
    pub creation_block: i64,
    /// Reserved for the settling transaction hash. The reconciliation flow does not populate it.
    pub tx_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------      NewOrder       ---------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// The price as an exact decimal string
    pub expected_amount: String,
    /// The symbol of the asset the customer will pay with
    pub token: String,
    /// The chain height at order-creation time
    pub creation_block: i64,
}

impl NewOrder {
    pub fn new(expected_amount: impl Into<String>, token: impl Into<String>, creation_block: i64) -> Self {
        Self { expected_amount: expected_amount.into(), token: token.into(), creation_block }
    }
}
